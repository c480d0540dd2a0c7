// Remote-destination behavior. The vendor's AXL surface cannot read or
// write the single-number-reach flag, so both directions go through the
// SQL channel against the dynamic table.

use axletree_api::{AxlClient, Error};

use crate::error::CcmError;
use crate::model::RemoteDestination;
use crate::sql::SqlUtils;

impl RemoteDestination {
    /// Whether single number reach is enabled for this destination.
    pub async fn single_number_reach(&self, client: &AxlClient) -> Result<bool, CcmError> {
        let uuid = self.require_attached("single number reach")?;
        let Some(enabled) = SqlUtils::new(client).single_number_reach(uuid).await? else {
            return Err(CcmError::Api(Error::UnexpectedResponse(
                "remotedestinationdynamic row is missing".to_owned(),
            )));
        };
        Ok(enabled)
    }

    /// Enable or disable single number reach for this destination.
    pub async fn set_single_number_reach(
        &self,
        client: &AxlClient,
        enabled: bool,
    ) -> Result<(), CcmError> {
        let uuid = self.require_attached("single number reach")?;
        SqlUtils::new(client).set_single_number_reach(uuid, enabled).await?;
        Ok(())
    }
}
