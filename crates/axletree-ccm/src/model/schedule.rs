// Time-schedule membership. Member changes go through the vendor's
// partial update elements (addMembers / removeMembers) directly, not
// through dirty tracking, so the local record never holds them.

use tracing::info;
use uuid::Uuid;

use axletree_api::{AxlClient, AxlRecord, AxlValue, FkRef};

use crate::entity::Entity;
use crate::error::CcmError;
use crate::model::{TimeSchedule, kind};

impl TimeSchedule {
    /// Add time periods to this schedule, by reference.
    pub async fn add_members(&self, client: &AxlClient, periods: &[Uuid]) -> Result<(), CcmError> {
        self.update_members(client, "addMembers", periods).await
    }

    /// Remove time periods from this schedule, by reference.
    pub async fn remove_members(
        &self,
        client: &AxlClient,
        periods: &[Uuid],
    ) -> Result<(), CcmError> {
        self.update_members(client, "removeMembers", periods).await
    }

    async fn update_members(
        &self,
        client: &AxlClient,
        element: &str,
        periods: &[Uuid],
    ) -> Result<(), CcmError> {
        let uuid = self.require_attached("update members")?;
        if periods.is_empty() {
            return Ok(());
        }
        let members: Vec<AxlValue> = periods
            .iter()
            .map(|period| {
                AxlValue::Node(AxlRecord::new().with("timePeriodName", FkRef::by_uuid(*period)))
            })
            .collect();
        let fields = AxlRecord::new()
            .with(element, AxlValue::Node(AxlRecord::new().with("member", members)));
        client
            .update_object(kind::TimeSchedule::NAME, uuid, fields)
            .await
            .map_err(|source| CcmError::Update { entity: kind::TimeSchedule::NAME, source })?;
        info!(%uuid, element, count = periods.len(), "schedule members updated");
        Ok(())
    }
}
