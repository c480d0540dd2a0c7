// Directory-number behavior: detached construction with the vendor's
// mandatory usage discriminator, plus the SQL-backed owner lookups.

use axletree_api::AxlClient;

use crate::error::CcmError;
use crate::model::{Line, User};
use crate::sql::{DeviceAssociation, SqlUtils};

impl Line {
    /// A detached directory number ready to `create`. `addLine` refuses
    /// requests without `usage`, so it defaults to `Device`; intercom
    /// DNs overwrite it before creating.
    pub fn with_pattern(pattern: impl Into<String>, route_partition: Option<&str>) -> Self {
        let mut line = Self::new();
        line.set("pattern", pattern.into());
        line.set("usage", "Device");
        if let Some(partition) = route_partition {
            line.set("routePartitionName", partition);
        }
        line
    }

    /// Users that hold this DN as a primary extension, loaded in full.
    /// One `get` round trip per user.
    pub async fn primary_users(&self, client: &AxlClient) -> Result<Vec<User>, CcmError> {
        let uuid = self.require_attached("primary users")?;
        let user_uuids = SqlUtils::new(client).line_user_map(uuid).await?;
        let mut users = Vec::with_capacity(user_uuids.len());
        for user in user_uuids {
            users.push(User::get_by_uuid(client, user).await?);
        }
        Ok(users)
    }

    /// Devices that present this DN, straight from the device map rows.
    pub async fn associated_devices(
        &self,
        client: &AxlClient,
    ) -> Result<Vec<DeviceAssociation>, CcmError> {
        let uuid = self.require_attached("associated devices")?;
        SqlUtils::new(client).line_device_map(uuid).await
    }
}
