// End-user behavior: device association, profile references, and the
// SQL-backed mobility and presence-licensing helpers.

use axletree_api::{AxlClient, AxlRecord, AxlValue, FkRef};

use crate::error::CcmError;
use crate::model::{DeviceProfile, Phone, User};
use crate::sql::SqlUtils;

impl User {
    /// Device names currently associated with this user.
    pub fn associated_devices(&self) -> Vec<&str> {
        self.record()
            .node("associatedDevices")
            .and_then(|node| node.get("device"))
            .map(|devices| devices.items().iter().filter_map(AxlValue::as_text).collect())
            .unwrap_or_default()
    }

    /// Replace the user's associated devices with the given device names.
    /// An empty set clears the association server-side.
    pub fn set_associated_devices<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let devices: Vec<AxlValue> =
            names.into_iter().map(|name| AxlValue::from(name.into())).collect();
        if devices.is_empty() {
            self.set("associatedDevices", AxlValue::Empty);
        } else {
            self.set(
                "associatedDevices",
                AxlValue::Node(AxlRecord::new().with("device", devices)),
            );
        }
    }

    /// Associate more devices, keeping the existing ones. Duplicates are
    /// dropped; existing devices keep their position.
    pub fn add_associated_devices<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut devices: Vec<String> =
            self.associated_devices().into_iter().map(str::to_owned).collect();
        for name in names {
            let name = name.into();
            if !devices.contains(&name) {
                devices.push(name);
            }
        }
        self.set_associated_devices(devices);
    }

    /// Replace the CTI-controlled device profiles. Profiles travel as
    /// uuid references, so each must be attached.
    pub fn set_cti_controlled_device_profiles(
        &mut self,
        profiles: &[&DeviceProfile],
    ) -> Result<(), CcmError> {
        let refs = profile_refs(profiles)?;
        self.set("ctiControlledDeviceProfiles", refs);
        Ok(())
    }

    /// Replace the extension-mobility phone profiles available to this
    /// user. Profiles travel as uuid references, so each must be attached.
    pub fn set_phone_profiles(&mut self, profiles: &[&DeviceProfile]) -> Result<(), CcmError> {
        let refs = profile_refs(profiles)?;
        self.set("phoneProfiles", refs);
        Ok(())
    }

    /// Phones mapped to this user in the mobility device map, loaded in
    /// full. One `get` round trip per device.
    pub async fn mobility_devices(&self, client: &AxlClient) -> Result<Vec<Phone>, CcmError> {
        let uuid = self.require_attached("mobility devices")?;
        let device_uuids = SqlUtils::new(client).user_device_map(uuid).await?;
        let mut phones = Vec::with_capacity(device_uuids.len());
        for device in device_uuids {
            phones.push(Phone::get_by_uuid(client, device).await?);
        }
        Ok(phones)
    }

    /// The user's presence licensing as `(cups, cupc)` flags, or `None`
    /// when the user has no license row.
    pub async fn presence_license(
        &self,
        client: &AxlClient,
    ) -> Result<Option<(bool, bool)>, CcmError> {
        let uuid = self.require_attached("presence license")?;
        let row = SqlUtils::new(client).presence_license(uuid).await?;
        Ok(row.map(|license| (license.cups, license.cupc)))
    }

    /// Grant or revoke presence licensing. The CUPC client feature rides
    /// on CUPS, so `cupc` without `cups` is rejected locally.
    pub async fn set_presence_license(
        &self,
        client: &AxlClient,
        cups: bool,
        cupc: bool,
    ) -> Result<(), CcmError> {
        if cupc && !cups {
            return Err(CcmError::InvalidArgument(
                "cupc requires cups to be enabled".into(),
            ));
        }
        let uuid = self.require_attached("presence license")?;
        let sql = SqlUtils::new(client);
        match (sql.presence_license(uuid).await?, cups) {
            (None, true) => {
                sql.insert_presence_license(uuid, cupc).await?;
            }
            (None, false) => {}
            (Some(_), true) => {
                sql.update_presence_license(uuid, cupc).await?;
            }
            (Some(_), false) => {
                sql.remove_presence_license(uuid).await?;
            }
        }
        Ok(())
    }
}

fn profile_refs(profiles: &[&DeviceProfile]) -> Result<AxlValue, CcmError> {
    if profiles.is_empty() {
        return Ok(AxlValue::Empty);
    }
    let mut names = Vec::with_capacity(profiles.len());
    for profile in profiles {
        let uuid = profile.require_attached("associate")?;
        names.push(AxlValue::Fk(FkRef::by_uuid(uuid)));
    }
    Ok(AxlValue::Node(AxlRecord::new().with("profileName", names)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_associated_devices_builds_the_device_list() {
        let mut user = User::new();
        user.set_associated_devices(["SEP001122334455", "CSFJDOE"]);
        assert_eq!(user.associated_devices(), ["SEP001122334455", "CSFJDOE"]);
    }

    #[test]
    fn empty_device_set_clears_the_field() {
        let mut user = User::new();
        user.set_associated_devices(["SEP001122334455"]);
        user.set_associated_devices::<[&str; 0], &str>([]);
        assert_eq!(user.field("associatedDevices"), Some(&AxlValue::Empty));
        assert!(user.associated_devices().is_empty());
    }

    #[test]
    fn add_associated_devices_unions_in_order() {
        let mut user = User::new();
        user.set_associated_devices(["SEP001122334455"]);
        user.add_associated_devices(["CSFJDOE", "SEP001122334455", "BOTJDOE"]);
        assert_eq!(
            user.associated_devices(),
            ["SEP001122334455", "CSFJDOE", "BOTJDOE"]
        );
    }

    #[test]
    fn profile_references_demand_attachment() {
        let mut user = User::new();
        let detached = DeviceProfile::new();
        let err = user.set_phone_profiles(&[&detached]).unwrap_err();
        assert!(matches!(err, CcmError::NotAttached { entity: "DeviceProfile", .. }));
    }

    #[test]
    fn cupc_without_cups_is_rejected_before_any_io() {
        let user = User::new();
        let err = tokio_test::block_on(user.set_presence_license(
            &test_client(),
            false,
            true,
        ))
        .unwrap_err();
        assert!(matches!(err, CcmError::InvalidArgument(_)));
    }

    fn test_client() -> AxlClient {
        use axletree_api::{Credentials, SchemaVersion};
        AxlClient::with_endpoint(
            reqwest::Client::new(),
            "https://ccm.example.org:8443/axl/".parse().unwrap(),
            SchemaVersion::V12_5,
            Credentials::new("axl", "secret"),
        )
    }
}
