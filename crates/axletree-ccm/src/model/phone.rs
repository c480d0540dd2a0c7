// Device-side behavior: line appearances for every line-holding device
// class, plus the phone-only vendor config bag and extension mobility.

use indexmap::IndexMap;

use axletree_api::{AxlClient, AxlRecord, AxlValue, FkRef};

use crate::entity::LineHolder;
use crate::error::CcmError;
use crate::model::supporting::{DirectoryNumberRef, LineAppearance};
use crate::model::{DeviceProfile, Line, Phone, User};
use crate::object::CucmObject;

impl<E: LineHolder> CucmObject<E> {
    /// Replace the device's line appearances with the given directory
    /// numbers, one appearance each, buttons numbered from 1.
    pub fn set_lines(&mut self, lines: &[&Line]) -> Result<(), CcmError> {
        let mut appearances = Vec::with_capacity(lines.len());
        for (index, line) in (1u64..).zip(lines) {
            appearances.push(appearance_for(index, line)?);
        }
        self.set_line_appearances(appearances);
        Ok(())
    }

    /// Replace the device's line appearances with explicit values.
    pub fn set_line_appearances(&mut self, appearances: impl IntoIterator<Item = LineAppearance>) {
        self.set("lines", lines_element(appearances));
    }

    /// Queue appearance removals; the server drops them on `update`.
    pub fn remove_line_appearances(
        &mut self,
        appearances: impl IntoIterator<Item = LineAppearance>,
    ) {
        self.set("removeLines", lines_element(appearances));
    }
}

fn lines_element(appearances: impl IntoIterator<Item = LineAppearance>) -> AxlValue {
    let lines: Vec<AxlValue> = appearances.into_iter().map(AxlValue::from).collect();
    if lines.is_empty() {
        AxlValue::Empty
    } else {
        AxlValue::Node(AxlRecord::new().with("line", lines))
    }
}

fn appearance_for(index: u64, line: &Line) -> Result<LineAppearance, CcmError> {
    let uuid = line.uuid();
    let pattern = line.text("pattern");
    if uuid.is_none() && pattern.is_none() {
        return Err(CcmError::InvalidArgument(
            "line carries neither a uuid nor a pattern".into(),
        ));
    }
    let dirn = DirectoryNumberRef {
        uuid,
        pattern: pattern.map(str::to_owned),
        route_partition: line.text("routePartitionName").map(str::to_owned),
    };
    Ok(LineAppearance::new(index, dirn))
}

impl Phone {
    /// The model-specific vendor config as flat setting → value pairs.
    /// Settings the phone model leaves empty come back as empty strings.
    pub fn vendor_config(&self) -> IndexMap<String, String> {
        let mut out = IndexMap::new();
        if let Some(node) = self.record().node("vendorConfig") {
            for (name, value) in node {
                match value {
                    AxlValue::Text(text) => {
                        out.insert(name.clone(), text.clone());
                    }
                    AxlValue::Empty => {
                        out.insert(name.clone(), String::new());
                    }
                    _ => {}
                }
            }
        }
        out
    }

    /// Replace the vendor config with the given setting → value pairs.
    pub fn set_vendor_config<I, K, V>(&mut self, settings: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut node = AxlRecord::new();
        for (name, value) in settings {
            let value: String = value.into();
            node.set(name, value);
        }
        self.set("vendorConfig", AxlValue::Node(node));
    }

    /// Extension-mobility login: bring `profile` up on this phone as
    /// `user`. `duration` is in seconds; 0 means until explicit logout.
    pub async fn login(
        &self,
        client: &AxlClient,
        user: &User,
        profile: &DeviceProfile,
        duration: u64,
    ) -> Result<(), CcmError> {
        let device = self.require_attached("login")?;
        let profile_uuid = profile.require_attached("login")?;
        let Some(user_id) = user.text("userid") else {
            return Err(CcmError::InvalidArgument("user carries no userid".into()));
        };
        client
            .device_login(
                &FkRef::by_uuid(device),
                duration,
                &FkRef::by_uuid(profile_uuid),
                user_id,
            )
            .await?;
        Ok(())
    }

    /// Extension-mobility logout, back to the phone's own configuration.
    pub async fn logout(&self, client: &AxlClient) -> Result<(), CcmError> {
        let device = self.require_attached("logout")?;
        client.device_logout(&FkRef::by_uuid(device)).await?;
        Ok(())
    }
}
