// Generic AXL operation families: get/add/update/remove/reset/list plus
// the extension-mobility verbs. Every AXL object type shares these
// request shapes; only the type name changes (`getPhone`, `getUser`, ...).

use tracing::debug;
use uuid::Uuid;

use crate::client::AxlClient;
use crate::error::Error;
use crate::value::{AxlRecord, AxlValue, FkRef};

impl AxlClient {
    /// Fetch one object via `get<Type>`.
    ///
    /// `criteria` identifies the object (`name`, `uuid`, `userid`, or
    /// whatever the type's get request accepts). The returned record
    /// carries the server's uuid attribute.
    pub async fn get_object(
        &self,
        object_type: &str,
        criteria: &AxlRecord,
    ) -> Result<AxlRecord, Error> {
        let operation = format!("get{object_type}");
        let element = element_name(object_type);
        let value = self.call(&operation, criteria).await?;

        let AxlValue::Node(mut wrapper) = value else {
            return Err(Error::UnexpectedResponse(format!(
                "{operation} returned no payload"
            )));
        };
        match wrapper.remove(&element) {
            Some(AxlValue::Node(record)) => Ok(record),
            _ => Err(Error::UnexpectedResponse(format!(
                "missing <{element}> in {operation} response"
            ))),
        }
    }

    /// Create an object via `add<Type>`, returning its new uuid.
    pub async fn add_object(
        &self,
        object_type: &str,
        fields: AxlRecord,
    ) -> Result<Uuid, Error> {
        let operation = format!("add{object_type}");
        let body = AxlRecord::new().with(element_name(object_type), fields);
        let value = self.call(&operation, &body).await?;

        value.uuid().ok_or_else(|| {
            Error::UnexpectedResponse(format!("{operation} returned no uuid"))
        })
    }

    /// Apply a partial update via `update<Type>`.
    ///
    /// Only the fields present in `fields` are sent; the server leaves
    /// everything else untouched.
    pub async fn update_object(
        &self,
        object_type: &str,
        uuid: Uuid,
        fields: AxlRecord,
    ) -> Result<(), Error> {
        let operation = format!("update{object_type}");
        let mut body = AxlRecord::new();
        body.set("uuid", uuid);
        for (name, value) in fields {
            body.set(name, value);
        }
        self.call(&operation, &body).await?;
        Ok(())
    }

    /// Delete an object via `remove<Type>`.
    pub async fn remove_object(&self, object_type: &str, uuid: Uuid) -> Result<(), Error> {
        let operation = format!("remove{object_type}");
        let body = AxlRecord::new().with("uuid", uuid);
        self.call(&operation, &body).await?;
        Ok(())
    }

    /// Reset a device via `reset<Type>` (the device re-registers).
    pub async fn reset_object(&self, object_type: &str, uuid: Uuid) -> Result<(), Error> {
        let operation = format!("reset{object_type}");
        let body = AxlRecord::new().with("uuid", uuid);
        self.call(&operation, &body).await?;
        Ok(())
    }

    /// Enumerate objects via `list<Type>`.
    ///
    /// `returned_tags` names the fields the server should include on each
    /// row; `skip`/`first` page the result. CUCM rejects `first` without
    /// `skip`, so `skip` defaults to 0 when only `first` is given.
    pub async fn list_objects(
        &self,
        object_type: &str,
        criteria: &AxlRecord,
        returned_tags: &[&str],
        skip: Option<u64>,
        first: Option<u64>,
    ) -> Result<Vec<AxlRecord>, Error> {
        let operation = format!("list{object_type}");
        let element = element_name(object_type);

        let mut tags = AxlRecord::new();
        for tag in returned_tags {
            tags.set(*tag, AxlValue::Empty);
        }
        let mut body = AxlRecord::new()
            .with("searchCriteria", criteria.clone())
            .with("returnedTags", tags);
        let skip = match (skip, first) {
            (None, Some(_)) => Some(0),
            (skip, _) => skip,
        };
        if let Some(skip) = skip {
            body.set("skip", skip);
        }
        if let Some(first) = first {
            body.set("first", first);
        }

        let value = self.call(&operation, &body).await?;
        let mut wrapper = match value {
            // No <return> at all: nothing matched.
            AxlValue::Empty => return Ok(Vec::new()),
            AxlValue::Node(record) => record,
            _ => {
                return Err(Error::UnexpectedResponse(format!(
                    "{operation} returned a non-record payload"
                )));
            }
        };

        let rows = wrapper
            .remove(&element)
            .map(AxlValue::into_items)
            .unwrap_or_default();
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match row {
                AxlValue::Node(record) => records.push(record),
                // A row with a uuid attribute and no returned tags parses
                // as a bare reference; keep the uuid.
                AxlValue::Fk(fk) => {
                    let mut record = AxlRecord::new();
                    record.uuid = fk.uuid;
                    records.push(record);
                }
                _ => {
                    return Err(Error::UnexpectedResponse(format!(
                        "non-record <{element}> entry in {operation} response"
                    )));
                }
            }
        }

        debug!(object_type, count = records.len(), "listed objects");
        Ok(records)
    }

    // ── Extension mobility ───────────────────────────────────────────

    /// Log a user's device profile into a physical phone via `doDeviceLogin`.
    ///
    /// Device and profile are references (name or uuid); `login_duration`
    /// is in seconds, 0 meaning no expiry.
    pub async fn device_login(
        &self,
        device: &FkRef,
        login_duration: u64,
        profile: &FkRef,
        user_id: &str,
    ) -> Result<(), Error> {
        debug!(user_id, "extension mobility login");
        let body = AxlRecord::new()
            .with("deviceName", device.clone())
            .with("loginDuration", login_duration)
            .with("profileName", profile.clone())
            .with("userId", user_id);
        self.call("doDeviceLogin", &body).await?;
        Ok(())
    }

    /// Log whatever profile is active out of a phone via `doDeviceLogout`.
    pub async fn device_logout(&self, device: &FkRef) -> Result<(), Error> {
        debug!("extension mobility logout");
        let body = AxlRecord::new().with("deviceName", device.clone());
        self.call("doDeviceLogout", &body).await?;
        Ok(())
    }
}

/// The response element for an object type: `Phone` → `phone`,
/// `CtiRoutePoint` → `ctiRoutePoint`.
pub(crate) fn element_name(object_type: &str) -> String {
    let mut chars = object_type.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
