// Attachment lifecycle and dirty tracking.
//
// A `CucmObject` is either detached (exists only locally) or attached
// (the server has assigned it a uuid). Loads never mark fields dirty;
// field writes on an attached object are tracked, and `update` submits
// only the tracked deltas, renamed per the entity's metadata. The state
// machine is detached → attached → detached, nothing else.

use std::marker::PhantomData;

use tracing::{debug, info};
use uuid::Uuid;

use axletree_api::{AxlClient, AxlRecord, AxlValue, Error};

use crate::entity::{Entity, Template, renamed_field};
use crate::error::CcmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Attachment {
    #[default]
    Detached,
    Attached(Uuid),
}

/// One CUCM object of entity type `E`.
///
/// Fields serialize in insertion order. AXL validates request bodies
/// against XSD sequences, so callers building detached objects should
/// set fields in the schema's documented order.
#[derive(Debug, Clone)]
pub struct CucmObject<E> {
    fields: AxlRecord,
    pending: AxlRecord,
    attachment: Attachment,
    _entity: PhantomData<E>,
}

impl<E> Default for CucmObject<E> {
    fn default() -> Self {
        Self {
            fields: AxlRecord::new(),
            pending: AxlRecord::new(),
            attachment: Attachment::Detached,
            _entity: PhantomData,
        }
    }
}

impl<E> CucmObject<E> {
    /// An empty detached object.
    pub fn new() -> Self {
        Self::default()
    }

    /// A detached object pre-seeded with fields, ready to `create`.
    pub fn from_record(mut fields: AxlRecord) -> Self {
        fields.uuid = None;
        Self {
            fields,
            pending: AxlRecord::new(),
            attachment: Attachment::Detached,
            _entity: PhantomData,
        }
    }

    /// The server-assigned identifier, if attached.
    pub fn uuid(&self) -> Option<Uuid> {
        match self.attachment {
            Attachment::Attached(uuid) => Some(uuid),
            Attachment::Detached => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.attachment, Attachment::Attached(_))
    }

    pub fn field(&self, name: &str) -> Option<&AxlValue> {
        self.fields.get(name)
    }

    /// The text content of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.text(name)
    }

    /// A boolean field, interpreted per AXL's "true"/"false" spelling.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.text(name).map(crate::convert::axl_bool)
    }

    /// The full local record.
    pub fn record(&self) -> &AxlRecord {
        &self.fields
    }

    /// The tracked changes awaiting the next `update`.
    pub fn pending(&self) -> &AxlRecord {
        &self.pending
    }

    /// Write a field. On an attached object the write is tracked and
    /// submitted by the next `update`; on a detached object it simply
    /// becomes part of the record `create` submits.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AxlValue>) {
        let name = name.into();
        let value = value.into();
        if self.is_attached() {
            self.pending.set(name.clone(), value.clone());
        }
        self.fields.set(name, value);
    }

    /// Queue a field clear; the server blanks the field on `update`.
    pub fn clear_field(&mut self, name: impl Into<String>) {
        self.set(name, AxlValue::Empty);
    }

    /// Drop tracked changes without submitting them. The local record
    /// keeps the written values; `reload` restores server state.
    pub fn discard_pending(&mut self) {
        self.pending.clear();
    }
}

impl<E: Entity> CucmObject<E> {
    pub(crate) fn require_attached(&self, action: &'static str) -> Result<Uuid, CcmError> {
        self.uuid().ok_or(CcmError::NotAttached { entity: E::NAME, action })
    }

    fn attach(record: AxlRecord) -> Result<Self, CcmError> {
        let Some(uuid) = record.uuid else {
            return Err(CcmError::Api(Error::UnexpectedResponse(format!(
                "{} record carried no uuid",
                E::NAME
            ))));
        };
        Ok(Self {
            fields: record,
            pending: AxlRecord::new(),
            attachment: Attachment::Attached(uuid),
            _entity: PhantomData,
        })
    }

    /// Load one object by search criteria and attach it.
    ///
    /// A server "not found" fault propagates as an error; check
    /// [`CcmError::is_not_found`] to branch on it.
    pub async fn get(client: &AxlClient, criteria: &AxlRecord) -> Result<Self, CcmError> {
        let record = client.get_object(E::NAME, criteria).await?;
        Self::attach(record)
    }

    /// Load one object by its server identifier.
    pub async fn get_by_uuid(client: &AxlClient, uuid: Uuid) -> Result<Self, CcmError> {
        let criteria = AxlRecord::new().with("uuid", uuid);
        Self::get(client, &criteria).await
    }

    /// Submit this detached object via `add<Type>` and attach it.
    pub async fn create(&mut self, client: &AxlClient) -> Result<Uuid, CcmError> {
        if let Attachment::Attached(uuid) = self.attachment {
            return Err(CcmError::AlreadyAttached { entity: E::NAME, uuid });
        }
        let uuid = client
            .add_object(E::NAME, self.fields.clone())
            .await
            .map_err(|source| CcmError::Creation { entity: E::NAME, source })?;
        self.attachment = Attachment::Attached(uuid);
        self.fields.uuid = Some(uuid);
        self.pending.clear();
        info!(entity = E::NAME, %uuid, "created");
        Ok(uuid)
    }

    /// Push tracked changes via `update<Type>`, then clear them.
    ///
    /// Only the fields written since the last load/create/update travel;
    /// key fields go under their `new<Xxx>` names.
    pub async fn update(&mut self, client: &AxlClient) -> Result<(), CcmError> {
        let uuid = self.require_attached("update")?;
        let changes = self.pending.len();
        let fields = self.renamed_pending();
        client
            .update_object(E::NAME, uuid, fields)
            .await
            .map_err(|source| CcmError::Update { entity: E::NAME, source })?;
        self.pending.clear();
        info!(entity = E::NAME, %uuid, changes, "updated");
        Ok(())
    }

    fn renamed_pending(&self) -> AxlRecord {
        let mut out = AxlRecord::new();
        for (name, value) in &self.pending {
            if E::RENAMED_ON_UPDATE.contains(&name.as_str()) {
                out.set(renamed_field(name), value.clone());
            } else {
                out.set(name.clone(), value.clone());
            }
        }
        out
    }

    /// Delete via `remove<Type>` and detach. The local record survives,
    /// so the object can be re-`create`d.
    pub async fn remove(&mut self, client: &AxlClient) -> Result<(), CcmError> {
        let uuid = self.require_attached("remove")?;
        client
            .remove_object(E::NAME, uuid)
            .await
            .map_err(|source| CcmError::Remove { entity: E::NAME, source })?;
        info!(entity = E::NAME, %uuid, "removed");
        self.attachment = Attachment::Detached;
        self.fields.uuid = None;
        self.pending.clear();
        Ok(())
    }

    /// Re-fetch by uuid, replacing the local record and dropping any
    /// tracked changes.
    pub async fn reload(&mut self, client: &AxlClient) -> Result<(), CcmError> {
        let uuid = self.require_attached("reload")?;
        let criteria = AxlRecord::new().with("uuid", uuid);
        let record = client
            .get_object(E::NAME, &criteria)
            .await
            .map_err(|source| CcmError::Reload { entity: E::NAME, source })?;
        self.fields = record;
        self.fields.uuid = Some(uuid);
        self.pending.clear();
        debug!(entity = E::NAME, %uuid, "reloaded");
        Ok(())
    }

    /// Reset via `reset<Type>`; the device drops and re-registers.
    pub async fn reset(&self, client: &AxlClient) -> Result<(), CcmError> {
        let uuid = self.require_attached("reset")?;
        client
            .reset_object(E::NAME, uuid)
            .await
            .map_err(|source| CcmError::Reset { entity: E::NAME, source })?;
        info!(entity = E::NAME, %uuid, "reset");
        Ok(())
    }

    /// A detached copy of this object: same fields, no identifier, no
    /// tracked changes. Immediately `create`-able.
    pub fn clone_detached(&self) -> Self {
        let mut fields = self.fields.clone();
        fields.uuid = None;
        debug!(entity = E::NAME, "cloned detached");
        Self {
            fields,
            pending: AxlRecord::new(),
            attachment: Attachment::Detached,
            _entity: PhantomData,
        }
    }

    /// Enumerate matching objects via `list<Type>`, returning the raw
    /// rows (uuid attribute plus the requested returned tags).
    pub async fn list(client: &AxlClient, query: &ListQuery) -> Result<Vec<AxlRecord>, CcmError> {
        let tags: Vec<&str> = if query.returned_tags.is_empty() {
            vec![E::LIST_TAG]
        } else {
            query.returned_tags.iter().map(String::as_str).collect()
        };
        let rows = client
            .list_objects(E::NAME, &query.criteria, &tags, query.skip, query.first)
            .await?;
        Ok(rows)
    }

    /// Enumerate matching objects and load each one in full by uuid.
    ///
    /// One `get` round trip per row, sequentially.
    pub async fn list_objects(client: &AxlClient, query: &ListQuery) -> Result<Vec<Self>, CcmError> {
        let rows = Self::list(client, query).await?;
        let mut objects = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(uuid) = row.uuid else {
                return Err(CcmError::Api(Error::UnexpectedResponse(format!(
                    "list{} row carried no uuid",
                    E::NAME
                ))));
            };
            objects.push(Self::get_by_uuid(client, uuid).await?);
        }
        Ok(objects)
    }
}

impl<E: Template> CucmObject<E> {
    /// Load an existing object and clone it detached, as a pre-filled
    /// starting point for a new one.
    pub async fn template(client: &AxlClient, criteria: &AxlRecord) -> Result<Self, CcmError> {
        let loaded = Self::get(client, criteria).await?;
        let mut clone = loaded.clone_detached();
        if let Some(class) = E::DEVICE_CLASS {
            clone.set("class", class);
        }
        debug!(entity = E::NAME, "created from template");
        Ok(clone)
    }
}

/// Search parameters for `list`/`list_objects`.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    criteria: AxlRecord,
    returned_tags: Vec<String>,
    skip: Option<u64>,
    first: Option<u64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a search criterion (`name`, `pattern`, ...; `%` wildcards).
    pub fn criterion(mut self, name: impl Into<String>, value: impl Into<AxlValue>) -> Self {
        self.criteria.set(name, value);
        self
    }

    /// Request a returned tag. The entity's key tag is used when none
    /// are given.
    pub fn returned_tag(mut self, tag: impl Into<String>) -> Self {
        self.returned_tags.push(tag.into());
        self
    }

    /// Skip the first `skip` matches.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Return at most `first` matches.
    pub fn first(mut self, first: u64) -> Self {
        self.first = Some(first);
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axletree_api::value::parse_uuid;

    use crate::model::kind;

    use super::*;

    type Line = CucmObject<kind::Line>;

    fn attached_line() -> Line {
        let mut record = AxlRecord::new()
            .with("pattern", "1000")
            .with("description", "desk line");
        record.uuid = parse_uuid("3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c");
        Line::attach(record).unwrap()
    }

    #[test]
    fn detached_writes_are_not_tracked() {
        let mut line = Line::new();
        line.set("pattern", "1000");
        assert!(!line.is_attached());
        assert!(line.pending().is_empty());
        assert_eq!(line.text("pattern"), Some("1000"));
    }

    #[test]
    fn loads_do_not_dirty_attached_writes_do() {
        let mut line = attached_line();
        assert!(line.pending().is_empty());

        line.set("description", "front desk");
        assert_eq!(line.pending().len(), 1);
        assert_eq!(line.pending().text("description"), Some("front desk"));
        assert_eq!(line.text("description"), Some("front desk"));
    }

    #[test]
    fn renamed_pending_substitutes_key_fields() {
        let mut line = attached_line();
        line.set("pattern", "2000");
        line.set("description", "moved");

        let update = line.renamed_pending();
        assert_eq!(update.text("newPattern"), Some("2000"));
        assert_eq!(update.text("description"), Some("moved"));
        assert!(!update.contains("pattern"));
    }

    #[test]
    fn clone_detached_drops_uuid_and_pending() {
        let mut line = attached_line();
        line.set("description", "dirty");

        let copy = line.clone_detached();
        assert!(!copy.is_attached());
        assert_eq!(copy.uuid(), None);
        assert!(copy.pending().is_empty());
        assert_eq!(copy.text("pattern"), Some("1000"));
        assert_eq!(copy.record().uuid, None);
    }

    #[test]
    fn discard_pending_keeps_local_record() {
        let mut line = attached_line();
        line.set("description", "scratch");
        line.discard_pending();
        assert!(line.pending().is_empty());
        assert_eq!(line.text("description"), Some("scratch"));
    }

    #[test]
    fn flag_reads_follow_the_axl_spelling() {
        let mut line = Line::new();
        line.set("active", "true");
        line.set("shareLineAppearanceCssName", AxlValue::Empty);
        assert_eq!(line.flag("active"), Some(true));
        assert_eq!(line.flag("shareLineAppearanceCssName"), None);
        assert_eq!(line.flag("usage"), None);
    }

    #[test]
    fn require_attached_names_entity_and_action() {
        let line = Line::new();
        let err = line.require_attached("update").unwrap_err();
        let CcmError::NotAttached { entity, action } = &err else {
            panic!("expected NotAttached, got {err:?}");
        };
        assert_eq!(*entity, "Line");
        assert_eq!(*action, "update");
    }

    #[test]
    fn attach_requires_a_uuid() {
        let record = AxlRecord::new().with("pattern", "1000");
        assert!(Line::attach(record).is_err());
    }
}
