// Dynamic value model for AXL request and response payloads.
//
// The AXL schema owns the field names; this crate does not mirror the
// thousands of elements in the XSD as Rust structs. Instead every payload
// is an `AxlRecord` -- an insertion-ordered map of element name to
// `AxlValue`. Order is preserved end to end because AXL validates request
// bodies against XSD sequences and rejects out-of-order elements.

use indexmap::IndexMap;
use uuid::Uuid;

/// One XML-shaped value in an AXL payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AxlValue {
    /// Absent or nil content. Serializes as a self-closing element, which
    /// clears the field server-side on update.
    #[default]
    Empty,
    /// Plain element text.
    Text(String),
    /// A reference to another schema object, by uuid attribute and/or name
    /// value (`<routePartitionName uuid="{..}">PT-Internal</routePartitionName>`).
    Fk(FkRef),
    /// A nested record of child elements.
    Node(AxlRecord),
    /// A repeated element (`<member>..</member><member>..</member>`).
    List(Vec<AxlValue>),
}

impl AxlValue {
    /// The element text, if this is a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The nested record, if this is a `Node` value.
    pub fn as_node(&self) -> Option<&AxlRecord> {
        match self {
            Self::Node(r) => Some(r),
            _ => None,
        }
    }

    /// The reference, if this is an `Fk` value.
    pub fn as_fk(&self) -> Option<&FkRef> {
        match self {
            Self::Fk(r) => Some(r),
            _ => None,
        }
    }

    /// View any value as a slice of items: lists yield their elements,
    /// `Empty` yields nothing, anything else yields itself. AXL collapses
    /// single-element lists to a lone child, so callers iterating response
    /// collections go through this.
    pub fn items(&self) -> &[AxlValue] {
        match self {
            Self::List(items) => items,
            Self::Empty => &[],
            other => std::slice::from_ref(other),
        }
    }

    /// Consuming variant of [`AxlValue::items`].
    pub fn into_items(self) -> Vec<AxlValue> {
        match self {
            Self::List(items) => items,
            Self::Empty => Vec::new(),
            other => vec![other],
        }
    }

    /// The uuid carried by this value, whether it is a reference or a
    /// record with a uuid attribute.
    pub fn uuid(&self) -> Option<Uuid> {
        match self {
            Self::Fk(r) => r.uuid,
            Self::Node(r) => r.uuid,
            Self::Text(s) => parse_uuid(s),
            _ => None,
        }
    }
}

impl From<&str> for AxlValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for AxlValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for AxlValue {
    fn from(b: bool) -> Self {
        Self::Text(if b { "true" } else { "false" }.to_owned())
    }
}

impl From<i64> for AxlValue {
    fn from(n: i64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<u64> for AxlValue {
    fn from(n: u64) -> Self {
        Self::Text(n.to_string())
    }
}

impl From<Uuid> for AxlValue {
    fn from(uuid: Uuid) -> Self {
        Self::Text(format_uuid(uuid))
    }
}

impl From<FkRef> for AxlValue {
    fn from(fk: FkRef) -> Self {
        Self::Fk(fk)
    }
}

impl From<AxlRecord> for AxlValue {
    fn from(record: AxlRecord) -> Self {
        Self::Node(record)
    }
}

impl From<Vec<AxlValue>> for AxlValue {
    fn from(items: Vec<AxlValue>) -> Self {
        Self::List(items)
    }
}

impl<T> From<Option<T>> for AxlValue
where
    T: Into<AxlValue>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Empty, Into::into)
    }
}

/// A reference to another AXL object: uuid attribute, name value, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FkRef {
    pub uuid: Option<Uuid>,
    pub name: Option<String>,
}

impl FkRef {
    /// Reference by uuid attribute only.
    pub fn by_uuid(uuid: Uuid) -> Self {
        Self { uuid: Some(uuid), name: None }
    }

    /// Reference by name value only.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self { uuid: None, name: Some(name.into()) }
    }
}

/// An insertion-ordered record of AXL fields, plus the uuid attribute of
/// the enclosing element when the server sent one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AxlRecord {
    pub uuid: Option<Uuid>,
    fields: IndexMap<String, AxlValue>,
}

impl AxlRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, keeping its insertion position if it already exists.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AxlValue>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Builder-style [`AxlRecord::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AxlValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AxlValue> {
        self.fields.get(name)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<AxlValue> {
        self.fields.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The text content of a field, if present and textual.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AxlValue::as_text)
    }

    /// The nested record of a field, if present and a node.
    pub fn node(&self, name: &str) -> Option<&AxlRecord> {
        self.get(name).and_then(AxlValue::as_node)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, AxlValue> {
        self.fields.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, AxlValue> {
        self.fields.keys()
    }

    /// Remove every field, keeping the uuid.
    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Append a parsed child, merging repeated element names into a list
    /// in place so field order survives.
    pub(crate) fn push(&mut self, name: String, value: AxlValue) {
        match self.fields.entry(name) {
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
            }
            indexmap::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                AxlValue::List(items) => items.push(value),
                existing => {
                    let prior = std::mem::take(existing);
                    *existing = AxlValue::List(vec![prior, value]);
                }
            },
        }
    }
}

impl<'a> IntoIterator for &'a AxlRecord {
    type Item = (&'a String, &'a AxlValue);
    type IntoIter = indexmap::map::Iter<'a, String, AxlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for AxlRecord {
    type Item = (String, AxlValue);
    type IntoIter = indexmap::map::IntoIter<String, AxlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<K: Into<String>, V: Into<AxlValue>> FromIterator<(K, V)> for AxlRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.set(k, v);
        }
        record
    }
}

// ── UUID forms ───────────────────────────────────────────────────────
//
// CUCM renders the same identifier two ways: braced uppercase in SOAP
// payloads ({3B1A2C4D-...}) and bare lowercase in the database (pkid
// columns). Both parse here; the two formatters pick the output form.

/// Parse a uuid in any of the forms CUCM emits (braced or bare, any case).
pub fn parse_uuid(s: &str) -> Option<Uuid> {
    let trimmed = s.trim().trim_start_matches('{').trim_end_matches('}');
    Uuid::parse_str(trimmed).ok()
}

/// Render a uuid in the braced uppercase form SOAP payloads use.
pub fn format_uuid(uuid: Uuid) -> String {
    format!("{{{}}}", uuid.as_hyphenated().to_string().to_ascii_uppercase())
}

/// Render a uuid in the bare lowercase form pkid columns use.
pub fn sql_uuid(uuid: Uuid) -> String {
    uuid.as_hyphenated().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uuid_parses_braced_and_bare() {
        let braced = parse_uuid("{3B1A2C4D-9F00-4E5A-8B1C-0D2E3F4A5B6C}").unwrap();
        let bare = parse_uuid("3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c").unwrap();
        assert_eq!(braced, bare);
        assert!(parse_uuid("not-a-uuid").is_none());
    }

    #[test]
    fn uuid_formats_for_soap_and_sql() {
        let uuid = parse_uuid("3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c").unwrap();
        assert_eq!(format_uuid(uuid), "{3B1A2C4D-9F00-4E5A-8B1C-0D2E3F4A5B6C}");
        assert_eq!(sql_uuid(uuid), "3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c");
    }

    #[test]
    fn record_preserves_insertion_order() {
        let mut record = AxlRecord::new();
        record.set("name", "SEP001122334455");
        record.set("description", "lobby phone");
        record.set("devicePoolName", FkRef::by_name("DP-HQ"));
        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "description", "devicePoolName"]);
    }

    #[test]
    fn set_keeps_position_on_overwrite() {
        let mut record = AxlRecord::new();
        record.set("a", "1");
        record.set("b", "2");
        record.set("a", "3");
        let keys: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(record.text("a"), Some("3"));
    }

    #[test]
    fn items_flattens_singletons_and_lists() {
        let single = AxlValue::Text("one".into());
        assert_eq!(single.items().len(), 1);

        let list = AxlValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.items().len(), 2);

        assert!(AxlValue::Empty.items().is_empty());
    }

    #[test]
    fn option_converts_to_empty_or_value() {
        assert_eq!(AxlValue::from(None::<&str>), AxlValue::Empty);
        assert_eq!(AxlValue::from(Some("x")), AxlValue::Text("x".into()));
    }

    #[test]
    fn bool_uses_axl_spelling() {
        assert_eq!(AxlValue::from(true).as_text(), Some("true"));
        assert_eq!(AxlValue::from(false).as_text(), Some("false"));
    }
}
