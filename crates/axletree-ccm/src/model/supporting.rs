// Typed builders for the nested value shapes device line associations
// use. Converting into `AxlValue` produces exactly the element tree the
// schema expects, so callers never assemble raw records for these.

use uuid::Uuid;

use axletree_api::{AxlRecord, AxlValue};

/// Reference to a directory number, either by uuid or by its
/// pattern / route partition pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNumberRef {
    pub uuid: Option<Uuid>,
    pub pattern: Option<String>,
    pub route_partition: Option<String>,
}

impl DirectoryNumberRef {
    pub fn by_uuid(uuid: Uuid) -> Self {
        Self { uuid: Some(uuid), ..Self::default() }
    }

    pub fn by_pattern(pattern: impl Into<String>, route_partition: Option<&str>) -> Self {
        Self {
            uuid: None,
            pattern: Some(pattern.into()),
            route_partition: route_partition.map(str::to_owned),
        }
    }
}

impl From<DirectoryNumberRef> for AxlValue {
    fn from(dirn: DirectoryNumberRef) -> Self {
        let mut record = AxlRecord::new();
        record.uuid = dirn.uuid;
        if let Some(pattern) = dirn.pattern {
            record.set("pattern", pattern);
        }
        if let Some(partition) = dirn.route_partition {
            record.set("routePartitionName", partition);
        }
        AxlValue::Node(record)
    }
}

/// One line appearance on a device: a button index, the directory
/// number it points at, and optionally the end users associated with
/// the appearance (drives presence and Jabber line ownership).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineAppearance {
    pub index: u64,
    pub dirn: DirectoryNumberRef,
    pub associated_users: Vec<String>,
}

impl LineAppearance {
    pub fn new(index: u64, dirn: DirectoryNumberRef) -> Self {
        Self { index, dirn, associated_users: Vec::new() }
    }

    /// Builder-style: associate an end user with this appearance.
    pub fn associated_user(mut self, user_id: impl Into<String>) -> Self {
        self.associated_users.push(user_id.into());
        self
    }
}

impl From<LineAppearance> for AxlValue {
    fn from(appearance: LineAppearance) -> Self {
        let mut record = AxlRecord::new()
            .with("index", appearance.index)
            .with("dirn", appearance.dirn);
        if !appearance.associated_users.is_empty() {
            let endusers: Vec<AxlValue> = appearance
                .associated_users
                .into_iter()
                .map(|user_id| AxlValue::Node(AxlRecord::new().with("userId", user_id)))
                .collect();
            record.set(
                "associatedEndusers",
                AxlValue::Node(AxlRecord::new().with("enduser", endusers)),
            );
        }
        AxlValue::Node(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axletree_api::value::parse_uuid;

    use super::*;

    #[test]
    fn dirn_by_uuid_becomes_a_uuid_only_node() {
        let uuid = parse_uuid("12345678-1234-1234-1234-123456789012").unwrap();
        let value = AxlValue::from(DirectoryNumberRef::by_uuid(uuid));
        let node = value.as_node().unwrap();
        assert_eq!(node.uuid, Some(uuid));
        assert!(node.is_empty());
    }

    #[test]
    fn appearance_builds_the_nested_member_shape() {
        let dirn = DirectoryNumberRef::by_pattern("1000", Some("internal"));
        let appearance = LineAppearance::new(1, dirn).associated_user("jdoe");
        let value = AxlValue::from(appearance);

        let node = value.as_node().unwrap();
        assert_eq!(node.text("index"), Some("1"));

        let dirn = node.node("dirn").unwrap();
        assert_eq!(dirn.text("pattern"), Some("1000"));
        assert_eq!(dirn.text("routePartitionName"), Some("internal"));

        let endusers = node.node("associatedEndusers").unwrap();
        let members = endusers.get("enduser").unwrap().items();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].as_node().unwrap().text("userId"), Some("jdoe"));
    }

    #[test]
    fn appearance_without_users_omits_the_element() {
        let appearance = LineAppearance::new(2, DirectoryNumberRef::by_pattern("2000", None));
        let value = AxlValue::from(appearance);
        let node = value.as_node().unwrap();
        assert!(!node.contains("associatedEndusers"));
        assert!(!node.node("dirn").unwrap().contains("routePartitionName"));
    }
}
