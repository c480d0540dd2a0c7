// Entity metadata.
//
// The original AXL toolkit discovers per-type quirks by reflecting over
// the live WSDL; here the schema knowledge is compiled in. Each AXL
// object type is a zero-sized marker implementing `Entity`, declared
// through the `entities!` macro in `model`, and the generic lifecycle in
// `object` is written against the trait.

/// Compile-time schema metadata for one AXL object type.
pub trait Entity {
    /// The AXL type name as it appears in operation names
    /// (`Phone` → `getPhone`/`addPhone`/...).
    const NAME: &'static str;

    /// Fields the vendor's update request renames to `new<Xxx>`.
    ///
    /// AXL identifies objects by their key fields, so changing a key
    /// travels under a renamed element: `updateLine` takes `newPattern`,
    /// not `pattern`. Writes to these fields are submitted under the
    /// renamed element on update; every other operation uses the plain
    /// name.
    const RENAMED_ON_UPDATE: &'static [&'static str];

    /// The returned tag listings request when the caller asks for none.
    const LIST_TAG: &'static str;
}

/// Marker for entity types the vendor treats as template-able: an
/// existing object can be loaded and cloned detached as a starting point
/// for a new one.
pub trait Template: Entity {
    /// Device class injected into the clone, for types whose add request
    /// demands one (remote destination profiles).
    const DEVICE_CLASS: Option<&'static str> = None;
}

/// Marker for device-like entities that carry line appearances
/// (phones, device profiles, remote destination profiles).
pub trait LineHolder: Entity {}

/// Declare the entity catalog: one marker type per AXL object type plus
/// a `CucmObject` alias under the entity's own name.
macro_rules! entities {
    ($(
        $(#[$meta:meta])*
        $name:ident {
            tag: $tag:literal,
            renamed: [$($renamed:literal),* $(,)?] $(,)?
        }
    ),* $(,)?) => {
        /// Zero-sized marker types carrying per-entity schema metadata.
        pub mod kind {
            $(
                $(#[$meta])*
                #[derive(Debug, Clone, Copy, PartialEq, Eq)]
                pub struct $name;
            )*
        }

        $(
            impl $crate::entity::Entity for kind::$name {
                const NAME: &'static str = stringify!($name);
                const RENAMED_ON_UPDATE: &'static [&'static str] = &[$($renamed),*];
                const LIST_TAG: &'static str = $tag;
            }

            $(#[$meta])*
            pub type $name = $crate::object::CucmObject<kind::$name>;
        )*
    };
}

pub(crate) use entities;

/// The `new<Xxx>` element for a renamed field:
/// `pattern` → `newPattern`, `routePartitionName` → `newRoutePartitionName`.
pub(crate) fn renamed_field(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 3);
    out.push_str("new");
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
    }
    out.push_str(chars.as_str());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renamed_field_capitalizes_first_char() {
        assert_eq!(renamed_field("name"), "newName");
        assert_eq!(renamed_field("pattern"), "newPattern");
        assert_eq!(renamed_field("routePartitionName"), "newRoutePartitionName");
    }
}
