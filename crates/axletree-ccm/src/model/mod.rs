// The CUCM entity catalog.
//
// One marker type per AXL object type, with the update-rename and
// list-tag metadata the vendor schema declares for it. Entities with
// behavior beyond plain CRUD (relationship helpers, vendor quirks) get
// their inherent impls in the submodules below.

mod line;
mod phone;
mod remote;
mod schedule;
mod supporting;
mod user;

pub use supporting::{DirectoryNumberRef, LineAppearance};

use crate::entity::{LineHolder, Template, entities};

entities! {
    // ── Users ──
    /// An end user (`getUser` / `updateUser` / ...).
    User { tag: "userid", renamed: [] },
    /// An application user (AXL service accounts and the like).
    AppUser { tag: "userid", renamed: [] },
    UserGroup { tag: "name", renamed: ["name"] },

    // ── Devices ──
    /// A registered phone or soft client.
    Phone { tag: "name", renamed: ["name"] },
    /// An extension-mobility device profile.
    DeviceProfile { tag: "name", renamed: ["name"] },
    /// A CTI route point (virtual device for CTI applications).
    CtiRoutePoint { tag: "name", renamed: ["name"] },
    /// A single-number-reach profile carrying remote destinations.
    RemoteDestinationProfile { tag: "name", renamed: ["name"] },
    /// A remote destination (external number reached through SNR).
    RemoteDestination { tag: "destination", renamed: ["name", "destination"] },
    Gateway { tag: "domainName", renamed: ["domainName"] },
    GatewayEndpointAnalogAccess { tag: "description", renamed: [] },
    PhoneButtonTemplate { tag: "name", renamed: ["name"] },
    DevicePool { tag: "name", renamed: ["name"] },

    // ── Call routing ──
    /// A directory number, keyed by pattern plus route partition.
    Line { tag: "pattern", renamed: ["pattern", "routePartitionName"] },
    /// A translation pattern.
    TransPattern { tag: "pattern", renamed: ["pattern", "routePartitionName"] },
    RoutePartition { tag: "name", renamed: ["name"] },
    Css { tag: "name", renamed: ["name"] },
    RouteList { tag: "name", renamed: ["name"] },
    HuntList { tag: "name", renamed: ["name"] },
    HuntPilot { tag: "pattern", renamed: ["pattern", "routePartitionName"] },
    LineGroup { tag: "name", renamed: ["name"] },
    CallPickupGroup { tag: "pattern", renamed: ["pattern", "routePartitionName", "name"] },

    // ── Voicemail ──
    VoiceMailPilot { tag: "pilotNumber", renamed: ["pilotNumber"] },
    VoiceMailProfile { tag: "name", renamed: ["name"] },

    // ── Time-of-day routing ──
    /// A time schedule aggregating time periods.
    TimeSchedule { tag: "name", renamed: ["name"] },
    TimePeriod { tag: "name", renamed: ["name"] },
    TodAccess { tag: "name", renamed: ["name"] },
}

impl Template for kind::User {}
impl Template for kind::Phone {}
impl Template for kind::DeviceProfile {}
impl Template for kind::RemoteDestinationProfile {
    // addRemoteDestinationProfile insists on the device class even
    // though getRemoteDestinationProfile never returns it.
    const DEVICE_CLASS: Option<&'static str> = Some("Remote Destination Profile");
}

impl LineHolder for kind::Phone {}
impl LineHolder for kind::DeviceProfile {}
impl LineHolder for kind::RemoteDestinationProfile {}
