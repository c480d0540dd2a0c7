// axletree-ccm: CUCM object model over the AXL wire layer
//
// Maps Cisco Unified CM administrative objects (users, phones, lines,
// partitions, ...) onto the generic AXL operations: load by criteria,
// mutate fields, push partial updates, delete. The attachment lifecycle
// and dirty tracking live in `object`; the entity catalog in `model`;
// the relationships AXL cannot express in `sql`.

pub mod convert;
pub mod entity;
pub mod error;
pub mod model;
pub mod object;
pub mod sql;

pub use axletree_api::{AxlClient, AxlRecord, AxlValue, FkRef};
pub use entity::{Entity, LineHolder, Template};
pub use error::CcmError;
pub use object::{CucmObject, ListQuery};
pub use sql::{AssignedNumber, DeviceAssociation, PresenceLicense, SqlUtils};
