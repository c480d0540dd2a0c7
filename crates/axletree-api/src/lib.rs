// axletree-api: Async Rust client for the Cisco Unified CM AXL SOAP API

pub mod auth;
pub mod client;
pub mod error;
pub mod operations;
mod soap;
pub mod sql;
pub mod transport;
pub mod value;

pub use auth::{Credentials, SchemaVersion};
pub use client::{AxlClient, ClientSettings};
pub use error::Error;
pub use sql::SqlRow;
pub use value::{AxlRecord, AxlValue, FkRef};
