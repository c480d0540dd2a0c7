// Credentials and AXL schema versioning.
//
// Every AXL request carries HTTP Basic auth plus a SOAPAction header that
// names both the schema version and the operation; the request namespace
// is derived from the same version. Getting these three to agree is the
// whole job of this module.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use strum::{AsRefStr, Display, EnumString};

/// HTTP Basic credentials for an AXL application user.
///
/// The password is held in a [`SecretString`] so it stays out of debug
/// output and logs.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// AXL database schema version.
///
/// CUCM accepts requests for any schema version the cluster supports;
/// the version selects the request namespace and the `SOAPAction` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
pub enum SchemaVersion {
    #[strum(serialize = "10.0")]
    V10_0,
    #[strum(serialize = "10.5")]
    V10_5,
    #[strum(serialize = "11.0")]
    V11_0,
    #[strum(serialize = "11.5")]
    V11_5,
    #[strum(serialize = "12.0")]
    V12_0,
    #[default]
    #[strum(serialize = "12.5")]
    V12_5,
    #[strum(serialize = "14.0")]
    V14_0,
    #[strum(serialize = "15.0")]
    V15_0,
}

impl SchemaVersion {
    /// The XML namespace AXL requests for this version must declare.
    pub fn namespace(self) -> String {
        format!("http://www.cisco.com/AXL/API/{self}")
    }

    /// The `SOAPAction` header value for one operation, quotes included.
    pub fn soap_action(self, operation: &str) -> String {
        format!("\"CUCM:DB ver={self} {operation}\"")
    }
}
