use thiserror::Error;

/// Top-level error type for the `axletree-api` crate.
///
/// Covers every failure mode on the wire: authentication, transport, TLS,
/// envelope parsing, and the AXL faults CUCM raises for schema or data
/// problems. `axletree-ccm` maps these into lifecycle errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected, or the account lacks the AXL API role.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── AXL ─────────────────────────────────────────────────────────
    /// SOAP fault raised by the AXL service, carrying Cisco's `axlError`
    /// detail when present. `request` names the operation the server blamed.
    #[error("AXL fault: {message}")]
    Fault {
        code: Option<i64>,
        message: String,
        request: Option<String>,
    },

    /// The response was not a SOAP envelope we could make sense of, with
    /// the raw body retained for debugging.
    #[error("Malformed AXL response: {message}")]
    Envelope { message: String, body: String },

    /// The envelope parsed but the payload was not shaped as the
    /// operation requires (missing `<return>` child, non-uuid text, etc.)
    #[error("Unexpected AXL response shape: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// Returns `true` if this error indicates rejected or insufficient
    /// credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is the AXL "item not found" fault.
    ///
    /// CUCM signals a missing object with axlcode 5007; older schema
    /// versions omit the code, so the fault text is checked as well.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Fault { code: Some(5007), .. } => true,
            Self::Fault { message, .. } => message.contains("was not found"),
            _ => false,
        }
    }

    /// Extract the numeric `axlcode` from a fault, if the server sent one.
    pub fn fault_code(&self) -> Option<i64> {
        match self {
            Self::Fault { code, .. } => *code,
            _ => None,
        }
    }
}
