// ── Lifecycle error types ──
//
// Errors callers see from the object layer. Precondition failures
// (detached object asked to update, attached object asked to create)
// get their own variants; remote failures keep the wire error as the
// source so fault codes stay reachable, but are never classified or
// retried here.

use thiserror::Error;
use uuid::Uuid;

/// Unified error type for the object layer.
#[derive(Debug, Error)]
pub enum CcmError {
    // ── Lifecycle preconditions ──────────────────────────────────────
    /// The operation needs a server-assigned uuid and the object has none.
    #[error("{entity} is not attached; {action} requires a server-assigned uuid")]
    NotAttached {
        entity: &'static str,
        action: &'static str,
    },

    /// `create` was called on an object the server already knows.
    #[error("{entity} is already attached (uuid {uuid})")]
    AlreadyAttached { entity: &'static str, uuid: Uuid },

    // ── Lifecycle operations ─────────────────────────────────────────
    #[error("failed to create {entity}")]
    Creation {
        entity: &'static str,
        #[source]
        source: axletree_api::Error,
    },

    #[error("failed to update {entity}")]
    Update {
        entity: &'static str,
        #[source]
        source: axletree_api::Error,
    },

    #[error("failed to remove {entity}")]
    Remove {
        entity: &'static str,
        #[source]
        source: axletree_api::Error,
    },

    #[error("failed to reload {entity}")]
    Reload {
        entity: &'static str,
        #[source]
        source: axletree_api::Error,
    },

    #[error("failed to reset {entity}")]
    Reset {
        entity: &'static str,
        #[source]
        source: axletree_api::Error,
    },

    // ── Arguments ────────────────────────────────────────────────────
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ── Everything else from the wire ────────────────────────────────
    #[error(transparent)]
    Api(#[from] axletree_api::Error),
}

impl CcmError {
    /// Returns `true` if the underlying AXL fault was "item not found".
    pub fn is_not_found(&self) -> bool {
        self.api_source().is_some_and(axletree_api::Error::is_not_found)
    }

    /// The wire-layer error carried by this error, if any.
    pub fn api_source(&self) -> Option<&axletree_api::Error> {
        match self {
            Self::Creation { source, .. }
            | Self::Update { source, .. }
            | Self::Remove { source, .. }
            | Self::Reload { source, .. }
            | Self::Reset { source, .. } => Some(source),
            Self::Api(source) => Some(source),
            _ => None,
        }
    }
}
