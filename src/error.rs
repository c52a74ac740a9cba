//! Error taxonomy for session commands and document I/O.
//!
//! Every variant is recoverable: callers surface it as a single notice and
//! the session stays in a consistent, resumable state. A pointer ray missing
//! the recording plane is deliberately *not* here; that is a per-frame skip
//! condition expressed as `Option::None` by the projector.

use thiserror::Error;

use crate::scene::StemId;

#[derive(Debug, Error)]
pub enum SessionError {
    /// A command that needs a target was issued with nothing selected.
    #[error("no object is selected")]
    NoSelection,

    /// Save was attempted for an object with no recorded path.
    #[error("{0} has no recorded motion path")]
    EmptyPath(StemId),

    /// A motion document failed to parse or violated the schema.
    #[error("malformed motion document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// A document parsed fine but no object name matched the file name.
    #[error("no scene object matches file name `{0}`")]
    NoMatchingObject(String),
}
