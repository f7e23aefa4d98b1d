//! Error types for the overlay store

/// Errors surfaced by the overlay store and its configuration reader.
///
/// Store mutations never fail; these only cover structural misuse and
/// payloads that cannot be read back in the shape a caller asked for.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// The configuration reader was used outside of any overlay boundary
    #[error("overlay configuration read outside of an overlay boundary scope")]
    MissingScope,

    /// The payload of an overlay does not match the requested shape
    #[error("payload of overlay '{id}' does not match the requested shape: {source}")]
    InvalidPayload {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, OverlayError>;
