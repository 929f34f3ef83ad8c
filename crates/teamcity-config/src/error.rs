use snafu::Snafu;

use crate::properties::PropertyError;

/// The error type for decoding entities and collections of entities.
///
/// Decoding is all-or-nothing: every error aborts the whole call and no
/// partially decoded value is returned.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DecodeError {
    /// Indicates that the input is not valid JSON or does not have the shape
    /// of the expected envelope.
    #[snafu(display("failed to parse envelope"))]
    MalformedEnvelope { source: serde_json::Error },

    /// Indicates that no variant is registered for the discriminator.
    #[snafu(display("unsupported {kind} type {discriminator:?} (id: {id:?})"))]
    UnsupportedDiscriminator {
        kind: &'static str,
        discriminator: String,
        id: String,
    },

    /// Indicates that a variant was asked to decode an envelope of another
    /// type.
    #[snafu(display("expected type {expected:?}, got {found:?} (id: {id:?})"))]
    UnexpectedDiscriminator {
        expected: &'static str,
        found: String,
        id: String,
    },

    /// Indicates that the property bag of an entity cannot be mapped onto its
    /// variant. See [`PropertyError`] for more information about the error
    /// causes.
    #[snafu(display("invalid properties for {entity_type:?} (id: {id:?})"))]
    InvalidProperties {
        source: PropertyError,
        entity_type: String,
        id: String,
    },

    /// Indicates that the declared `count` of a collection does not match the
    /// number of items it contains.
    #[snafu(display(
        "collection declares {declared} items but contains {actual} {item_key:?} items"
    ))]
    CountMismatch {
        declared: usize,
        actual: usize,
        item_key: String,
    },

    /// Indicates that a collection item could not be serialized back into
    /// bytes before dispatching it to its variant.
    #[snafu(display("failed to re-encode collection item {index}"))]
    Reencode {
        source: serde_json::Error,
        index: usize,
    },

    /// Indicates that a single collection item failed to decode.
    #[snafu(display("failed to decode collection item {index} (id: {id:?})"))]
    DecodeItem {
        #[snafu(source(from(DecodeError, Box::new)))]
        source: Box<DecodeError>,
        index: usize,
        id: String,
    },
}

/// The error type for encoding entities and collections of entities.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EncodeError {
    #[snafu(display("failed to serialize {what}"))]
    Serialize {
        source: serde_json::Error,
        what: &'static str,
    },
}

impl DecodeError {
    /// Returns the innermost error, looking through collection item wrappers.
    pub fn root(&self) -> &Self {
        match self {
            Self::DecodeItem { source, .. } => source.root(),
            other => other,
        }
    }
}
