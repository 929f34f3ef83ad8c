//! Discriminator based dispatch of entity envelopes to their concrete
//! variants.
use std::{collections::BTreeMap, fmt::Debug};

use snafu::{Snafu, ensure};
use tracing::{Level, instrument};

use crate::{
    entity::{EntityJson, Variant},
    error::{DecodeError, UnsupportedDiscriminatorSnafu},
};

type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// A function which decodes the bytes of a single entity envelope into `T`.
pub type Decoder<T> = fn(&[u8]) -> Result<T>;

/// The error type for building a [`VariantRegistry`].
#[derive(Debug, PartialEq, Snafu)]
pub enum RegistryError {
    /// Indicates that a discriminator was registered twice. Every
    /// discriminator maps to exactly one variant.
    #[snafu(display("{kind} type {tag:?} is already registered"))]
    DuplicateTag { kind: &'static str, tag: &'static str },
}

/// Maps discriminator values to the decoders of their variants.
///
/// Registration is explicit: a discriminator which was not registered is an
/// [`UnsupportedDiscriminator`](DecodeError::UnsupportedDiscriminator) error,
/// there is no fallback variant. Registries are built once and only read
/// afterwards, so they can be shared between threads freely.
///
/// ```
/// use teamcity_config::{registry::VariantRegistry, step::{Step, StepCommandLine}};
///
/// let registry = VariantRegistry::<Step>::new("step")
///     .with_variant_of::<StepCommandLine>()
///     .unwrap();
///
/// assert!(registry.contains("simpleRunner"));
/// assert!(!registry.contains("jetbrains_powershell"));
/// ```
pub struct VariantRegistry<T> {
    kind: &'static str,
    variants: BTreeMap<&'static str, Decoder<T>>,
}

impl<T> VariantRegistry<T> {
    /// Creates an empty registry. `kind` names the entities in errors and
    /// logs, like `step` or `trigger`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            variants: BTreeMap::new(),
        }
    }

    /// Registers `decoder` for the discriminator `tag`.
    pub fn with_variant(
        mut self,
        tag: &'static str,
        decoder: Decoder<T>,
    ) -> Result<Self, RegistryError> {
        ensure!(
            !self.variants.contains_key(tag),
            DuplicateTagSnafu {
                kind: self.kind,
                tag
            }
        );

        self.variants.insert(tag, decoder);
        Ok(self)
    }

    /// Registers the [`Variant`] `V` for its own discriminator.
    pub fn with_variant_of<V>(self) -> Result<Self, RegistryError>
    where
        V: Variant + Into<T>,
    {
        self.with_variant(V::TYPE, decode_into::<V, T>)
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.variants.contains_key(tag)
    }

    /// Iterates over the registered discriminators in lexical order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.keys().copied()
    }

    /// Decodes a single entity envelope.
    ///
    /// The discriminator is read from a generic envelope first, afterwards the
    /// registered variant decodes the same bytes again in full.
    #[instrument(level = Level::DEBUG, skip_all, fields(kind = self.kind))]
    pub fn decode(&self, bytes: &[u8]) -> Result<T> {
        let EntityJson {
            entity_type, id, ..
        } = EntityJson::from_slice(bytes)?;

        let Some(decoder) = self.variants.get(entity_type.as_str()) else {
            return UnsupportedDiscriminatorSnafu {
                kind: self.kind,
                discriminator: entity_type,
                id,
            }
            .fail();
        };

        tracing::debug!(discriminator = %entity_type, id = %id, "resolved variant");
        decoder(bytes)
    }
}

impl<T> Debug for VariantRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantRegistry")
            .field("kind", &self.kind)
            .field("tags", &self.variants.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn decode_into<V, T>(bytes: &[u8]) -> Result<T>
where
    V: Variant + Into<T>,
{
    V::decode(bytes).map(Into::into)
}
