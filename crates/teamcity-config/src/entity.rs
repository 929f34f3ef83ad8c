//! The envelope shared by all polymorphic configuration entities and the
//! traits their variants implement.
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};

use crate::{
    error::{
        DecodeError, InvalidPropertiesSnafu, MalformedEnvelopeSnafu, UnexpectedDiscriminatorSnafu,
    },
    properties::{Properties, PropertyMapping},
};

type Result<T, E = DecodeError> = std::result::Result<T, E>;

/// The wire shape of a single entity, like a build step or a trigger.
///
/// ```json
/// {"id": "RUNNER_1", "name": "Build", "type": "simpleRunner", "disabled": false, "properties": {...}}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherited: Option<bool>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    /// The discriminator which selects the concrete variant.
    #[serde(default, rename = "type")]
    pub entity_type: String,
}

impl EntityJson {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context(MalformedEnvelopeSnafu)
    }
}

/// The fields every entity carries independently of its variant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityHeader {
    /// The server assigned ID, empty for entities which were not created yet.
    pub id: String,
    pub name: String,
    pub disabled: bool,
    pub(crate) inherited: bool,
    pub(crate) href: String,
}

impl EntityHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the entity is inherited from a template. This is set by the
    /// server and cannot be changed by clients.
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// The REST API location of the entity, empty for entities which were not
    /// created yet.
    pub fn href(&self) -> &str {
        &self.href
    }

    fn to_json(&self, entity_type: &str, properties: Properties) -> EntityJson {
        EntityJson {
            disabled: Some(self.disabled),
            href: self.href.clone(),
            id: self.id.clone(),
            inherited: self.inherited.then_some(true),
            name: self.name.clone(),
            properties: Some(properties),
            entity_type: entity_type.to_owned(),
        }
    }
}

impl From<EntityJson> for EntityHeader {
    fn from(json: EntityJson) -> Self {
        Self {
            id: json.id,
            name: json.name,
            disabled: json.disabled.unwrap_or_default(),
            inherited: json.inherited.unwrap_or_default(),
            href: json.href,
        }
    }
}

/// The capabilities shared by every decoded entity, regardless of its
/// variant.
pub trait Entity: private::Serializable {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// The discriminator of the variant, like `simpleRunner`.
    fn entity_type(&self) -> &str;

    fn is_disabled(&self) -> bool;

    fn is_inherited(&self) -> bool;
}

pub(crate) mod private {
    use super::EntityJson;

    pub trait Serializable {
        /// Reconstructs the wire envelope for re-encoding.
        fn serializable(&self) -> EntityJson;
    }
}

/// A concrete entity variant: an [`EntityHeader`] plus settings that map onto
/// the property bag.
///
/// Implementing this trait is all that is needed to make a type decodable
/// through a [`VariantRegistry`](crate::registry::VariantRegistry), it also
/// provides [`Entity`].
pub trait Variant: PropertyMapping {
    /// The discriminator of this variant.
    const TYPE: &'static str;

    fn header(&self) -> &EntityHeader;

    fn header_mut(&mut self) -> &mut EntityHeader;

    /// Decodes this variant from the bytes of a single entity envelope.
    fn decode(bytes: &[u8]) -> Result<Self> {
        Self::from_json(EntityJson::from_slice(bytes)?)
    }

    fn from_json(json: EntityJson) -> Result<Self> {
        ensure!(
            json.entity_type == Self::TYPE,
            UnexpectedDiscriminatorSnafu {
                expected: Self::TYPE,
                found: json.entity_type,
                id: json.id,
            }
        );

        let mut variant = match &json.properties {
            Some(properties) => Self::from_properties(properties),
            None => Self::from_properties(&Properties::new()),
        }
        .context(InvalidPropertiesSnafu {
            entity_type: Self::TYPE,
            id: &json.id,
        })?;
        *variant.header_mut() = EntityHeader::from(json);
        Ok(variant)
    }
}

impl<V: Variant> Entity for V {
    fn id(&self) -> &str {
        &self.header().id
    }

    fn name(&self) -> &str {
        &self.header().name
    }

    fn entity_type(&self) -> &str {
        V::TYPE
    }

    fn is_disabled(&self) -> bool {
        self.header().disabled
    }

    fn is_inherited(&self) -> bool {
        self.header().is_inherited()
    }
}

impl<V: Variant> private::Serializable for V {
    fn serializable(&self) -> EntityJson {
        self.header().to_json(V::TYPE, self.to_properties())
    }
}

/// Declares a sum type over [`Variant`]s which implements [`Entity`] by
/// delegating to the wrapped variant, plus `From` for every variant.
macro_rules! entity_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[cfg($cfg:meta)])?
                $variant:ident($ty:ty)
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[cfg($cfg)])?
                $variant($ty),
            )*
        }

        $(
            $(#[cfg($cfg)])?
            impl From<$ty> for $name {
                fn from(variant: $ty) -> Self {
                    Self::$variant(variant)
                }
            }
        )*

        impl $crate::entity::Entity for $name {
            fn id(&self) -> &str {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::Entity::id(inner),)*
                }
            }

            fn name(&self) -> &str {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::Entity::name(inner),)*
                }
            }

            fn entity_type(&self) -> &str {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::Entity::entity_type(inner),)*
                }
            }

            fn is_disabled(&self) -> bool {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::Entity::is_disabled(inner),)*
                }
            }

            fn is_inherited(&self) -> bool {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::Entity::is_inherited(inner),)*
                }
            }
        }

        impl $crate::entity::private::Serializable for $name {
            fn serializable(&self) -> $crate::entity::EntityJson {
                match self {
                    $($(#[cfg($cfg)])? Self::$variant(inner) => $crate::entity::private::Serializable::serializable(inner),)*
                }
            }
        }
    };
}

pub(crate) use entity_enum;

/// Serializes a single entity into its wire envelope.
pub(crate) fn encode_entity<E: Entity + ?Sized>(
    entity: &E,
) -> Result<Vec<u8>, crate::error::EncodeError> {
    serde_json::to_vec(&entity.serializable())
        .context(crate::error::SerializeSnafu { what: "entity" })
}
