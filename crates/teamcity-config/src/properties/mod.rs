//! The property bag, TeamCity's generic representation of configuration
//! settings, and the machinery to map typed structs onto it.
//!
//! On the wire a bag is an ordered list of name/value pairs nested under a
//! `properties` object:
//!
//! ```json
//! {"count": 2, "property": [{"name": "script.content", "value": "make"}, ...]}
//! ```
//!
//! Names are unique within a bag and the order is preserved, so that encoding
//! the same value twice produces identical requests.
use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};
use snafu::{Snafu, ensure};

use crate::iter::TryFromIterator;

mod mapping;
mod value;

pub use mapping::*;
pub use value::*;

/// Derives [`PropertyMapping`] for a struct, see the macro documentation.
pub use teamcity_config_derive::{Properties, PropertyValue};

type Result<T, E = PropertyError> = std::result::Result<T, E>;

/// The error type for property bag operations.
#[derive(Debug, PartialEq, Snafu)]
pub enum PropertyError {
    /// Indicates that a bag would contain the same property name twice.
    /// Later values never silently replace earlier ones.
    #[snafu(display("property {name:?} occurs more than once"))]
    DuplicateProperty { name: String },

    /// Indicates that the value of a known property cannot be converted into
    /// the type of the field it maps to. See [`ValueError`] for more
    /// information about the error causes.
    #[snafu(display("failed to parse value {value:?} of property {name:?}"))]
    InvalidValue {
        source: ValueError,
        name: String,
        value: String,
    },
}

/// A single name/value pair of a [`Properties`] bag.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl Property {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

impl Debug for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {:?}", self.name, self.value)
    }
}

/// An ordered list of uniquely named [`Property`] pairs.
///
/// Instances are always valid: every way of constructing or extending a bag
/// rejects duplicate names with [`PropertyError::DuplicateProperty`].
///
/// ```
/// # use teamcity_config::properties::Properties;
/// let mut properties = Properties::new();
/// properties.push("script.content", "make")?;
/// properties.push("use.custom.script", "true")?;
///
/// assert_eq!(properties.get("script.content"), Some("make"));
/// assert!(properties.push("script.content", "make test").is_err());
/// # Ok::<(), teamcity_config::properties::PropertyError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PropertiesJson", into = "PropertiesJson")]
pub struct Properties(Vec<Property>);

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property to the end of the bag.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let property = Property::new(name, value);
        ensure!(
            !self.contains(&property.name),
            DuplicatePropertySnafu {
                name: property.name
            }
        );

        self.0.push(property);
        Ok(self)
    }

    /// Returns the value of the property called `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|property| property.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Property> {
        self.0.iter()
    }

    /// Iterates over the property names in wire order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|property| property.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a property produced by a [`PropertyMapping`]. Mappings declare
    /// unique names, which `#[derive(Properties)]` checks at compile time.
    pub(crate) fn push_field(&mut self, name: &str, value: String) {
        debug_assert!(
            !self.contains(name),
            "property {name:?} is written by more than one field"
        );
        self.0.push(Property::new(name, value));
    }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = std::slice::Iter<'a, Property>;
    type Item = &'a Property;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Properties {
    type IntoIter = std::vec::IntoIter<Property>;
    type Item = Property;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl TryFromIterator<Property> for Properties {
    type Error = PropertyError;

    fn try_from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Result<Self, Self::Error> {
        let mut properties = Self::new();
        for Property { name, value } in iter {
            properties.push(name, value)?;
        }
        Ok(properties)
    }
}

impl<'a> TryFromIterator<(&'a str, &'a str)> for Properties {
    type Error = PropertyError;

    fn try_from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(
        iter: I,
    ) -> Result<Self, Self::Error> {
        Self::try_from_iter(
            iter.into_iter()
                .map(|(name, value)| Property::new(name, value)),
        )
    }
}

/// The wire shape of [`Properties`]. The declared count is informational
/// only, the list itself is authoritative.
#[derive(Serialize, Deserialize)]
struct PropertiesJson {
    #[serde(default)]
    count: usize,
    #[serde(default, rename = "property")]
    properties: Vec<Property>,
}

impl TryFrom<PropertiesJson> for Properties {
    type Error = PropertyError;

    fn try_from(json: PropertiesJson) -> Result<Self, Self::Error> {
        Self::try_from_iter(json.properties)
    }
}

impl From<Properties> for PropertiesJson {
    fn from(Properties(properties): Properties) -> Self {
        Self {
            count: properties.len(),
            properties,
        }
    }
}
