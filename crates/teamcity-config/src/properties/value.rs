use std::{
    fmt::{Debug, Display},
    num::ParseIntError,
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};

/// The error type for converting a single property value into a typed value.
#[derive(Debug, PartialEq, Snafu)]
pub enum ValueError {
    /// Indicates that the value is not one of the boolean tokens the server
    /// uses, like `true` or `false`.
    #[snafu(display("expected a boolean like \"true\" or \"false\""))]
    InvalidBool,

    #[snafu(display("expected an integer"))]
    InvalidInteger { source: ParseIntError },

    /// Indicates that the value does not name any variant of the target enum.
    #[snafu(display("value is not a known {type_name} variant"))]
    InvalidVariant { type_name: &'static str },
}

/// A type which can be stored as the string value of a property.
///
/// The zero value of a type (see [`PropertyValue::is_zero`]) is the value a
/// field is reset to when its property is missing from a bag. Unless the
/// field is forced, it is also the value which is omitted when writing a bag.
///
/// Fieldless enums can derive this trait with `#[derive(PropertyValue)]` on
/// top of `strum::AsRefStr` and `strum::EnumString`.
pub trait PropertyValue: Sized {
    fn to_property_value(&self) -> String;

    fn from_property_value(value: &str) -> Result<Self, ValueError>;

    /// Returns whether `self` is the zero value of its type. Types without a
    /// natural zero value (like enums) are never zero.
    fn is_zero(&self) -> bool {
        false
    }
}

/// Parses an enum variant from its string constant, used by
/// `#[derive(PropertyValue)]`.
pub fn parse_variant<T: FromStr>(value: &str) -> Result<T, ValueError> {
    T::from_str(value).map_err(|_| ValueError::InvalidVariant {
        type_name: short_type_name::<T>(),
    })
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

impl PropertyValue for bool {
    fn to_property_value(&self) -> String {
        self.to_string()
    }

    fn from_property_value(value: &str) -> Result<Self, ValueError> {
        match value {
            "true" | "True" | "TRUE" | "t" | "T" | "1" => Ok(true),
            "false" | "False" | "FALSE" | "f" | "F" | "0" => Ok(false),
            _ => InvalidBoolSnafu.fail(),
        }
    }

    fn is_zero(&self) -> bool {
        !self
    }
}

impl PropertyValue for String {
    fn to_property_value(&self) -> String {
        self.clone()
    }

    fn from_property_value(value: &str) -> Result<Self, ValueError> {
        Ok(value.to_owned())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! integer_property_value {
    ($($ty:ty),*) => {
        $(
            impl PropertyValue for $ty {
                fn to_property_value(&self) -> String {
                    self.to_string()
                }

                fn from_property_value(value: &str) -> Result<Self, ValueError> {
                    value.trim().parse().context(InvalidIntegerSnafu)
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

integer_property_value!(u8, u16, u32, i32);

/// An absent optional value is zero. An empty property value reads back as
/// [`None`].
impl<T: PropertyValue> PropertyValue for Option<T> {
    fn to_property_value(&self) -> String {
        self.as_ref()
            .map(PropertyValue::to_property_value)
            .unwrap_or_default()
    }

    fn from_property_value(value: &str) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Ok(None);
        }
        T::from_property_value(value).map(Some)
    }

    fn is_zero(&self) -> bool {
        self.as_ref().is_none_or(PropertyValue::is_zero)
    }
}

/// A reference to a build configuration by its ID, like `Project_Build`.
///
/// The empty ID is the zero value and refers to no build configuration.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildTypeId(String);

impl BuildTypeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Deref for BuildTypeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for BuildTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for BuildTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<&str> for BuildTypeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PropertyValue for BuildTypeId {
    fn to_property_value(&self) -> String {
        self.0.clone()
    }

    fn from_property_value(value: &str) -> Result<Self, ValueError> {
        Ok(Self::new(value))
    }

    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }
}
