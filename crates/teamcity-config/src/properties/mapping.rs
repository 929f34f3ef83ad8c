use snafu::ResultExt;

use super::{InvalidValueSnafu, Properties, PropertyValue, Result};

/// Describes a single property a [`PropertyMapping`] reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyField {
    /// The property name on the wire.
    pub name: &'static str,

    /// Forced properties are written even when the field holds its zero
    /// value, so the server sees an explicit `false` or `""` instead of
    /// applying its own default.
    pub force: bool,
}

/// Every property a [`PropertyMapping`] writes: its own fields plus those of
/// each flattened field, recursively.
///
/// All lookups are `const fn`s, which lets `#[derive(Properties)]` reject
/// mappings that write the same name twice at compile time.
#[derive(Clone, Copy, Debug)]
pub struct PropertyFields {
    pub own: &'static [PropertyField],
    pub flattened: &'static [PropertyFields],
}

impl PropertyFields {
    pub const fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Returns how many fields in the whole tree map to `name`.
    pub const fn count(&self, name: &str) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i < self.own.len() {
            if str_eq(self.own[i].name, name) {
                count += 1;
            }
            i += 1;
        }
        let mut i = 0;
        while i < self.flattened.len() {
            count += self.flattened[i].count(name);
            i += 1;
        }
        count
    }

    pub const fn has_duplicates(&self) -> bool {
        self.has_duplicates_within(self)
    }

    const fn has_duplicates_within(&self, root: &PropertyFields) -> bool {
        let mut i = 0;
        while i < self.own.len() {
            if root.count(self.own[i].name) > 1 {
                return true;
            }
            i += 1;
        }
        let mut i = 0;
        while i < self.flattened.len() {
            if self.flattened[i].has_duplicates_within(root) {
                return true;
            }
            i += 1;
        }
        false
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// A struct which can be converted to and from a [`Properties`] bag.
///
/// This will typically be derived using [`#[derive(Properties)]`](derive@super::Properties),
/// rather than implemented manually. Writing walks the fields in declaration
/// order, which makes the produced bags stable across calls. Reading ignores
/// properties which are not declared by any field.
pub trait PropertyMapping: Sized {
    /// The properties declared directly on this type, in declaration order.
    /// Properties of flattened fields are declared on the flattened type.
    const FIELDS: &'static [PropertyField];

    /// All properties this type writes, including those of flattened fields.
    const ALL_FIELDS: PropertyFields = PropertyFields {
        own: Self::FIELDS,
        flattened: &[],
    };

    /// Returns whether any field, including flattened ones, maps to `name`.
    fn is_known_property(name: &str) -> bool {
        Self::ALL_FIELDS.contains(name)
    }

    /// Appends the properties of `self` to `properties`.
    fn write_properties(&self, properties: &mut Properties);

    /// Reads `Self` from `properties`. Fields whose property is missing are
    /// set to their zero value.
    fn read_properties(properties: &Properties) -> Result<Self>;

    fn to_properties(&self) -> Properties {
        let mut properties = Properties::new();
        self.write_properties(&mut properties);
        properties
    }

    fn from_properties(properties: &Properties) -> Result<Self> {
        for name in properties
            .names()
            .filter(|name| !Self::is_known_property(name))
        {
            tracing::trace!(name, "ignoring unknown property");
        }
        Self::read_properties(properties)
    }
}

/// Serializes `value` into a new property bag.
pub fn serialize_to_properties<T: PropertyMapping>(value: &T) -> Properties {
    value.to_properties()
}

/// Reads a `T` from a property bag, see [`PropertyMapping::from_properties`].
pub fn fill_from_properties<T: PropertyMapping>(properties: &Properties) -> Result<T> {
    T::from_properties(properties)
}

/// Writes a single field, used by `#[derive(Properties)]`.
#[doc(hidden)]
pub fn write_field<V: PropertyValue>(
    properties: &mut Properties,
    name: &'static str,
    value: &V,
    force: bool,
) {
    if !force && value.is_zero() {
        tracing::trace!(name, "omitting property with zero value");
        return;
    }
    properties.push_field(name, value.to_property_value());
}

/// Reads a single field, used by `#[derive(Properties)]`.
#[doc(hidden)]
pub fn read_field<V: PropertyValue + Default>(
    properties: &Properties,
    name: &'static str,
) -> Result<V> {
    match properties.get(name) {
        Some(value) => V::from_property_value(value).context(InvalidValueSnafu { name, value }),
        None => Ok(V::default()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        iter::TryFromIterator,
        properties::{PropertyError, PropertyValue as _},
    };

    use super::*;

    #[derive(
        Clone,
        Copy,
        Debug,
        Default,
        PartialEq,
        Eq,
        strum::AsRefStr,
        strum::EnumString,
        crate::properties::PropertyValue,
    )]
    #[property_value(path_overrides(properties = "crate::properties"))]
    enum Mode {
        #[default]
        #[strum(serialize = "FILE")]
        File,
        #[strum(serialize = "CODE")]
        Code,
    }

    #[derive(Debug, Default, PartialEq, Eq, crate::properties::Properties)]
    #[properties(path_overrides(properties = "crate::properties"))]
    struct Inner {
        #[property(name = "inner.flag", force)]
        flag: bool,
        #[property(name = "inner.text")]
        text: String,
    }

    #[derive(Debug, Default, PartialEq, Eq, crate::properties::Properties)]
    #[properties(path_overrides(properties = "crate::properties"))]
    struct Outer {
        #[property(name = "first")]
        first: String,
        not_on_the_wire: u32,
        #[property(name = "mode")]
        mode: Mode,
        #[property(name = "optional.mode")]
        optional_mode: Option<Mode>,
        #[property(flatten)]
        inner: Inner,
        #[property(name = "last", force)]
        last: u32,
    }

    #[test]
    fn fields_table() {
        assert_eq!(
            Outer::FIELDS,
            &[
                PropertyField {
                    name: "first",
                    force: false
                },
                PropertyField {
                    name: "mode",
                    force: false
                },
                PropertyField {
                    name: "optional.mode",
                    force: false
                },
                PropertyField {
                    name: "last",
                    force: true
                },
            ]
        );
        assert!(Outer::is_known_property("inner.text"));
        assert!(!Outer::is_known_property("not_on_the_wire"));
    }

    #[test]
    fn all_fields_include_flattened() {
        let all = Outer::ALL_FIELDS;

        assert_eq!(all.own, Outer::FIELDS);
        assert_eq!(all.flattened.len(), 1);
        assert_eq!(all.flattened[0].own, Inner::FIELDS);
        assert_eq!(all.count("inner.flag"), 1);
        assert_eq!(all.count("inner"), 0);
        assert!(!all.has_duplicates());
        assert!(Inner::is_known_property("inner.flag"));
        assert!(!Inner::is_known_property("first"));
    }

    #[test]
    fn duplicates_across_flattened_fields() {
        const BRANCH_FILTER: PropertyField = PropertyField {
            name: "branchFilter",
            force: false,
        };
        const CLASHING: PropertyFields = PropertyFields {
            own: &[BRANCH_FILTER],
            flattened: &[PropertyFields {
                own: &[],
                flattened: &[PropertyFields {
                    own: &[BRANCH_FILTER],
                    flattened: &[],
                }],
            }],
        };
        const SIBLINGS: PropertyFields = PropertyFields {
            own: &[],
            flattened: &[
                PropertyFields {
                    own: &[BRANCH_FILTER],
                    flattened: &[],
                },
                PropertyFields {
                    own: &[BRANCH_FILTER],
                    flattened: &[],
                },
            ],
        };
        const { assert!(CLASHING.has_duplicates()) };

        assert_eq!(CLASHING.count("branchFilter"), 2);
        assert!(CLASHING.has_duplicates());
        assert!(SIBLINGS.has_duplicates());
        assert!(!PropertyFields {
            own: &[BRANCH_FILTER],
            flattened: &[],
        }
        .has_duplicates());
    }

    #[test]
    fn zero_values_are_omitted_unless_forced() {
        let properties = Outer::default().to_properties();

        assert_eq!(
            properties,
            Properties::try_from_iter([("mode", "FILE"), ("inner.flag", "false"), ("last", "0")])
                .unwrap()
        );
    }

    #[test]
    fn writes_in_declaration_order() {
        let outer = Outer {
            first: "a".to_owned(),
            not_on_the_wire: 7,
            mode: Mode::Code,
            optional_mode: Some(Mode::File),
            inner: Inner {
                flag: true,
                text: "b".to_owned(),
            },
            last: 3,
        };

        let properties = serialize_to_properties(&outer);
        assert_eq!(
            properties.names().collect::<Vec<_>>(),
            ["first", "mode", "optional.mode", "inner.flag", "inner.text", "last"]
        );
        assert_eq!(properties, outer.to_properties());

        let read: Outer = fill_from_properties(&properties).unwrap();
        assert_eq!(
            read,
            Outer {
                not_on_the_wire: 0,
                ..outer
            }
        );
    }

    #[test]
    fn missing_properties_read_as_zero() {
        let read = Outer::from_properties(&Properties::new()).unwrap();
        assert_eq!(read, Outer::default());
    }

    #[test]
    fn unknown_properties_are_ignored() {
        let properties =
            Properties::try_from_iter([("first", "x"), ("added.by.newer.server", "1")]).unwrap();

        let read = Outer::from_properties(&properties).unwrap();
        assert_eq!(read.first, "x");
    }

    #[test]
    fn invalid_value_names_property() {
        let properties = Properties::try_from_iter([("inner.flag", "maybe")]).unwrap();

        let err = Outer::from_properties(&properties).unwrap_err();
        assert_eq!(
            err,
            PropertyError::InvalidValue {
                source: bool::from_property_value("maybe").unwrap_err(),
                name: "inner.flag".to_owned(),
                value: "maybe".to_owned(),
            }
        );
    }

    #[test]
    fn invalid_enum_value() {
        let properties = Properties::try_from_iter([("mode", "SCRIPT")]).unwrap();

        let err = Outer::from_properties(&properties).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::InvalidValue { ref name, .. } if name == "mode"
        ));
    }
}
