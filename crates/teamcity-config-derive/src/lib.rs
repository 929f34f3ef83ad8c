use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod properties;
mod property_value;

/// Derives `PropertyMapping` for a struct with named fields.
///
/// Every field that should take part in the property bag needs a
/// `#[property(name = "...")]` attribute. Fields without the attribute are not
/// part of the wire contract: they are never written and are reset to their
/// [`Default`] when read back.
///
/// - `#[property(name = "key")]` writes the field unless it holds its zero
///   value.
/// - `#[property(name = "key", force)]` always writes the field, even at its
///   zero value.
/// - `#[property(flatten)]` writes and reads a nested `PropertyMapping` into
///   the same bag.
///
/// ```
/// # use teamcity_config::properties::{Properties, PropertyMapping};
/// #[derive(Debug, Default, PartialEq, Properties)]
/// struct Checkout {
///     #[property(name = "enforceCleanCheckout")]
///     clean: bool,
///     #[property(name = "enableQueueOptimization", force)]
///     optimize_queue: bool,
/// }
///
/// let properties = Checkout::default().to_properties();
/// assert_eq!(properties.len(), 1);
/// assert_eq!(properties.get("enableQueueOptimization"), Some("false"));
/// ```
///
/// Invalid attributes, like `force` without a `name`, are rejected at compile
/// time. So is writing the same property name twice, including names that
/// come from flattened fields:
///
/// ```compile_fail
/// # use teamcity_config::properties::Properties;
/// #[derive(Default, Properties)]
/// struct Branches {
///     #[property(name = "branchFilter")]
///     filter: String,
/// }
///
/// #[derive(Properties)]
/// struct VcsTrigger {
///     #[property(name = "branchFilter")]
///     filter: String,
///     #[property(flatten)]
///     branches: Branches,
/// }
/// ```
#[proc_macro_derive(Properties, attributes(properties, property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    properties::derive(parse_macro_input!(input as DeriveInput)).into()
}

/// Derives `PropertyValue` for a fieldless enum.
///
/// The enum must implement `AsRef<str>` and `FromStr`, which is usually done
/// with `strum::AsRefStr` and `strum::EnumString`. Enum values are never
/// considered zero, wrap them in an [`Option`] to make them omittable.
#[proc_macro_derive(PropertyValue, attributes(property_value))]
pub fn derive_property_value(input: TokenStream) -> TokenStream {
    property_value::derive(parse_macro_input!(input as DeriveInput)).into()
}
