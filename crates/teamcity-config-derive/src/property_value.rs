use darling::{FromDeriveInput, FromMeta, FromVariant, ast::Data, util::Ignored};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DeriveInput, Generics, Path, parse_quote};

#[derive(FromMeta)]
struct PathOverrides {
    #[darling(default = "PathOverrides::default_properties")]
    properties: Path,
}
impl Default for PathOverrides {
    fn default() -> Self {
        Self {
            properties: Self::default_properties(),
        }
    }
}
impl PathOverrides {
    fn default_properties() -> Path {
        parse_quote!(::teamcity_config::properties)
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(property_value), supports(enum_unit))]
pub struct PropertyValueInput {
    ident: Ident,
    generics: Generics,
    data: Data<PropertyValueVariant, Ignored>,
    #[darling(default)]
    path_overrides: PathOverrides,
}

#[derive(FromVariant)]
struct PropertyValueVariant {}

pub fn derive(input: DeriveInput) -> TokenStream {
    let PropertyValueInput {
        ident,
        generics,
        data: _,
        path_overrides: PathOverrides {
            properties: properties_mod,
        },
    } = match PropertyValueInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics #properties_mod::PropertyValue for #ident #ty_generics #where_clause {
            fn to_property_value(&self) -> ::std::string::String {
                ::std::string::ToString::to_string(::core::convert::AsRef::<str>::as_ref(self))
            }

            fn from_property_value(
                value: &str,
            ) -> ::core::result::Result<Self, #properties_mod::ValueError> {
                #properties_mod::parse_variant(value)
            }
        }
    }
}
