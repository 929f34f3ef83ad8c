use std::collections::BTreeSet;

use darling::{FromDeriveInput, FromField, FromMeta, ast::Data, util::Ignored};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DeriveInput, Generics, Path, Type, WherePredicate, parse_quote};

#[derive(FromMeta)]
struct PathOverrides {
    #[darling(default = "PathOverrides::default_properties")]
    properties: Path,
    #[darling(default = "PathOverrides::default_result")]
    result: Path,
}
impl std::default::Default for PathOverrides {
    fn default() -> Self {
        Self {
            properties: Self::default_properties(),
            result: Self::default_result(),
        }
    }
}
impl PathOverrides {
    fn default_properties() -> Path {
        parse_quote!(::teamcity_config::properties)
    }

    fn default_result() -> Path {
        parse_quote!(::core::result)
    }
}

#[derive(FromDeriveInput)]
#[darling(attributes(properties))]
pub struct PropertiesInput {
    ident: Ident,
    generics: Generics,
    data: Data<Ignored, PropertiesField>,
    #[darling(default)]
    path_overrides: PathOverrides,
    #[darling(default)]
    bound: Option<Vec<WherePredicate>>,
}

#[derive(Debug, FromField)]
#[darling(attributes(property))]
struct PropertiesField {
    ident: Option<Ident>,
    ty: Type,
    #[darling(default)]
    name: Option<String>,
    #[darling(default)]
    force: bool,
    #[darling(default)]
    flatten: bool,
}

/// How a single field takes part in the property bag.
enum FieldKind<'a> {
    Property { name: &'a str, force: bool },
    Flatten,
    Skipped,
}

impl PropertiesField {
    fn kind(&self) -> darling::Result<FieldKind<'_>> {
        match (&self.name, self.flatten) {
            (Some(_), true) => Err(darling::Error::custom(
                "`flatten` fields cannot declare a property `name`",
            )
            .with_span(&self.ty)),
            (None, true) if self.force => Err(darling::Error::custom(
                "`force` has no effect on `flatten` fields",
            )
            .with_span(&self.ty)),
            (None, true) => Ok(FieldKind::Flatten),
            (Some(name), false) if name.is_empty() => {
                Err(darling::Error::custom("property `name` cannot be empty").with_span(&self.ty))
            }
            (Some(name), false) => Ok(FieldKind::Property {
                name,
                force: self.force,
            }),
            (None, false) if self.force => Err(darling::Error::custom(
                "`force` requires a property `name`",
            )
            .with_span(&self.ty)),
            (None, false) => Ok(FieldKind::Skipped),
        }
    }
}

pub fn derive(input: DeriveInput) -> TokenStream {
    let PropertiesInput {
        ident,
        data,
        mut generics,
        bound,
        path_overrides:
            PathOverrides {
                properties: properties_mod,
                result: result_mod,
            },
    } = match PropertiesInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };
    let fields = match data {
        Data::Enum(_) => {
            return quote! {
                compile_error!("`#[derive(Properties)]` does not support enums");
            };
        }
        Data::Struct(fields) if !fields.is_struct() => {
            return quote! {
                compile_error!("`#[derive(Properties)]` only supports structs with named fields");
            };
        }
        Data::Struct(fields) => fields.fields,
    };

    let mut errors = darling::Error::accumulator();
    let mut seen_names = BTreeSet::new();
    let kinds = fields
        .iter()
        .filter_map(|field| {
            let kind = errors.handle(field.kind())?;
            if let FieldKind::Property { name, .. } = kind
                && !seen_names.insert(name)
            {
                errors.push(
                    darling::Error::custom(format!(
                        "property name {name:?} is declared more than once"
                    ))
                    .with_span(&field.ty),
                );
            }
            Some((field, kind))
        })
        .collect::<Vec<_>>();
    if let Err(err) = errors.finish() {
        return err.write_errors();
    }

    let field_descriptors = kinds
        .iter()
        .filter_map(|(_, kind)| match kind {
            FieldKind::Property { name, force } => Some(quote! {
                #properties_mod::PropertyField { name: #name, force: #force },
            }),
            FieldKind::Flatten | FieldKind::Skipped => None,
        })
        .collect::<TokenStream>();

    let flattened_fields = kinds
        .iter()
        .filter_map(|(field, kind)| match kind {
            FieldKind::Flatten => {
                let ty = &field.ty;
                Some(quote! {
                    <#ty as #properties_mod::PropertyMapping>::ALL_FIELDS,
                })
            }
            FieldKind::Property { .. } | FieldKind::Skipped => None,
        })
        .collect::<TokenStream>();
    let has_flattened = !flattened_fields.is_empty();

    // Flattened mappings are only known by type here, so name clashes across
    // them are checked during const evaluation.
    let duplicate_message = format!(
        "`{ident}` writes the same property name more than once, check its flattened fields"
    );
    let duplicate_check = |ty: TokenStream| {
        quote! {
            ::core::assert!(
                !<#ty as #properties_mod::PropertyMapping>::ALL_FIELDS.has_duplicates(),
                #duplicate_message
            )
        }
    };
    let (global_check, inline_check) = if !has_flattened {
        (TokenStream::new(), TokenStream::new())
    } else if generics.params.is_empty() {
        let check = duplicate_check(quote! { #ident });
        (quote! { const _: () = #check; }, TokenStream::new())
    } else {
        let check = duplicate_check(quote! { Self });
        (TokenStream::new(), quote! { const { #check }; })
    };

    let write_fields = kinds
        .iter()
        .filter_map(|(field, kind)| {
            let field_ident = &field.ident;
            match kind {
                FieldKind::Property { name, force } => Some(quote! {
                    #properties_mod::write_field(properties, #name, &self.#field_ident, #force);
                }),
                FieldKind::Flatten => Some(quote! {
                    #properties_mod::PropertyMapping::write_properties(&self.#field_ident, properties);
                }),
                FieldKind::Skipped => None,
            }
        })
        .collect::<TokenStream>();

    let read_fields = kinds
        .iter()
        .map(|(field, kind)| {
            let field_ident = &field.ident;
            let ty = &field.ty;
            match kind {
                FieldKind::Property { name, .. } => quote! {
                    #field_ident: #properties_mod::read_field(properties, #name)?,
                },
                FieldKind::Flatten => quote! {
                    #field_ident: <#ty as #properties_mod::PropertyMapping>::read_properties(properties)?,
                },
                FieldKind::Skipped => quote! {
                    #field_ident: ::core::default::Default::default(),
                },
            }
        })
        .collect::<TokenStream>();

    if let Some(bound) = bound {
        let where_clause = generics.make_where_clause();
        where_clause.predicates.extend(bound);
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics #properties_mod::PropertyMapping for #ident #ty_generics #where_clause {
            const FIELDS: &'static [#properties_mod::PropertyField] = &[
                #field_descriptors
            ];

            const ALL_FIELDS: #properties_mod::PropertyFields = #properties_mod::PropertyFields {
                own: <Self as #properties_mod::PropertyMapping>::FIELDS,
                flattened: &[#flattened_fields],
            };

            fn write_properties(&self, properties: &mut #properties_mod::Properties) {
                #inline_check
                #write_fields
            }

            fn read_properties(
                properties: &#properties_mod::Properties,
            ) -> #result_mod::Result<Self, #properties_mod::PropertyError> {
                #result_mod::Result::Ok(Self {
                    #read_fields
                })
            }
        }

        #global_check
    }
}
