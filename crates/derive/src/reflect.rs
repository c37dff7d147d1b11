//! `Reflect` derive implementation.
//!
//! Generates an `impl shapets::Reflect` whose `shape()` describes the struct:
//! named structs become `ShapeKind::Struct`, newtypes and
//! `#[serde(transparent)]` structs become a non-null indirection to their
//! single field.

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use shapets_core::RenameRule;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields, Visibility};

use crate::attrs::{ContainerAttrs, FieldAttrs, RenderMode};

pub fn derive_reflect_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Reflect derive does not support generic structs",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;
    let body = match validate_struct(input)? {
        Fields::Named(named) if container.transparent => {
            let field = single_field(input, &named.named)?;
            indirect(field)
        }
        Fields::Named(named) => struct_body(name, &container, &named.named)?,
        Fields::Unnamed(unnamed) => {
            let field = single_field(input, &unnamed.unnamed)?;
            indirect(field)
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                input,
                "Reflect derive does not support unit structs",
            ));
        }
    };

    Ok(quote! {
        impl ::shapets::Reflect for #name {
            fn shape() -> ::shapets::Shape {
                #body
            }
        }
    })
}

fn validate_struct(input: &DeriveInput) -> syn::Result<&Fields> {
    match &input.data {
        Data::Struct(data) => Ok(&data.fields),
        _ => Err(syn::Error::new_spanned(
            input,
            "Reflect derive only supports structs",
        )),
    }
}

fn single_field<'a>(
    input: &DeriveInput,
    fields: &'a Punctuated<Field, Comma>,
) -> syn::Result<&'a Field> {
    match fields.first() {
        Some(field) if fields.len() == 1 => Ok(field),
        _ => Err(syn::Error::new_spanned(
            input,
            "Reflect derive supports tuple and transparent structs with exactly one field",
        )),
    }
}

/// A wrapper that serializes as its only field.
fn indirect(field: &Field) -> TokenStream2 {
    let ty = &field.ty;
    quote! {
        ::shapets::Shape::of::<Self>(::shapets::ShapeKind::Indirect {
            target: <#ty as ::shapets::Reflect>::shape,
            nullable: false,
        })
    }
}

fn struct_body(
    name: &syn::Ident,
    container: &ContainerAttrs,
    fields: &Punctuated<Field, Comma>,
) -> syn::Result<TokenStream2> {
    let declared = container
        .rename
        .clone()
        .or_else(|| container.serde_rename.clone())
        .unwrap_or_else(|| name.unraw().to_string());

    let rename_all = match container.rename_all {
        Some(rule) => {
            let rule = rename_rule_tokens(rule);
            quote!(::core::option::Option::Some(#rule))
        }
        None => quote!(::core::option::Option::None),
    };

    let fields = fields
        .iter()
        .map(field_shape)
        .collect::<syn::Result<Vec<_>>>()?;

    let rendering = match container.custom_render {
        Some(RenderMode::Extend) => quote! {
            .with_rendering(::shapets::Rendering::Extend(
                <Self as ::shapets::CustomRender>::render_custom,
            ))
        },
        Some(RenderMode::Replace) => quote! {
            .with_rendering(::shapets::Rendering::Replace(
                <Self as ::shapets::CustomRender>::render_custom,
            ))
        },
        None => quote!(),
    };

    Ok(quote! {
        ::shapets::Shape::structure::<Self>(
            #declared,
            ::shapets::StructShape {
                rename_all: #rename_all,
                fields: ::std::vec![#(#fields),*],
            },
        )
        #rendering
    })
}

fn field_shape(field: &Field) -> syn::Result<TokenStream2> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
    let name = ident.unraw().to_string();
    let attrs = FieldAttrs::parse(&field.attrs)?;
    let public = matches!(field.vis, Visibility::Public(_));

    // Fields the generator never looks at need not implement `Reflect`.
    let ty = &field.ty;
    let shape = if public && !attrs.skip {
        quote!(<#ty as ::shapets::Reflect>::shape)
    } else {
        quote!(::shapets::Shape::skipped)
    };

    let rename = opt_str(attrs.rename.as_deref());
    let serde_rename = opt_str(attrs.serde_rename.as_deref());
    let nullable = match attrs.nullable {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    };
    let FieldAttrs {
        skip,
        omittable,
        flatten,
        date,
        optional,
        ..
    } = attrs;

    Ok(quote! {
        ::shapets::FieldShape {
            name: #name,
            public: #public,
            flatten: #flatten,
            shape: #shape,
            attrs: ::shapets::FieldAttrs {
                rename: #rename,
                serde_rename: #serde_rename,
                skip: #skip,
                omittable: #omittable,
                date: #date,
                nullable: #nullable,
                optional: #optional,
            },
        }
    })
}

fn opt_str(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}

fn rename_rule_tokens(rule: RenameRule) -> TokenStream2 {
    let variant = match rule {
        RenameRule::LowerCase => quote!(LowerCase),
        RenameRule::UpperCase => quote!(UpperCase),
        RenameRule::PascalCase => quote!(PascalCase),
        RenameRule::CamelCase => quote!(CamelCase),
        RenameRule::SnakeCase => quote!(SnakeCase),
        RenameRule::ScreamingSnakeCase => quote!(ScreamingSnakeCase),
        RenameRule::KebabCase => quote!(KebabCase),
        RenameRule::ScreamingKebabCase => quote!(ScreamingKebabCase),
    };
    quote!(::shapets::RenameRule::#variant)
}
