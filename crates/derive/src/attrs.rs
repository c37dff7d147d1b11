//! Parsing of `#[ts(...)]` and `#[serde(...)]` attributes.
//!
//! Only the serde options that change the serialized shape are read; every
//! other serde option is consumed and ignored so that structs deriving both
//! `Serialize` and `Reflect` compile unchanged.

use shapets_core::RenameRule;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// How a `CustomRender` impl is combined with generated members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Extend,
    Replace,
}

#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// `#[ts(rename = "...")]`
    pub rename: Option<String>,
    /// `#[serde(rename = "...")]`
    pub serde_rename: Option<String>,
    pub rename_all: Option<RenameRule>,
    pub transparent: bool,
    pub custom_render: Option<RenderMode>,
}

#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// `#[ts(rename = "...")]`
    pub rename: Option<String>,
    /// `#[serde(rename = "...")]`
    pub serde_rename: Option<String>,
    pub skip: bool,
    /// `#[serde(skip_serializing_if = "...")]`
    pub omittable: bool,
    pub flatten: bool,
    pub date: bool,
    pub nullable: Option<bool>,
    pub optional: bool,
}

impl ContainerAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if attr.path().is_ident("ts") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("custom_render") {
                        out.custom_render = Some(parse_render_mode(&meta)?);
                    } else {
                        return Err(meta.error("unknown ts container attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if let Some(lit) = serialize_lit(&meta)? {
                            out.serde_rename = Some(lit.value());
                        }
                    } else if meta.path.is_ident("rename_all") {
                        if let Some(lit) = serialize_lit(&meta)? {
                            out.rename_all = Some(parse_rename_rule(&lit)?);
                        }
                    } else if meta.path.is_ident("transparent") {
                        out.transparent = true;
                    } else {
                        skip_meta(&meta)?;
                    }
                    Ok(())
                })?;
            }
        }
        Ok(out)
    }
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs {
            if attr.path().is_ident("ts") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("skip") {
                        out.skip = true;
                    } else if meta.path.is_ident("rename") {
                        out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("date") {
                        out.date = true;
                    } else if meta.path.is_ident("null") {
                        out.nullable = Some(true);
                    } else if meta.path.is_ident("no_null") {
                        out.nullable = Some(false);
                    } else if meta.path.is_ident("optional") {
                        out.optional = true;
                    } else {
                        return Err(meta.error("unknown ts field attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if let Some(lit) = serialize_lit(&meta)? {
                            out.serde_rename = Some(lit.value());
                        }
                    } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing")
                    {
                        out.skip = true;
                    } else if meta.path.is_ident("skip_serializing_if") {
                        let _: LitStr = meta.value()?.parse()?;
                        out.omittable = true;
                    } else if meta.path.is_ident("flatten") {
                        out.flatten = true;
                    } else {
                        skip_meta(&meta)?;
                    }
                    Ok(())
                })?;
            }
        }
        Ok(out)
    }
}

/// `#[ts(custom_render)]` or `#[ts(custom_render = "extend" | "replace")]`
fn parse_render_mode(meta: &ParseNestedMeta<'_>) -> syn::Result<RenderMode> {
    if !meta.input.peek(Token![=]) {
        return Ok(RenderMode::Extend);
    }
    let lit: LitStr = meta.value()?.parse()?;
    match lit.value().as_str() {
        "extend" => Ok(RenderMode::Extend),
        "replace" => Ok(RenderMode::Replace),
        other => Err(syn::Error::new(
            lit.span(),
            format!("expected \"extend\" or \"replace\", found \"{other}\""),
        )),
    }
}

fn parse_rename_rule(lit: &LitStr) -> syn::Result<RenameRule> {
    RenameRule::from_serde_name(&lit.value()).ok_or_else(|| {
        syn::Error::new(
            lit.span(),
            format!("unknown rename rule `{}`", lit.value()),
        )
    })
}

/// The serialize-side value of `name = "..."` or
/// `name(serialize = "...", deserialize = "...")`.
fn serialize_lit(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<LitStr>> {
    if meta.input.peek(Token![=]) {
        return Ok(Some(meta.value()?.parse()?));
    }
    let mut found: Option<LitStr> = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            found = Some(nested.value()?.parse()?);
        } else {
            skip_meta(&nested)?;
        }
        Ok(())
    })?;
    Ok(found)
}

/// Consume a meta item this macro does not care about.
fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_meta(&nested))?;
    }
    Ok(())
}
