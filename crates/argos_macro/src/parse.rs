//! Attribute parsing for `#[arg(...)]`, `#[positional(...)]`, and the
//! struct-level `#[domain(...)]`.
//!
//! Mirrors this corpus's `#[env(...)]` parser: each attribute is walked with
//! syn's `ParseNestedMeta` so options can appear in any order, with
//! duplicate-key detection and spans that point at the offending token.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Error as SynError, Expr, ExprLit, Field, Lit, LitStr, Result as SynResult};

/// A field's `#[arg(...)]` configuration.
#[derive(Default)]
pub struct ArgAttr {
    pub long: Option<String>,
    pub short: Option<char>,
    pub env: Option<String>,
    pub default: Option<Lit>,
    pub required: bool,
    pub eager: bool,
    pub hidden: bool,
    pub negatable: bool,
    pub count: bool,
    pub set: bool,
    pub one_of: Vec<String>,
    pub only_in_domains: Vec<String>,
}

/// A field's `#[positional(...)]` configuration.
#[derive(Default)]
pub struct PositionalAttr {
    pub default: Option<Lit>,
    pub required: bool,
    pub one_of: Vec<String>,
}

/// A struct-level `#[domain(name = "...", aliases = [...], label = "...")]` attribute.
pub struct DomainAttr {
    pub name: String,
    pub aliases: Vec<String>,
    pub label: Option<String>,
}

/// How a field was annotated; fields with none of these are left untouched
/// by the generated `spec()`/`from_bindings()` and must implement `Default`.
pub enum FieldKind {
    Arg(ArgAttr),
    Positional(PositionalAttr),
    DomainSelector,
    Plain,
}

pub fn parse_field_kind(field: &Field) -> SynResult<FieldKind> {
    let has_arg = field.attrs.iter().any(|a| a.path().is_ident("arg"));
    let has_positional = field.attrs.iter().any(|a| a.path().is_ident("positional"));
    let has_selector = field.attrs.iter().any(|a| a.path().is_ident("domain_selector"));

    match (has_arg, has_positional, has_selector) {
        (true, false, false) => Ok(FieldKind::Arg(parse_arg_attr(field)?)),
        (false, true, false) => Ok(FieldKind::Positional(parse_positional_attr(field)?)),
        (false, false, true) => Ok(FieldKind::DomainSelector),
        (false, false, false) => Ok(FieldKind::Plain),
        _ => Err(SynError::new_spanned(
            field,
            "a field may carry only one of #[arg(...)], #[positional(...)], #[domain_selector]",
        )),
    }
}

fn parse_arg_attr(field: &Field) -> SynResult<ArgAttr> {
    let mut out = ArgAttr::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("arg")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("long") {
                out.long = Some(expect_str(&meta)?);
            } else if meta.path.is_ident("short") {
                let lit: syn::LitChar = meta.value()?.parse()?;
                out.short = Some(lit.value());
            } else if meta.path.is_ident("env") {
                out.env = Some(expect_str(&meta)?);
            } else if meta.path.is_ident("default") {
                out.default = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("required") {
                out.required = true;
            } else if meta.path.is_ident("eager") {
                out.eager = true;
            } else if meta.path.is_ident("hidden") {
                out.hidden = true;
            } else if meta.path.is_ident("negatable") {
                out.negatable = true;
            } else if meta.path.is_ident("count") {
                out.count = true;
            } else if meta.path.is_ident("set") {
                out.set = true;
            } else if meta.path.is_ident("one_of") {
                out.one_of = expect_str_list(&meta)?;
            } else if meta.path.is_ident("only_in_domains") {
                out.only_in_domains = expect_str_list(&meta)?;
            } else {
                return Err(meta.error("unrecognized #[arg(...)] key"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn parse_positional_attr(field: &Field) -> SynResult<PositionalAttr> {
    let mut out = PositionalAttr::default();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("positional")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                out.default = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("required") {
                out.required = true;
            } else if meta.path.is_ident("one_of") {
                out.one_of = expect_str_list(&meta)?;
            } else {
                return Err(meta.error("unrecognized #[positional(...)] key"));
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Parses every repeated struct-level `#[domain(name = "...", aliases = [...])]`.
pub fn parse_struct_domains(attrs: &[Attribute]) -> SynResult<Vec<DomainAttr>> {
    let mut domains = Vec::new();
    for attr in attrs.iter().filter(|a| a.path().is_ident("domain")) {
        let mut name = None;
        let mut aliases = Vec::new();
        let mut label = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(expect_str(&meta)?);
            } else if meta.path.is_ident("aliases") {
                aliases = expect_str_list(&meta)?;
            } else if meta.path.is_ident("label") {
                label = Some(expect_str(&meta)?);
            } else {
                return Err(meta.error("unrecognized #[domain(...)] key"));
            }
            Ok(())
        })?;
        let name = name.ok_or_else(|| SynError::new_spanned(attr, "#[domain(...)] requires `name`"))?;
        domains.push(DomainAttr { name, aliases, label });
    }
    Ok(domains)
}

/// Extracts doc comments into a single joined string, for `#[help]`-style
/// usage lines a collaborator renderer might want (not consumed by this
/// crate, kept for forward compatibility with `snapshot()` consumers).
#[allow(dead_code)]
pub fn extract_doc_comment(field: &Field) -> Option<String> {
    let mut result = String::new();
    for attr in &field.attrs {
        if !attr.path().is_ident("doc") {
            continue;
        }
        if let syn::Meta::NameValue(meta) = &attr.meta
            && let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &meta.value
        {
            if !result.is_empty() {
                result.push(' ');
            }
            result.push_str(s.value().trim());
        }
    }
    (!result.is_empty()).then_some(result)
}

fn expect_str(meta: &ParseNestedMeta) -> SynResult<String> {
    let lit: LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}

fn expect_str_list(meta: &ParseNestedMeta) -> SynResult<Vec<String>> {
    let content;
    syn::bracketed!(content in meta.value()?);
    let items = content.parse_terminated(<LitStr as syn::parse::Parse>::parse, syn::Token![,])?;
    Ok(items.into_iter().map(|l| l.value()).collect())
}
