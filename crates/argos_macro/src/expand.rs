//! Code generation orchestration for `#[derive(ArgsSpec)]`.
//!
//! The expander walks the struct once, classifying each field via
//! [`crate::parse::parse_field_kind`] and [`crate::field::classify`], then
//! emits:
//!
//! - a private `__argos_build()` associated function that registers every
//!   domain, option, and positional against a fresh [`::argos::ArgsSpec`] and
//!   returns it alongside the stable handles each field was given,
//! - `spec()`, which discards the handles,
//! - `from_bindings(&Bindings)`, which rebuilds the handles (registration
//!   order is a pure function of the struct definition, so a second
//!   `__argos_build()` call yields identical `OptionId`/`PositionalId`
//!   values to the ones the original parse used) and projects each field
//!   out of the completed [`::argos::Bindings`].

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Error as SynError, Fields, Ident, Lit, Result as SynResult, Type};

use crate::field::{self, Shape};
use crate::parse::{self, ArgAttr, DomainAttr, FieldKind, PositionalAttr};

pub fn expand(input: &DeriveInput) -> SynResult<TokenStream> {
    let struct_name = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(SynError::new_spanned(
            &input.generics,
            "#[derive(ArgsSpec)] does not support generic structs",
        ));
    }

    let fields = extract_named_fields(input)?;
    let domains = parse::parse_struct_domains(&input.attrs)?;
    let domain_idents = domain_var_idents(&domains);

    let mut field_plan = Vec::with_capacity(fields.len());
    for f in fields {
        let ident = f.ident.clone().expect("named field");
        let kind = parse::parse_field_kind(f)?;
        field_plan.push((ident, f.ty.clone(), kind));
    }

    let domain_decls = domain_decls(&domains, &domain_idents);
    let mut handle_fields = Vec::new();
    let mut handle_inits = Vec::new();
    let mut registrations = Vec::new();

    for (ident, ty, kind) in &field_plan {
        match kind {
            FieldKind::Arg(attr) => {
                let handle_ty = quote!(::argos::OptionId);
                let expr = build_option_expr(ident, ty, attr, &domains, &domain_idents)?;
                registrations.push(quote! { let #ident = spec.add_option(#expr); });
                handle_fields.push(quote! { #ident: #handle_ty });
                handle_inits.push(quote! { #ident });
            }
            FieldKind::Positional(attr) => {
                let handle_ty = quote!(::argos::PositionalId);
                let expr = build_positional_expr(ident, ty, attr)?;
                registrations.push(quote! { let #ident = spec.add_positional(#expr); });
                handle_fields.push(quote! { #ident: #handle_ty });
                handle_inits.push(quote! { #ident });
            }
            FieldKind::DomainSelector | FieldKind::Plain => {}
        }
    }

    let ids_struct = format_ident!("__ArgosIds_{struct_name}");
    let build_fn = format_ident!("__argos_build_{struct_name}");

    let field_exprs: Vec<TokenStream2> = field_plan
        .iter()
        .map(|(ident, ty, kind)| from_bindings_field(ident, ty, kind))
        .collect();

    let expanded = quote! {
        #[doc(hidden)]
        struct #ids_struct {
            #(#handle_fields),*
        }

        impl #struct_name {
            #[doc(hidden)]
            fn #build_fn() -> (::argos::ArgsSpec, #ids_struct) {
                let mut spec = ::argos::ArgsSpec::new();
                #(#domain_decls)*
                #(#registrations)*
                (spec, #ids_struct { #(#handle_inits),* })
            }

            /// Builds the frozen [`::argos::ArgsSpec`] this struct's fields
            /// describe.
            #[must_use]
            pub fn spec() -> ::argos::ArgsSpec {
                Self::#build_fn().0
            }

            /// Projects a completed [`::argos::Bindings`] back into `Self`.
            ///
            /// # Errors
            ///
            /// [`::argos::ParseError::UninitializedProperty`] if a required
            /// field was never bound (an eager exit elsewhere in the spec
            /// can cause this).
            pub fn from_bindings(bindings: &::argos::Bindings) -> std::result::Result<Self, ::argos::ParseError> {
                let ids = Self::#build_fn().1;
                Ok(Self {
                    #(#field_exprs),*
                })
            }
        }
    };

    Ok(expanded.into())
}

fn extract_named_fields(input: &DeriveInput) -> SynResult<Vec<&syn::Field>> {
    let Data::Struct(data) = &input.data else {
        return Err(SynError::new_spanned(input, "#[derive(ArgsSpec)] only supports structs"));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(SynError::new_spanned(input, "#[derive(ArgsSpec)] requires named fields"));
    };
    Ok(named.named.iter().collect())
}

fn domain_var_idents(domains: &[DomainAttr]) -> Vec<Ident> {
    (0..domains.len()).map(|i| format_ident!("__argos_domain_{i}")).collect()
}

fn domain_decls(domains: &[DomainAttr], idents: &[Ident]) -> Vec<TokenStream2> {
    domains
        .iter()
        .zip(idents)
        .map(|(d, ident)| {
            let name = &d.name;
            let aliases = &d.aliases;
            let label = d.label.as_ref().map(|l| quote!(.label(#l)));
            quote! {
                let #ident = spec.add_domain(
                    ::argos::DomainBuilder::new(#name).aliases([#(#aliases),*]) #label
                );
            }
        })
        .collect()
}

fn resolve_domains<'a>(
    names: &[String],
    domains: &[DomainAttr],
    idents: &'a [Ident],
    span: &Ident,
) -> SynResult<Vec<&'a Ident>> {
    names
        .iter()
        .map(|name| {
            domains
                .iter()
                .position(|d| &d.name == name)
                .map(|i| &idents[i])
                .ok_or_else(|| SynError::new_spanned(span, format!("unknown domain `{name}` in only_in_domains")))
        })
        .collect()
}

fn build_option_expr(
    ident: &Ident,
    ty: &Type,
    attr: &ArgAttr,
    domains: &[DomainAttr],
    domain_idents: &[Ident],
) -> SynResult<TokenStream2> {
    let owner_name = ident.to_string();
    let (shape, inner_ty) = field::classify(ty);
    let base = field::base_ident(inner_ty).unwrap_or_default();

    let switches = option_switches(&owner_name, attr);
    let converter = converter_call(&base, &attr.one_of);
    let arity = match (attr.count, &shape) {
        (true, _) => quote!(.count()),
        (false, Shape::Repeated) if attr.set => quote!(.set()),
        (false, Shape::Repeated) => quote!(.list()),
        (false, _) => quote!(),
    };

    let mut modifiers = TokenStream2::new();
    if attr.required {
        modifiers.extend(quote!(.required()));
    }
    if attr.eager {
        modifiers.extend(quote!(.eager()));
    }
    if attr.hidden {
        modifiers.extend(quote!(.hidden()));
    }
    if attr.negatable {
        modifiers.extend(quote!(.negatable()));
    }
    if let Some(env) = &attr.env {
        modifiers.extend(quote!(.from_env(#env)));
    }
    if let Some(lit) = &attr.default {
        let value = default_value_expr(lit);
        modifiers.extend(quote!(.default(#value)));
    }
    if !attr.only_in_domains.is_empty() {
        let resolved = resolve_domains(&attr.only_in_domains, domains, domain_idents, ident)?;
        modifiers.extend(quote!(.only_in_domains([#(#resolved),*])));
    }

    Ok(quote! {
        ::argos::OptionBuilder::new(#owner_name)
            .switches([#(#switches),*])
            #converter
            #arity
            #modifiers
    })
}

fn option_switches(owner_name: &str, attr: &ArgAttr) -> Vec<String> {
    let mut switches = Vec::new();
    let long = attr.long.clone().unwrap_or_else(|| field::kebab_case(owner_name));
    switches.push(format!("--{long}"));
    if let Some(short) = attr.short {
        switches.push(format!("-{short}"));
    }
    switches
}

fn build_positional_expr(ident: &Ident, ty: &Type, attr: &PositionalAttr) -> SynResult<TokenStream2> {
    let owner_name = ident.to_string();
    let (shape, inner_ty) = field::classify(ty);
    let base = field::base_ident(inner_ty).unwrap_or_default();

    let converter = positional_converter_call(&base, &attr.one_of);
    let arity = matches!(shape, Shape::Repeated).then(|| quote!(.list()));
    let mut modifiers = TokenStream2::new();
    if attr.required {
        modifiers.extend(quote!(.required()));
    }
    if let Some(lit) = &attr.default {
        let value = default_value_expr(lit);
        modifiers.extend(quote!(.default(#value)));
    }

    Ok(quote! {
        ::argos::PositionalBuilder::new(#owner_name)
            #converter
            #arity
            #modifiers
    })
}

fn converter_call(base: &str, one_of: &[String]) -> TokenStream2 {
    if !one_of.is_empty() {
        return quote!(.one_of([#(#one_of),*]));
    }
    match base {
        "bool" => quote!(.bool()),
        "PathBuf" => quote!(.path()),
        b if field::is_int_like(b) => quote!(.int()),
        b if field::is_float_like(b) => quote!(.double()),
        _ => quote!(.string()),
    }
}

fn positional_converter_call(base: &str, one_of: &[String]) -> TokenStream2 {
    if !one_of.is_empty() {
        return quote!(.one_of([#(#one_of),*]));
    }
    match base {
        "PathBuf" => quote!(.path()),
        b if field::is_int_like(b) => quote!(.int()),
        _ => quote!(),
    }
}

fn default_value_expr(lit: &Lit) -> TokenStream2 {
    match lit {
        Lit::Str(s) => quote!(#s.to_string()),
        Lit::Int(n) => quote!((#n) as i64),
        Lit::Float(f) => quote!((#f) as f64),
        Lit::Bool(b) => quote!(#b),
        other => quote!(#other),
    }
}

fn from_bindings_field(ident: &Ident, ty: &Type, kind: &FieldKind) -> TokenStream2 {
    match kind {
        FieldKind::Arg(attr) => {
            let (shape, inner_ty) = field::classify(ty);
            if attr.count {
                return quote! { #ident: bindings.count(ids.#ident) };
            }
            match shape {
                Shape::Optional => {
                    let get = quote!(bindings.get(ids.#ident));
                    let conv = as_expr_optional(inner_ty, quote!(v));
                    quote! { #ident: #get.and_then(|v| #conv) }
                }
                Shape::Repeated => {
                    let conv = as_expr_required(inner_ty, quote!(v));
                    quote! { #ident: bindings.list(ids.#ident).iter().map(|v| #conv).collect() }
                }
                Shape::Single => {
                    let conv = as_expr_required(ty, quote!(v));
                    quote! { #ident: { let v = bindings.require(ids.#ident)?; #conv } }
                }
            }
        }
        FieldKind::Positional(_attr) => {
            let (shape, inner_ty) = field::classify(ty);
            match shape {
                Shape::Optional => {
                    let get = quote!(bindings.positional(ids.#ident));
                    let conv = as_expr_optional(inner_ty, quote!(v));
                    quote! { #ident: #get.and_then(|v| #conv) }
                }
                Shape::Repeated => {
                    let conv = as_expr_required(inner_ty, quote!(v));
                    quote! { #ident: bindings.positional_list(ids.#ident).iter().map(|v| #conv).collect() }
                }
                Shape::Single => {
                    let conv = as_expr_required(ty, quote!(v));
                    quote! {
                        #ident: {
                            let v = bindings.positional(ids.#ident).ok_or_else(|| {
                                ::argos::ParseError::UninitializedProperty { owner: stringify!(#ident).to_string() }
                            })?;
                            #conv
                        }
                    }
                }
            }
        }
        FieldKind::DomainSelector => {
            quote! { #ident: bindings.active_domain().map(|d| d.name().to_string()) }
        }
        FieldKind::Plain => {
            quote! { #ident: std::default::Default::default() }
        }
    }
}

/// `TypedValue -> T`, filling in a zero/empty value when the conversion
/// does not apply (it always should, since the converter and the field
/// type are chosen together, but this keeps `from_bindings` infallible for
/// these branches rather than introducing a second error path).
fn as_expr_required(ty: &Type, value: TokenStream2) -> TokenStream2 {
    let base = field::base_ident(ty).unwrap_or_default();
    match base.as_str() {
        "bool" => quote!(#value.as_bool().unwrap_or_default()),
        "PathBuf" => quote!(std::path::PathBuf::from(#value.as_str().unwrap_or_default())),
        b if field::is_int_like(b) => quote!(#value.as_i64().map(|n| n as #ty).unwrap_or_default()),
        b if field::is_float_like(b) => quote!(#value.as_f64().map(|n| n as #ty).unwrap_or_default()),
        _ => quote!(#value.as_str().map(str::to_string).unwrap_or_default()),
    }
}

/// `&TypedValue -> Option<T>`, used for `Option<T>` fields so `Missing`
/// stays `None` instead of silently becoming a default value.
fn as_expr_optional(ty: &Type, value: TokenStream2) -> TokenStream2 {
    let base = field::base_ident(ty).unwrap_or_default();
    match base.as_str() {
        "bool" => quote!(#value.as_bool()),
        "PathBuf" => quote!(#value.as_str().map(std::path::PathBuf::from)),
        b if field::is_int_like(b) => quote!(#value.as_i64().map(|n| n as #ty)),
        b if field::is_float_like(b) => quote!(#value.as_f64().map(|n| n as #ty)),
        _ => quote!(#value.as_str().map(str::to_string)),
    }
}
