//! Field-type classification shared by `expand`.
//!
//! A field's Rust type decides two things the attribute parser does not:
//! its arity shape (`Option<T>` is nullable, `Vec<T>` is a list/set/count
//! candidate, anything else is `Single`) and which built-in [`Converter`]
//! fits it (`bool`, the integer family, the float family, `String`,
//! `PathBuf`).
//!
//! [`Converter`]: argos::Converter

use syn::{GenericArgument, PathArguments, Type};

/// The arity shape implied by a field's Rust type.
pub enum Shape {
    /// A plain `T`.
    Single,
    /// `Option<T>`.
    Optional,
    /// `Vec<T>`.
    Repeated,
}

/// Unwraps `Option<T>` / `Vec<T>` to their shape plus inner type, or
/// `Shape::Single` with the type unchanged.
pub fn classify(ty: &Type) -> (Shape, &Type) {
    if let Some(inner) = single_generic_arg(ty, "Option") {
        return (Shape::Optional, inner);
    }
    if let Some(inner) = single_generic_arg(ty, "Vec") {
        return (Shape::Repeated, inner);
    }
    (Shape::Single, ty)
}

fn single_generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else { return None };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    args.args.iter().find_map(|a| match a {
        GenericArgument::Type(t) => Some(t),
        _ => None,
    })
}

/// The base type name used to pick a built-in converter (`"bool"`, `"i64"`,
/// `"f64"`, `"String"`, `"PathBuf"`, ...), or `None` for a type this crate's
/// converter set does not natively recognize (callers fall back to
/// `string()` and a caller-provided `map` converter).
pub fn base_ident(ty: &Type) -> Option<String> {
    let Type::Path(type_path) = ty else { return None };
    type_path.path.segments.last().map(|s| s.ident.to_string())
}

/// `true` for integer-family idents this crate maps to `Converter::int()`.
pub fn is_int_like(name: &str) -> bool {
    matches!(
        name,
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize"
    )
}

/// `true` for float-family idents this crate maps to `Converter::double()`.
pub fn is_float_like(name: &str) -> bool {
    matches!(name, "f32" | "f64")
}

/// Converts a field identifier (`max_retries`) into its default long switch
/// form (`max-retries`), matching this corpus's CLI-flag naming convention.
pub fn kebab_case(ident: &str) -> String {
    ident.replace('_', "-")
}
