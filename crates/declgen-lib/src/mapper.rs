//! Type reference to TypeScript type expression mapping.
//!
//! Pure with respect to registry state: the same reference and the same
//! registry always produce the same output. Constructs with no structural
//! equivalent degrade to the unknown marker and record a diagnostic rather
//! than guessing a shape.

use crate::ast::TypeRef;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::registry::TypeRegistry;

/// Fallback output type for constructs that cannot be faithfully mapped.
pub const UNKNOWN_TYPE: &str = "any";

/// Single-argument generics translated to `T[]`.
const LIST_GENERICS: &[&str] = &["List", "IList", "IReadOnlyList", "IEnumerable", "ICollection"];

/// Two-argument generics translated to `Map<string, V>` (string keys only).
const DICT_GENERICS: &[&str] = &["Dictionary", "IDictionary", "IReadOnlyDictionary"];

/// Generics with runtime-only meaning, always mapped to the unknown marker.
const EXPRESSION_GENERICS: &[&str] = &["Expression"];

/// Identifier names (case-insensitive) for date/time and duration concepts,
/// which serialize as strings.
const DATE_TIME_NAMES: &[&str] = &[
    "datetime",
    "datetimeoffset",
    "timespan",
    "date",
    "time",
    "duration",
];

/// Qualified prefix of the host language's generic list-of-T form.
const QUALIFIED_LIST_PREFIX: &str = "System.Collections.Generic.List<";

/// Result of mapping one type reference.
///
/// Nullability surfaces as the `optional` flag, never inside the type text:
/// the property emitter turns it into a trailing `?` on the property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub text: String,
    pub optional: bool,
}

impl MappedType {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            optional: false,
        }
    }

    fn unknown() -> Self {
        Self::plain(UNKNOWN_TYPE)
    }

    pub fn is_unknown(&self) -> bool {
        self.text == UNKNOWN_TYPE
    }
}

/// Map a type reference to its TypeScript type expression.
pub fn map_type(
    ty: &TypeRef,
    registry: &TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> MappedType {
    match ty {
        TypeRef::Primitive { keyword } => map_primitive(keyword, diagnostics),
        TypeRef::Nullable { inner } => {
            let mapped = map_type(inner, registry, diagnostics);
            MappedType {
                text: mapped.text,
                optional: true,
            }
        }
        TypeRef::Array { inner, rank } => map_array(inner, *rank, registry, diagnostics),
        TypeRef::Generic { identifier, args } => {
            map_generic(identifier, args, registry, diagnostics)
        }
        TypeRef::Identifier { name } => map_identifier(name, registry, diagnostics),
        TypeRef::Qualified { left, right } => map_qualified(left, right, registry, diagnostics),
    }
}

fn map_primitive(keyword: &str, diagnostics: &mut Diagnostics) -> MappedType {
    match keyword {
        "string" | "char" => MappedType::plain("string"),
        "bool" => MappedType::plain("boolean"),
        "byte" | "sbyte" | "short" | "ushort" | "int" | "uint" | "long" | "ulong" | "float"
        | "double" | "decimal" => MappedType::plain("number"),
        "object" | "dynamic" => MappedType::unknown(),
        _ => {
            diagnostics.report(
                DiagnosticKind::UnknownTypeKeyword,
                format!("unknown keyword: {keyword}"),
            );
            MappedType::unknown()
        }
    }
}

fn map_array(
    inner: &TypeRef,
    rank: u32,
    registry: &TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> MappedType {
    // Only rank-1 arrays have a structural translation.
    if rank != 1 {
        diagnostics.report(
            DiagnosticKind::UnsupportedArrayRank,
            format!("rank {rank} array of {inner}"),
        );
        return MappedType::unknown();
    }
    let element = map_type(inner, registry, diagnostics);
    MappedType::plain(format!("{}[]", element.text))
}

fn map_generic(
    identifier: &str,
    args: &[TypeRef],
    registry: &TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> MappedType {
    if LIST_GENERICS.contains(&identifier) && args.len() == 1 {
        let element = map_type(&args[0], registry, diagnostics);
        return MappedType::plain(format!("{}[]", element.text));
    }

    if DICT_GENERICS.contains(&identifier) && args.len() == 2 {
        let key = map_type(&args[0], registry, diagnostics);
        if key.text != "string" {
            diagnostics.report(
                DiagnosticKind::NonStringMapKey,
                format!("{identifier} key maps to {}", key.text),
            );
            return MappedType::unknown();
        }
        let value = map_type(&args[1], registry, diagnostics);
        return MappedType::plain(format!("Map<string, {}>", value.text));
    }

    if EXPRESSION_GENERICS.contains(&identifier) {
        return MappedType::unknown();
    }

    // Opaque-known beats known beats excluded beats unrecognized.
    if registry.is_opaque(identifier) {
        return MappedType::unknown();
    }

    if registry.resolve(identifier).is_some() {
        let mapped_args: Vec<String> = args
            .iter()
            .map(|a| map_type(a, registry, diagnostics).text)
            .collect();
        return MappedType::plain(format!("{identifier}<{}>", mapped_args.join(", ")));
    }

    if registry.is_excluded(identifier) {
        return MappedType::unknown();
    }

    diagnostics.report(
        DiagnosticKind::UnsupportedGenericShape,
        format!("unknown generic: {identifier}<..>"),
    );
    MappedType::unknown()
}

fn map_identifier(
    name: &str,
    registry: &TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> MappedType {
    if name == "dynamic" {
        return MappedType::unknown();
    }

    // Canonical generic-parameter placeholder: a single uppercase letter
    // passes through unchanged. Heuristic, not validated against an
    // enclosing type-parameter list.
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && c.is_ascii_uppercase()
    {
        return MappedType::plain(name);
    }

    if DATE_TIME_NAMES
        .iter()
        .any(|d| d.eq_ignore_ascii_case(name))
    {
        return MappedType::plain("string");
    }

    if registry.is_opaque(name) {
        return MappedType::unknown();
    }

    if let Some(mapped) = registry.resolve(name) {
        return MappedType::plain(mapped);
    }

    if registry.is_excluded(name) {
        return MappedType::unknown();
    }

    diagnostics.report(
        DiagnosticKind::UnresolvedType,
        format!("unresolved identifier: {name}"),
    );
    MappedType::unknown()
}

fn map_qualified(
    left: &str,
    right: &TypeRef,
    registry: &TypeRegistry,
    diagnostics: &mut Diagnostics,
) -> MappedType {
    let full = format!("{left}.{right}");

    // The host's fully-spelled generic list form reduces to the list rule.
    if full.starts_with(QUALIFIED_LIST_PREFIX) {
        return map_type(right, registry, diagnostics);
    }

    match registry.resolve(&full) {
        Some(mapped) => MappedType::plain(mapped),
        None => MappedType::unknown(),
    }
}
