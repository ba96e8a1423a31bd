//! Data model for the externally-parsed declaration tree.
//!
//! The host-language parser is an external collaborator; its output arrives
//! as JSON documents, one array of root declarations per source file. This
//! module is the 1:1 serde mapping of that shape. Nothing here is executed
//! or validated beyond deserialization — unknown node kinds map to
//! [`DeclKind::Unknown`] so grammar growth degrades to a logged skip
//! instead of a failed load.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declaration node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclKind {
    Namespace,
    Enum,
    EnumMember,
    Class,
    Interface,
    Struct,
    Property,
    Field,
    Method,
    Constructor,
    /// Any kind this version does not recognize.
    #[serde(other)]
    Unknown,
}

impl DeclKind {
    /// Class, interface and struct declarations share the type-emission path.
    pub fn is_type_decl(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Struct)
    }
}

/// Declaration modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Public,
    Private,
    Internal,
    Static,
}

/// A single node of the declaration tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub kind: DeclKind,
    pub identifier: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub base_types: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<Declaration>,
    /// Declared type of a property or field member.
    #[serde(default)]
    pub ty: Option<TypeRef>,
    /// Literal value expression of an enum member, passed through verbatim.
    #[serde(default)]
    pub value: Option<String>,
}

impl Declaration {
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_public(&self) -> bool {
        self.has_modifier(Modifier::Public)
    }

    pub fn is_private(&self) -> bool {
        self.has_modifier(Modifier::Private)
    }

    pub fn is_internal(&self) -> bool {
        self.has_modifier(Modifier::Internal)
    }

    /// Type-parameter suffix as it appears in registry keys and emitted
    /// headers, e.g. `<T, U>`. Empty when the declaration has none.
    pub fn type_parameter_suffix(&self) -> String {
        if self.type_parameters.is_empty() {
            String::new()
        } else {
            format!("<{}>", self.type_parameters.join(", "))
        }
    }
}

/// A type reference as it appears in property types and base lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// Built-in keyword type (`int`, `string`, `bool`, ...).
    Primitive { keyword: String },
    /// Nullable wrapper around an inner type.
    Nullable { inner: Box<TypeRef> },
    /// Array with a single rank specifier of the given rank.
    Array { inner: Box<TypeRef>, rank: u32 },
    /// Generic instantiation, e.g. `List<T>`.
    Generic { identifier: String, args: Vec<TypeRef> },
    /// Bare identifier reference.
    Identifier { name: String },
    /// Dotted qualified name; `left` is the dotted prefix text.
    Qualified { left: String, right: Box<TypeRef> },
}

impl fmt::Display for TypeRef {
    /// Renders source-like text, used for qualified-name lookups and
    /// diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive { keyword } => f.write_str(keyword),
            TypeRef::Nullable { inner } => write!(f, "{inner}?"),
            TypeRef::Array { inner, rank } => {
                write!(f, "{inner}[{}]", ",".repeat(rank.saturating_sub(1) as usize))
            }
            TypeRef::Generic { identifier, args } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{identifier}<{}>", args.join(", "))
            }
            TypeRef::Identifier { name } => f.write_str(name),
            TypeRef::Qualified { left, right } => write!(f, "{left}.{right}"),
        }
    }
}
