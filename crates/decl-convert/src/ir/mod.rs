//! Intermediate representation for class declarations.
//!
//! A front-end (parser for the source language) produces one [`ClassModel`]
//! per declaration. The transform pass rewrites it in place of the source
//! idioms, and a target writer renders it.
//!
//! Everything here is plain data: serializable, comparable, and owned by the
//! model that contains it.

mod member;

pub use member::{
    Body, Field, Literal, Member, Method, Modifiers, Origin, Parameter, Passing, Property,
    SourceSpan, Visibility,
};

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a [`TypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// One of the canonical [`Primitive`] names.
    Primitive,
    /// Source-level array; always carries an element type.
    Array,
    /// Pointer to the element type. Only produced by array desugaring.
    Pointer,
    /// A named user type (class, interface, struct).
    Reference,
    /// An unresolved generic parameter (`T`).
    Generic,
}

/// A type in the universal IR.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub kind: TypeKind,
    /// Canonical primitive name, user type name, or generic parameter name.
    /// Empty for arrays and pointers.
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<Box<TypeRef>>,
    #[serde(default)]
    pub is_const: bool,
}

/// Canonical primitive types shared by every target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
    Object,
}

impl Primitive {
    pub const ALL: [Primitive; 15] = [
        Primitive::Void,
        Primitive::Bool,
        Primitive::Char,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::UInt8,
        Primitive::UInt16,
        Primitive::UInt32,
        Primitive::UInt64,
        Primitive::Float32,
        Primitive::Float64,
        Primitive::String,
        Primitive::Object,
    ];

    /// Canonical IR name (e.g., "int32").
    pub fn ir_name(self) -> &'static str {
        match self {
            Primitive::Void => "void",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Int8 => "int8",
            Primitive::Int16 => "int16",
            Primitive::Int32 => "int32",
            Primitive::Int64 => "int64",
            Primitive::UInt8 => "uint8",
            Primitive::UInt16 => "uint16",
            Primitive::UInt32 => "uint32",
            Primitive::UInt64 => "uint64",
            Primitive::Float32 => "float32",
            Primitive::Float64 => "float64",
            Primitive::String => "string",
            Primitive::Object => "object",
        }
    }

    pub fn from_ir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.ir_name() == name)
    }

    /// Fixed-width and platform integers.
    pub fn is_integral(self) -> bool {
        matches!(
            self,
            Primitive::Int8
                | Primitive::Int16
                | Primitive::Int32
                | Primitive::Int64
                | Primitive::UInt8
                | Primitive::UInt16
                | Primitive::UInt32
                | Primitive::UInt64
        )
    }

    /// Copied on assignment; passed and returned by value.
    pub fn is_value_type(self) -> bool {
        !matches!(self, Primitive::String | Primitive::Object)
    }
}

impl TypeRef {
    pub fn primitive(primitive: Primitive) -> Self {
        Self {
            kind: TypeKind::Primitive,
            name: primitive.ir_name().to_string(),
            element: None,
            is_const: false,
        }
    }

    pub fn void() -> Self {
        Self::primitive(Primitive::Void)
    }

    pub fn array(element: TypeRef) -> Self {
        Self {
            kind: TypeKind::Array,
            name: String::new(),
            element: Some(Box::new(element)),
            is_const: false,
        }
    }

    pub fn pointer(element: TypeRef) -> Self {
        Self {
            kind: TypeKind::Pointer,
            name: String::new(),
            element: Some(Box::new(element)),
            is_const: false,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Reference,
            name: name.into(),
            element: None,
            is_const: false,
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Generic,
            name: name.into(),
            element: None,
            is_const: false,
        }
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// The typed primitive, if this is a primitive with a known name.
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.kind {
            TypeKind::Primitive => Primitive::from_ir_name(&self.name),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    pub fn is_void(&self) -> bool {
        self.as_primitive() == Some(Primitive::Void)
    }

    pub fn is_integral(&self) -> bool {
        self.as_primitive().is_some_and(Primitive::is_integral)
    }

    /// Value types are returned and passed by value; everything else by
    /// const reference where the target distinguishes the two.
    pub fn is_value_type(&self) -> bool {
        self.as_primitive().is_some_and(Primitive::is_value_type)
    }

    /// Check the shape invariants: arrays and pointers carry an element,
    /// nothing else does, and primitive names are canonical.
    pub fn validate(&self) -> Result<(), ConvertError> {
        match self.kind {
            TypeKind::Array | TypeKind::Pointer => match &self.element {
                Some(element) => element.validate(),
                None => Err(ConvertError::unsupported_type(format!(
                    "{} without element type",
                    self
                ))),
            },
            TypeKind::Primitive => {
                if self.element.is_some() || self.as_primitive().is_none() {
                    return Err(ConvertError::unsupported_type(&self.name));
                }
                Ok(())
            }
            TypeKind::Reference | TypeKind::Generic => {
                if self.element.is_some() || self.name.is_empty() {
                    return Err(ConvertError::unsupported_type(self.to_string()));
                }
                Ok(())
            }
        }
    }

    /// Visit this type and every nested element type.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a TypeRef)) {
        f(self);
        if let Some(element) = &self.element {
            element.walk(f);
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            f.write_str("const ")?;
        }
        match (self.kind, &self.element) {
            (TypeKind::Array, Some(e)) => write!(f, "array<{}>", e),
            (TypeKind::Pointer, Some(e)) => write!(f, "pointer<{}>", e),
            (TypeKind::Array, None) => f.write_str("array<?>"),
            (TypeKind::Pointer, None) => f.write_str("pointer<?>"),
            _ => f.write_str(&self.name),
        }
    }
}

/// Whether an inherited name is a class or an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseKind {
    Class,
    Interface,
}

/// An inherited type, referenced by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub kind: BaseKind,
}

impl Base {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BaseKind::Class,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BaseKind::Interface,
        }
    }
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Imported namespaces or modules (`using` directives in the source).
    #[serde(default)]
    pub imports: Vec<String>,
    /// Inheritance list in declared order.
    #[serde(default)]
    pub bases: Vec<Base>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub is_interface: bool,
}

impl ClassModel {
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            imports: Vec::new(),
            bases: Vec::new(),
            members: Vec::new(),
            is_interface: false,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            is_interface: true,
            ..Self::class(name)
        }
    }

    /// Parse a model handed over by an external front-end as JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn with_base(mut self, base: Base) -> Self {
        self.bases.push(base);
        self
    }

    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    pub fn add(&mut self, member: impl Into<Member>) {
        self.members.push(member.into());
    }

    /// Namespace, treating an empty string as absent.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref().filter(|ns| !ns.is_empty())
    }

    /// Base classes in declared order.
    pub fn base_classes(&self) -> impl Iterator<Item = &str> {
        self.bases
            .iter()
            .filter(|b| b.kind == BaseKind::Class)
            .map(|b| b.name.as_str())
    }

    /// Implemented interfaces in declared order.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.bases
            .iter()
            .filter(|b| b.kind == BaseKind::Interface)
            .map(|b| b.name.as_str())
    }

    /// Classes first, then interfaces, each in declared order.
    pub fn inheritance(&self) -> Vec<&str> {
        self.base_classes().chain(self.interfaces()).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(Member::as_field)
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(Member::as_method)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.members.iter().filter_map(Member::as_property)
    }

    /// True if any method renders without a body.
    pub fn has_abstract_methods(&self) -> bool {
        self.is_interface || self.methods().any(|m| m.modifiers.is_abstract)
    }

    /// Every type mentioned by a member signature, nested elements included.
    pub fn referenced_types(&self) -> Vec<&TypeRef> {
        let mut out = Vec::new();
        for member in &self.members {
            match member {
                Member::Field(f) => f.ty.walk(&mut |t| out.push(t)),
                Member::Property(p) => p.ty.walk(&mut |t| out.push(t)),
                Member::Method(m) => {
                    m.return_type.walk(&mut |t| out.push(t));
                    for param in &m.parameters {
                        param.ty.walk(&mut |t| out.push(t));
                    }
                }
            }
        }
        out
    }
}
