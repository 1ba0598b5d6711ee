//! Class members: fields, properties, methods, and their modifiers.

use super::TypeRef;
use serde::{Deserialize, Serialize};

/// Access level of a member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    /// Members without an access modifier are private.
    #[default]
    Private,
}

impl Visibility {
    /// Render order of visibility groups.
    pub const ORDER: [Visibility; 3] = [
        Visibility::Public,
        Visibility::Protected,
        Visibility::Private,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }
}

/// Modifier set shared by every member kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    /// Abstract members never render a body.
    pub is_abstract: bool,
    /// Constant field, or const-qualified method.
    pub is_const: bool,
}

/// A literal default value, rendered in each target's spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Char(char),
    Null,
    /// Forwarded verbatim (e.g. an enum constant).
    Raw(String),
}

/// Location of forwarded text in the original source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub start_line: u32,
    pub end_line: u32,
}

/// A method body.
///
/// Bodies are never parsed. Source bodies travel as opaque lines; bodies
/// synthesized by desugaring have a fixed shape that each target spells
/// in its own idiom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Opaque {
        lines: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<SourceSpan>,
    },
    /// `return <field>;`
    ReturnField { field: String },
    /// `<field> = <param>;`
    AssignField { field: String, param: String },
}

impl Body {
    pub fn opaque<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Body::Opaque {
            lines: lines.into_iter().map(Into::into).collect(),
            span: None,
        }
    }

    pub fn empty() -> Self {
        Body::Opaque {
            lines: Vec::new(),
            span: None,
        }
    }

    /// True for an opaque body with no non-blank lines.
    pub fn is_empty(&self) -> bool {
        match self {
            Body::Opaque { lines, .. } => lines.iter().all(|l| l.trim().is_empty()),
            _ => false,
        }
    }
}

/// Why a member exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Written in the source.
    #[default]
    Declared,
    /// Getter or setter synthesized from a property.
    Accessor { property: String },
    /// Storage synthesized for a property.
    BackingField { property: String },
}

impl Origin {
    pub fn is_accessor(&self) -> bool {
        matches!(self, Origin::Accessor { .. })
    }
}

/// How a method hands back its return value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Passing {
    #[default]
    Value,
    ConstRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Literal>,
    #[serde(default)]
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub has_getter: bool,
    #[serde(default)]
    pub has_setter: bool,
    /// Access of the setter when it differs from the property (`protected set;`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter_visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeRef,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub return_type: TypeRef,
    #[serde(default)]
    pub returns: Passing,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// `None` for abstract contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub origin: Origin,
}

/// One entry of a class's ordered member list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Field(Field),
    Property(Property),
    Method(Method),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(f) => &f.name,
            Member::Property(p) => &p.name,
            Member::Method(m) => &m.name,
        }
    }

    pub fn modifiers(&self) -> &Modifiers {
        match self {
            Member::Field(f) => &f.modifiers,
            Member::Property(p) => &p.modifiers,
            Member::Method(m) => &m.modifiers,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.modifiers().visibility
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Member::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Member::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Field> for Member {
    fn from(field: Field) -> Self {
        Member::Field(field)
    }
}

impl From<Property> for Member {
    fn from(property: Property) -> Self {
        Member::Property(property)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}

// Builder helpers shared by the three member kinds.
macro_rules! modifier_builders {
    ($ty:ty) => {
        impl $ty {
            pub fn public(mut self) -> Self {
                self.modifiers.visibility = Visibility::Public;
                self
            }

            pub fn protected(mut self) -> Self {
                self.modifiers.visibility = Visibility::Protected;
                self
            }

            pub fn private(mut self) -> Self {
                self.modifiers.visibility = Visibility::Private;
                self
            }

            pub fn with_static(mut self) -> Self {
                self.modifiers.is_static = true;
                self
            }

            pub fn with_const(mut self) -> Self {
                self.modifiers.is_const = true;
                self
            }

            pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
                self.modifiers = modifiers;
                self
            }
        }
    };
}

modifier_builders!(Field);
modifier_builders!(Property);
modifier_builders!(Method);

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::default(),
            default_value: None,
            origin: Origin::Declared,
        }
    }

    pub fn with_default(mut self, value: Literal) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            modifiers: Modifiers::default(),
            has_getter: false,
            has_setter: false,
            setter_visibility: None,
            default_value: None,
        }
    }

    pub fn getter(mut self) -> Self {
        self.has_getter = true;
        self
    }

    pub fn setter(mut self) -> Self {
        self.has_setter = true;
        self
    }

    /// A setter with its own access level (`{ get; protected set; }`).
    pub fn setter_with(mut self, visibility: Visibility) -> Self {
        self.has_setter = true;
        self.setter_visibility = Some(visibility);
        self
    }

    pub fn with_default(mut self, value: Literal) -> Self {
        self.default_value = Some(value);
        self
    }
}

impl Method {
    /// A `void` method with an empty body.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: TypeRef::void(),
            returns: Passing::Value,
            parameters: Vec::new(),
            modifiers: Modifiers::default(),
            body: Some(Body::empty()),
            is_constructor: false,
            origin: Origin::Declared,
        }
    }

    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self {
            is_constructor: true,
            ..Self::new(class_name)
        }
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = ty;
        self
    }

    pub fn param(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(Parameter::new(name, ty));
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.modifiers.is_virtual = true;
        self
    }

    pub fn with_override(mut self) -> Self {
        self.modifiers.is_override = true;
        self
    }

    /// Pure contract: abstract, no body.
    pub fn with_abstract(mut self) -> Self {
        self.modifiers.is_abstract = true;
        self.body = None;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }
}
