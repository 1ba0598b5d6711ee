//! Source type descriptors and their mapping into the IR.
//!
//! The mapper only records the source shape. Arrays stay arrays here;
//! turning array parameters into pointer + count pairs is the transform's
//! job.

use crate::error::{ConfigError, ConvertError};
use crate::ir::{Primitive, TypeRef};
use std::collections::BTreeMap;

/// How the front-end classified a source type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Primitive,
    Reference,
    Generic,
}

/// Opaque source type descriptor handed over by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceType {
    pub name: String,
    pub kind: SourceKind,
    pub is_array: bool,
    pub is_const: bool,
}

/// Source keywords and their canonical IR primitive.
const SOURCE_PRIMITIVES: &[(&str, Primitive)] = &[
    ("void", Primitive::Void),
    ("bool", Primitive::Bool),
    ("char", Primitive::Char),
    ("sbyte", Primitive::Int8),
    ("short", Primitive::Int16),
    ("int", Primitive::Int32),
    ("long", Primitive::Int64),
    ("byte", Primitive::UInt8),
    ("ushort", Primitive::UInt16),
    ("uint", Primitive::UInt32),
    ("ulong", Primitive::UInt64),
    ("float", Primitive::Float32),
    ("double", Primitive::Float64),
    ("string", Primitive::String),
    ("object", Primitive::Object),
    // Framework names for the same types.
    ("Boolean", Primitive::Bool),
    ("Char", Primitive::Char),
    ("SByte", Primitive::Int8),
    ("Int16", Primitive::Int16),
    ("Int32", Primitive::Int32),
    ("Int64", Primitive::Int64),
    ("Byte", Primitive::UInt8),
    ("UInt16", Primitive::UInt16),
    ("UInt32", Primitive::UInt32),
    ("UInt64", Primitive::UInt64),
    ("Single", Primitive::Float32),
    ("Double", Primitive::Float64),
    ("String", Primitive::String),
    ("Object", Primitive::Object),
];

fn builtin_primitive(name: &str) -> Option<Primitive> {
    let name = name.strip_prefix("System.").unwrap_or(name);
    SOURCE_PRIMITIVES
        .iter()
        .find(|(source, _)| *source == name)
        .map(|(_, p)| *p)
}

impl SourceType {
    pub fn primitive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: SourceKind::Primitive,
            is_array: false,
            is_const: false,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Reference,
            ..Self::primitive(name)
        }
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Generic,
            ..Self::primitive(name)
        }
    }

    pub fn array_of(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Classify a source spelling such as `int`, `string[]` or `Base`.
    ///
    /// Known keywords are primitives; any other name is a reference.
    /// Front-ends that know better should build the descriptor directly.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (text, is_const) = match text.strip_prefix("const ") {
            Some(rest) => (rest.trim_start(), true),
            None => (text, false),
        };
        let (name, is_array) = match text.find('[') {
            Some(idx) => (text[..idx].trim_end(), true),
            None => (text, false),
        };
        let kind = if builtin_primitive(name).is_some() {
            SourceKind::Primitive
        } else {
            SourceKind::Reference
        };
        Self {
            name: name.to_string(),
            kind,
            is_array,
            is_const,
        }
    }
}

/// Maps source type descriptors to [`TypeRef`]s through a fixed table.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    aliases: BTreeMap<String, Primitive>,
}

impl TypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add extra source names, each mapped to a canonical IR primitive name.
    pub fn with_aliases<'a, I>(mut self, aliases: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (alias, target) in aliases {
            let primitive =
                Primitive::from_ir_name(target).ok_or_else(|| ConfigError::InvalidAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                })?;
            self.aliases.insert(alias.clone(), primitive);
        }
        Ok(self)
    }

    fn lookup(&self, name: &str) -> Option<Primitive> {
        self.aliases
            .get(name)
            .copied()
            .or_else(|| builtin_primitive(name))
    }

    /// Map a source type into the IR.
    pub fn map(&self, source: &SourceType) -> Result<TypeRef, ConvertError> {
        if source.name.is_empty() {
            return Err(ConvertError::unsupported_type("<empty>"));
        }
        let element = match source.kind {
            SourceKind::Primitive => {
                let primitive = self
                    .lookup(&source.name)
                    .ok_or_else(|| ConvertError::unsupported_type(&source.name))?;
                TypeRef::primitive(primitive)
            }
            // Aliases apply to names the front-end could not classify.
            SourceKind::Reference => match self.aliases.get(&source.name) {
                Some(primitive) => TypeRef::primitive(*primitive),
                None => TypeRef::reference(&source.name),
            },
            SourceKind::Generic => TypeRef::generic(&source.name),
        };

        if source.is_array {
            if element.is_void() {
                return Err(ConvertError::unsupported_type(format!("{}[]", source.name)));
            }
            Ok(TypeRef::array(element).with_const(source.is_const))
        } else {
            Ok(element.with_const(source.is_const))
        }
    }

    /// Parse and map a source spelling in one step.
    pub fn map_str(&self, text: &str) -> Result<TypeRef, ConvertError> {
        self.map(&SourceType::parse(text))
    }
}

/// Map a source type with the built-in table.
pub fn map_type(source: &SourceType) -> Result<TypeRef, ConvertError> {
    TypeMapper::default().map(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeKind;

    #[test]
    fn primitives_map_to_fixed_width() {
        let ty = map_type(&SourceType::primitive("int")).unwrap();
        assert_eq!(ty, TypeRef::primitive(Primitive::Int32));

        let ty = map_type(&SourceType::primitive("bool")).unwrap();
        assert_eq!(ty.as_primitive(), Some(Primitive::Bool));

        let ty = map_type(&SourceType::primitive("string")).unwrap();
        assert_eq!(ty.as_primitive(), Some(Primitive::String));
    }

    #[test]
    fn framework_names() {
        let ty = map_type(&SourceType::primitive("System.Int64")).unwrap();
        assert_eq!(ty.as_primitive(), Some(Primitive::Int64));
    }

    #[test]
    fn arrays_keep_source_shape() {
        let ty = map_type(&SourceType::primitive("int").array_of()).unwrap();
        assert_eq!(ty.kind, TypeKind::Array);
        assert_eq!(
            ty.element.as_deref(),
            Some(&TypeRef::primitive(Primitive::Int32))
        );
    }

    #[test]
    fn unknown_primitive_names_the_type() {
        let err = map_type(&SourceType::primitive("decimal")).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedType {
                name: "decimal".into()
            }
        );
    }

    #[test]
    fn void_arrays_are_rejected() {
        assert!(map_type(&SourceType::primitive("void").array_of()).is_err());
    }

    #[test]
    fn references_and_generics_pass_through() {
        let ty = map_type(&SourceType::reference("Base")).unwrap();
        assert_eq!(ty, TypeRef::reference("Base"));

        let ty = map_type(&SourceType::generic("T")).unwrap();
        assert_eq!(ty.kind, TypeKind::Generic);
    }

    #[test]
    fn parse_spellings() {
        assert_eq!(
            SourceType::parse("int[]"),
            SourceType::primitive("int").array_of()
        );
        assert_eq!(SourceType::parse("Base"), SourceType::reference("Base"));

        let parsed = SourceType::parse("const string");
        assert!(parsed.is_const);
        assert_eq!(parsed.kind, SourceKind::Primitive);
    }

    #[test]
    fn aliases_extend_the_table() {
        let aliases = BTreeMap::from([("nint".to_string(), "int64".to_string())]);
        let mapper = TypeMapper::new().with_aliases(&aliases).unwrap();

        let ty = mapper.map_str("nint").unwrap();
        assert_eq!(ty.as_primitive(), Some(Primitive::Int64));

        let ty = mapper.map(&SourceType::primitive("nint")).unwrap();
        assert_eq!(ty.as_primitive(), Some(Primitive::Int64));
    }

    #[test]
    fn alias_to_unknown_primitive_fails() {
        let aliases = BTreeMap::from([("money".to_string(), "decimal".to_string())]);
        assert!(matches!(
            TypeMapper::new().with_aliases(&aliases),
            Err(ConfigError::InvalidAlias { .. })
        ));
    }
}
