//! Property desugaring.
//!
//! Each property becomes a private backing field plus a getter and an
//! optional setter. Accessors take the property's place in the member
//! list; backing fields are appended after every other member, in property
//! declaration order.

use crate::error::ConvertError;
use crate::ir::{
    Body, ClassModel, Field, Member, Method, Modifiers, Origin, Parameter, Passing, Property,
    TypeRef, Visibility,
};
use crate::naming::{SETTER_PARAM, backing_field_name, getter_name, setter_name};
use regex::Regex;
use std::collections::HashSet;

/// A property that received a backing field.
struct Renamed {
    property: String,
    field: String,
}

/// Names already taken in the class, used to catch synthesized collisions.
struct Taken {
    data: HashSet<String>,
    methods: HashSet<(String, usize)>,
}

impl Taken {
    fn declared(model: &ClassModel) -> Self {
        let mut data = HashSet::new();
        let mut methods = HashSet::new();
        for member in &model.members {
            match member {
                Member::Field(f) => {
                    data.insert(f.name.clone());
                }
                Member::Property(p) => {
                    data.insert(p.name.clone());
                }
                Member::Method(m) => {
                    methods.insert((m.name.clone(), m.parameters.len()));
                }
            }
        }
        Self { data, methods }
    }

    fn claim_field(&mut self, name: &str) -> Result<(), ConvertError> {
        if !self.data.insert(name.to_string()) {
            return Err(ConvertError::duplicate(name));
        }
        Ok(())
    }

    fn claim_method(&mut self, name: &str, arity: usize) -> Result<(), ConvertError> {
        if !self.methods.insert((name.to_string(), arity)) {
            return Err(ConvertError::duplicate(name));
        }
        Ok(())
    }
}

pub(crate) fn desugar_properties(model: &mut ClassModel) -> Result<(), ConvertError> {
    if !model.members.iter().any(|m| matches!(m, Member::Property(_))) {
        return Ok(());
    }

    let mut taken = Taken::declared(model);
    let is_interface = model.is_interface;
    let members = std::mem::take(&mut model.members);
    let mut out = Vec::with_capacity(members.len() * 2);
    let mut backing_fields = Vec::new();
    let mut renamed = Vec::new();

    for member in members {
        let Member::Property(prop) = member else {
            out.push(member);
            continue;
        };

        let abstract_only = is_interface || prop.modifiers.is_abstract;
        let field_name = backing_field_name(&prop.name);

        if !abstract_only {
            taken.claim_field(&field_name)?;
            tracing::trace!(property = %prop.name, field = %field_name, "backing field");
            backing_fields.push(backing_field(&prop, &field_name));
            renamed.push(Renamed {
                property: prop.name.clone(),
                field: field_name.clone(),
            });
        }

        if prop.has_getter {
            let getter = getter(&prop, &field_name, abstract_only);
            taken.claim_method(&getter.name, 0)?;
            tracing::trace!(property = %prop.name, getter = %getter.name, "getter");
            out.push(Member::Method(getter));
        }
        if prop.has_setter {
            let setter = setter(&prop, &field_name, abstract_only);
            taken.claim_method(&setter.name, 1)?;
            tracing::trace!(property = %prop.name, setter = %setter.name, "setter");
            out.push(Member::Method(setter));
        }
    }

    out.extend(backing_fields.into_iter().map(Member::Field));
    model.members = out;

    for member in &mut model.members {
        if let Member::Method(method) = member {
            if method.is_constructor {
                redirect_constructor(method, &renamed);
            }
        }
    }
    Ok(())
}

fn backing_field(prop: &Property, name: &str) -> Field {
    Field {
        name: name.to_string(),
        ty: prop.ty.clone(),
        modifiers: Modifiers {
            visibility: Visibility::Private,
            is_static: prop.modifiers.is_static,
            is_const: prop.modifiers.is_const,
            ..Modifiers::default()
        },
        default_value: prop.default_value.clone(),
        origin: Origin::BackingField {
            property: prop.name.clone(),
        },
    }
}

/// Accessors inherit dispatch modifiers from the property.
fn accessor_modifiers(prop: &Property, visibility: Visibility, abstract_only: bool) -> Modifiers {
    Modifiers {
        visibility,
        is_static: prop.modifiers.is_static,
        is_virtual: prop.modifiers.is_virtual,
        is_override: prop.modifiers.is_override,
        is_abstract: abstract_only,
        is_const: false,
    }
}

fn getter(prop: &Property, field: &str, abstract_only: bool) -> Method {
    let mut modifiers = accessor_modifiers(prop, prop.modifiers.visibility, abstract_only);
    modifiers.is_const = !prop.modifiers.is_static;

    let returns = if prop.ty.is_value_type() {
        Passing::Value
    } else {
        Passing::ConstRef
    };
    let return_type = match returns {
        Passing::ConstRef => prop.ty.clone().with_const(true),
        Passing::Value => prop.ty.clone(),
    };

    Method {
        name: getter_name(&prop.name),
        return_type,
        returns,
        parameters: Vec::new(),
        modifiers,
        body: (!abstract_only).then(|| Body::ReturnField {
            field: field.to_string(),
        }),
        is_constructor: false,
        origin: Origin::Accessor {
            property: prop.name.clone(),
        },
    }
}

fn setter(prop: &Property, field: &str, abstract_only: bool) -> Method {
    let visibility = prop
        .setter_visibility
        .unwrap_or(prop.modifiers.visibility);

    Method {
        name: setter_name(&prop.name),
        return_type: TypeRef::void(),
        returns: Passing::Value,
        parameters: vec![Parameter::new(SETTER_PARAM, prop.ty.clone())],
        modifiers: accessor_modifiers(prop, visibility, abstract_only),
        body: (!abstract_only).then(|| Body::AssignField {
            field: field.to_string(),
            param: SETTER_PARAM.to_string(),
        }),
        is_constructor: false,
        origin: Origin::Accessor {
            property: prop.name.clone(),
        },
    }
}

/// Constructors write the backing field directly instead of going
/// through the property.
fn redirect_constructor(method: &mut Method, renamed: &[Renamed]) {
    let Some(Body::Opaque { lines, .. }) = &mut method.body else {
        return;
    };

    for entry in renamed {
        // A parameter of the same name shadows the property.
        if method.parameters.iter().any(|p| p.name == entry.property) {
            continue;
        }
        let Ok(pattern) = Regex::new(&format!(r"\b{}\b", regex::escape(&entry.property))) else {
            continue;
        };
        for line in lines.iter_mut() {
            if pattern.is_match(line) {
                *line = pattern.replace_all(line, entry.field.as_str()).into_owned();
            }
        }
    }
}
