//! Idiom transform: rewrite source-only constructs into plain IR.
//!
//! Passes run in a fixed order, because property desugaring creates
//! setters whose parameters the array pass must also see:
//!
//! 1. validation (member declaration order, fail fast)
//! 2. [`property`]: property -> backing field + getter/setter
//! 3. [`array`]: array parameter -> pointer + count

pub mod array;
pub mod property;

use crate::error::ConvertError;
use crate::ir::{ClassModel, Member, Method, TypeRef, Visibility};
use crate::naming::getter_name;
use std::collections::HashSet;

/// Rewrite a class into target-neutral, desugared IR.
///
/// Consumes the model; on success every `Property` has been replaced and no
/// parameter has an array type.
pub fn transform(mut model: ClassModel) -> Result<ClassModel, ConvertError> {
    tracing::debug!(
        class = %model.name,
        members = model.members.len(),
        interface = model.is_interface,
        "transforming class"
    );

    validate(&mut model)?;
    property::desugar_properties(&mut model)?;
    array::desugar_array_parameters(&mut model)?;
    Ok(model)
}

fn check_storage_type(member: &str, ty: &TypeRef) -> Result<(), ConvertError> {
    ty.validate()?;
    if ty.is_void() {
        return Err(ConvertError::malformed(member, "has type void"));
    }
    Ok(())
}

fn set_visibility(member: &mut Member, visibility: Visibility) {
    match member {
        Member::Field(f) => f.modifiers.visibility = visibility,
        Member::Property(p) => p.modifiers.visibility = visibility,
        Member::Method(m) => m.modifiers.visibility = visibility,
    }
}

/// Names declared so far. Fields, properties and methods share one
/// namespace; methods may overload by parameter types.
#[derive(Default)]
struct DeclaredNames {
    data: HashSet<String>,
    methods: HashSet<String>,
    signatures: HashSet<(String, bool, Vec<TypeRef>)>,
}

impl DeclaredNames {
    fn claim_data(&mut self, name: &str) -> Result<(), ConvertError> {
        if self.methods.contains(name) || !self.data.insert(name.to_string()) {
            return Err(ConvertError::duplicate(name));
        }
        Ok(())
    }

    fn claim_method(&mut self, method: &Method) -> Result<(), ConvertError> {
        if !method.is_constructor && self.data.contains(&method.name) {
            return Err(ConvertError::duplicate(&method.name));
        }
        let signature = (
            method.name.clone(),
            method.is_constructor,
            method.parameters.iter().map(|p| p.ty.clone()).collect(),
        );
        if !self.signatures.insert(signature) {
            return Err(ConvertError::duplicate(&method.name));
        }
        if !method.is_constructor {
            self.methods.insert(method.name.clone());
        }
        Ok(())
    }
}

/// Check member invariants in declaration order and normalize interface
/// methods into abstract contracts.
fn validate(model: &mut ClassModel) -> Result<(), ConvertError> {
    let is_interface = model.is_interface;
    let mut names = DeclaredNames::default();

    for member in &mut model.members {
        let modifiers = *member.modifiers();
        if is_interface && modifiers.visibility == Visibility::Private {
            // Interface members without an access modifier are public.
            set_visibility(member, Visibility::Public);
        }
        if modifiers.is_override && modifiers.is_static {
            return Err(ConvertError::malformed(
                member.name(),
                "static members cannot override",
            ));
        }

        match member {
            Member::Field(field) => {
                check_storage_type(&field.name, &field.ty)?;
                if is_interface && !field.modifiers.is_static {
                    return Err(ConvertError::malformed(
                        &field.name,
                        "interfaces cannot hold instance fields",
                    ));
                }
                names.claim_data(&field.name)?;
            }
            Member::Property(prop) => {
                check_storage_type(&prop.name, &prop.ty)?;
                if prop.has_getter {
                    array::check_return_type(&getter_name(&prop.name), &prop.ty)?;
                }
                if !prop.has_getter && !prop.has_setter {
                    return Err(ConvertError::malformed(
                        &prop.name,
                        "property has neither getter nor setter",
                    ));
                }
                names.claim_data(&prop.name)?;
            }
            Member::Method(method) => {
                method.return_type.validate()?;
                array::check_return_type(&method.name, &method.return_type)?;
                for param in &method.parameters {
                    check_storage_type(&param.name, &param.ty)?;
                }
                if is_interface {
                    if method.is_constructor {
                        return Err(ConvertError::malformed(
                            &method.name,
                            "interfaces cannot declare constructors",
                        ));
                    }
                    if method.body.as_ref().is_some_and(|b| !b.is_empty()) {
                        return Err(ConvertError::malformed(
                            &method.name,
                            "interface methods cannot have a body",
                        ));
                    }
                    method.modifiers.is_abstract = true;
                }
                if method.modifiers.is_abstract {
                    method.body = None;
                }
                names.claim_method(method)?;
            }
        }
    }
    Ok(())
}
