//! Array-parameter desugaring.
//!
//! `f(int[] xs)` becomes `f(int* xs, int count)`. When the source already
//! passes the length right after the array as an integral `count`, that
//! parameter is reused verbatim instead of adding a second one.

use crate::error::ConvertError;
use crate::ir::{ClassModel, Member, Method, Parameter, Primitive, TypeRef};
use crate::naming::COUNT_PARAM;

pub(crate) fn desugar_array_parameters(model: &mut ClassModel) -> Result<(), ConvertError> {
    for member in &mut model.members {
        if let Member::Method(method) = member {
            desugar_method(method)?;
        }
    }
    Ok(())
}

/// Arrays cannot be returned through a pointer + count pair.
///
/// Checked during validation so the error keeps member declaration order.
pub(crate) fn check_return_type(method: &str, ty: &TypeRef) -> Result<(), ConvertError> {
    if ty.is_array() {
        return Err(ConvertError::unsupported_type(format!(
            "{} (array return type of `{}`)",
            ty, method
        )));
    }
    Ok(())
}

fn desugar_method(method: &mut Method) -> Result<(), ConvertError> {
    if !method.parameters.iter().any(|p| p.ty.is_array()) {
        return Ok(());
    }

    let original = std::mem::take(&mut method.parameters);
    let mut out: Vec<Parameter> = Vec::with_capacity(original.len() + 1);
    let mut params = original.iter().peekable();

    while let Some(param) = params.next() {
        let Some(element) = param.ty.element.as_deref().filter(|_| param.ty.is_array()) else {
            out.push(param.clone());
            continue;
        };

        let pointer = TypeRef::pointer(element.clone()).with_const(param.ty.is_const);
        out.push(Parameter::new(&param.name, pointer));

        if let Some(next) = params.next_if(|p| p.name == COUNT_PARAM && p.ty.is_integral()) {
            tracing::trace!(method = %method.name, param = %param.name, "reusing count parameter");
            out.push(next.clone());
            continue;
        }

        let count = free_count_name(&original, &out);
        tracing::trace!(method = %method.name, param = %param.name, count = %count, "array parameter");
        out.push(Parameter::new(count, TypeRef::primitive(Primitive::Int32)));
    }

    method.parameters = out;
    Ok(())
}

/// `count`, or `count1`, `count2`, ... when taken.
fn free_count_name(original: &[Parameter], added: &[Parameter]) -> String {
    let taken = |name: &str| {
        original
            .iter()
            .chain(added)
            .any(|p| p.name == name)
    };
    if !taken(COUNT_PARAM) {
        return COUNT_PARAM.to_string();
    }
    (1..)
        .map(|i| format!("{}{}", COUNT_PARAM, i))
        .find(|name| !taken(name))
        .unwrap_or_else(|| COUNT_PARAM.to_string())
}
