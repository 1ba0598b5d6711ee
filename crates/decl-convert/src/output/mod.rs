//! Target writers - emit desugared IR as declarations.

#[cfg(feature = "write-cpp")]
pub mod cpp;
#[cfg(feature = "write-java")]
pub mod java;
#[cfg(feature = "write-python")]
pub mod python;

#[cfg(feature = "write-cpp")]
pub use cpp::{CPP_TARGET, CppTarget};
#[cfg(feature = "write-java")]
pub use java::{JAVA_TARGET, JavaTarget};
#[cfg(feature = "write-python")]
pub use python::{PYTHON_TARGET, PythonTarget};

use crate::error::ConvertError;
use crate::ir::{Body, Method};
use crate::render::{Emitter, dedent_lines};

/// Emit a method body line by line, spelling the synthesized shapes with
/// the given closures.
///
/// Opaque lines are forwarded after removing their common indentation.
pub(crate) fn emit_body(
    method: &Method,
    out: &mut Emitter,
    return_field: impl Fn(&str) -> String,
    assign_field: impl Fn(&str, &str) -> String,
) -> Result<(), ConvertError> {
    match &method.body {
        Some(Body::Opaque { lines, .. }) => {
            for line in dedent_lines(lines) {
                out.line(line);
            }
        }
        Some(Body::ReturnField { field }) => out.line(return_field(field)),
        Some(Body::AssignField { field, param }) => out.line(assign_field(field, param)),
        None => {
            return Err(ConvertError::malformed(
                &method.name,
                "concrete method has no body",
            ));
        }
    }
    Ok(())
}
