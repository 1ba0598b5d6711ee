//! Python target.
//!
//! Emits a type-annotated class. Abstract contracts use `abc`, class-level
//! and constant fields use `typing.ClassVar` / `typing.Final`. Namespaces
//! have no counterpart; the module path is the file's location.

use crate::error::ConvertError;
use crate::ir::{Body, Field, Literal, Member, Method, Primitive, TypeKind, TypeRef, Visibility};
use crate::output::emit_body;
use crate::render::{Emitter, RenderContext, format_float, group_members, quote_string};
use crate::traits::Target;

/// Static instance of the Python target for registry.
pub static PYTHON_TARGET: PythonTarget = PythonTarget;

/// Python target implementing the Target trait.
pub struct PythonTarget;

impl PythonTarget {
    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Void => "None",
            Primitive::Bool => "bool",
            Primitive::Char | Primitive::String => "str",
            Primitive::Int8
            | Primitive::Int16
            | Primitive::Int32
            | Primitive::Int64
            | Primitive::UInt8
            | Primitive::UInt16
            | Primitive::UInt32
            | Primitive::UInt64 => "int",
            Primitive::Float32 | Primitive::Float64 => "float",
            Primitive::Object => "object",
        }
    }

    fn literal(&self, value: &Literal) -> String {
        match value {
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) => format_float(*f),
            Literal::String(s) => quote_string(s),
            Literal::Char(c) => quote_string(&c.to_string()),
            Literal::Null => "None".to_string(),
            Literal::Raw(raw) => raw.clone(),
        }
    }

    fn uses_dataclass(&self, cx: &RenderContext<'_>) -> bool {
        cx.options.python.dataclass && !cx.model.has_abstract_methods()
    }

    /// `@dataclass` rejects a field without a default after one with a
    /// default unless the fields are keyword-only. Walks fields in the
    /// order the driver emits them; `ClassVar` fields are not dataclass
    /// fields.
    fn needs_kw_only(&self, cx: &RenderContext<'_>) -> bool {
        let mut seen_default = false;
        for visibility in Visibility::ORDER {
            let fields = group_members(cx.model, visibility)
                .into_iter()
                .filter_map(Member::as_field);
            for field in fields {
                if field.modifiers.is_static && !field.modifiers.is_const {
                    continue;
                }
                match field.default_value {
                    Some(_) => seen_default = true,
                    None if seen_default => return true,
                    None => {}
                }
            }
        }
        false
    }

    fn typing_names(&self, cx: &RenderContext<'_>) -> Vec<&'static str> {
        let fields: Vec<&Field> = cx.model.fields().collect();
        let mut names = Vec::new();
        if fields
            .iter()
            .any(|f| f.modifiers.is_static && !f.modifiers.is_const)
        {
            names.push("ClassVar");
        }
        if fields.iter().any(|f| f.modifiers.is_const) {
            names.push("Final");
        }
        names
    }

    fn annotation(&self, field: &Field) -> Result<String, ConvertError> {
        let ty = self.type_name(&field.ty)?;
        Ok(match (field.modifiers.is_static, field.modifiers.is_const) {
            (_, true) => format!("Final[{}]", ty),
            (true, false) => format!("ClassVar[{}]", ty),
            (false, false) => ty,
        })
    }
}

impl Target for PythonTarget {
    fn language(&self) -> &'static str {
        "python"
    }

    fn extension(&self) -> &'static str {
        "py"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn type_name(&self, ty: &TypeRef) -> Result<String, ConvertError> {
        match ty.kind {
            TypeKind::Primitive => {
                let primitive = ty
                    .as_primitive()
                    .ok_or_else(|| ConvertError::unsupported_type(&ty.name))?;
                Ok(self.primitive(primitive).to_string())
            }
            TypeKind::Reference | TypeKind::Generic => Ok(ty.name.clone()),
            TypeKind::Pointer | TypeKind::Array => {
                let element = ty
                    .element
                    .as_deref()
                    .ok_or_else(|| ConvertError::unsupported_type(ty.to_string()))?;
                Ok(format!("list[{}]", self.type_name(element)?))
            }
        }
    }

    fn file_prologue(
        &self,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let mut stdlib = Vec::new();
        if cx.model.has_abstract_methods() {
            stdlib.push("from abc import ABC, abstractmethod".to_string());
        }
        if self.uses_dataclass(cx) {
            stdlib.push("from dataclasses import dataclass".to_string());
        }
        let typing = self.typing_names(cx);
        if !typing.is_empty() {
            stdlib.push(format!("from typing import {}", typing.join(", ")));
        }
        for line in &stdlib {
            out.line(line);
        }
        if !stdlib.is_empty() {
            out.blank();
        }

        for import in &cx.model.imports {
            out.line(format!("from {} import *", import));
        }
        if !cx.model.imports.is_empty() {
            out.blank();
        }

        // Two blank lines before a top-level class.
        if !out.is_empty() {
            out.blank();
        }
        Ok(())
    }

    fn inheritance_clause(&self, cx: &RenderContext<'_>) -> Option<String> {
        let mut bases = cx.model.inheritance();
        if cx.model.has_abstract_methods() {
            bases.push("ABC");
        }
        (!bases.is_empty()).then(|| bases.join(", "))
    }

    fn open_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) -> Result<(), ConvertError> {
        if self.uses_dataclass(cx) {
            if self.needs_kw_only(cx) {
                out.line("@dataclass(kw_only=True)");
            } else {
                out.line("@dataclass");
            }
        }
        match self.inheritance_clause(cx) {
            Some(bases) => out.line(format!("class {}({}):", cx.model.name, bases)),
            None => out.line(format!("class {}:", cx.model.name)),
        }
        out.indent();
        Ok(())
    }

    fn close_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) {
        if cx.model.members.is_empty() {
            out.line("pass");
        }
        out.dedent();
    }

    fn field(
        &self,
        field: &Field,
        _cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let annotation = self.annotation(field)?;
        match &field.default_value {
            Some(value) => out.line(format!(
                "{}: {} = {}",
                field.name,
                annotation,
                self.literal(value)
            )),
            None => out.line(format!("{}: {}", field.name, annotation)),
        }
        Ok(())
    }

    fn method(
        &self,
        method: &Method,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let is_static = method.modifiers.is_static;
        let is_abstract = cx.is_abstract(method);

        if is_static {
            out.line("@staticmethod");
        }
        if is_abstract {
            out.line("@abstractmethod");
        }

        let name = if method.is_constructor {
            "__init__".to_string()
        } else {
            cx.method_name(method)
        };
        let mut params = Vec::with_capacity(method.parameters.len() + 1);
        if !is_static {
            params.push("self".to_string());
        }
        for param in &method.parameters {
            params.push(format!("{}: {}", param.name, self.type_name(&param.ty)?));
        }
        let returns = if method.is_constructor {
            "None".to_string()
        } else {
            self.type_name(&method.return_type)?
        };
        out.line(format!("def {}({}) -> {}:", name, params.join(", "), returns));

        out.indent();
        if is_abstract {
            out.line("...");
        } else if method.body.as_ref().is_some_and(Body::is_empty) {
            out.line("pass");
        } else {
            let owner = if is_static {
                cx.model.name.as_str()
            } else {
                "self"
            };
            emit_body(
                method,
                out,
                |field| format!("return {}.{}", owner, field),
                |field, param| format!("{}.{} = {}", owner, field, param),
            )?;
        }
        out.dedent();
        Ok(())
    }
}
