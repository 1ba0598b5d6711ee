//! Java target.
//!
//! Emits a `package` line, wildcard imports and one top-level class or
//! interface. Java has no section labels, so every member carries its own
//! access modifier.

use crate::config::BraceStyle;
use crate::error::ConvertError;
use crate::ir::{Field, Literal, Method, Primitive, TypeKind, TypeRef, Visibility};
use crate::output::emit_body;
use crate::render::{Emitter, RenderContext, format_float, quote_char, quote_string};
use crate::traits::Target;

/// Static instance of the Java target for registry.
pub static JAVA_TARGET: JavaTarget = JavaTarget;

/// Java target implementing the Target trait.
pub struct JavaTarget;

impl JavaTarget {
    fn primitive(&self, primitive: Primitive) -> &'static str {
        // Java has no unsigned types; widen to the next signed type.
        match primitive {
            Primitive::Void => "void",
            Primitive::Bool => "boolean",
            Primitive::Char => "char",
            Primitive::Int8 => "byte",
            Primitive::Int16 | Primitive::UInt8 => "short",
            Primitive::Int32 | Primitive::UInt16 => "int",
            Primitive::Int64 | Primitive::UInt32 | Primitive::UInt64 => "long",
            Primitive::Float32 => "float",
            Primitive::Float64 => "double",
            Primitive::String => "String",
            Primitive::Object => "Object",
        }
    }

    fn literal(&self, value: &Literal, ty: &TypeRef) -> String {
        let primitive = ty.as_primitive();
        match value {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) if self.type_is_long(primitive) => format!("{}L", i),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) if primitive == Some(Primitive::Float32) => {
                format!("{}f", format_float(*f))
            }
            Literal::Float(f) => format_float(*f),
            Literal::String(s) => quote_string(s),
            Literal::Char(c) => quote_char(*c),
            Literal::Null => "null".to_string(),
            Literal::Raw(raw) => raw.clone(),
        }
    }

    fn type_is_long(&self, primitive: Option<Primitive>) -> bool {
        primitive.is_some_and(|p| self.primitive(p) == "long")
    }

    fn open_block(&self, header: String, cx: &RenderContext<'_>, out: &mut Emitter) {
        match cx.options.java.brace_style {
            BraceStyle::NextLine => {
                out.line(header);
                out.line("{");
            }
            BraceStyle::SameLine => out.line(format!("{} {{", header)),
        }
        out.indent();
    }

    fn close_block(&self, out: &mut Emitter) {
        out.dedent();
        out.line("}");
    }

    /// Interface members are implicitly public and may not be anything
    /// else; class members spell their access explicitly.
    fn access(
        &self,
        member: &str,
        visibility: Visibility,
        cx: &RenderContext<'_>,
    ) -> Result<String, ConvertError> {
        match (cx.model.is_interface, visibility) {
            (false, _) => Ok(format!("{} ", visibility.keyword())),
            (true, Visibility::Public) => Ok(String::new()),
            (true, _) => Err(ConvertError::malformed(
                member,
                "java interface members must be public",
            )),
        }
    }
}

impl Target for JavaTarget {
    fn language(&self) -> &'static str {
        "java"
    }

    fn extension(&self) -> &'static str {
        "java"
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
                Ok(format!("{}[]", self.type_name(element)?))
            }
        }
    }

    fn file_prologue(
        &self,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        if let Some(namespace) = cx.model.namespace() {
            out.line(format!("package {};", namespace));
            out.blank();
        }
        for import in &cx.model.imports {
            out.line(format!("import {}.*;", import));
        }
        if !cx.model.imports.is_empty() {
            out.blank();
        }
        Ok(())
    }

    fn inheritance_clause(&self, cx: &RenderContext<'_>) -> Option<String> {
        let model = cx.model;
        if model.is_interface {
            let all = model.inheritance();
            return (!all.is_empty()).then(|| format!("extends {}", all.join(", ")));
        }

        let classes: Vec<&str> = model.base_classes().collect();
        let interfaces: Vec<&str> = model.interfaces().collect();
        let mut parts = Vec::new();
        if !classes.is_empty() {
            parts.push(format!("extends {}", classes.join(", ")));
        }
        if !interfaces.is_empty() {
            parts.push(format!("implements {}", interfaces.join(", ")));
        }
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    fn open_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) -> Result<(), ConvertError> {
        let model = cx.model;
        if !model.is_interface && model.base_classes().count() > 1 {
            return Err(ConvertError::malformed(
                &model.name,
                "java classes extend at most one class",
            ));
        }
        let mut header = String::from("public ");
        if model.is_interface {
            header.push_str("interface ");
        } else if model.has_abstract_methods() {
            header.push_str("abstract class ");
        } else {
            header.push_str("class ");
        }
        header.push_str(&model.name);
        if let Some(clause) = self.inheritance_clause(cx) {
            header.push(' ');
            header.push_str(&clause);
        }
        self.open_block(header, cx, out);
        Ok(())
    }

    fn close_class(&self, _cx: &RenderContext<'_>, out: &mut Emitter) {
        self.close_block(out);
    }

    fn field(
        &self,
        field: &Field,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let mut decl = self.access(&field.name, field.modifiers.visibility, cx)?;
        if field.modifiers.is_static {
            decl.push_str("static ");
        }
        if field.modifiers.is_const {
            decl.push_str("final ");
        }
        decl.push_str(&self.type_name(&field.ty)?);
        decl.push(' ');
        decl.push_str(&field.name);
        if let Some(value) = &field.default_value {
            decl.push_str(" = ");
            decl.push_str(&self.literal(value, &field.ty));
        }
        decl.push(';');
        out.line(decl);
        Ok(())
    }

    fn method(
        &self,
        method: &Method,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let modifiers = &method.modifiers;
        let is_abstract = cx.is_abstract(method);

        if modifiers.is_override {
            out.line("@Override");
        }

        let mut header = self.access(&method.name, modifiers.visibility, cx)?;
        if modifiers.is_static {
            header.push_str("static ");
        }
        if is_abstract && !cx.model.is_interface {
            header.push_str("abstract ");
        }
        if !method.is_constructor {
            header.push_str(&self.type_name(&method.return_type)?);
            header.push(' ');
        }
        header.push_str(&cx.method_name(method));

        let params = method
            .parameters
            .iter()
            .map(|p| -> Result<String, ConvertError> {
                Ok(format!("{} {}", self.type_name(&p.ty)?, p.name))
            })
            .collect::<Result<Vec<_>, _>>()?;
        header.push('(');
        header.push_str(&params.join(", "));
        header.push(')');

        if is_abstract {
            out.line(format!("{};", header));
            return Ok(());
        }

        self.open_block(header, cx, out);
        emit_body(
            method,
            out,
            |field| format!("return {};", field),
            |field, param| format!("{} = {};", field, param),
        )?;
        self.close_block(out);
        Ok(())
    }
}
