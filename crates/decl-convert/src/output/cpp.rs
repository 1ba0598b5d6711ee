//! C++ header target.
//!
//! Emits one header per class: guard, standard includes, project includes,
//! `namespace` block, then the class with `public:` / `protected:` /
//! `private:` sections. Methods are defined inline.

use crate::config::GuardStyle;
use crate::error::ConvertError;
use crate::ir::{
    ClassModel, Field, Literal, Method, Parameter, Passing, Primitive, TypeKind, TypeRef,
    Visibility,
};
use crate::output::emit_body;
use crate::render::{Emitter, RenderContext, format_float, quote_char, quote_string};
use crate::traits::Target;
use std::collections::BTreeSet;

/// Static instance of the C++ target for registry.
pub static CPP_TARGET: CppTarget = CppTarget;

/// C++ target implementing the Target trait.
pub struct CppTarget;

impl CppTarget {
    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::Void => "void",
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Int8 => "int8_t",
            Primitive::Int16 => "int16_t",
            Primitive::Int32 => "int32_t",
            Primitive::Int64 => "int64_t",
            Primitive::UInt8 => "uint8_t",
            Primitive::UInt16 => "uint16_t",
            Primitive::UInt32 => "uint32_t",
            Primitive::UInt64 => "uint64_t",
            Primitive::Float32 => "float",
            Primitive::Float64 => "double",
            Primitive::String => "std::string",
            // Object handles are opaque ids on the C++ side.
            Primitive::Object => "uint32_t",
        }
    }

    /// Value types, object handles and pointers travel by value.
    fn by_value(&self, ty: &TypeRef) -> bool {
        ty.kind == TypeKind::Pointer
            || ty.is_value_type()
            || ty.as_primitive() == Some(Primitive::Object)
    }

    /// Parameters: by value where cheap, the rest by const reference.
    fn parameter(&self, param: &Parameter) -> Result<String, ConvertError> {
        let ty = &param.ty;
        let spelled = if self.by_value(ty) {
            self.type_name(ty)?
        } else {
            format!("const {}&", self.type_name(&ty.clone().with_const(false))?)
        };
        Ok(format!("{} {}", spelled, param.name))
    }

    fn return_type(&self, method: &Method) -> Result<String, ConvertError> {
        match method.returns {
            Passing::Value => self.type_name(&method.return_type),
            Passing::ConstRef if self.by_value(&method.return_type) => {
                self.type_name(&method.return_type.clone().with_const(false))
            }
            Passing::ConstRef => Ok(format!(
                "const {}&",
                self.type_name(&method.return_type.clone().with_const(false))?
            )),
        }
    }

    fn literal(&self, value: &Literal, ty: &TypeRef) -> String {
        match value {
            Literal::Bool(b) => b.to_string(),
            Literal::Int(i) => i.to_string(),
            Literal::Float(f) if ty.as_primitive() == Some(Primitive::Float32) => {
                format!("{}f", format_float(*f))
            }
            Literal::Float(f) => format_float(*f),
            Literal::String(s) => quote_string(s),
            Literal::Char(c) => quote_char(*c),
            Literal::Null => "nullptr".to_string(),
            Literal::Raw(raw) => raw.clone(),
        }
    }

    fn guard_name(&self, model: &ClassModel) -> String {
        let mut parts: Vec<String> = model
            .namespace()
            .map(namespace_segments)
            .unwrap_or_default()
            .into_iter()
            .map(str::to_uppercase)
            .collect();
        parts.push(model.name.to_uppercase());
        parts.push("HPP".to_string());
        parts.join("_")
    }

    fn standard_includes(&self, model: &ClassModel) -> BTreeSet<&'static str> {
        let mut includes = BTreeSet::new();
        for ty in model.referenced_types() {
            match ty.as_primitive() {
                Some(Primitive::String) => {
                    includes.insert("<string>");
                }
                Some(p) if p.is_integral() || p == Primitive::Object => {
                    includes.insert("<cstdint>");
                }
                _ => {}
            }
            if ty.is_array() {
                includes.insert("<vector>");
            }
        }
        includes
    }
}

fn namespace_segments(namespace: &str) -> Vec<&str> {
    namespace
        .split(['.', ':'])
        .filter(|s| !s.is_empty())
        .collect()
}

impl Target for CppTarget {
    fn language(&self) -> &'static str {
        "cpp"
    }

    fn extension(&self) -> &'static str {
        "hpp"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["c++", "hpp"]
    }

    fn type_name(&self, ty: &TypeRef) -> Result<String, ConvertError> {
        let base = match ty.kind {
            TypeKind::Primitive => {
                let primitive = ty
                    .as_primitive()
                    .ok_or_else(|| ConvertError::unsupported_type(&ty.name))?;
                self.primitive(primitive).to_string()
            }
            TypeKind::Reference | TypeKind::Generic => ty.name.clone(),
            TypeKind::Pointer | TypeKind::Array => {
                let element = ty
                    .element
                    .as_deref()
                    .ok_or_else(|| ConvertError::unsupported_type(ty.to_string()))?;
                let element = self.type_name(element)?;
                if ty.kind == TypeKind::Pointer {
                    format!("{}*", element)
                } else {
                    format!("std::vector<{}>", element)
                }
            }
        };
        if ty.is_const {
            Ok(format!("const {}", base))
        } else {
            Ok(base)
        }
    }

    fn file_prologue(
        &self,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let options = &cx.options.cpp;
        match options.guard {
            GuardStyle::PragmaOnce => out.line("#pragma once"),
            GuardStyle::Ifndef => {
                let guard = self.guard_name(cx.model);
                out.line(format!("#ifndef {}", guard));
                out.line(format!("#define {}", guard));
            }
        }
        out.blank();

        if options.standard_includes {
            let includes = self.standard_includes(cx.model);
            for include in &includes {
                out.line(format!("#include {}", include));
            }
            if !includes.is_empty() {
                out.blank();
            }
        }

        for import in &cx.model.imports {
            let path = namespace_segments(import).join("/");
            out.line(format!("#include \"{}.{}\"", path, options.include_extension));
        }
        if !cx.model.imports.is_empty() {
            out.blank();
        }
        Ok(())
    }

    fn open_namespace(&self, namespace: &str, _cx: &RenderContext<'_>, out: &mut Emitter) {
        out.line(format!("namespace {}", namespace_segments(namespace).join("::")));
        out.line("{");
        out.indent();
    }

    fn close_namespace(&self, _namespace: &str, _cx: &RenderContext<'_>, out: &mut Emitter) {
        out.dedent();
        out.line("}");
    }

    fn inheritance_clause(&self, cx: &RenderContext<'_>) -> Option<String> {
        let bases = cx.model.inheritance();
        if bases.is_empty() {
            return None;
        }
        let list: Vec<String> = bases.iter().map(|b| format!("public {}", b)).collect();
        Some(list.join(", "))
    }

    fn open_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) -> Result<(), ConvertError> {
        match self.inheritance_clause(cx) {
            Some(clause) => out.line(format!("class {} : {}", cx.model.name, clause)),
            None => out.line(format!("class {}", cx.model.name)),
        }
        out.line("{");
        out.indent();
        Ok(())
    }

    fn close_class(&self, _cx: &RenderContext<'_>, out: &mut Emitter) {
        out.dedent();
        out.line("};");
    }

    fn access_label(&self, visibility: Visibility) -> Option<String> {
        Some(format!("{}:", visibility.keyword()))
    }

    fn field(
        &self,
        field: &Field,
        _cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError> {
        let modifiers = &field.modifiers;
        let prefix = match (modifiers.is_static, modifiers.is_const) {
            (true, true) => "static constexpr ",
            (true, false) if field.default_value.is_some() => "static inline ",
            (true, false) => "static ",
            (false, true) => "const ",
            (false, false) => "",
        };
        let ty = self.type_name(&field.ty)?;
        match &field.default_value {
            Some(value) => out.line(format!(
                "{}{} {} = {};",
                prefix,
                ty,
                field.name,
                self.literal(value, &field.ty)
            )),
            None => out.line(format!("{}{} {};", prefix, ty, field.name)),
        }
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
        let params = method
            .parameters
            .iter()
            .map(|p| self.parameter(p))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");

        let mut signature = String::new();
        if modifiers.is_static {
            signature.push_str("static ");
        } else if !method.is_constructor
            && !modifiers.is_override
            && (modifiers.is_virtual || is_abstract)
        {
            signature.push_str("virtual ");
        }
        if !method.is_constructor {
            signature.push_str(&self.return_type(method)?);
            signature.push(' ');
        }
        signature.push_str(&cx.method_name(method));
        signature.push('(');
        signature.push_str(&params);
        signature.push(')');
        if modifiers.is_const && !modifiers.is_static {
            signature.push_str(" const");
        }
        if modifiers.is_override {
            signature.push_str(" override");
        }

        if is_abstract {
            if modifiers.is_static {
                out.line(format!("{};", signature));
            } else {
                out.line(format!("{} = 0;", signature));
            }
            return Ok(());
        }

        out.line(signature);
        out.line("{");
        out.indent();
        emit_body(
            method,
            out,
            |field| format!("return {};", field),
            |field, param| format!("{} = {};", field, param),
        )?;
        out.dedent();
        out.line("}");
        Ok(())
    }

    fn file_epilogue(&self, cx: &RenderContext<'_>, out: &mut Emitter) {
        if cx.options.cpp.guard == GuardStyle::Ifndef {
            out.blank();
            out.line(format!("#endif // {}", self.guard_name(cx.model)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::ir::{Base, Body};
    use crate::render::render_with;
    use crate::transform::transform;

    fn int32() -> TypeRef {
        TypeRef::primitive(Primitive::Int32)
    }

    fn emit(model: ClassModel) -> String {
        render_with(&transform(model).unwrap(), &CPP_TARGET, &RenderOptions::default()).unwrap()
    }

    #[test]
    fn type_spelling() {
        let t = &CPP_TARGET;
        assert_eq!(t.type_name(&int32()).unwrap(), "int32_t");
        assert_eq!(
            t.type_name(&TypeRef::primitive(Primitive::String)).unwrap(),
            "std::string"
        );
        assert_eq!(
            t.type_name(&TypeRef::primitive(Primitive::Object)).unwrap(),
            "uint32_t"
        );
        assert_eq!(
            t.type_name(&TypeRef::pointer(int32()).with_const(true)).unwrap(),
            "const int32_t*"
        );
        assert_eq!(
            t.type_name(&TypeRef::array(TypeRef::reference("Base"))).unwrap(),
            "std::vector<Base>"
        );
    }

    #[test]
    fn parameters_pass_non_value_types_by_const_ref() {
        let t = &CPP_TARGET;
        let param = Parameter::new("obj", TypeRef::primitive(Primitive::String));
        assert_eq!(t.parameter(&param).unwrap(), "const std::string& obj");
        let param = Parameter::new("n", int32());
        assert_eq!(t.parameter(&param).unwrap(), "int32_t n");
    }

    #[test]
    fn static_method_with_array() {
        let code = emit(
            ClassModel::class("Calc").with_member(
                Method::new("Add")
                    .public()
                    .with_static()
                    .returning(int32())
                    .param("numbers", TypeRef::array(int32()))
                    .param("count", int32())
                    .with_body(Body::opaque(["return 0;"])),
            ),
        );
        assert!(code.contains("static int32_t add(int32_t* numbers, int32_t count)"));
        assert!(code.contains("return 0;"));
    }

    #[test]
    fn namespace_and_inheritance() {
        let code = emit(
            ClassModel::class("FromCSharp")
                .in_namespace("Output")
                .with_import("Example.Output")
                .with_base(Base::interface("IInterface"))
                .with_base(Base::class("Base")),
        );
        assert!(code.starts_with("#pragma once\n\n#include \"Example/Output.hpp\"\n"));
        assert!(code.contains("namespace Output\n{\n    class FromCSharp : public Base, public IInterface\n    {\n    };\n}\n"));
    }

    #[test]
    fn override_and_virtual() {
        let code = emit(
            ClassModel::class("C")
                .with_member(
                    Method::new("Func1")
                        .protected()
                        .with_override()
                        .param("obj", int32()),
                )
                .with_member(Method::new("Hook").protected().with_virtual()),
        );
        assert!(code.contains("void func1(int32_t obj) override\n"));
        assert!(code.contains("virtual void hook()\n"));
        assert!(!code.contains("virtual void func1"));
    }

    #[test]
    fn interface_methods_are_pure_virtual() {
        let code = emit(ClassModel::interface("IInterface").with_member(
            Method::new("Func3").param("obj", TypeRef::primitive(Primitive::Object)),
        ));
        assert!(code.contains("    public:\n        virtual void func3(uint32_t obj) = 0;\n"));
    }

    #[test]
    fn ifndef_guard() {
        let mut options = RenderOptions::default();
        options.cpp.guard = GuardStyle::Ifndef;
        let model = transform(ClassModel::class("Foo").in_namespace("A.B")).unwrap();
        let code = render_with(&model, &CPP_TARGET, &options).unwrap();
        assert!(code.starts_with("#ifndef A_B_FOO_HPP\n#define A_B_FOO_HPP\n\n"));
        assert!(code.contains("namespace A::B\n"));
        assert!(code.ends_with("}\n\n#endif // A_B_FOO_HPP\n"));
    }

    #[test]
    fn field_modifiers_and_defaults() {
        let code = emit(
            ClassModel::class("C")
                .with_member(
                    Field::new("Max", int32())
                        .public()
                        .with_static()
                        .with_const()
                        .with_default(Literal::Int(10)),
                )
                .with_member(
                    Field::new("weight", TypeRef::primitive(Primitive::Float32))
                        .public()
                        .with_default(Literal::Float(1.0)),
                )
                .with_member(
                    Field::new("name", TypeRef::primitive(Primitive::String))
                        .public()
                        .with_default(Literal::String("NULL".into())),
                ),
        );
        assert!(code.contains("static constexpr int32_t Max = 10;"));
        assert!(code.contains("float weight = 1.0f;"));
        assert!(code.contains("std::string name = \"NULL\";"));
        assert!(code.contains("#include <cstdint>\n#include <string>\n"));
    }

    #[test]
    fn string_getter_returns_const_ref() {
        let code = emit(ClassModel::class("C").with_member(
            crate::ir::Property::new("Name", TypeRef::primitive(Primitive::String))
                .public()
                .getter(),
        ));
        assert!(code.contains("const std::string& getName() const\n"));
        assert!(code.contains("return nameBackingField;"));
    }
}
