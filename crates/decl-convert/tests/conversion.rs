//! End-to-end conversion tests across the built-in targets.

#![cfg(all(feature = "write-cpp", feature = "write-java", feature = "write-python"))]

use decl_convert::render::group_members;
use decl_convert::{
    Base, Body, ClassModel, Config, ConvertError, Converter, Field, Literal, Member, Method,
    Primitive, Property, TypeRef, Visibility, convert, transform,
};
use std::io::Write;
use tempfile::TempDir;

const TARGETS: [&str; 3] = ["cpp", "java", "python"];

fn int32() -> TypeRef {
    TypeRef::primitive(Primitive::Int32)
}

fn string() -> TypeRef {
    TypeRef::primitive(Primitive::String)
}

fn foo_bar() -> ClassModel {
    ClassModel::class("Foo").with_member(Property::new("Bar", int32()).public().getter().setter())
}

fn static_add() -> ClassModel {
    ClassModel::class("Calc").with_member(
        Method::new("Add")
            .private()
            .with_static()
            .returning(int32())
            .param("numbers", TypeRef::array(int32()))
            .param("count", int32())
            .with_body(Body::opaque(["return 0;"])),
    )
}

/// A class exercising every member kind, inheritance and a namespace.
fn from_csharp() -> ClassModel {
    ClassModel::class("FromCSharp")
        .in_namespace("Output")
        .with_import("Example.Output")
        .with_base(Base::class("Base"))
        .with_base(Base::interface("IInterface"))
        .with_member(
            Field::new("number", int32())
                .public()
                .with_default(Literal::Int(0)),
        )
        .with_member(Field::new("weight", TypeRef::primitive(Primitive::Float32)).public())
        .with_member(
            Property::new("StringProperty", string())
                .public()
                .getter()
                .setter_with(Visibility::Protected),
        )
        .with_member(Property::new("IntProperty", int32()).public().getter())
        .with_member(Method::constructor("FromCSharp").public().with_body(Body::opaque([
            "StringProperty = \"NULL\";",
            "IntProperty = 0;",
        ])))
        .with_member(
            Method::constructor("FromCSharp")
                .public()
                .param("str", string())
                .param("integer", int32())
                .with_body(Body::opaque([
                    "StringProperty = str;",
                    "IntProperty = integer;",
                ])),
        )
        .with_member(Method::new("Method").public())
        .with_member(
            Method::new("Func3")
                .public()
                .param("obj", TypeRef::primitive(Primitive::Object)),
        )
        .with_member(
            Method::new("Func1")
                .protected()
                .with_override()
                .param("obj", int32()),
        )
        .with_member(
            Method::new("Func2")
                .protected()
                .with_override()
                .param("obj", string()),
        )
        .with_member(
            Method::new("Add")
                .private()
                .with_static()
                .returning(int32())
                .param("numbers", TypeRef::array(int32()))
                .param("count", int32())
                .with_body(Body::opaque(["return 0;"])),
        )
        .with_member(
            Method::new("Explode")
                .private()
                .param("sure", TypeRef::primitive(Primitive::Bool)),
        )
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("missing {needle:?} in:\n{haystack}"))
}

#[test]
fn foo_bar_cpp() {
    let code = convert(foo_bar(), "cpp").unwrap();
    insta::assert_snapshot!(code, @r"
#pragma once

#include <cstdint>

class Foo
{
    public:
        int32_t getBar() const
        {
            return barBackingField;
        }

        void setBar(int32_t value)
        {
            barBackingField = value;
        }

    private:
        int32_t barBackingField;
};
");
}

#[test]
fn foo_bar_java() {
    let code = convert(foo_bar(), "java").unwrap();
    assert_eq!(
        code,
        "public class Foo\n{\n    public int getBar()\n    {\n        return barBackingField;\n    }\n\n    public void setBar(int value)\n    {\n        barBackingField = value;\n    }\n\n    private int barBackingField;\n}\n"
    );
}

#[test]
fn static_add_keeps_arity_in_every_target() {
    let cpp = convert(static_add(), "cpp").unwrap();
    assert!(cpp.contains("static int32_t add(int32_t* numbers, int32_t count)"));

    let java = convert(static_add(), "java").unwrap();
    assert!(java.contains("private static int add(int[] numbers, int count)"));

    let python = convert(static_add(), "python").unwrap();
    assert!(python.contains("def add(numbers: list[int], count: int) -> int:"));

    let model = transform(static_add()).unwrap();
    let add = model.methods().next().unwrap();
    assert!(add.modifiers.is_static);
    assert_eq!(add.parameters.len(), 2);
}

#[test]
fn from_csharp_cpp() {
    let code = convert(from_csharp(), "cpp").unwrap();

    assert!(code.starts_with("#pragma once\n\n#include <cstdint>\n#include <string>\n\n#include \"Example/Output.hpp\"\n\nnamespace Output\n{\n"));
    assert!(code.contains("    class FromCSharp : public Base, public IInterface\n    {\n"));
    assert!(code.contains("FromCSharp(const std::string& str, int32_t integer)"));
    assert!(code.contains("stringPropertyBackingField = \"NULL\";"));
    assert!(code.contains("intPropertyBackingField = integer;"));
    assert!(code.contains("int32_t number = 0;\n            float weight;\n"));
    assert!(code.contains("const std::string& getStringProperty() const"));
    assert!(code.contains("int32_t getIntProperty() const"));
    assert!(code.contains("void func3(uint32_t obj)"));
    assert!(code.contains("void func1(int32_t obj) override"));
    assert!(code.contains("void func2(const std::string& obj) override"));
    assert!(code.contains("static int32_t add(int32_t* numbers, int32_t count)"));
    assert!(code.contains("void explode(bool sure)"));
    assert!(code.ends_with("    };\n}\n"));

    let public = position(&code, "        public:");
    let protected = position(&code, "        protected:");
    let private = position(&code, "        private:");
    assert!(public < protected && protected < private);
    assert!(position(&code, "void setStringProperty") > protected);
    assert!(position(&code, "std::string stringPropertyBackingField;") > private);
}

#[test]
fn from_csharp_java() {
    let code = convert(from_csharp(), "java").unwrap();

    assert!(code.starts_with("package Output;\n\nimport Example.Output.*;\n\n"));
    assert!(code.contains("public class FromCSharp extends Base implements IInterface\n{\n"));
    assert!(code.contains("    public int number = 0;\n    public float weight;\n"));
    assert!(code.contains("public FromCSharp(String str, int integer)"));
    assert!(code.contains("    @Override\n    protected void func1(int obj)\n"));
    assert!(code.contains("public void func3(Object obj)"));
    assert!(code.contains("protected void setStringProperty(String value)"));
    assert!(code.contains("private static int add(int[] numbers, int count)"));
    assert!(code.contains("private void explode(boolean sure)"));
    assert!(code.contains("private String stringPropertyBackingField;"));
}

#[test]
fn from_csharp_python() {
    let code = convert(from_csharp(), "python").unwrap();

    assert!(code.starts_with("from Example.Output import *\n\n\nclass FromCSharp(Base, IInterface):\n"));
    assert!(code.contains("    number: int = 0\n    weight: float\n"));
    assert!(code.contains("    def __init__(self, str: str, integer: int) -> None:\n"));
    assert!(code.contains("        stringPropertyBackingField = str;\n"));
    assert!(code.contains("    def getStringProperty(self) -> str:\n        return self.stringPropertyBackingField\n"));
    assert!(code.contains("    def setStringProperty(self, value: str) -> None:\n        self.stringPropertyBackingField = value\n"));
    assert!(code.contains("    @staticmethod\n    def add(numbers: list[int], count: int) -> int:\n"));
    assert!(code.contains("    def explode(self, sure: bool) -> None:\n        pass\n"));
}

#[test]
fn rendering_is_idempotent() {
    let model = transform(from_csharp()).unwrap();
    for target in TARGETS {
        let first = decl_convert::render(&model, target).unwrap();
        let second = decl_convert::render(&model, target).unwrap();
        assert_eq!(first, second, "{target} output differs between runs");
    }
}

#[test]
fn property_desugaring_preserves_order() {
    let model = ClassModel::class("C")
        .with_member(Field::new("a", int32()))
        .with_member(Property::new("P", int32()).public().getter().setter())
        .with_member(Method::new("M").public())
        .with_member(Property::new("Q", string()).public().getter())
        .with_member(Field::new("z", int32()));
    let model = transform(model).unwrap();

    let names: Vec<&str> = model.members.iter().map(Member::name).collect();
    assert_eq!(
        names,
        vec!["a", "getP", "setP", "M", "getQ", "z", "pBackingField", "qBackingField"]
    );
    assert_eq!(model.properties().count(), 0);
}

#[test]
fn array_parameters_add_one_count_each() {
    let method = Method::new("Mix")
        .public()
        .param("flag", TypeRef::primitive(Primitive::Bool))
        .param("xs", TypeRef::array(int32()))
        .param("name", string())
        .param("ys", TypeRef::array(TypeRef::reference("Item")));
    let declared = method.parameters.len();
    let arrays = method.parameters.iter().filter(|p| p.ty.is_array()).count();

    let model = transform(ClassModel::class("C").with_member(method)).unwrap();
    let params = &model.methods().next().unwrap().parameters;

    assert_eq!(params.len(), declared + arrays);
    assert!(params.iter().all(|p| !p.ty.is_array()));
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["flag", "xs", "count", "name", "ys", "count1"]);
}

#[test]
fn every_member_lands_in_exactly_one_group() {
    let model = transform(from_csharp()).unwrap();
    let grouped: usize = Visibility::ORDER
        .into_iter()
        .map(|v| group_members(&model, v).len())
        .sum();
    assert_eq!(grouped, model.members.len());
}

#[test]
fn interface_methods_render_without_bodies() {
    let model = ClassModel::interface("IShape")
        .with_member(Method::new("Area").returning(TypeRef::primitive(Primitive::Float64)))
        .with_member(Property::new("Name", string()).getter());

    let cpp = convert(model.clone(), "cpp").unwrap();
    assert!(cpp.contains("virtual double area() = 0;"));
    assert!(cpp.contains("virtual const std::string& getName() const = 0;"));
    assert!(!cpp.contains("return"));
    assert!(!cpp.contains("BackingField"));

    let java = convert(model.clone(), "java").unwrap();
    assert!(java.contains("    double area();\n"));
    assert!(java.contains("    String getName();\n"));

    let python = convert(model, "python").unwrap();
    assert!(python.contains("class IShape(ABC):"));
    assert_eq!(python.matches("@abstractmethod").count(), 2);
    assert_eq!(python.matches("        ...\n").count(), 2);
}

#[test]
fn accessor_names_round_trip() {
    for name in ["Bar", "StringProperty", "x", "URL"] {
        let model = ClassModel::class("C").with_member(
            Property::new(name, int32()).public().getter().setter(),
        );
        let model = transform(model).unwrap();
        let names: Vec<&str> = model.members.iter().map(Member::name).collect();
        assert_eq!(
            names,
            vec![
                decl_convert::naming::getter_name(name),
                decl_convert::naming::setter_name(name),
                decl_convert::naming::backing_field_name(name),
            ]
        );
    }
}

#[test]
fn unknown_target_fails_before_transform() {
    let broken = ClassModel::class("C").with_member(Property::new("P", int32()));
    assert_eq!(
        convert(broken, "cobol").unwrap_err(),
        ConvertError::UnsupportedTarget {
            target: "cobol".into()
        }
    );
}

#[test]
fn member_errors_surface_from_convert() {
    let duplicate = ClassModel::class("C")
        .with_member(Field::new("x", int32()))
        .with_member(Field::new("x", string()));
    assert_eq!(
        convert(duplicate, "cpp").unwrap_err(),
        ConvertError::DuplicateMember { name: "x".into() }
    );

    let collision = ClassModel::class("C")
        .with_member(Field::new("barBackingField", int32()))
        .with_member(Property::new("Bar", int32()).public().getter());
    assert_eq!(
        convert(collision, "java").unwrap_err(),
        ConvertError::DuplicateMember {
            name: "barBackingField".into()
        }
    );

    let array_return = ClassModel::class("C")
        .with_member(Method::new("Items").public().returning(TypeRef::array(int32())));
    assert!(matches!(
        convert(array_return, "python"),
        Err(ConvertError::UnsupportedType { .. })
    ));
}

#[test]
fn json_models_convert() {
    let json = r#"{
        "name": "Foo",
        "namespace": "Demo",
        "members": [
            { "property": {
                "name": "Bar",
                "ty": { "kind": "primitive", "name": "int32" },
                "modifiers": { "visibility": "public" },
                "has_getter": true,
                "has_setter": true
            } },
            { "method": {
                "name": "Sum",
                "return_type": { "kind": "primitive", "name": "int64" },
                "parameters": [
                    { "name": "values", "ty": { "kind": "array", "element": { "kind": "primitive", "name": "int64" } } }
                ],
                "modifiers": { "visibility": "public", "is_static": true },
                "body": { "opaque": { "lines": ["return 0;"] } }
            } }
        ]
    }"#;
    let model = ClassModel::from_json(json).unwrap();
    let code = convert(model, "java").unwrap();
    assert!(code.starts_with("package Demo;\n"));
    assert!(code.contains("public static long sum(long[] values, int count)"));
    assert!(code.contains("public int getBar()"));
}

#[test]
fn batch_keeps_input_order() {
    let models = vec![
        foo_bar(),
        ClassModel::class("Broken").with_member(Field::new("v", TypeRef::void())),
        static_add(),
    ];
    let results = Converter::default().convert_batch(models, "cpp");

    assert_eq!(results.len(), 3);
    assert!(results[0].as_ref().unwrap().contains("class Foo"));
    assert!(matches!(
        &results[1],
        Err(ConvertError::MalformedMember { member, .. }) if member == "v"
    ));
    assert!(results[2].as_ref().unwrap().contains("class Calc"));
}

#[test]
fn converter_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("decl-convert.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[render]
indent_width = 2
method_case = "preserve"

[render.cpp]
guard = "ifndef"
standard_includes = false

[types.aliases]
nint = "int64"
"#
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let converter = Converter::new(&config).unwrap();

    let ty = converter.mapper().map_str("nint").unwrap();
    assert_eq!(ty, TypeRef::primitive(Primitive::Int64));

    let model = ClassModel::class("Foo").with_member(Method::new("Run").public());
    let code = converter.convert(model, "c++").unwrap();
    assert_eq!(
        code,
        "#ifndef FOO_HPP\n#define FOO_HPP\n\nclass Foo\n{\n  public:\n    void Run()\n    {\n    }\n};\n\n#endif // FOO_HPP\n"
    );
}
