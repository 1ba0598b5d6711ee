//! Declaration-level class conversion between languages.
//!
//! `decl-convert` takes the declaration of a class (fields, properties,
//! methods, inheritance) in a language-neutral IR, rewrites source-only
//! idioms into plain members, and renders the result as a declaration in a
//! target language. Method bodies are carried along as opaque text; they
//! are never parsed or translated.
//!
//! # Architecture
//!
//! ```text
//! Front-end             Transform                    Targets
//! ───────────    ──────────────────────────    ─────────────────
//! SourceType ─┐                                ┌─> C++ header
//!  (types.rs) ├─> ClassModel ─> desugared ─────┼─> Java class
//! JSON / code ┘    (ir/)       ClassModel      └─> Python class
//!                               (transform/)     (output/)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use decl_convert::{ClassModel, Primitive, Property, TypeRef, convert};
//!
//! let model = ClassModel::class("Foo").with_member(
//!     Property::new("Bar", TypeRef::primitive(Primitive::Int32))
//!         .public()
//!         .getter()
//!         .setter(),
//! );
//!
//! let header = convert(model, "cpp")?;
//! // class Foo { public: int32_t getBar() const ... private: int32_t barBackingField; };
//! ```
//!
//! # Idioms
//!
//! - Properties become a private `<name>BackingField` plus `get<Name>` and
//!   `set<Name>` accessors.
//! - Array parameters become a pointer followed by an `int32 count`.
//! - Interface methods become abstract contracts.

pub mod config;
pub mod error;
pub mod ir;
pub mod naming;
pub mod registry;
pub mod render;
pub mod traits;
pub mod transform;
pub mod types;

pub mod output;

use rayon::prelude::*;

// Re-exports: IR types
pub use ir::{
    Base, BaseKind, Body, ClassModel, Field, Literal, Member, Method, Modifiers, Origin,
    Parameter, Passing, Primitive, Property, SourceSpan, TypeKind, TypeRef, Visibility,
};

// Re-exports: errors and configuration
pub use config::{Config, RenderOptions};
pub use error::{ConfigError, ConvertError};

// Re-exports: pipeline stages
pub use registry::TargetRegistry;
pub use render::{render, render_with};
pub use traits::Target;
pub use transform::transform;
pub use types::{SourceKind, SourceType, TypeMapper, map_type};

// Re-exports: built-in targets
#[cfg(feature = "write-cpp")]
pub use output::{CPP_TARGET, CppTarget};
#[cfg(feature = "write-java")]
pub use output::{JAVA_TARGET, JavaTarget};
#[cfg(feature = "write-python")]
pub use output::{PYTHON_TARGET, PythonTarget};

/// Transform and render one class with the built-in targets and default
/// options.
pub fn convert(model: ClassModel, target: &str) -> Result<String, ConvertError> {
    Converter::default().convert(model, target)
}

/// Configured conversion pipeline.
///
/// Owns the target registry, render options and type mapper, so several
/// converters with different settings can coexist.
#[derive(Clone)]
pub struct Converter {
    registry: TargetRegistry,
    options: RenderOptions,
    mapper: TypeMapper,
}

impl Converter {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            registry: TargetRegistry::with_builtin(),
            options: config.render.clone(),
            mapper: config.type_mapper()?,
        })
    }

    /// Register custom targets here; they shadow built-ins of the same name.
    pub fn registry_mut(&mut self) -> &mut TargetRegistry {
        &mut self.registry
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Type mapper with the configured aliases, for front-ends building models.
    pub fn mapper(&self) -> &TypeMapper {
        &self.mapper
    }

    /// Transform then render one class.
    ///
    /// The target is resolved first, so an unknown target is reported
    /// before any member error.
    pub fn convert(&self, model: ClassModel, target: &str) -> Result<String, ConvertError> {
        let target = self.registry.require(target)?;
        let model = transform(model)?;
        render_with(&model, target, &self.options)
    }

    /// Convert many classes in parallel. Results keep the input order.
    pub fn convert_batch(
        &self,
        models: Vec<ClassModel>,
        target: &str,
    ) -> Vec<Result<String, ConvertError>> {
        models
            .into_par_iter()
            .map(|model| {
                let name = model.name.clone();
                let result = self.convert(model, target);
                if let Err(err) = &result {
                    tracing::warn!(
                        class = %name,
                        language = target,
                        error = %err,
                        "conversion failed"
                    );
                }
                result
            })
            .collect()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self {
            registry: TargetRegistry::with_builtin(),
            options: RenderOptions::default(),
            mapper: TypeMapper::new(),
        }
    }
}
