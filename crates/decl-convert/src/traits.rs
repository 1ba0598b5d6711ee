//! Traits for target-language writers.

use crate::error::ConvertError;
use crate::ir::{Field, Method, TypeRef, Visibility};
use crate::render::{Emitter, RenderContext};

/// A target emits a desugared [`ClassModel`](crate::ir::ClassModel) as
/// declarations in one language.
///
/// The shared driver in [`render`](crate::render) decides member order and
/// grouping; a target only spells each piece in its own idiom.
///
/// # Implementing Custom Targets
///
/// ```ignore
/// use decl_convert::{Target, TargetRegistry};
///
/// struct KotlinTarget;
///
/// impl Target for KotlinTarget {
///     fn language(&self) -> &'static str { "kotlin" }
///     fn extension(&self) -> &'static str { "kt" }
///     // ...
/// }
///
/// static KOTLIN: KotlinTarget = KotlinTarget;
///
/// let mut registry = TargetRegistry::with_builtin();
/// registry.register(&KOTLIN);
/// ```
pub trait Target: Send + Sync {
    /// Language identifier (e.g., "cpp", "java").
    fn language(&self) -> &'static str;

    /// File extension for output (e.g., "hpp").
    fn extension(&self) -> &'static str;

    /// Other names this target answers to (e.g., "c++").
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Spell an IR type.
    fn type_name(&self, ty: &TypeRef) -> Result<String, ConvertError>;

    /// Guards, includes, imports: everything before the namespace.
    fn file_prologue(&self, cx: &RenderContext<'_>, out: &mut Emitter)
    -> Result<(), ConvertError>;

    fn open_namespace(&self, _namespace: &str, _cx: &RenderContext<'_>, _out: &mut Emitter) {}

    fn close_namespace(&self, _namespace: &str, _cx: &RenderContext<'_>, _out: &mut Emitter) {}

    /// Base classes then interfaces, in one clause. `None` when there are no bases.
    fn inheritance_clause(&self, cx: &RenderContext<'_>) -> Option<String>;

    fn open_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) -> Result<(), ConvertError>;

    fn close_class(&self, cx: &RenderContext<'_>, out: &mut Emitter);

    /// Marker opening a visibility group, if the language has one.
    fn access_label(&self, _visibility: Visibility) -> Option<String> {
        None
    }

    fn field(
        &self,
        field: &Field,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError>;

    fn method(
        &self,
        method: &Method,
        cx: &RenderContext<'_>,
        out: &mut Emitter,
    ) -> Result<(), ConvertError>;

    fn file_epilogue(&self, _cx: &RenderContext<'_>, _out: &mut Emitter) {}
}
