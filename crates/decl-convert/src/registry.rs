//! Target lookup by language name, alias, or file extension.

use crate::error::ConvertError;
use crate::traits::Target;

/// Set of available targets.
///
/// Targets registered later shadow earlier ones with the same name, so a
/// caller can replace a built-in target without rebuilding the set.
#[derive(Clone)]
pub struct TargetRegistry {
    targets: Vec<&'static dyn Target>,
}

impl TargetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Every target compiled into this build.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        #[cfg(feature = "write-cpp")]
        registry.register(&crate::output::cpp::CPP_TARGET);
        #[cfg(feature = "write-java")]
        registry.register(&crate::output::java::JAVA_TARGET);
        #[cfg(feature = "write-python")]
        registry.register(&crate::output::python::PYTHON_TARGET);
        registry
    }

    pub fn register(&mut self, target: &'static dyn Target) {
        tracing::debug!(language = target.language(), "registered target");
        self.targets.push(target);
    }

    /// Find a target by language name or alias, ignoring case.
    pub fn get(&self, name: &str) -> Option<&'static dyn Target> {
        self.targets
            .iter()
            .rev()
            .copied()
            .find(|t| {
                t.language().eq_ignore_ascii_case(name)
                    || t.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
            })
    }

    /// Like [`get`](Self::get), reporting an unknown name as an error.
    pub fn require(&self, name: &str) -> Result<&'static dyn Target, ConvertError> {
        self.get(name).ok_or_else(|| ConvertError::UnsupportedTarget {
            target: name.to_string(),
        })
    }

    /// Find a target by output file extension (without the dot).
    pub fn for_extension(&self, extension: &str) -> Option<&'static dyn Target> {
        self.targets
            .iter()
            .rev()
            .copied()
            .find(|t| t.extension().eq_ignore_ascii_case(extension))
    }

    pub fn targets(&self) -> impl Iterator<Item = &'static dyn Target> + '_ {
        self.targets.iter().copied()
    }

    /// Language names in registration order, without duplicates.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for target in &self.targets {
            if !names.contains(&target.language()) {
                names.push(target.language());
            }
        }
        names
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Field, Method, TypeRef};
    use crate::render::{Emitter, RenderContext};

    struct StubTarget;

    impl Target for StubTarget {
        fn language(&self) -> &'static str {
            "cpp"
        }
        fn extension(&self) -> &'static str {
            "h"
        }
        fn type_name(&self, ty: &TypeRef) -> Result<String, ConvertError> {
            Ok(ty.to_string())
        }
        fn file_prologue(
            &self,
            _cx: &RenderContext<'_>,
            out: &mut Emitter,
        ) -> Result<(), ConvertError> {
            out.line("// stub");
            Ok(())
        }
        fn inheritance_clause(&self, _cx: &RenderContext<'_>) -> Option<String> {
            None
        }
        fn open_class(&self, cx: &RenderContext<'_>, out: &mut Emitter) -> Result<(), ConvertError> {
            out.line(format!("class {}", cx.model.name));
            Ok(())
        }
        fn close_class(&self, _cx: &RenderContext<'_>, out: &mut Emitter) {
            out.line("end");
        }
        fn field(
            &self,
            field: &Field,
            _cx: &RenderContext<'_>,
            out: &mut Emitter,
        ) -> Result<(), ConvertError> {
            out.line(&field.name);
            Ok(())
        }
        fn method(
            &self,
            method: &Method,
            _cx: &RenderContext<'_>,
            out: &mut Emitter,
        ) -> Result<(), ConvertError> {
            out.line(&method.name);
            Ok(())
        }
    }

    static STUB: StubTarget = StubTarget;

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = TargetRegistry::new();
        assert!(registry.get("cpp").is_none());
        assert_eq!(
            registry.require("cpp").err(),
            Some(ConvertError::UnsupportedTarget {
                target: "cpp".into()
            })
        );
    }

    #[test]
    fn later_registration_shadows_earlier() {
        let mut registry = TargetRegistry::with_builtin();
        registry.register(&STUB);
        let target = registry.require("cpp").unwrap();
        assert_eq!(target.extension(), "h");
        assert_eq!(registry.names().iter().filter(|n| **n == "cpp").count(), 1);
    }

    #[cfg(all(feature = "write-cpp", feature = "write-java", feature = "write-python"))]
    #[test]
    fn builtin_targets() {
        let registry = TargetRegistry::default();
        assert_eq!(registry.names(), vec!["cpp", "java", "python"]);
        assert_eq!(registry.require("C++").unwrap().language(), "cpp");
        assert_eq!(registry.require("py").unwrap().language(), "python");
        assert_eq!(registry.for_extension("java").unwrap().language(), "java");
        assert_eq!(registry.for_extension("hpp").unwrap().language(), "cpp");
        assert!(registry.get("rust").is_none());
    }
}
