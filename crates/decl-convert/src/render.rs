//! Target-independent rendering driver.
//!
//! The driver owns layout: file framing, namespace, class, then one group
//! per visibility (public, protected, private). Within a group fields come
//! first, then property accessors, then the remaining methods, each kind in
//! member order. Targets spell the pieces through [`Target`].

use crate::config::{MethodCase, RenderOptions};
use crate::error::ConvertError;
use crate::ir::{ClassModel, Member, Method, Origin, Visibility};
use crate::naming::lower_first;
use crate::registry::TargetRegistry;
use crate::traits::Target;

/// Line buffer with indentation.
pub struct Emitter {
    lines: Vec<String>,
    indent: usize,
    width: usize,
}

impl Emitter {
    pub fn new(width: usize) -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
            width,
        }
    }

    /// Append one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", " ".repeat(self.indent * self.width), text));
        }
    }

    /// Append an empty line. Ignored at the start of the file.
    pub fn blank(&mut self) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join into text with a single trailing newline.
    pub fn finish(mut self) -> String {
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// What a target sees while rendering one class.
pub struct RenderContext<'a> {
    pub model: &'a ClassModel,
    pub options: &'a RenderOptions,
}

impl RenderContext<'_> {
    /// Output name of a method: constructors take the class name, accessors
    /// keep their synthesized name, declared methods follow `method_case`.
    pub fn method_name(&self, method: &Method) -> String {
        if method.is_constructor {
            return self.model.name.clone();
        }
        match (&method.origin, self.options.method_case) {
            (Origin::Declared, MethodCase::LowerFirst) => lower_first(&method.name),
            _ => method.name.clone(),
        }
    }

    /// Methods without a body in the output.
    pub fn is_abstract(&self, method: &Method) -> bool {
        self.model.is_interface || method.modifiers.is_abstract
    }
}

/// Remove the common leading whitespace of forwarded body lines.
///
/// The shared prefix is compared character by character, so lines mixing
/// tabs, spaces or wide spaces keep whatever they do not have in common.
pub fn dedent_lines(lines: &[String]) -> Vec<String> {
    let mut common: Option<&str> = None;
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        let leading = &line[..line.len() - line.trim_start().len()];
        common = Some(match common {
            None => leading,
            Some(prefix) => shared_prefix(prefix, leading),
        });
    }
    let common = common.unwrap_or("");
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l.strip_prefix(common).unwrap_or(l).trim_end().to_string()
            }
        })
        .collect()
}

fn shared_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

/// Double-quoted string literal with C-style escapes.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Single-quoted character literal.
pub fn quote_char(value: char) -> String {
    match value {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        c => format!("'{}'", c),
    }
}

/// Float literal that always carries a decimal point.
pub fn format_float(value: f64) -> String {
    let text = format!("{:?}", value);
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{}.0", text)
    }
}

fn kind_rank(member: &Member) -> u8 {
    match member {
        Member::Field(_) => 0,
        Member::Property(_) => 1,
        Member::Method(m) if m.origin.is_accessor() => 1,
        Member::Method(_) => 2,
    }
}

/// Members of one visibility, fields first, then accessors, then methods.
pub fn group_members(model: &ClassModel, visibility: Visibility) -> Vec<&Member> {
    let mut group: Vec<&Member> = model
        .members
        .iter()
        .filter(|m| m.visibility() == visibility)
        .collect();
    group.sort_by_key(|m| kind_rank(m));
    group
}

/// Render a transformed class with the built-in target of the given name
/// and default options.
pub fn render(model: &ClassModel, target: &str) -> Result<String, ConvertError> {
    let registry = TargetRegistry::with_builtin();
    let target = registry.require(target)?;
    render_with(model, target, &RenderOptions::default())
}

/// Render a transformed class with a specific target.
///
/// Properties must already be desugared; a remaining property is reported
/// as malformed rather than rendered.
pub fn render_with(
    model: &ClassModel,
    target: &dyn Target,
    options: &RenderOptions,
) -> Result<String, ConvertError> {
    tracing::debug!(
        class = %model.name,
        language = target.language(),
        members = model.members.len(),
        "rendering class"
    );

    if let Some(prop) = model.properties().next() {
        return Err(ConvertError::malformed(
            &prop.name,
            "property must be desugared before rendering",
        ));
    }

    let cx = RenderContext { model, options };
    let mut out = Emitter::new(options.indent_width);

    target.file_prologue(&cx, &mut out)?;
    let namespace = model.namespace();
    if let Some(ns) = namespace {
        target.open_namespace(ns, &cx, &mut out);
    }
    target.open_class(&cx, &mut out)?;

    let mut first_group = true;
    for visibility in Visibility::ORDER {
        let group = group_members(model, visibility);
        if group.is_empty() {
            continue;
        }
        if !first_group {
            out.blank();
        }
        first_group = false;

        let label = target.access_label(visibility);
        if let Some(label) = &label {
            out.line(label);
            out.indent();
        }

        let mut previous_was_method: Option<bool> = None;
        for member in group {
            let is_method = matches!(member, Member::Method(_));
            if previous_was_method.is_some_and(|prev| prev || is_method) {
                out.blank();
            }
            match member {
                Member::Field(field) => target.field(field, &cx, &mut out)?,
                Member::Method(method) => target.method(method, &cx, &mut out)?,
                Member::Property(prop) => {
                    return Err(ConvertError::malformed(
                        &prop.name,
                        "property must be desugared before rendering",
                    ));
                }
            }
            previous_was_method = Some(is_method);
        }

        if label.is_some() {
            out.dedent();
        }
    }

    target.close_class(&cx, &mut out);
    if let Some(ns) = namespace {
        target.close_namespace(ns, &cx, &mut out);
    }
    target.file_epilogue(&cx, &mut out);

    Ok(out.finish())
}
