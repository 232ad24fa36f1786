//! Source fragments with `#{Name}` placeholders
//!
//! Fragments name every externally supplied type through a placeholder. The
//! placeholder is replaced with the fully qualified path of the matching
//! [`RuntimeType`] at render time, and the runtime type's crate is recorded
//! so the artifact that splices the fragment can declare it.

use crate::dependency::{merge_dependencies, CargoDependency};
use crate::error::CodegenError;
use crate::symbol::RuntimeType;

/// The fixed table placeholders resolve against.
#[derive(Debug, Clone, Default)]
pub struct CodegenScope {
    entries: Vec<(String, RuntimeType)>,
}

impl CodegenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, runtime_type: RuntimeType) -> Self {
        self.entries.push((name.into(), runtime_type));
        self
    }

    pub fn get(&self, name: &str) -> Option<&RuntimeType> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, rt)| rt)
    }
}

/// A rendered piece of source plus the crates it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub code: String,
    pub dependencies: Vec<CargoDependency>,
}

/// Render `template` against `scope`.
///
/// The template is unindented first, so it can be written inline at any
/// indentation. Every placeholder must be present in the scope.
pub fn render_template(template: &str, scope: &CodegenScope) -> Result<Fragment, CodegenError> {
    let source = unindent(template);
    let mut code = String::with_capacity(source.len());
    let mut used: Vec<&CargoDependency> = Vec::new();
    let mut rest = source.as_str();
    let mut offset = 0;

    while let Some(start) = rest.find("#{") {
        code.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or(CodegenError::UnterminatedPlaceholder(offset + start))?;
        let name = &after[..end];
        let runtime_type = scope
            .get(name)
            .ok_or_else(|| CodegenError::UnresolvedPlaceholder(name.to_string()))?;

        code.push_str(&runtime_type.full_path());
        if let Some(dep) = &runtime_type.dependency {
            used.push(dep);
        }

        let consumed = start + 2 + end + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }
    code.push_str(rest);

    Ok(Fragment {
        code,
        dependencies: merge_dependencies(used),
    })
}

/// Strip leading/trailing blank lines and the common leading indentation.
fn unindent(s: &str) -> String {
    let lines: Vec<&str> = s.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };
    let body = &lines[first..=last];

    let margin = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_indent(l, usize::MAX))
        .min()
        .unwrap_or(0);

    body.iter()
        .map(|l| &l[leading_indent(l, margin)..])
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte length of the leading spaces and tabs of `line`, at most `limit`.
fn leading_indent(line: &str, limit: usize) -> usize {
    line.bytes()
        .take(limit)
        .take_while(|b| *b == b' ' || *b == b'\t')
        .count()
}

/// Indent every non-empty line of `code` by `spaces`.
pub fn indent(code: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    code.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
