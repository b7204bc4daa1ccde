//! Template types for typed variable injection.
//!
//! Placeholders are `__NAME__` markers in the embedded text. Substitution is
//! a single pass, so an injected value is never scanned for placeholders.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    /// Value for placeholder `name` (without the surrounding underscores).
    fn lookup(&self, name: &str) -> Option<&str>;

    fn apply(&self, content: &str) -> String {
        substitute(content, |name| self.lookup(name))
    }
}

/// Ties a template to the variable set it accepts.
pub trait TemplateKind {
    type Vars<'a>: TemplateVars;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<K> {
    content: &'static str,
    _marker: PhantomData<K>,
}

impl<K> Template<K> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<K: TemplateKind> Template<K> {
    pub fn render(&self, vars: &K::Vars<'_>) -> String {
        vars.apply(self.content)
    }
}

/// Replace every `__NAME__` marker for which `lookup` has a value.
///
/// Unknown markers are kept verbatim.
fn substitute<'a>(content: &str, lookup: impl Fn(&str) -> Option<&'a str>) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        let after = &rest[start + 2..];
        let Some(len) = after.find("__") else {
            break;
        };
        let name = &after[..len];
        let is_marker =
            !name.is_empty() && name.bytes().all(|b| b.is_ascii_uppercase() || b == b'_');

        match lookup(name).filter(|_| is_marker) {
            Some(value) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &after[len + 2..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
