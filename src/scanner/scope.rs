//! Per-line tracking of the enclosing class and namespace.
//!
//! The tracker is an explicit accumulator stepped one source line at a
//! time, so every transition can be unit tested in isolation. Namespace
//! and class scopes are counted independently: the namespace counter sees
//! every brace inside the namespace (including class bodies), which is
//! what makes it close on the namespace's own closing brace.

use regex::Regex;

/// Line-by-line scope accumulator for one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeTracker {
    namespace: Option<String>,
    class: Option<String>,
    namespace_depth: i32,
    class_depth: i32,
    // A scope whose opening brace has not arrived yet. Depth counting
    // starts at the first block-open line, which may trail the name.
    namespace_pending: bool,
    class_pending: bool,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the enclosing namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Name of the enclosing class, if any.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Advance the tracker over one source line.
    pub fn step(mut self, line: &str) -> Self {
        let line = line.trim();

        if let Some(name) = scope_intro(line, "namespace") {
            self.namespace = Some(name);
            self.namespace_depth = 0;
            self.namespace_pending = true;
        }
        if let Some(name) = scope_intro(line, "class") {
            self.class = Some(name);
            self.class_depth = 0;
            self.class_pending = true;
        }

        let delta = brace_delta(line);
        let opens = line.contains('{');

        if self.namespace_pending {
            if opens {
                self.namespace_pending = false;
                self.namespace_depth += delta;
            }
        } else {
            self.namespace_depth += delta;
        }
        if self.class_pending {
            if opens {
                self.class_pending = false;
                self.class_depth += delta;
            }
        } else {
            self.class_depth += delta;
        }

        // Falling to depth zero or below scopes the context out. Two
        // same-named scopes nested inside each other cannot be told apart
        // here; the inner close clears both.
        if self.namespace.is_some() && !self.namespace_pending && self.namespace_depth <= 0 {
            self.namespace = None;
        }
        if self.class.is_some() && !self.class_pending && self.class_depth <= 0 {
            self.class = None;
        }

        self
    }
}

/// Match a `namespace Name` or `class Name` scope introduction.
/// Forward declarations (`class Name;`) introduce no scope.
fn scope_intro(line: &str, keyword: &str) -> Option<String> {
    let re = Regex::new(&format!(r"^{keyword}\s+(\w+)")).unwrap();
    let caps = re.captures(line)?;
    let rest = &line[caps.get(0).unwrap().end()..];
    if rest.trim_start().starts_with(';') {
        return None;
    }
    Some(caps[1].to_string())
}

fn brace_delta(line: &str) -> i32 {
    line.matches('{').count() as i32 - line.matches('}').count() as i32
}
