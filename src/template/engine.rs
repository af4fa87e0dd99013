//! Compiled templates and variable bindings.
//!
//! The template format is deliberately small: `{{name}}` substitutes a bound
//! variable, `{{>name}}` expands a registered include in place. No loops, no
//! conditionals.

use super::error::TemplateError;
use super::store::TemplateStore;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Flat string-to-string variable table (site-wide or per-render).
pub type VariableMap = HashMap<String, String>;

/// Include markers may nest (an include expanding another include); a
/// self-referential include would otherwise recurse without bound.
const MAX_INCLUDE_DEPTH: usize = 16;

/// `{{name}}` or `{{>name}}`, with optional inner whitespace.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(>?)\s*([A-Za-z0-9_.-]+)\s*\}\}").unwrap());

/// A template source parsed into a flat segment list.
///
/// Compilation never fails: anything that is not a well-formed marker stays
/// literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text copied through unchanged.
    Text(String),
    /// `{{name}}`: substitute a bound variable (empty when unbound).
    Variable(String),
    /// `{{>name}}`: expand the named include in place.
    Include(String),
}

impl Template {
    /// Parse `source` into segments.
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in MARKER.captures_iter(source) {
            let marker = caps.get(0).unwrap();
            if marker.start() > last {
                segments.push(Segment::Text(source[last..marker.start()].to_owned()));
            }
            let name = caps[2].to_owned();
            segments.push(if caps[1].is_empty() {
                Segment::Variable(name)
            } else {
                Segment::Include(name)
            });
            last = marker.end();
        }
        if last < source.len() {
            segments.push(Segment::Text(source[last..].to_owned()));
        }

        Self { segments }
    }

    /// Expand against the store's include index and the given bindings.
    ///
    /// Unbound variables expand to the empty string; an unknown include name
    /// is a hard error.
    pub fn expand(&self, store: &TemplateStore, vars: &Bindings) -> Result<String, TemplateError> {
        let mut out = String::new();
        self.expand_into(&mut out, store, vars, 0)?;
        Ok(out)
    }

    fn expand_into(
        &self,
        out: &mut String,
        store: &TemplateStore,
        vars: &Bindings,
        depth: usize,
    ) -> Result<(), TemplateError> {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Variable(name) => {
                    if let Some(value) = vars.get(name).or_else(|| store.include_source(name)) {
                        out.push_str(value);
                    }
                }
                Segment::Include(name) => {
                    if depth >= MAX_INCLUDE_DEPTH {
                        return Err(TemplateError::NestingTooDeep {
                            name: name.clone(),
                            limit: MAX_INCLUDE_DEPTH,
                        });
                    }
                    let include = store.include(name)?;
                    include.expand_into(out, store, vars, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}

/// Variable bindings for one expansion.
///
/// Per-render bindings overlay the site-wide globals; the overlay is dropped
/// with the value, so nothing leaks into the next render. Resolution order:
/// local, then global, then include-as-variable (handled by the caller in
/// [`Template::expand`]).
#[derive(Debug, Default)]
pub struct Bindings<'g> {
    global: Option<&'g VariableMap>,
    local: VariableMap,
}

impl Bindings<'static> {
    /// Bindings with no global scope underneath (versus block/container
    /// expansion uses these).
    pub fn fresh() -> Self {
        Self {
            global: None,
            local: VariableMap::new(),
        }
    }
}

impl<'g> Bindings<'g> {
    /// Per-render bindings layered over the site-wide variables.
    pub fn over(global: &'g VariableMap) -> Self {
        Self {
            global: Some(global),
            local: VariableMap::new(),
        }
    }

    /// Bind `name` in the local scope, shadowing any global of that name.
    pub fn set(&mut self, name: &str, value: &str) {
        self.local.insert(name.to_owned(), value.to_owned());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.local
            .get(name)
            .or_else(|| self.global.and_then(|global| global.get(name)))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::error::TemplateRole;

    fn expand(source: &str, vars: &Bindings) -> String {
        let store = TemplateStore::default();
        Template::compile(source).expand(&store, vars).unwrap()
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(expand("<html></html>", &Bindings::fresh()), "<html></html>");
    }

    #[test]
    fn test_variable_substitution() {
        let mut vars = Bindings::fresh();
        vars.set("title", "Home");
        assert_eq!(expand("<h1>{{title}}</h1>", &vars), "<h1>Home</h1>");
    }

    #[test]
    fn test_unbound_variable_expands_empty() {
        assert_eq!(expand("a{{missing}}b", &Bindings::fresh()), "ab");
    }

    #[test]
    fn test_marker_whitespace_is_tolerated() {
        let mut vars = Bindings::fresh();
        vars.set("name", "x");
        assert_eq!(expand("{{ name }}", &vars), "x");
    }

    #[test]
    fn test_malformed_marker_stays_literal() {
        assert_eq!(expand("{{not closed", &Bindings::fresh()), "{{not closed");
        assert_eq!(expand("{ {name} }", &Bindings::fresh()), "{ {name} }");
    }

    #[test]
    fn test_local_shadows_global() {
        let mut globals = VariableMap::new();
        globals.insert("who".into(), "global".into());
        let mut vars = Bindings::over(&globals);
        assert_eq!(vars.get("who"), Some("global"));
        vars.set("who", "local");
        assert_eq!(vars.get("who"), Some("local"));
    }

    #[test]
    fn test_unknown_include_is_typed_error() {
        let store = TemplateStore::default();
        let err = Template::compile("{{>nav}}")
            .expand(&store, &Bindings::fresh())
            .unwrap_err();
        assert_eq!(
            err,
            TemplateError::NotFound {
                role: TemplateRole::Include,
                name: "nav".into(),
            }
        );
    }

    #[test]
    fn test_include_expands_in_place_with_bindings() {
        let mut store = TemplateStore::default();
        store.register_include("nav", "<nav>{{title}}</nav>");
        let mut vars = Bindings::fresh();
        vars.set("title", "Home");
        let out = Template::compile("A{{>nav}}B").expand(&store, &vars).unwrap();
        assert_eq!(out, "A<nav>Home</nav>B");
    }

    #[test]
    fn test_include_as_variable_inserts_raw_source() {
        // `{{nav}}` (no `>`) inserts the include source verbatim; its own
        // placeholders survive for the second pass.
        let mut store = TemplateStore::default();
        store.register_include("nav", "<nav>{{title}}</nav>");
        let out = Template::compile("{{nav}}")
            .expand(&store, &Bindings::fresh())
            .unwrap();
        assert_eq!(out, "<nav>{{title}}</nav>");
    }

    #[test]
    fn test_self_referential_include_hits_depth_limit() {
        let mut store = TemplateStore::default();
        store.register_include("loop", "x{{>loop}}");
        let err = Template::compile("{{>loop}}")
            .expand(&store, &Bindings::fresh())
            .unwrap_err();
        assert!(matches!(err, TemplateError::NestingTooDeep { .. }));
    }

    #[test]
    fn test_nested_includes_expand_recursively() {
        let mut store = TemplateStore::default();
        store.register_include("outer", "[{{>inner}}]");
        store.register_include("inner", "{{x}}");
        let mut vars = Bindings::fresh();
        vars.set("x", "42");
        let out = Template::compile("{{>outer}}").expand(&store, &vars).unwrap();
        assert_eq!(out, "[42]");
    }
}
