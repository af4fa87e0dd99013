//! Template loading and indexing.
//!
//! Layouts and includes are read once at startup and never change for the
//! rest of the process. Includes are addressable in two forms at the same
//! time: as a raw string value (so `{{name}}` can splice the fragment in
//! verbatim) and as a compiled sub-template (so `{{>name}}` can expand it in
//! place). Layouts are only ever looked up by name from page front-matter
//! and are compiled per render, so the layout index keeps raw source.

use super::engine::Template;
use super::error::{TemplateError, TemplateRole};
use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::Path};
use walkdir::WalkDir;

/// Directory under the site root holding include fragments.
const INCLUDES_DIR: &str = "includes";

/// Directory under the site root holding layouts.
const LAYOUTS_DIR: &str = "layouts";

/// Suffix stripped when deriving a template name from a file name.
const TEMPLATE_SUFFIX: &str = ".tpl.html";

/// Files to ignore during directory traversal
const IGNORED_FILES: &[&str] = &[".DS_Store"];

#[derive(Debug)]
struct IncludeEntry {
    /// Raw source, spliced in by `{{name}}`.
    source: String,
    /// Compiled form, expanded by `{{>name}}`.
    compiled: Template,
}

/// Immutable index of layouts and includes, populated once at startup.
#[derive(Debug, Default)]
pub struct TemplateStore {
    includes: HashMap<String, IncludeEntry>,
    layouts: HashMap<String, String>,
}

impl TemplateStore {
    /// Load every regular file under `<site>/includes` and `<site>/layouts`
    /// recursively. An unreadable directory or file is a hard error.
    pub fn load(site_dir: &Path) -> Result<Self> {
        let mut store = Self::default();
        visit_templates(&site_dir.join(INCLUDES_DIR), |name, source| {
            store.register_include(&name, &source);
        })?;
        visit_templates(&site_dir.join(LAYOUTS_DIR), |name, source| {
            store.register_layout(&name, &source);
        })?;
        Ok(store)
    }

    pub(crate) fn register_include(&mut self, name: &str, source: &str) {
        let compiled = Template::compile(source);
        self.includes.insert(
            name.to_owned(),
            IncludeEntry {
                source: source.to_owned(),
                compiled,
            },
        );
    }

    pub(crate) fn register_layout(&mut self, name: &str, source: &str) {
        self.layouts.insert(name.to_owned(), source.to_owned());
    }

    /// Raw source of the named layout.
    pub fn layout_source(&self, name: &str) -> Result<&str, TemplateError> {
        self.layouts
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::NotFound {
                role: TemplateRole::Layout,
                name: name.to_owned(),
            })
    }

    /// Compiled include for `{{>name}}` expansion.
    pub fn include(&self, name: &str) -> Result<&Template, TemplateError> {
        self.includes
            .get(name)
            .map(|entry| &entry.compiled)
            .ok_or_else(|| TemplateError::NotFound {
                role: TemplateRole::Include,
                name: name.to_owned(),
            })
    }

    /// Raw include source for `{{name}}` substitution, if registered.
    pub fn include_source(&self, name: &str) -> Option<&str> {
        self.includes.get(name).map(|entry| entry.source.as_str())
    }
}

/// Walk `dir` recursively, handing each regular file's template name and
/// content to `register`. Discovery order is sorted for determinism.
fn visit_templates(dir: &Path, mut register: impl FnMut(String, String)) -> Result<()> {
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("reading template directory `{}`", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&file_name) {
            continue;
        }
        let Some(name) = template_name(entry.path()) else {
            continue;
        };
        let source = fs::read_to_string(entry.path())
            .with_context(|| format!("reading template `{}`", entry.path().display()))?;
        register(name, source);
    }
    Ok(())
}

/// `header.tpl.html` registers as `header`; any other extension uses the
/// file stem.
fn template_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    match file_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(base) if !base.is_empty() => Some(base.to_owned()),
        _ => Some(path.file_stem()?.to_str()?.to_owned()),
    }
}
