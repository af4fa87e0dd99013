//! Versus page assembly.
//!
//! A comparison unit is described by a `versus.toml` descriptor living next
//! to the code samples it references. Each side's files are rendered through
//! the fixed `versus_block` include, the two sides are joined by the fixed
//! `versus` container include, and the resulting fragment is handed to the
//! page renderer as the `versus_content` binding.

use crate::template::{Bindings, TemplateStore};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Include expanded once per code block.
const BLOCK_TEMPLATE: &str = "versus_block";

/// Include joining both assembled sides.
const CONTAINER_TEMPLATE: &str = "versus";

/// Descriptor file name discovered under each group folder.
pub const SPEC_FILE_NAME: &str = "versus.toml";

/// Language tag for files the highlighter has no grammar for.
const NO_HIGHLIGHT: &str = "none";

/// One comparison unit, parsed from a `versus.toml` descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersusSpec {
    pub versus: VersusName,

    /// Output file base name, written under `<output>/versus/`.
    pub filename: String,

    /// Code files for the cpp side, relative to the descriptor.
    #[serde(default)]
    pub cpp: Vec<PathBuf>,

    /// Code files for the other side, relative to the descriptor.
    #[serde(default)]
    pub other: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersusName {
    /// Display name of the comparison.
    pub name: String,
}

impl VersusSpec {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading versus descriptor `{}`", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("parsing versus descriptor `{}`", path.display()))
    }
}

/// One code sample within a side.
#[derive(Debug)]
struct CodeBlock {
    code: String,
    language: &'static str,
    /// Base name of the source file; only set when the owning side has more
    /// than one entry, so single-file sides render without a label.
    file_name: Option<String>,
}

impl CodeBlock {
    fn read(path: &Path, labeled: bool) -> Result<Self> {
        let code = fs::read_to_string(path)
            .with_context(|| format!("reading code sample `{}`", path.display()))?;
        let file_name = labeled
            .then(|| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .flatten();
        Ok(Self {
            code,
            language: prism_language(path),
            file_name,
        })
    }

    fn bindings(&self) -> Bindings<'static> {
        let mut vars = Bindings::fresh();
        vars.set("code", &self.code);
        vars.set("prism_language", self.language);
        if let Some(file_name) = &self.file_name {
            vars.set("file_name", file_name);
        }
        vars
    }
}

/// Assemble the composite fragment for one comparison unit.
///
/// `base_dir` is the descriptor's own directory; both side lists resolve
/// relative to it. An empty side list yields an empty fragment for that
/// side.
pub fn assemble(spec: &VersusSpec, base_dir: &Path, store: &TemplateStore) -> Result<String> {
    let mut vars = Bindings::fresh();
    vars.set("name", &spec.versus.name);
    vars.set("cpp_code", &render_side(&spec.cpp, base_dir, store)?);
    vars.set("other_code", &render_side(&spec.other, base_dir, store)?);

    let fragment = store.include(CONTAINER_TEMPLATE)?.expand(store, &vars)?;
    Ok(fragment)
}

/// Render one side: the in-order concatenation of one block per reference.
fn render_side(refs: &[PathBuf], base_dir: &Path, store: &TemplateStore) -> Result<String> {
    let block_template = store.include(BLOCK_TEMPLATE)?;
    let labeled = refs.len() > 1;

    let mut out = String::new();
    for reference in refs {
        let block = CodeBlock::read(&base_dir.join(reference), labeled)?;
        out.push_str(&block_template.expand(store, &block.bindings())?);
    }
    Ok(out)
}

/// Map a code file's extension to its highlighter language tag.
fn prism_language(path: &Path) -> &'static str {
    match path.extension().and_then(OsStr::to_str) {
        Some("cc") => "cpp",
        Some("js") => "javascript",
        _ => NO_HIGHLIGHT,
    }
}
