//! Page rendering: the two-pass expansion pipeline.
//!
//! ```text
//! PageDocument ──► structural_expand ──► dynamic_reexpand ──► HTML
//!                  layout + includes      placeholders carried in by
//!                  (composition root)     content and raw fragments
//! ```
//!
//! The ordering is load-bearing. Pass 1 expands the layout, which is the
//! only composition root: its `{{>name}}` markers expand recursively, while
//! the page body and any include spliced in as a plain variable land as
//! verbatim text. Pass 2 recompiles that output, so placeholders which only
//! became textually present in pass 1 get substituted too.

use super::cache::{RenderCache, RenderScope, TransientSlot};
use super::engine::{Bindings, Template, VariableMap};
use super::error::TemplateError;
use super::store::TemplateStore;
use crate::content::PageDocument;

/// Render one page to its final HTML.
///
/// `overlay` carries extra per-render bindings (the versus pages bind
/// `versus_content` there); plain pages pass an empty map. Both overlay and
/// the `title`/`content` bindings live only for this call.
pub fn render_page(
    document: &PageDocument,
    store: &TemplateStore,
    cache: &mut RenderCache,
    globals: &VariableMap,
    overlay: &VariableMap,
) -> Result<String, TemplateError> {
    let mut scope = cache.scope();
    let vars = page_bindings(document, globals, overlay);

    let structural = structural_expand(&mut scope, store, &document.layout, &vars)?;
    dynamic_reexpand(&mut scope, store, &structural, &vars)
}

fn page_bindings<'g>(
    document: &PageDocument,
    globals: &'g VariableMap,
    overlay: &VariableMap,
) -> Bindings<'g> {
    let mut vars = Bindings::over(globals);
    for (name, value) in overlay {
        vars.set(name, value);
    }
    vars.set("title", &document.title);
    vars.set("content", &document.body);
    vars
}

/// Pass 1: compile the page's layout into the `Composed` slot and expand it.
fn structural_expand(
    scope: &mut RenderScope<'_>,
    store: &TemplateStore,
    layout: &str,
    vars: &Bindings<'_>,
) -> Result<String, TemplateError> {
    let source = store.layout_source(layout)?;
    scope.insert(TransientSlot::Composed, Template::compile(source));
    scope.get(TransientSlot::Composed)?.expand(store, vars)
}

/// Pass 2: recompile the structural output into the `Reexpand` slot and
/// expand it once more with the same bindings.
fn dynamic_reexpand(
    scope: &mut RenderScope<'_>,
    store: &TemplateStore,
    structural: &str,
    vars: &Bindings<'_>,
) -> Result<String, TemplateError> {
    scope.insert(TransientSlot::Reexpand, Template::compile(structural));
    scope.get(TransientSlot::Reexpand)?.expand(store, vars)
}
