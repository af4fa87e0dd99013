//! Render-scoped cache for transient compiled templates.
//!
//! Named includes and layouts are registered once at startup and stay
//! read-only in the [`TemplateStore`](super::store::TemplateStore). The two
//! templates that exist only for the duration of one render (the composed
//! layout and the re-expansion of its output) live here instead, behind a
//! scope guard that releases them on every exit path.

use super::engine::Template;
use super::error::{TemplateError, TemplateRole};

/// Slots for templates that live only for the duration of one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientSlot {
    /// The page's layout, compiled for the structural pass.
    Composed,
    /// The structural output, recompiled for the dynamic pass.
    Reexpand,
}

impl TransientSlot {
    const COUNT: usize = 2;

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Composed => "composed",
            Self::Reexpand => "reexpand",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Scratch space shared across renders.
///
/// The build driver owns one of these for its lifetime and lends it to each
/// render call. Slots are populated through a [`RenderScope`] and cleared
/// when that scope drops, so no render observes another render's compiled
/// state.
#[derive(Debug, Default)]
pub struct RenderCache {
    slots: [Option<Template>; TransientSlot::COUNT],
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a scope whose transient entries are released when it drops,
    /// whether the render succeeds or fails.
    pub fn scope(&mut self) -> RenderScope<'_> {
        RenderScope { cache: self }
    }

    /// True when no transient entry is present.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}

/// Scoped access to the transient slots of a [`RenderCache`].
#[derive(Debug)]
pub struct RenderScope<'c> {
    cache: &'c mut RenderCache,
}

impl RenderScope<'_> {
    /// Register `template` in `slot` until the scope ends.
    pub fn insert(&mut self, slot: TransientSlot, template: Template) {
        self.cache.slots[slot.index()] = Some(template);
    }

    /// Typed lookup; an empty slot is a [`TemplateError::NotFound`].
    pub fn get(&self, slot: TransientSlot) -> Result<&Template, TemplateError> {
        self.cache.slots[slot.index()]
            .as_ref()
            .ok_or_else(|| TemplateError::NotFound {
                role: TemplateRole::Transient(slot),
                name: slot.name().to_owned(),
            })
    }
}

impl Drop for RenderScope<'_> {
    fn drop(&mut self) {
        self.cache.clear();
    }
}
