//! A scope guard that puts the cursor where it belongs when a block ends.
//!
//! The guard dereferences to the engine so the guarded block keeps full
//! access to it. The cursor fix-up lives in `Drop`, so it also runs when the
//! block returns early or unwinds.

use crate::engine::LayoutEngine;
use std::ops::{Deref, DerefMut};
use tally_render_core::PageBackend;

/// Moves the cursor to a fixed position on drop.
pub(crate) struct CursorGuard<'a, B: PageBackend> {
    engine: &'a mut LayoutEngine<B>,
    restore_to: f32,
}

impl<'a, B: PageBackend> CursorGuard<'a, B> {
    /// Restores the current cursor.
    pub(crate) fn new(engine: &'a mut LayoutEngine<B>) -> Self {
        let restore_to = engine.cursor();
        Self { engine, restore_to }
    }

    /// Leaves the cursor at `restore_to`, whatever the block does.
    pub(crate) fn ending_at(engine: &'a mut LayoutEngine<B>, restore_to: f32) -> Self {
        Self { engine, restore_to }
    }
}

impl<B: PageBackend> Deref for CursorGuard<'_, B> {
    type Target = LayoutEngine<B>;

    fn deref(&self) -> &Self::Target {
        self.engine
    }
}

impl<B: PageBackend> DerefMut for CursorGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.engine
    }
}

impl<B: PageBackend> Drop for CursorGuard<'_, B> {
    fn drop(&mut self) {
        self.engine.move_cursor_to(self.restore_to);
    }
}
