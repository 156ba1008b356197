//! Headless interaction state for the admin surfaces: overlay geometry,
//! dropdown filters, row action menus, and the submit latch.

pub mod action_menu;
pub mod floating_filter;
pub mod overlay;

pub use action_menu::{
    ActionMenuController, DeletePrompt, MenuSelection, RowAction, actions_for, request_delete,
};
pub use floating_filter::{
    ApiOptionSource, CachedOptions, DropdownOption, FloatingFilter, OptionSource,
};
pub use overlay::{OverlayEvent, Point, Rect, place_menu, should_dismiss};

/// Double-submit latch for forms.
///
/// `begin` returns false while a submission is pending; callers must call
/// `finish` on both success and failure to re-arm the form.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    pending: bool,
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Claim the submission slot. False means a submit is already in
    /// flight and this attempt must be dropped.
    pub fn begin(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }
}
