//! Per-row action menu.
//!
//! One controller instance serves the whole grid: at most one row's menu is
//! open at a time, and opening a second row's menu closes the first.
//! Destructive actions never fire directly from a menu entry; delete always
//! routes through a [`DeletePrompt`] whose `confirm` is the only path to the
//! actual call.

use crate::types::TransactionStatus;
use crate::ui::overlay::{OverlayEvent, Point, Rect, place_menu, should_dismiss};

/// Actions a row menu can offer. Availability depends on the record's
/// status; see [`RowAction::available`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    MarkInvoiced,
    MarkCompleted,
}

impl RowAction {
    /// Whether this action applies to a record in the given status.
    ///
    /// `None` means a non-transactional record (reference data), which gets
    /// the plain view/edit/delete set. Completed transactions are frozen:
    /// no edit and no further status advance.
    pub fn available(self, status: Option<TransactionStatus>) -> bool {
        match self {
            RowAction::View | RowAction::Delete => true,
            RowAction::Edit => !matches!(status, Some(TransactionStatus::Completed)),
            RowAction::MarkInvoiced => status == Some(TransactionStatus::Pending),
            RowAction::MarkCompleted => status == Some(TransactionStatus::Invoiced),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RowAction::View => "View",
            RowAction::Edit => "Edit",
            RowAction::Delete => "Delete",
            RowAction::MarkInvoiced => "Mark invoiced",
            RowAction::MarkCompleted => "Mark completed",
        }
    }
}

/// The set of entries to render for a row, in fixed order.
pub fn actions_for(status: Option<TransactionStatus>) -> Vec<RowAction> {
    [
        RowAction::View,
        RowAction::Edit,
        RowAction::MarkInvoiced,
        RowAction::MarkCompleted,
        RowAction::Delete,
    ]
    .into_iter()
    .filter(|a| a.available(status))
    .collect()
}

const MENU_SIZE: (f64, f64) = (160.0, 180.0);

/// Grid-wide action menu state. Holds at most one open menu.
#[derive(Default)]
pub struct ActionMenuController {
    active: Option<OpenMenu>,
}

struct OpenMenu {
    row_id: u64,
    trigger: Rect,
    menu_rect: Rect,
}

impl ActionMenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_row(&self) -> Option<u64> {
        self.active.as_ref().map(|m| m.row_id)
    }

    pub fn position(&self) -> Option<Point> {
        self.active
            .as_ref()
            .map(|m| Point::new(m.menu_rect.x, m.menu_rect.y))
    }

    /// Trigger press on a row. Same row toggles closed; a different row
    /// moves the single open menu there.
    pub fn toggle(&mut self, row_id: u64, trigger: Rect, viewport: Rect) {
        if self.open_row() == Some(row_id) {
            self.active = None;
            return;
        }
        let position = place_menu(trigger, MENU_SIZE, viewport);
        self.active = Some(OpenMenu {
            row_id,
            trigger,
            menu_rect: Rect::new(position.x, position.y, MENU_SIZE.0, MENU_SIZE.1),
        });
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    /// Selecting an entry closes the menu and hands the action back to the
    /// caller. Delete is not returned directly; it becomes a prompt.
    pub fn select(
        &mut self,
        action: RowAction,
        status: Option<TransactionStatus>,
    ) -> Option<MenuSelection> {
        let menu = self.active.take()?;
        if !action.available(status) {
            return None;
        }
        if action == RowAction::Delete {
            return Some(MenuSelection::Prompt(request_delete(menu.row_id, status)));
        }
        Some(MenuSelection::Action {
            row_id: menu.row_id,
            action,
        })
    }

    pub fn handle_event(&mut self, event: OverlayEvent) {
        let Some(menu) = &self.active else {
            return;
        };
        if should_dismiss(menu.menu_rect, menu.trigger, event) {
            self.active = None;
        }
    }
}

/// Outcome of picking a menu entry.
pub enum MenuSelection {
    Action { row_id: u64, action: RowAction },
    Prompt(DeletePrompt),
}

/// Begin a delete, yielding the confirmation prompt the caller must
/// resolve before anything is removed.
pub fn request_delete(row_id: u64, status: Option<TransactionStatus>) -> DeletePrompt {
    DeletePrompt::new(row_id, status)
}

/// Pending delete confirmation.
///
/// The prompt owns the row id; callers reach it only through
/// [`DeletePrompt::confirm`], so a delete cannot be issued without the
/// second step.
#[derive(Debug, PartialEq, Eq)]
pub struct DeletePrompt {
    row_id: u64,
    status: Option<TransactionStatus>,
}

impl DeletePrompt {
    fn new(row_id: u64, status: Option<TransactionStatus>) -> Self {
        Self { row_id, status }
    }

    /// Confirmation text. Completed transactions have already moved stock,
    /// so deleting one reverses inventory and the message must say so.
    pub fn message(&self) -> String {
        match self.status {
            Some(TransactionStatus::Completed) => {
                "Delete this completed transaction? Stock changes from this \
                 transaction will be reversed."
                    .to_string()
            }
            _ => "Delete this record? This cannot be undone.".to_string(),
        }
    }

    /// Consume the prompt, yielding the row id to delete.
    pub fn confirm(self) -> u64 {
        self.row_id
    }

    pub fn cancel(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 1280.0,
        height: 720.0,
    };

    fn trigger(y: f64) -> Rect {
        Rect::new(1200.0, y, 32.0, 32.0)
    }

    #[test]
    fn test_single_open_menu_across_rows() {
        let mut menus = ActionMenuController::new();
        menus.toggle(1, trigger(100.0), VIEWPORT);
        assert_eq!(menus.open_row(), Some(1));

        // Opening row 2 closes row 1's menu.
        menus.toggle(2, trigger(140.0), VIEWPORT);
        assert_eq!(menus.open_row(), Some(2));
    }

    #[test]
    fn test_same_row_toggles_closed() {
        let mut menus = ActionMenuController::new();
        menus.toggle(1, trigger(100.0), VIEWPORT);
        menus.toggle(1, trigger(100.0), VIEWPORT);
        assert_eq!(menus.open_row(), None);
    }

    #[test]
    fn test_availability_by_status() {
        assert_eq!(
            actions_for(Some(TransactionStatus::Pending)),
            vec![
                RowAction::View,
                RowAction::Edit,
                RowAction::MarkInvoiced,
                RowAction::Delete
            ]
        );
        assert_eq!(
            actions_for(Some(TransactionStatus::Invoiced)),
            vec![
                RowAction::View,
                RowAction::Edit,
                RowAction::MarkCompleted,
                RowAction::Delete
            ]
        );
        // Completed: frozen except view and delete.
        assert_eq!(
            actions_for(Some(TransactionStatus::Completed)),
            vec![RowAction::View, RowAction::Delete]
        );
        // Reference data never shows status transitions.
        assert_eq!(
            actions_for(None),
            vec![RowAction::View, RowAction::Edit, RowAction::Delete]
        );
    }

    #[test]
    fn test_select_closes_and_returns_action() {
        let mut menus = ActionMenuController::new();
        menus.toggle(7, trigger(100.0), VIEWPORT);

        match menus.select(RowAction::Edit, Some(TransactionStatus::Pending)) {
            Some(MenuSelection::Action { row_id, action }) => {
                assert_eq!(row_id, 7);
                assert_eq!(action, RowAction::Edit);
            }
            _ => panic!("expected direct action"),
        }
        assert_eq!(menus.open_row(), None);
    }

    #[test]
    fn test_unavailable_action_is_rejected() {
        let mut menus = ActionMenuController::new();
        menus.toggle(7, trigger(100.0), VIEWPORT);
        assert!(
            menus
                .select(RowAction::Edit, Some(TransactionStatus::Completed))
                .is_none()
        );
    }

    #[test]
    fn test_delete_goes_through_prompt() {
        let mut menus = ActionMenuController::new();
        menus.toggle(7, trigger(100.0), VIEWPORT);

        let prompt = match menus.select(RowAction::Delete, Some(TransactionStatus::Pending)) {
            Some(MenuSelection::Prompt(p)) => p,
            _ => panic!("expected prompt"),
        };
        assert!(!prompt.message().contains("reversed"));
        assert_eq!(prompt.confirm(), 7);
    }

    #[test]
    fn test_completed_delete_warns_about_stock_reversal() {
        let mut menus = ActionMenuController::new();
        menus.toggle(9, trigger(100.0), VIEWPORT);

        let prompt = match menus.select(RowAction::Delete, Some(TransactionStatus::Completed)) {
            Some(MenuSelection::Prompt(p)) => p,
            _ => panic!("expected prompt"),
        };
        assert!(prompt.message().contains("reversed"));
    }

    #[test]
    fn test_dismissal_closes_menu() {
        let mut menus = ActionMenuController::new();
        menus.toggle(1, trigger(100.0), VIEWPORT);

        menus.handle_event(OverlayEvent::PointerDown(Point::new(50.0, 50.0)));
        assert_eq!(menus.open_row(), None);
    }
}
