//! Overlay positioning and dismissal rules.
//!
//! Menus render in an overlay layer outside the normal flow to escape
//! clipping ancestors, so every rectangle here is in viewport coordinates.
//! Position is computed once from the trigger's bounding box at open time;
//! it is not tracked on resize or scroll — a scroll outside the menu closes
//! it instead.

/// Viewport-relative point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Viewport-relative rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }
}

/// Place a menu of `(width, height)` relative to its trigger.
///
/// Default is flush below the trigger's bottom-left corner; when that would
/// overflow the viewport bottom the menu flips above, and the horizontal
/// position is clamped so the menu never crosses the right edge.
pub fn place_menu(trigger: Rect, menu_size: (f64, f64), viewport: Rect) -> Point {
    let (width, height) = menu_size;

    let x = if trigger.x + width > viewport.right() {
        (viewport.right() - width).max(viewport.x)
    } else {
        trigger.x
    };

    let y = if trigger.bottom() + height > viewport.bottom() {
        (trigger.y - height).max(viewport.y)
    } else {
        trigger.bottom()
    };

    Point::new(x, y)
}

/// Pointer or scroll activity that may dismiss an open overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent {
    /// Pointer pressed at a viewport position.
    PointerDown(Point),
    /// Scroll whose target element sits at this viewport position.
    Scroll(Point),
}

/// Whether an open overlay should close on this event.
///
/// Pointer-down inside the trigger is the toggle gesture and pointer-down
/// inside the menu is a selection, so neither dismisses here. Scrolling
/// inside the menu must keep it open; any scroll outside closes it.
pub fn should_dismiss(menu: Rect, trigger: Rect, event: OverlayEvent) -> bool {
    match event {
        OverlayEvent::PointerDown(p) => !menu.contains(p) && !trigger.contains(p),
        OverlayEvent::Scroll(p) => !menu.contains(p),
    }
}
