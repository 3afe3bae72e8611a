#![forbid(unsafe_code)]

//! State every widget carries: identity, geometry, focus/visibility flags,
//! and the exit type of its current (or last) activation.

use std::sync::atomic::{AtomicU64, Ordering};

use ftk_core::geometry::Rect;
use ftk_core::render::BorderStyle;

use crate::error::WidgetError;

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique widget identity.
///
/// Registries compare widgets by id, never by position, so ids stay valid
/// across registration, z-order changes, and removal of other widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logging).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Terminal disposition of one widget activation.
///
/// `EarlyExit` doubles as the "still running" sentinel: `inject` resets the
/// exit type to it before interpreting a key and leaves it there unless the
/// key ended the activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExitType {
    /// The widget has never been driven.
    #[default]
    NeverActivated,
    /// No decision yet; keep feeding input.
    EarlyExit,
    /// The user accepted (Enter, Tab, ...).
    Normal,
    /// The user cancelled with Escape.
    EscapeHit,
    /// The input source failed.
    Error,
}

impl ExitType {
    /// True while the activation loop should keep reading input.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::EarlyExit)
    }

    /// True for `Normal`, `EscapeHit`, and `Error`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Normal | Self::EscapeHit | Self::Error)
    }
}

/// Shared widget state.
#[derive(Debug, Clone)]
pub struct WidgetBase {
    id: WidgetId,
    area: Rect,
    accepts_focus: bool,
    has_focus: bool,
    is_visible: bool,
    boxed: bool,
    shadow: bool,
    border: BorderStyle,
    exit_type: ExitType,
}

impl WidgetBase {
    /// Create the base for a widget occupying `area` on `surface`.
    ///
    /// Fails when the area is empty or does not fit the surface (including
    /// the one-cell shadow when `shadow` is requested later, which is clipped
    /// instead).
    pub fn new(surface: Rect, area: Rect) -> Result<Self, WidgetError> {
        if area.is_empty() || !area.fits_within(&surface) {
            return Err(WidgetError::DoesNotFit {
                requested: area,
                surface,
            });
        }
        Ok(Self {
            id: WidgetId::next(),
            area,
            accepts_focus: true,
            has_focus: false,
            is_visible: true,
            boxed: false,
            shadow: false,
            border: BorderStyle::default(),
            exit_type: ExitType::NeverActivated,
        })
    }

    #[inline]
    pub const fn id(&self) -> WidgetId {
        self.id
    }

    #[inline]
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// The area plus the shadow cells, if any.
    pub fn footprint(&self) -> Rect {
        if self.shadow {
            Rect::new(
                self.area.x,
                self.area.y,
                self.area.width.saturating_add(1),
                self.area.height.saturating_add(1),
            )
        } else {
            self.area
        }
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    #[inline]
    pub const fn accepts_focus(&self) -> bool {
        self.accepts_focus
    }

    pub fn set_accepts_focus(&mut self, accepts: bool) {
        self.accepts_focus = accepts;
    }

    #[inline]
    pub const fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Set the focus flag.
    ///
    /// Reserved for focus traversal and the activation protocol; widgets
    /// never flip their own focus.
    pub fn set_has_focus(&mut self, focused: bool) {
        self.has_focus = focused;
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    #[inline]
    pub const fn boxed(&self) -> bool {
        self.boxed
    }

    pub fn set_boxed(&mut self, boxed: bool) {
        self.boxed = boxed;
    }

    #[inline]
    pub const fn shadow(&self) -> bool {
        self.shadow
    }

    pub fn set_shadow(&mut self, shadow: bool) {
        self.shadow = shadow;
    }

    #[inline]
    pub const fn border(&self) -> BorderStyle {
        self.border
    }

    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    #[inline]
    pub const fn exit_type(&self) -> ExitType {
        self.exit_type
    }

    pub fn set_exit_type(&mut self, exit: ExitType) {
        self.exit_type = exit;
    }

    /// Inner area left after the border (if boxed).
    pub fn inner(&self) -> Rect {
        if self.boxed {
            self.area.inset(1)
        } else {
            self.area
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Rect {
        Rect::from_size(40, 10)
    }

    #[test]
    fn ids_are_unique() {
        let a = WidgetId::next();
        let b = WidgetId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn exit_type_starts_never_activated() {
        let base = WidgetBase::new(surface(), Rect::new(0, 0, 5, 5)).unwrap();
        assert_eq!(base.exit_type(), ExitType::NeverActivated);
        assert!(!ExitType::NeverActivated.is_running());
        assert!(ExitType::EarlyExit.is_running());
        assert!(ExitType::EscapeHit.is_terminal());
    }

    #[test]
    fn rejects_area_outside_surface() {
        let err = WidgetBase::new(surface(), Rect::new(38, 0, 5, 5)).unwrap_err();
        assert!(matches!(err, WidgetError::DoesNotFit { .. }));
        assert!(WidgetBase::new(surface(), Rect::new(0, 0, 0, 3)).is_err());
    }

    #[test]
    fn inner_respects_box() {
        let mut base = WidgetBase::new(surface(), Rect::new(1, 1, 10, 5)).unwrap();
        assert_eq!(base.inner(), Rect::new(1, 1, 10, 5));
        base.set_boxed(true);
        assert_eq!(base.inner(), Rect::new(2, 2, 8, 3));
    }

    #[test]
    fn footprint_includes_shadow() {
        let mut base = WidgetBase::new(surface(), Rect::new(0, 0, 4, 2)).unwrap();
        base.set_shadow(true);
        assert_eq!(base.footprint(), Rect::new(0, 0, 5, 3));
    }
}
