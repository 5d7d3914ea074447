//! Control-surface visibility.
//!
//! Desktop hosts reveal controls while the pointer is over the video surface.
//! Mobile hosts show controls at mount, toggle them on tap, and hide them a
//! fixed delay after playback starts unless playback pauses first.
//!
//! Two signals override everything else: the host's widget-visible flag gates
//! the whole surface off, and the pinned flag (a settings menu is open) forces
//! it on.

use std::time::Duration;

use crate::config::MOBILE_HIDE_DELAY;
use crate::platform::DeviceClass;
use crate::timer::HideTimer;

/// Point in host client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box of the video surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Creates a rect from its origin and size.
    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Decides whether transport controls are shown.
#[derive(Debug, Clone)]
pub struct ControlVisibilityController {
    device: DeviceClass,
    widget_visible: bool,
    pinned: bool,
    /// Last pointer position from the window-level listener (desktop)
    pointer: Option<Point>,
    /// Video surface bounds (desktop)
    bounds: Option<Rect>,
    /// Tap-toggled state (mobile)
    mobile_shown: bool,
    hide_timer: HideTimer,
    hide_delay: Duration,
}

impl ControlVisibilityController {
    /// Creates a controller for the given device class. Mobile starts shown.
    pub fn new(device: DeviceClass) -> Self {
        Self {
            device,
            widget_visible: true,
            pinned: false,
            pointer: None,
            bounds: None,
            mobile_shown: true,
            hide_timer: HideTimer::new(),
            hide_delay: MOBILE_HIDE_DELAY,
        }
    }

    /// Sets the mobile auto-hide delay.
    pub fn with_hide_delay(mut self, delay: Duration) -> Self {
        self.hide_delay = delay;
        self
    }

    /// Device class this controller was built for.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Whether controls should render right now.
    pub fn is_visible(&self) -> bool {
        if !self.widget_visible {
            return false;
        }
        if self.pinned {
            return true;
        }
        match self.device {
            DeviceClass::Desktop => self.pointer_inside(),
            DeviceClass::Mobile => self.mobile_shown,
        }
    }

    /// Whether the last known pointer position lies within the video bounds.
    pub fn pointer_inside(&self) -> bool {
        match (self.pointer, self.bounds) {
            (Some(p), Some(bounds)) => bounds.contains(p),
            _ => false,
        }
    }

    /// Whether the host should keep a window pointer listener registered.
    pub fn wants_pointer_tracking(&self) -> bool {
        self.device == DeviceClass::Desktop && self.widget_visible
    }

    /// Whether a mobile hide is pending.
    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_armed()
    }

    /// Sets the host-supplied widget visibility gate.
    pub fn set_widget_visible(&mut self, visible: bool) {
        self.widget_visible = visible;
    }

    /// Sets the pinned-open flag.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Updates the video surface bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    /// Records a pointer move.
    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    /// Tap on the video surface toggles mobile controls.
    pub fn tap(&mut self) {
        if self.device == DeviceClass::Mobile {
            self.mobile_shown = !self.mobile_shown;
        }
    }

    /// Playback started: arms the mobile hide timer.
    pub fn on_playing(&mut self, now: Duration) {
        if self.device == DeviceClass::Mobile {
            self.hide_timer.arm(now, self.hide_delay);
        }
    }

    /// Playback paused: cancels any pending hide.
    pub fn on_paused(&mut self) {
        self.hide_timer.cancel();
    }

    /// Fires the hide timer if due. Returns true when controls were hidden.
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.hide_timer.poll(now) {
            tracing::trace!("Controls: auto-hide fired");
            self.mobile_shown = false;
            return true;
        }
        false
    }

    /// Releases timers and pointer state when the widget goes away.
    pub fn unmount(&mut self) {
        self.hide_timer.cancel();
        self.pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(Point::new(0.0, 0.0), 640.0, 360.0)
    }

    #[test]
    fn test_desktop_hover_reveal() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Desktop);
        ctrl.set_bounds(bounds());
        assert!(!ctrl.is_visible());
        ctrl.pointer_moved(Point::new(100.0, 100.0));
        assert!(ctrl.is_visible());
        ctrl.pointer_moved(Point::new(700.0, 100.0));
        assert!(!ctrl.is_visible());
    }

    #[test]
    fn test_desktop_pin_overrides_pointer() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Desktop);
        ctrl.set_bounds(bounds());
        ctrl.set_pinned(true);
        ctrl.pointer_moved(Point::new(-10.0, -10.0));
        assert!(ctrl.is_visible());
        ctrl.set_pinned(false);
        assert!(!ctrl.is_visible());
    }

    #[test]
    fn test_mobile_visible_at_mount_and_tap_toggles() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Mobile);
        assert!(ctrl.is_visible());
        ctrl.tap();
        assert!(!ctrl.is_visible());
        ctrl.tap();
        assert!(ctrl.is_visible());
    }

    #[test]
    fn test_mobile_hide_after_delay() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Mobile);
        ctrl.on_playing(Duration::from_secs(10));
        assert!(!ctrl.tick(Duration::from_millis(13_999)));
        assert!(ctrl.is_visible());
        assert!(ctrl.tick(Duration::from_secs(14)));
        assert!(!ctrl.is_visible());
        assert!(!ctrl.tick(Duration::from_secs(20)));
    }

    #[test]
    fn test_mobile_pause_cancels_hide() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Mobile);
        ctrl.on_playing(Duration::ZERO);
        ctrl.on_paused();
        assert!(!ctrl.tick(Duration::from_secs(5)));
        assert!(ctrl.is_visible());
    }

    #[test]
    fn test_desktop_play_arms_nothing() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Desktop);
        ctrl.on_playing(Duration::ZERO);
        assert!(!ctrl.hide_pending());
    }

    #[test]
    fn test_widget_hidden_gates_everything() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Mobile);
        ctrl.set_pinned(true);
        ctrl.set_widget_visible(false);
        assert!(!ctrl.is_visible());
        assert!(!ctrl.wants_pointer_tracking());
    }

    #[test]
    fn test_unmount_cancels_timer() {
        let mut ctrl = ControlVisibilityController::new(DeviceClass::Mobile);
        ctrl.on_playing(Duration::ZERO);
        ctrl.unmount();
        assert!(!ctrl.hide_pending());
        assert!(!ctrl.tick(Duration::from_secs(60)));
    }
}
