//! Pointer-follow effect.
//!
//! One algorithm, two uses: magnetic buttons and links pull toward the
//! pointer by a fraction of its distance from their centre, and the gallery
//! preview panel tracks the pointer inside its container. Either way the raw
//! offset is fed through a spring; only the latest pointer position matters.

use crate::motion::{MotionPreference, Spring2D, SpringConfig, Vec2};

/// Share of the pointer's distance from centre a magnetic element moves.
pub const MAGNETIC_STRENGTH: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowMode {
    /// Offset from the element centre, scaled down.
    Magnetic { strength: f64 },
    /// Pointer position relative to the container origin, unscaled.
    Anchored,
}

impl FollowMode {
    pub const MAGNETIC: FollowMode = FollowMode::Magnetic {
        strength: MAGNETIC_STRENGTH,
    };

    fn spring(self) -> SpringConfig {
        match self {
            Self::Magnetic { .. } => SpringConfig::MAGNETIC,
            Self::Anchored => SpringConfig::PREVIEW,
        }
    }

    pub fn raw_offset(self, pointer: Vec2, rect: Rect) -> Vec2 {
        match self {
            Self::Magnetic { strength } => (pointer - rect.center()) * strength,
            Self::Anchored => pointer - rect.origin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerFollow {
    mode: FollowMode,
    preference: MotionPreference,
    raw: Vec2,
    spring: Spring2D,
    inside: bool,
    positioned: bool,
}

impl PointerFollow {
    pub fn new(mode: FollowMode, preference: MotionPreference) -> Self {
        Self {
            mode,
            preference,
            raw: Vec2::ZERO,
            spring: Spring2D::new(mode.spring()),
            inside: false,
            positioned: false,
        }
    }

    pub fn magnetic(preference: MotionPreference) -> Self {
        Self::new(FollowMode::MAGNETIC, preference)
    }

    pub fn panel(preference: MotionPreference) -> Self {
        Self::new(FollowMode::Anchored, preference)
    }

    /// Reduced motion turns the effect off entirely.
    pub fn is_enabled(&self) -> bool {
        !self.preference.is_reduced()
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    pub fn pointer_move(&mut self, pointer: Vec2, rect: Rect) {
        if !self.is_enabled() {
            return;
        }

        self.raw = self.mode.raw_offset(pointer, rect);
        self.inside = true;

        // The panel appears where the pointer is instead of flying in from
        // the container corner.
        if self.mode == FollowMode::Anchored && !self.positioned {
            self.spring.jump_to(self.raw);
            self.positioned = true;
        }
    }

    pub fn pointer_leave(&mut self) {
        self.inside = false;
        if let FollowMode::Magnetic { .. } = self.mode {
            self.raw = Vec2::ZERO;
        }
    }

    pub fn tick(&mut self, dt: f64) -> Vec2 {
        if !self.is_enabled() {
            return Vec2::ZERO;
        }
        self.spring.step(self.raw, dt)
    }

    pub fn offset(&self) -> Vec2 {
        if self.is_enabled() {
            self.spring.position()
        } else {
            Vec2::ZERO
        }
    }

    /// Whether another animation frame would move anything.
    pub fn needs_frame(&self) -> bool {
        self.is_enabled() && !self.spring.is_at_rest(self.raw)
    }
}

/// Top-left corner for a panel of `panel` size centred on `anchor`, kept
/// `gutter` pixels inside a container of `container` size.
pub fn panel_top_left(anchor: Vec2, panel: Vec2, container: Vec2, gutter: f64) -> Vec2 {
    let min = Vec2::new(gutter, gutter);
    let max = Vec2::new(
        (container.x - panel.x - gutter).max(min.x),
        (container.y - panel.y - gutter).max(min.y),
    );
    let desired = anchor - panel * 0.5;

    Vec2::new(desired.x.clamp(min.x, max.x), desired.y.clamp(min.y, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f64 = 1.0 / 60.0;

    fn button() -> Rect {
        Rect::new(100.0, 200.0, 200.0, 60.0)
    }

    #[test]
    fn magnetic_raw_is_scaled_distance_from_center() {
        let mut follow = PointerFollow::magnetic(MotionPreference::Full);
        follow.pointer_move(Vec2::new(250.0, 250.0), button());

        let raw = follow.raw();
        assert!((raw.x - 10.0).abs() < 1e-9);
        assert!((raw.y - 4.0).abs() < 1e-9);
    }

    #[test]
    fn latest_pointer_position_wins() {
        let mut follow = PointerFollow::magnetic(MotionPreference::Full);
        follow.pointer_move(Vec2::new(120.0, 210.0), button());
        follow.pointer_move(Vec2::new(200.0, 230.0), button());

        assert_eq!(follow.raw(), Vec2::ZERO);
    }

    #[test]
    fn leave_animates_back_without_snapping() {
        let mut follow = PointerFollow::magnetic(MotionPreference::Full);
        follow.pointer_move(Vec2::new(300.0, 260.0), button());
        for _ in 0..60 {
            follow.tick(FRAME);
        }
        let held = follow.offset();
        assert!(held.length() > 10.0);

        follow.pointer_leave();
        assert_eq!(follow.raw(), Vec2::ZERO);

        let after_one_frame = follow.tick(FRAME);
        assert!(after_one_frame.length() > 0.0);
        assert!(after_one_frame.length() < held.length());

        for _ in 0..120 {
            follow.tick(FRAME);
        }
        assert_eq!(follow.offset(), Vec2::ZERO);
        assert!(!follow.needs_frame());
    }

    #[test]
    fn reduced_motion_keeps_offset_at_zero() {
        let mut follow = PointerFollow::magnetic(MotionPreference::Reduced);

        for step in 0..50 {
            let pointer = Vec2::new(100.0 + step as f64 * 4.0, 200.0 + step as f64);
            follow.pointer_move(pointer, button());
            assert_eq!(follow.tick(FRAME), Vec2::ZERO);
            assert_eq!(follow.offset(), Vec2::ZERO);
        }

        assert!(!follow.is_enabled());
        assert!(!follow.needs_frame());
    }

    #[test]
    fn reduced_motion_disables_both_modes() {
        for follow in [
            PointerFollow::magnetic(MotionPreference::Reduced),
            PointerFollow::panel(MotionPreference::Reduced),
        ] {
            assert!(!follow.is_enabled());
        }
        assert!(PointerFollow::magnetic(MotionPreference::Full).is_enabled());
        assert!(PointerFollow::panel(MotionPreference::Full).is_enabled());
    }

    #[test]
    fn panel_tracks_pointer_relative_to_container() {
        let container = Rect::new(40.0, 500.0, 1_000.0, 800.0);
        let mut panel = PointerFollow::panel(MotionPreference::Full);

        panel.pointer_move(Vec2::new(340.0, 620.0), container);
        assert_eq!(panel.raw(), Vec2::new(300.0, 120.0));
        assert_eq!(panel.offset(), Vec2::new(300.0, 120.0));

        panel.pointer_move(Vec2::new(440.0, 620.0), container);
        let moving = panel.tick(FRAME);
        assert!(moving.x > 300.0 && moving.x < 400.0);
    }

    #[test]
    fn panel_leave_keeps_target() {
        let container = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut panel = PointerFollow::panel(MotionPreference::Full);
        panel.pointer_move(Vec2::new(200.0, 150.0), container);

        panel.pointer_leave();

        assert!(!panel.is_inside());
        assert_eq!(panel.raw(), Vec2::new(200.0, 150.0));
    }

    #[test]
    fn panel_is_clamped_inside_container() {
        let panel = Vec2::new(320.0, 208.0);
        let container = Vec2::new(1_000.0, 600.0);

        assert_eq!(
            panel_top_left(Vec2::new(500.0, 300.0), panel, container, 16.0),
            Vec2::new(340.0, 196.0)
        );
        assert_eq!(
            panel_top_left(Vec2::new(5.0, 590.0), panel, container, 16.0),
            Vec2::new(16.0, 376.0)
        );
    }
}
