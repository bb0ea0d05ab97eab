//! Motion capability and spring physics.
//!
//! Reduced motion is resolved once per session and handed to every
//! interactive controller. Springs are integrated against elapsed time so
//! the animation speed does not depend on the display refresh rate.

use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn from_reduce_flag(reduce: bool) -> Self {
        if reduce {
            Self::Reduced
        } else {
            Self::Full
        }
    }

    pub fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Magnetic buttons and links.
    pub const MAGNETIC: SpringConfig = SpringConfig {
        stiffness: 300.0,
        damping: 20.0,
        mass: 1.0,
    };

    /// Floating gallery preview.
    pub const PREVIEW: SpringConfig = SpringConfig {
        stiffness: 300.0,
        damping: 30.0,
        mass: 1.0,
    };
}

/// Largest integration step in seconds. Longer frames are sub-stepped.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;
/// Frames longer than this (tab in background) are clamped.
const MAX_FRAME: f64 = 0.25;
const REST_DELTA: f64 = 0.01;
const REST_SPEED: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpringState {
    pub position: f64,
    pub velocity: f64,
}

impl SpringState {
    pub fn at(position: f64) -> Self {
        Self {
            position,
            velocity: 0.0,
        }
    }

    pub fn is_at_rest(&self, target: f64) -> bool {
        (self.position - target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }
}

/// Advances one spring axis by `dt` seconds toward `target`.
///
/// Semi-implicit Euler over fixed-size sub-steps; a spring within the rest
/// tolerance is placed exactly on the target.
pub fn step_spring(state: SpringState, config: SpringConfig, target: f64, dt: f64) -> SpringState {
    let mut remaining = dt.clamp(0.0, MAX_FRAME);
    let mut next = state;

    while remaining > 0.0 {
        let h = remaining.min(MAX_SUBSTEP);
        let displacement = next.position - target;
        let force = -config.stiffness * displacement - config.damping * next.velocity;
        next.velocity += force / config.mass * h;
        next.position += next.velocity * h;
        remaining -= h;
    }

    if next.is_at_rest(target) {
        SpringState::at(target)
    } else {
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring2D {
    config: SpringConfig,
    x: SpringState,
    y: SpringState,
}

impl Spring2D {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            x: SpringState::default(),
            y: SpringState::default(),
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.position, self.y.position)
    }

    pub fn step(&mut self, target: Vec2, dt: f64) -> Vec2 {
        self.x = step_spring(self.x, self.config, target.x, dt);
        self.y = step_spring(self.y, self.config, target.y, dt);
        self.position()
    }

    pub fn is_at_rest(&self, target: Vec2) -> bool {
        self.x.is_at_rest(target.x) && self.y.is_at_rest(target.y)
    }

    /// Places the spring on `position` with no velocity.
    pub fn jump_to(&mut self, position: Vec2) {
        self.x = SpringState::at(position.x);
        self.y = SpringState::at(position.y);
    }
}

/// Exponential approach toward `target` that covers most of the distance
/// within `lag` seconds. Time-based, so frame rate does not change speed.
pub fn approach(current: f64, target: f64, lag: f64, dt: f64) -> f64 {
    if lag <= 0.0 || dt <= 0.0 {
        return if lag <= 0.0 { target } else { current };
    }

    let blend = 1.0 - (-4.0 * dt.min(MAX_FRAME) / lag).exp();
    let next = current + (target - current) * blend;

    if (next - target).abs() < REST_DELTA {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: SpringConfig, target: f64, frame: f64, seconds: f64) -> SpringState {
        let frames = (seconds / frame).round() as usize;
        (0..frames).fold(SpringState::default(), |state, _| step_spring(state, config, target, frame))
    }

    #[test]
    fn spring_settles_on_target() {
        let state = run(SpringConfig::MAGNETIC, 24.0, 1.0 / 60.0, 2.0);
        assert_eq!(state, SpringState::at(24.0));
    }

    #[test]
    fn spring_does_not_jump_in_one_frame() {
        let state = step_spring(SpringState::default(), SpringConfig::MAGNETIC, 50.0, 1.0 / 60.0);
        assert!(state.position > 0.0);
        assert!(state.position < 50.0);
    }

    #[test]
    fn spring_speed_is_independent_of_frame_rate() {
        let at_60 = run(SpringConfig::PREVIEW, 100.0, 1.0 / 60.0, 0.25);
        let at_144 = run(SpringConfig::PREVIEW, 100.0, 1.0 / 144.0, 0.25);

        assert!(
            (at_60.position - at_144.position).abs() < 1.0,
            "60 Hz {} vs 144 Hz {}",
            at_60.position,
            at_144.position
        );
    }

    #[test]
    fn long_frames_are_clamped() {
        let state = step_spring(SpringState::default(), SpringConfig::MAGNETIC, 10.0, 30.0);
        assert!(state.position.is_finite());
    }

    #[test]
    fn magnetic_spring_overshoots_more_than_preview() {
        let mut magnetic = SpringState::default();
        let mut preview = SpringState::default();
        let mut magnetic_peak: f64 = 0.0;
        let mut preview_peak: f64 = 0.0;

        for _ in 0..120 {
            magnetic = step_spring(magnetic, SpringConfig::MAGNETIC, 10.0, 1.0 / 60.0);
            preview = step_spring(preview, SpringConfig::PREVIEW, 10.0, 1.0 / 60.0);
            magnetic_peak = magnetic_peak.max(magnetic.position);
            preview_peak = preview_peak.max(preview.position);
        }

        assert!(magnetic_peak > 10.5);
        assert!(preview_peak < magnetic_peak);
    }

    #[test]
    fn approach_converges_and_respects_zero_lag() {
        let mut value = 0.0;
        for _ in 0..240 {
            value = approach(value, -400.0, 1.0, 1.0 / 60.0);
        }
        assert_eq!(value, -400.0);
        assert_eq!(approach(3.0, 9.0, 0.0, 0.016), 9.0);
    }
}
