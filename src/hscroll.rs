//! Pinned horizontal scroller.
//!
//! The section sits inside a wrapper that is `distance` pixels taller than
//! the viewport. While the wrapper straddles the viewport the section is
//! pinned and vertical scroll progress through the wrapper drives the track
//! sideways. Progress is a pure function of position, so scrolling back
//! retraces exactly; the displayed offset only lags behind it in time.

use std::time::Duration;

use crate::motion::approach;

const END_BUFFER_RATIO: f64 = 0.3;
const END_BUFFER_MIN: f64 = 240.0;
/// Catch-up time of the displayed offset behind the scroll position.
pub const SCRUB_LAG_SECONDS: f64 = 1.0;
/// Scroll silence after which the track may settle on a card boundary.
pub const SNAP_IDLE: Duration = Duration::from_millis(150);
const SNAP_MIN_CORRECTION: f64 = 0.5;
const PROGRESS_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackMetrics {
    pub track_width: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub card_count: usize,
}

/// Extra travel so the last card fully clears the viewport before unpinning.
pub fn end_buffer(viewport_width: f64) -> f64 {
    (viewport_width * END_BUFFER_RATIO).max(END_BUFFER_MIN)
}

pub fn scroll_distance(metrics: &TrackMetrics) -> f64 {
    (metrics.track_width - metrics.viewport_width + end_buffer(metrics.viewport_width)).max(0.0)
}

pub fn is_pinned(section_top: f64, section_bottom: f64, viewport_height: f64) -> bool {
    section_top <= 0.0 && section_bottom >= viewport_height
}

/// Progress through the pin range from the wrapper's viewport-relative top.
pub fn progress_for(section_top: f64, distance: f64) -> f64 {
    if distance <= 0.0 {
        return 0.0;
    }
    (-section_top / distance).clamp(0.0, 1.0)
}

pub fn offset_for_progress(progress: f64, distance: f64) -> f64 {
    let offset = -(progress.clamp(0.0, 1.0) * distance.max(0.0));
    // Avoid handing out -0.0 at the start.
    if offset == 0.0 {
        0.0
    } else {
        offset
    }
}

/// Fraction of progress between card boundaries.
pub fn snap_step(card_count: usize) -> f64 {
    if card_count > 1 {
        1.0 / (card_count - 1) as f64
    } else {
        1.0
    }
}

pub fn snap_progress(progress: f64, card_count: usize) -> f64 {
    let step = snap_step(card_count);
    ((progress.clamp(0.0, 1.0) / step).round() * step).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub pinned: bool,
    pub progress: f64,
    pub target_offset: f64,
    /// Whether this scroll moved the track. False at either extreme, where
    /// the scroll simply continues down or up the page.
    pub consumed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalScroller {
    metrics: TrackMetrics,
    distance: f64,
    progress: f64,
    target_offset: f64,
    track_offset: f64,
    pinned: bool,
    attached: bool,
}

impl HorizontalScroller {
    pub fn new(metrics: TrackMetrics) -> Self {
        Self {
            distance: scroll_distance(&metrics),
            metrics,
            progress: 0.0,
            target_offset: 0.0,
            track_offset: 0.0,
            pinned: false,
            attached: true,
        }
    }

    pub fn metrics(&self) -> TrackMetrics {
        self.metrics
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn track_offset(&self) -> f64 {
        self.track_offset
    }

    pub fn target_offset(&self) -> f64 {
        self.target_offset
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Wrapper height that keeps the section pinned for `distance` pixels.
    pub fn pin_extent(&self) -> f64 {
        self.metrics.viewport_height + self.distance
    }

    /// Feeds the wrapper's current viewport-relative bounds.
    pub fn on_scroll(&mut self, section_top: f64, section_bottom: f64) -> ScrollUpdate {
        if !self.attached {
            return ScrollUpdate {
                pinned: false,
                progress: self.progress,
                target_offset: self.target_offset,
                consumed: false,
            };
        }

        let previous = self.progress;
        self.pinned = is_pinned(section_top, section_bottom, self.metrics.viewport_height);
        self.progress = progress_for(section_top, self.distance);
        self.target_offset = offset_for_progress(self.progress, self.distance);
        if !self.pinned {
            // Outside the pin range the track rests on the clamped extreme.
            self.track_offset = self.target_offset;
        }

        ScrollUpdate {
            pinned: self.pinned,
            progress: self.progress,
            target_offset: self.target_offset,
            consumed: self.pinned && (self.progress - previous).abs() > PROGRESS_EPSILON,
        }
    }

    /// Moves the displayed offset toward the scroll-driven target. Does
    /// nothing unless pinned.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !self.pinned {
            return self.track_offset;
        }
        self.track_offset = approach(self.track_offset, self.target_offset, SCRUB_LAG_SECONDS, dt);
        self.track_offset
    }

    pub fn is_settled(&self) -> bool {
        self.track_offset == self.target_offset
    }

    /// Vertical scroll correction that lands the track on the nearest card
    /// boundary, if the section is pinned and not already there.
    pub fn snap_correction(&self) -> Option<f64> {
        if !self.attached || !self.pinned || self.metrics.card_count < 2 {
            return None;
        }

        let snapped = snap_progress(self.progress, self.metrics.card_count);
        let correction = (snapped - self.progress) * self.distance;
        (correction.abs() >= SNAP_MIN_CORRECTION).then_some(correction)
    }

    /// Re-measures after a resize. Returns the vertical scroll correction
    /// that keeps the current progress equivalent under the new distance.
    pub fn resize(&mut self, metrics: TrackMetrics) -> f64 {
        let previous_distance = self.distance;
        self.metrics = metrics;
        self.distance = scroll_distance(&metrics);
        self.target_offset = offset_for_progress(self.progress, self.distance);
        self.track_offset = self.target_offset;

        let correction = self.progress * (self.distance - previous_distance);
        tracing::debug!(
            previous_distance,
            distance = self.distance,
            progress = self.progress,
            correction,
            "horizontal scroller resized"
        );
        correction
    }

    /// Releases the pin; the controller ignores all later input.
    pub fn detach(&mut self) {
        self.attached = false;
        self.pinned = false;
    }
}
