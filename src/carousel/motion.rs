//! Carousel motion: auto-scroll, drag tracking and momentum decay.
//!
//! Offsets and pointer positions are in CSS pixels, timestamps in
//! milliseconds. A positive velocity moves the content to the right, which
//! decreases the scroll offset.

use serde::{Deserialize, Serialize};

/// Motion constants for the carousel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselTuning {
    /// Idle drift speed in px/ms.
    pub auto_speed: f64,
    /// Exponential momentum decay rate per ms.
    pub friction: f64,
    /// Velocity multiplier applied to mouse drags.
    pub mouse_gain: f64,
    /// Velocity multiplier applied to touch drags.
    pub touch_gain: f64,
    /// Vertical travel (px) after which a touch gesture is treated as page scroll.
    pub vertical_threshold: f64,
}

impl Default for CarouselTuning {
    fn default() -> Self {
        Self {
            auto_speed: 0.05,
            friction: 0.005,
            mouse_gain: 0.2,
            touch_gain: 1.5,
            vertical_threshold: 10.0,
        }
    }
}

/// Input device driving a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Bookkeeping for a single drag, from press to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    pub kind: PointerKind,
    pub start_x: f64,
    pub start_y: f64,
    pub start_offset: f64,
    pub last_x: f64,
    pub last_ts: f64,
    /// Set once a touch gesture is recognised as vertical page scrolling.
    pub vertical: bool,
}

/// Scroll state of one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    tuning: CarouselTuning,
    offset: f64,
    velocity: f64,
    last_frame: Option<f64>,
    loop_width: f64,
    gesture: Option<DragGesture>,
}

/// Wrap `offset` into `[0, width)`.
///
/// Negative offsets wrap around from the end. A non-positive width means the
/// strip has not been measured yet and yields 0.
#[must_use]
pub fn wrap(offset: f64, width: f64) -> f64 {
    if width <= 0.0 || !width.is_finite() || !offset.is_finite() {
        return 0.0;
    }
    let wrapped = offset.rem_euclid(width);
    // rem_euclid can round up to `width` for tiny negative inputs
    if wrapped >= width { 0.0 } else { wrapped }
}

impl CarouselState {
    /// Create a resting carousel at offset 0.
    #[must_use]
    pub fn new(tuning: CarouselTuning) -> Self {
        Self {
            tuning,
            offset: 0.0,
            velocity: 0.0,
            last_frame: None,
            loop_width: 0.0,
            gesture: None,
        }
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[must_use]
    pub fn loop_width(&self) -> f64 {
        self.loop_width
    }

    #[must_use]
    pub fn tuning(&self) -> &CarouselTuning {
        &self.tuning
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&DragGesture> {
        self.gesture.as_ref()
    }

    /// Update the loop width from the rendered card geometry.
    pub fn measure(&mut self, card_count: usize, card_width: f64, gap: f64) {
        self.set_loop_width(super::loop_width(card_count, card_width, gap));
    }

    /// Set the loop width directly and re-wrap the current offset.
    pub fn set_loop_width(&mut self, width: f64) {
        self.loop_width = width;
        self.offset = wrap(self.offset, width);
    }

    /// Jump to an offset, wrapped into the loop.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = wrap(offset, self.loop_width);
    }

    /// Advance one animation frame at timestamp `ts`.
    ///
    /// The first frame only records the timestamp. While a drag is active the
    /// offset is owned by the pointer and nothing moves here.
    pub fn step(&mut self, ts: f64) {
        let dt = self.last_frame.map_or(0.0, |last| (ts - last).max(0.0));
        self.last_frame = Some(ts);

        if self.gesture.is_some() {
            return;
        }

        let auto = self.tuning.auto_speed;
        let next = if self.velocity == 0.0 {
            self.offset - auto * dt
        } else {
            let direction = self.velocity.signum();
            self.velocity *= (-self.tuning.friction * dt).exp();
            if self.velocity.abs() < auto {
                self.velocity = auto * direction;
            }
            self.offset - self.velocity * dt
        };

        self.offset = wrap(next, self.loop_width);
    }

    /// Start a drag at pointer position (`x`, `y`).
    ///
    /// Any previous gesture is discarded and momentum is cleared.
    pub fn begin_drag(&mut self, kind: PointerKind, x: f64, y: f64, ts: f64) {
        self.velocity = 0.0;
        self.gesture = Some(DragGesture {
            kind,
            start_x: x,
            start_y: y,
            start_offset: self.offset,
            last_x: x,
            last_ts: ts,
            vertical: false,
        });
    }

    /// Track a pointer move during a drag.
    ///
    /// Returns `true` when the move was consumed by the carousel, `false`
    /// when there is no gesture or the gesture is a vertical page scroll that
    /// should be left to the browser.
    pub fn drag_move(&mut self, x: f64, y: f64, ts: f64) -> bool {
        let threshold = self.tuning.vertical_threshold;
        let loop_width = self.loop_width;
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };

        let dx = x - gesture.start_x;
        let dy = y - gesture.start_y;

        if gesture.kind == PointerKind::Touch
            && !gesture.vertical
            && dy.abs() > dx.abs()
            && dy.abs() > threshold
        {
            gesture.vertical = true;
        }
        if gesture.vertical {
            return false;
        }

        let gain = match gesture.kind {
            PointerKind::Mouse => self.tuning.mouse_gain,
            PointerKind::Touch => self.tuning.touch_gain,
        };
        let dt = (ts - gesture.last_ts).max(1.0);

        self.offset = wrap(gesture.start_offset - dx, loop_width);
        self.velocity = (x - gesture.last_x) / dt * gain;
        gesture.last_x = x;
        gesture.last_ts = ts;
        true
    }

    /// Release the active drag, handing the last velocity to momentum.
    ///
    /// Returns the finished gesture, if one was active.
    pub fn end_drag(&mut self) -> Option<DragGesture> {
        self.gesture.take()
    }

    /// Forget frame timing, as when the animation loop is torn down.
    pub fn reset_clock(&mut self) {
        self.last_frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f64 = 1120.0;

    fn measured() -> CarouselState {
        let mut state = CarouselState::new(CarouselTuning::default());
        state.set_loop_width(WIDTH);
        state
    }

    fn run_frames(state: &mut CarouselState, from: f64, frames: usize, frame_ms: f64) -> f64 {
        let mut ts = from;
        for _ in 0..frames {
            ts += frame_ms;
            state.step(ts);
        }
        ts
    }

    #[test]
    fn test_wrap_handles_negatives() {
        assert!((wrap(-10.0, 100.0) - 90.0).abs() < 1e-9);
        assert!((wrap(250.0, 100.0) - 50.0).abs() < 1e-9);
        assert!(wrap(-1e-18, 100.0) < 100.0);
        assert_eq!(wrap(42.0, 0.0), 0.0);
    }

    #[test]
    fn test_first_frame_does_not_move() {
        let mut state = measured();
        state.set_offset(500.0);
        state.step(1234.0);
        assert!((state.offset() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_scroll_drifts_at_base_speed() {
        let mut state = measured();
        state.set_offset(500.0);
        state.step(0.0);
        state.step(100.0);
        // 0.05 px/ms for 100 ms
        assert!((state.offset() - 495.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_stays_in_range() {
        for card_count in 1..6 {
            let mut state = CarouselState::new(CarouselTuning::default());
            state.measure(card_count, 256.0, 24.0);
            let width = state.loop_width();
            let mut ts = 0.0;
            for frame in 0..2_000 {
                ts += if frame % 7 == 0 { 250.0 } else { 16.7 };
                state.step(ts);
                assert!(state.offset() >= 0.0 && state.offset() < width);
            }
        }
    }

    #[test]
    fn test_offset_in_range_after_fast_fling() {
        let mut state = measured();
        state.step(0.0);
        state.begin_drag(PointerKind::Touch, 0.0, 0.0, 0.0);
        assert!(state.drag_move(5_000.0, 0.0, 1.0));
        state.end_drag();
        let mut ts = 0.0;
        for _ in 0..500 {
            ts += 16.0;
            state.step(ts);
            assert!(state.offset() >= 0.0 && state.offset() < WIDTH);
        }
    }

    #[test]
    fn test_drag_left_keeps_moving_left() {
        let mut state = measured();
        state.set_offset(100.0);
        state.step(0.0);

        state.begin_drag(PointerKind::Mouse, 500.0, 300.0, 0.0);
        assert!(state.drag_move(450.0, 300.0, 10.0));
        assert!(state.drag_move(400.0, 300.0, 20.0));
        assert!((state.offset() - 200.0).abs() < 1e-9);
        state.end_drag();
        assert!(state.velocity() < 0.0);

        let mut previous_speed = state.velocity().abs();
        let mut previous_offset = state.offset();
        let mut ts = 20.0;
        for _ in 0..200 {
            ts += 16.0;
            state.step(ts);
            let speed = state.velocity().abs();
            assert!(state.velocity() < 0.0);
            assert!(speed <= previous_speed + 1e-12);
            assert!(speed >= state.tuning().auto_speed - 1e-12);
            let travelled = wrap(state.offset() - previous_offset, WIDTH);
            assert!(travelled > 0.0 && travelled < WIDTH / 2.0);
            previous_speed = speed;
            previous_offset = state.offset();
        }
        assert!((state.velocity() + state.tuning().auto_speed).abs() < 1e-9);
    }

    #[test]
    fn test_no_motion_while_dragging() {
        let mut state = measured();
        state.set_offset(300.0);
        state.step(0.0);
        state.begin_drag(PointerKind::Mouse, 10.0, 10.0, 0.0);
        run_frames(&mut state, 0.0, 30, 16.0);
        assert!((state.offset() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_touch_is_ignored() {
        let mut state = measured();
        state.set_offset(300.0);
        state.begin_drag(PointerKind::Touch, 100.0, 100.0, 0.0);

        assert!(!state.drag_move(105.0, 130.0, 16.0));
        assert!((state.offset() - 300.0).abs() < 1e-9);
        assert_eq!(state.velocity(), 0.0);

        // Once vertical, the rest of the gesture stays with the page.
        assert!(!state.drag_move(300.0, 131.0, 32.0));
        assert!((state.offset() - 300.0).abs() < 1e-9);
        assert!(state.gesture().is_some_and(|g| g.vertical));
    }

    #[test]
    fn test_mouse_never_turns_vertical() {
        let mut state = measured();
        state.set_offset(300.0);
        state.begin_drag(PointerKind::Mouse, 100.0, 100.0, 0.0);
        assert!(state.drag_move(95.0, 160.0, 16.0));
        assert!((state.offset() - 305.0).abs() < 1e-9);
    }

    #[test]
    fn test_drag_wraps_past_start() {
        let mut state = measured();
        state.begin_drag(PointerKind::Touch, 0.0, 0.0, 0.0);
        state.drag_move(40.0, 0.0, 16.0);
        assert!((state.offset() - (WIDTH - 40.0)).abs() < 1e-9);
    }

    #[test]
    fn test_velocity_uses_minimum_interval() {
        let mut state = measured();
        state.begin_drag(PointerKind::Touch, 0.0, 0.0, 100.0);
        state.drag_move(-4.0, 0.0, 100.0);
        // dt clamps to 1 ms, touch gain 1.5
        assert!((state.velocity() + 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_release_without_movement_resumes_auto_scroll() {
        let mut state = measured();
        state.set_offset(500.0);
        state.step(0.0);
        state.begin_drag(PointerKind::Mouse, 0.0, 0.0, 0.0);
        assert!(state.end_drag().is_some());
        assert!(state.end_drag().is_none());
        state.step(100.0);
        assert!((state.offset() - 495.0).abs() < 1e-9);
    }
}
