//! Infinite auto-scrolling card carousel.
//!
//! The carousel renders a horizontal strip of cards that drifts on its own,
//! can be dragged by mouse or touch, keeps momentum after release and loops
//! seamlessly by wrapping its scroll offset.
//!
//! # Architecture
//!
//! - [`CarouselCard`]: A single card as supplied by the page
//! - [`CarouselState`]: Scroll offset, velocity and the active drag gesture,
//!   advanced by a pure [`CarouselState::step`] per animation frame
//! - [`CarouselTuning`]: Speeds, friction and gesture thresholds
//!
//! # Example
//!
//! ```rust
//! use portfolio_site::carousel::{CarouselState, CarouselTuning};
//!
//! let mut state = CarouselState::new(CarouselTuning::default());
//! state.measure(4, 256.0, 24.0);
//! state.step(0.0);
//! state.step(16.0);
//! assert!(state.offset() >= 0.0 && state.offset() < state.loop_width());
//! ```

mod motion;

pub use motion::{CarouselState, CarouselTuning, DragGesture, PointerKind, wrap};

use serde::{Deserialize, Serialize};

/// A card displayed inside the carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselCard {
    /// Card title.
    pub name: String,
    /// Optional text shown below the title.
    #[serde(default)]
    pub description: Option<String>,
}

impl CarouselCard {
    /// Create a card with a title and optional description.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }
}

/// How many times the card list is laid out so the strip is wide enough to loop.
#[must_use]
pub fn repeat_count(len: usize) -> usize {
    match len {
        1 => 5,
        2..=3 => 3,
        _ => 2,
    }
}

/// The strip as rendered: the input cards repeated [`repeat_count`] times.
#[must_use]
pub fn repeated(cards: &[CarouselCard]) -> Vec<CarouselCard> {
    let count = repeat_count(cards.len());
    std::iter::repeat_n(cards, count)
        .flatten()
        .cloned()
        .collect()
}

/// Width of one full pass through the distinct cards.
#[must_use]
pub fn loop_width(card_count: usize, card_width: f64, gap: f64) -> f64 {
    card_count as f64 * (card_width + gap)
}
