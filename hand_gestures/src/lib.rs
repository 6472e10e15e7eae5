//! # hand_gestures
//!
//! Gesture recognition over a stream of [`LandmarkFrame`]s.
//!
//! | Gesture | Source | Rule |
//! |---|---|---|
//! | Pinch | current frame | thumb tip within 0.05 of index tip |
//! | Tap | last 5 index-tip samples | depth velocity pushes past +0.1 then returns past −0.1 |
//! | Swipe | last 8+ index-tip samples | oldest→newest displacement over 0.1 on either axis |
//! | Open hand | current frame | ≥ 3 of 4 fingertips above their PIP joints |
//!
//! The classifier keeps one [`PositionHistory`] of the index fingertip.
//! Frames without a hand (`None`) never touch it and never produce a gesture.
//!
//! ```rust
//! use hand_gestures::{Gesture, GestureClassifier};
//! use hand_landmarks::{Joint, LandmarkFrame, Point3};
//!
//! let mut classifier = GestureClassifier::default();
//! let pinched = LandmarkFrame::from_fn(|j| match j {
//!     Joint::ThumbTip | Joint::IndexTip => Point3::new(0.5, 0.5, 0.0),
//!     _                                 => Point3::new(0.5, 0.9, 0.0),
//! });
//! assert_eq!(classifier.update(Some(&pinched)), vec![Gesture::Pinch]);
//! assert!(classifier.update(None).is_empty());
//! ```

pub mod classifier;
pub mod history;

pub use classifier::{GestureClassifier, GestureConfig};
pub use history::PositionHistory;

pub use hand_landmarks::LandmarkFrame;

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Gesture
// ════════════════════════════════════════════════════════════════════════════

/// Direction of a swipe in image space (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl SwipeDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwipeDirection::Left  => "left",
            SwipeDirection::Right => "right",
            SwipeDirection::Up    => "up",
            SwipeDirection::Down  => "down",
        }
    }
}

/// A gesture recognised in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Pinch,
    Tap,
    Swipe(SwipeDirection),
    OpenHand,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Pinch    => "pinch",
            Gesture::Tap      => "tap",
            Gesture::Swipe(_) => "swipe",
            Gesture::OpenHand => "open-hand",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gesture::Swipe(dir) => write!(f, "swipe-{}", dir.as_str()),
            other               => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_swipe_direction() {
        assert_eq!(Gesture::Swipe(SwipeDirection::Up).to_string(), "swipe-up");
        assert_eq!(Gesture::OpenHand.to_string(), "open-hand");
        assert_eq!(Gesture::Pinch.to_string(), "pinch");
    }
}
