//! # air_keyboard
//!
//! Hand-gesture virtual keyboard: hover the index fingertip over an on-screen
//! key and pinch thumb to index to type it.
//!
//! ## Frame pipeline
//!
//! | Stage | Module | Output |
//! |---|---|---|
//! | Landmark source (own thread) | [`source`] | `Vec<LandmarkFrame>` per frame |
//! | Gesture classifier | `hand_gestures` | pinch / tap / swipe / open-hand |
//! | Input arbiter | [`arbiter`] | debounced key press, text buffer |
//! | Key sink | [`sink`] | keystroke to the focused window (optional) |
//! | Preview | [`visualizer`] | keyboard, text box, fingertip |
//!
//! A key fires when the fingertip hovers it, thumb and index are closer than
//! 0.04, and the last accepted press is more than 0.5 s old.
//!
//! ## Feature flags
//!
//! * (default) — key presses only go to the on-screen text box.
//! * `inject` — key presses are also sent to the focused OS window via `enigo`.
//!
//! ### Simulation controls
//!
//! | Input | Hand |
//! |---|---|
//! | Mouse pointer | Index fingertip position |
//! | `Space` / left button held | Pinch |
//! | `T` | Tap (push toward the camera and back) |
//! | `Q` / `Escape` | Quit |

pub mod error;
pub mod config;
pub mod sink;
pub mod arbiter;
pub mod source;
pub mod visualizer;
pub mod app;
