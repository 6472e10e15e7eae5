//! Landmark sources, where hand frames come from.
//!
//! The public interface is a `Receiver<Hands>` fed by a [`LandmarkSource`]
//! running on its own thread.  Consumers don't care whether frames come from
//! a landmark estimator or from the mouse-driven simulator below.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_landmarks::{Hands, Joint, LandmarkFrame, Point3};
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver per-frame hand landmarks over a channel.
///
/// Each message is one camera frame: zero or more hands, first hand first.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<Hands>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<Hands> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — mouse/keyboard simulation
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the preview window.  Coordinates are normalised to 0–1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer inside the window; `pinching` closes thumb onto index.
    Pointer { x: f32, y: f32, pinching: bool },
    /// Pointer left the window: no hand in view.
    PointerLost,
    /// Poke toward the camera and back at the current pointer position.
    Tap,
    Quit,
}

/// Depth offsets of the index tip for one simulated tap, one frame each.
const TAP_DEPTHS: [f32; 4] = [0.15, 0.30, 0.15, 0.0];

/// Landmark source driven by [`SimInput`] events from the preview window.
///
/// Every pointer event becomes one frame holding a synthetic open hand whose
/// index fingertip sits under the pointer.
pub struct SimLandmarkSource {
    pub rx: Receiver<SimInput>,
}

impl LandmarkSource for SimLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<Hands>) {
        let mut pointer: Option<(f32, f32, bool)> = None;

        for input in self.rx {
            let frames: Vec<Hands> = match input {
                SimInput::Pointer { x, y, pinching } => {
                    pointer = Some((x, y, pinching));
                    vec![vec![synthetic_hand(x, y, 0.0, pinching)]]
                }
                SimInput::PointerLost => {
                    pointer = None;
                    vec![Vec::new()]
                }
                SimInput::Tap => match pointer {
                    Some((x, y, pinching)) => TAP_DEPTHS
                        .iter()
                        .map(|&z| vec![synthetic_hand(x, y, z, pinching)])
                        .collect(),
                    None => {
                        debug!("tap ignored, no pointer in view");
                        continue;
                    }
                },
                SimInput::Quit => return,
            };
            for frame in frames {
                if tx.send(frame).is_err() { return; }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Synthetic hand pose
// ════════════════════════════════════════════════════════════════════════════

/// An open right hand, palm to the camera, index tip at `(x, y, z)`.
///
/// All four fingertips sit above their PIP joints.  With `pinching` the thumb
/// tip is moved to within 0.015 of the index tip, otherwise it rests well
/// outside both pinch thresholds.
pub fn synthetic_hand(x: f32, y: f32, z: f32, pinching: bool) -> LandmarkFrame {
    let thumb_tip = if pinching {
        Point3::new(x + 0.01, y + 0.01, z)
    } else {
        Point3::new(x - 0.07, y + 0.12, 0.0)
    };

    LandmarkFrame::from_fn(|j| {
        let (dx, dy) = match j {
            Joint::Wrist            => (0.06, 0.30),

            Joint::ThumbCmc         => (0.00, 0.25),
            Joint::ThumbMcp         => (-0.04, 0.21),
            Joint::ThumbIp          => (-0.06, 0.16),
            Joint::ThumbTip         => return thumb_tip,

            Joint::IndexMcp         => (0.01, 0.17),
            Joint::IndexPip         => (0.005, 0.09),
            Joint::IndexDip         => (0.002, 0.04),
            Joint::IndexTip         => return Point3::new(x, y, z),

            Joint::MiddleMcp        => (0.05, 0.17),
            Joint::MiddlePip        => (0.05, 0.09),
            Joint::MiddleDip        => (0.05, 0.05),
            Joint::MiddleTip        => (0.05, 0.01),

            Joint::RingMcp          => (0.08, 0.18),
            Joint::RingPip          => (0.08, 0.11),
            Joint::RingDip          => (0.08, 0.07),
            Joint::RingTip          => (0.08, 0.04),

            Joint::PinkyMcp         => (0.11, 0.20),
            Joint::PinkyPip         => (0.11, 0.14),
            Joint::PinkyDip         => (0.11, 0.11),
            Joint::PinkyTip         => (0.11, 0.09),
        };
        Point3::new(x + dx, y + dy, 0.0)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
