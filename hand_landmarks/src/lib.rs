//! # hand_landmarks
//!
//! The per-frame data a hand-landmark estimator hands us, and the handful of
//! geometric primitives the rest of the workspace reads it with.
//!
//! A [`LandmarkFrame`] is one detected hand: 21 [`Point3`]s in the standard
//! hand-model order, with `x`/`y` normalised to the image (`0.0..=1.0`,
//! origin top-left) and `z` a relative depth.  A camera frame carries zero or
//! more of them; see [`Hands`].
//!
//! ```rust
//! use hand_landmarks::{Joint, LandmarkFrame, Point3, distance_3d};
//!
//! let hand = LandmarkFrame::from_fn(|j| match j {
//!     Joint::ThumbTip => Point3::new(0.50, 0.50, 0.0),
//!     Joint::IndexTip => Point3::new(0.53, 0.54, 0.0),
//!     _               => Point3::new(0.40, 0.70, 0.0),
//! });
//! let gap = distance_3d(hand[Joint::ThumbTip], hand[Joint::IndexTip]);
//! assert!((gap - 0.05).abs() < 1e-5);
//! ```

pub mod geometry;

pub use geometry::{distance_3d, point_in_rect, Rect};

use std::ops::Index;

// ════════════════════════════════════════════════════════════════════════════
// Point3
// ════════════════════════════════════════════════════════════════════════════

/// A single landmark position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Point3 { x, y, z }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Joint — the 21-point hand model
// ════════════════════════════════════════════════════════════════════════════

/// Number of landmarks in one hand.
pub const JOINT_COUNT: usize = 21;

/// Landmark ids of the standard 21-point hand model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    Wrist      = 0,
    ThumbCmc   = 1,
    ThumbMcp   = 2,
    ThumbIp    = 3,
    ThumbTip   = 4,
    IndexMcp   = 5,
    IndexPip   = 6,
    IndexDip   = 7,
    IndexTip   = 8,
    MiddleMcp  = 9,
    MiddlePip  = 10,
    MiddleDip  = 11,
    MiddleTip  = 12,
    RingMcp    = 13,
    RingPip    = 14,
    RingDip    = 15,
    RingTip    = 16,
    PinkyMcp   = 17,
    PinkyPip   = 18,
    PinkyDip   = 19,
    PinkyTip   = 20,
}

impl Joint {
    /// All joints in id order.
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Wrist,
        Joint::ThumbCmc,  Joint::ThumbMcp,  Joint::ThumbIp,   Joint::ThumbTip,
        Joint::IndexMcp,  Joint::IndexPip,  Joint::IndexDip,  Joint::IndexTip,
        Joint::MiddleMcp, Joint::MiddlePip, Joint::MiddleDip, Joint::MiddleTip,
        Joint::RingMcp,   Joint::RingPip,   Joint::RingDip,   Joint::RingTip,
        Joint::PinkyMcp,  Joint::PinkyPip,  Joint::PinkyDip,  Joint::PinkyTip,
    ];

    /// The numeric landmark id (0–20).
    pub fn id(self) -> usize { self as usize }

    /// Look a joint up by its numeric id.
    pub fn from_id(id: usize) -> Option<Joint> {
        Joint::ALL.get(id).copied()
    }
}

/// The four non-thumb fingers as `(tip, pip)` pairs.
pub const FINGER_TIP_PIP: [(Joint, Joint); 4] = [
    (Joint::IndexTip,  Joint::IndexPip),
    (Joint::MiddleTip, Joint::MiddlePip),
    (Joint::RingTip,   Joint::RingPip),
    (Joint::PinkyTip,  Joint::PinkyPip),
];

// ════════════════════════════════════════════════════════════════════════════
// LandmarkFrame
// ════════════════════════════════════════════════════════════════════════════

/// One detected hand: all 21 landmarks for a single camera frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Point3; JOINT_COUNT],
}

/// Every hand detected in one camera frame (usually 0–2).
pub type Hands = Vec<LandmarkFrame>;

impl LandmarkFrame {
    pub fn new(points: [Point3; JOINT_COUNT]) -> Self {
        LandmarkFrame { points }
    }

    /// Build a frame by asking `f` for each joint in id order.
    pub fn from_fn(mut f: impl FnMut(Joint) -> Point3) -> Self {
        let mut points = [Point3::default(); JOINT_COUNT];
        for joint in Joint::ALL {
            points[joint.id()] = f(joint);
        }
        LandmarkFrame { points }
    }

    pub fn joint(&self, joint: Joint) -> Point3 {
        self.points[joint.id()]
    }

    pub fn set(&mut self, joint: Joint, p: Point3) {
        self.points[joint.id()] = p;
    }

    pub fn points(&self) -> &[Point3; JOINT_COUNT] { &self.points }

    /// Project a landmark into frame pixels.
    ///
    /// Coordinates are truncated toward zero, so a tip at `x = 0.999` on an
    /// 800-wide frame lands on pixel 799.
    pub fn to_pixels(&self, joint: Joint, width: u32, height: u32) -> (i32, i32) {
        let p = self.joint(joint);
        ((p.x * width as f32) as i32, (p.y * height as f32) as i32)
    }
}

impl Index<Joint> for LandmarkFrame {
    type Output = Point3;

    fn index(&self, joint: Joint) -> &Point3 {
        &self.points[joint.id()]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
