//! Stateful gesture classifier.
//!
//! Pinch and open-hand read only the frame in hand.  Tap and swipe read the
//! index-fingertip history, which [`GestureClassifier::detect_tap`],
//! [`GestureClassifier::observe`] and [`GestureClassifier::update`] extend by
//! one sample per call.

use hand_landmarks::{distance_3d, Joint, LandmarkFrame, FINGER_TIP_PIP};
use tracing::debug;

use crate::history::PositionHistory;
use crate::{Gesture, SwipeDirection};

// ════════════════════════════════════════════════════════════════════════════
// GestureConfig
// ════════════════════════════════════════════════════════════════════════════

/// Thresholds for every detector.  Distances are in normalised image units.
#[derive(Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Thumb-to-index distance below which the hand is pinching.
    pub pinch_threshold: f32,
    /// Per-frame depth change that counts as a push or a retract.
    pub tap_velocity: f32,
    /// Samples examined for a tap (yields `tap_window - 1` velocities).
    pub tap_window: usize,
    /// Displacement on either axis that makes a swipe.
    pub swipe_min_distance: f32,
    /// Samples required before a swipe is considered.
    pub swipe_window: usize,
    /// Index-tip samples retained.
    pub history_capacity: usize,
    /// Extended fingers (of index, middle, ring, pinky) for an open hand.
    pub open_hand_min_fingers: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        GestureConfig {
            pinch_threshold:       0.05,
            tap_velocity:          0.1,
            tap_window:            5,
            swipe_min_distance:    0.1,
            swipe_window:          8,
            history_capacity:      10,
            open_hand_min_fingers: 3,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct GestureClassifier {
    config:  GestureConfig,
    history: PositionHistory,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        GestureClassifier::new(GestureConfig::default())
    }
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        let history = PositionHistory::new(config.history_capacity);
        GestureClassifier { config, history }
    }

    pub fn config(&self)  -> &GestureConfig   { &self.config }
    pub fn history(&self) -> &PositionHistory { &self.history }

    /// Record the index fingertip without classifying anything.
    pub fn observe(&mut self, frame: Option<&LandmarkFrame>) {
        if let Some(hand) = frame {
            self.history.push(hand[Joint::IndexTip]);
        }
    }

    /// Thumb and index tips closer than the pinch threshold.
    pub fn detect_pinch(&self, frame: Option<&LandmarkFrame>) -> bool {
        let Some(hand) = frame else { return false };
        distance_3d(hand[Joint::ThumbTip], hand[Joint::IndexTip]) < self.config.pinch_threshold
    }

    /// Record the index tip, then look for a push-and-retract in depth.
    pub fn detect_tap(&mut self, frame: Option<&LandmarkFrame>) -> bool {
        if frame.is_none() {
            return false;
        }
        self.observe(frame);
        self.tap_in_history()
    }

    /// Dominant direction of travel across the whole history, if it moved far
    /// enough.  Does not record the frame.
    pub fn detect_swipe(&self, frame: Option<&LandmarkFrame>) -> Option<SwipeDirection> {
        if frame.is_none() {
            return None;
        }
        self.swipe_in_history()
    }

    /// At least `open_hand_min_fingers` fingertips sit above their PIP joint.
    ///
    /// All four non-thumb fingers are counted.
    pub fn is_hand_open(&self, frame: Option<&LandmarkFrame>) -> bool {
        let Some(hand) = frame else { return false };
        let extended = FINGER_TIP_PIP
            .iter()
            .filter(|&&(tip, pip)| hand[tip].y < hand[pip].y)
            .count();
        extended >= self.config.open_hand_min_fingers
    }

    /// Record the frame once and run every detector against it.
    ///
    /// Gestures come back in the order pinch, tap, swipe, open hand.
    pub fn update(&mut self, frame: Option<&LandmarkFrame>) -> Vec<Gesture> {
        let mut out = Vec::new();
        if frame.is_none() {
            return out;
        }

        if self.detect_pinch(frame) {
            out.push(Gesture::Pinch);
        }
        if self.detect_tap(frame) {
            out.push(Gesture::Tap);
        }
        if let Some(dir) = self.detect_swipe(frame) {
            out.push(Gesture::Swipe(dir));
        }
        if self.is_hand_open(frame) {
            out.push(Gesture::OpenHand);
        }

        if !out.is_empty() {
            debug!(gestures = ?out, samples = self.history.len(), "gestures recognised");
        }
        out
    }

    // ── history readers ───────────────────────────────────────────────────

    fn tap_in_history(&self) -> bool {
        let window = self.config.tap_window;
        if self.history.len() < window {
            return false;
        }

        let depths: Vec<f32> = self.history.recent(window).map(|p| p.z).collect();
        let velocities: Vec<f32> = depths.windows(2).map(|w| w[1] - w[0]).collect();
        if velocities.len() < 3 {
            return false;
        }

        let threshold = self.config.tap_velocity;
        let pushed    = velocities.iter().take(2).any(|&v| v > threshold);
        let retracted = velocities.iter().skip(1).any(|&v| v < -threshold);
        pushed && retracted
    }

    fn swipe_in_history(&self) -> Option<SwipeDirection> {
        if self.history.len() < self.config.swipe_window {
            return None;
        }
        let start = self.history.oldest()?;
        let end   = self.history.newest()?;
        let dx = end.x - start.x;
        let dy = end.y - start.y;

        let min = self.config.swipe_min_distance;
        if dx.abs() <= min && dy.abs() <= min {
            return None;
        }

        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 { SwipeDirection::Right } else { SwipeDirection::Left }
        } else if dy > 0.0 {
            SwipeDirection::Down
        } else {
            SwipeDirection::Up
        };
        Some(dir)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_landmarks::Point3;

    /// Index tip at `(x, y, z)`, thumb well clear of it, every other joint
    /// parked at one point.
    fn hand_at(x: f32, y: f32, z: f32) -> LandmarkFrame {
        LandmarkFrame::from_fn(|j| match j {
            Joint::IndexTip => Point3::new(x, y, z),
            Joint::ThumbTip => Point3::new(x - 0.2, y + 0.2, 0.0),
            _               => Point3::new(0.5, 0.8, 0.0),
        })
    }

    /// Thumb at the left edge so the gap is exactly `gap` with no rounding.
    fn pinch_hand(gap: f32) -> LandmarkFrame {
        let mut hand = hand_at(0.5, 0.5, 0.0);
        hand.set(Joint::ThumbTip, Point3::new(0.0, 0.5, 0.0));
        hand.set(Joint::IndexTip, Point3::new(gap, 0.5, 0.0));
        hand
    }

    fn feed_depths(c: &mut GestureClassifier, zs: &[f32]) -> bool {
        let mut last = false;
        for &z in zs {
            last = c.detect_tap(Some(&hand_at(0.5, 0.5, z)));
        }
        last
    }

    fn feed_path(c: &mut GestureClassifier, from: (f32, f32), to: (f32, f32), n: usize) {
        for i in 0..n {
            let t = i as f32 / (n - 1) as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            c.observe(Some(&hand_at(x, y, 0.0)));
        }
    }

    // ── pinch ─────────────────────────────────────────────────────────────
    #[test]
    fn pinch_below_threshold() {
        let c = GestureClassifier::default();
        assert!(c.detect_pinch(Some(&pinch_hand(0.0))));
        assert!(c.detect_pinch(Some(&pinch_hand(0.049))));
    }

    #[test]
    fn pinch_boundary_is_exclusive() {
        let c = GestureClassifier::default();
        assert!(!c.detect_pinch(Some(&pinch_hand(0.05))));
        assert!(!c.detect_pinch(Some(&pinch_hand(0.051))));
    }

    #[test]
    fn pinch_ignores_history() {
        let c = GestureClassifier::default();
        assert!(c.detect_pinch(Some(&pinch_hand(0.01))));
        assert!(c.history().is_empty());
    }

    // ── tap ───────────────────────────────────────────────────────────────
    #[test]
    fn push_then_retract_is_a_tap() {
        let mut c = GestureClassifier::default();
        assert!(feed_depths(&mut c, &[0.0, 0.15, 0.30, 0.15, 0.0]));
    }

    #[test]
    fn shallow_push_stays_under_velocity_threshold() {
        // |Δz| = 0.05 per frame never crosses ±0.1
        let mut c = GestureClassifier::default();
        assert!(!feed_depths(&mut c, &[0.10, 0.05, 0.00, 0.05, 0.10]));
    }

    #[test]
    fn monotonic_depth_is_not_a_tap() {
        let mut c = GestureClassifier::default();
        assert!(!feed_depths(&mut c, &[0.0, 0.15, 0.30, 0.45, 0.60]));
    }

    #[test]
    fn retract_in_first_velocity_is_not_counted() {
        // only retract is the first step, before the push
        let mut c = GestureClassifier::default();
        assert!(!feed_depths(&mut c, &[0.2, 0.0, 0.15, 0.15, 0.15]));
    }

    #[test]
    fn push_after_second_velocity_is_not_counted() {
        let mut c = GestureClassifier::default();
        assert!(!feed_depths(&mut c, &[0.0, 0.0, 0.0, 0.15, 0.0]));
    }

    #[test]
    fn push_and_retract_on_adjacent_steps() {
        let mut c = GestureClassifier::default();
        assert!(feed_depths(&mut c, &[0.0, 0.15, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn tap_needs_five_samples() {
        let mut c = GestureClassifier::default();
        assert!(!feed_depths(&mut c, &[0.0, 0.15, 0.0, -0.15]));
        assert_eq!(c.history().len(), 4);
    }

    #[test]
    fn tap_only_reads_last_five_samples() {
        let mut c = GestureClassifier::default();
        // a tap, followed by enough stillness to push it out of the window
        feed_depths(&mut c, &[0.0, 0.15, 0.30, 0.15, 0.0]);
        assert!(!feed_depths(&mut c, &[0.0, 0.0, 0.0, 0.0]));
    }

    #[test]
    fn no_hand_leaves_history_untouched() {
        let mut c = GestureClassifier::default();
        feed_depths(&mut c, &[0.0, 0.0]);
        assert!(!c.detect_tap(None));
        assert_eq!(c.history().len(), 2);
    }

    // ── swipe ─────────────────────────────────────────────────────────────
    #[test]
    fn swipe_right() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.2, 0.0), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.2, 0.0, 0.0))), Some(SwipeDirection::Right));
    }

    #[test]
    fn swipe_up() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.0, -0.2), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.0, -0.2, 0.0))), Some(SwipeDirection::Up));
    }

    #[test]
    fn swipe_left_and_down() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.5, 0.5), (0.3, 0.55), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.3, 0.55, 0.0))), Some(SwipeDirection::Left));

        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.5, 0.2), (0.45, 0.6), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.45, 0.6, 0.0))), Some(SwipeDirection::Down));
    }

    #[test]
    fn small_displacement_is_not_a_swipe() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.05, 0.05), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.05, 0.05, 0.0))), None);
    }

    #[test]
    fn diagonal_tie_resolves_vertically() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.25, 0.25), 8);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.25, 0.25, 0.0))), Some(SwipeDirection::Down));
    }

    #[test]
    fn swipe_needs_eight_samples() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.5, 0.0), 7);
        assert_eq!(c.detect_swipe(Some(&hand_at(0.5, 0.0, 0.0))), None);
    }

    #[test]
    fn swipe_without_hand_is_none() {
        let mut c = GestureClassifier::default();
        feed_path(&mut c, (0.0, 0.0), (0.2, 0.0), 8);
        assert_eq!(c.detect_swipe(None), None);
    }

    // ── open hand ─────────────────────────────────────────────────────────
    fn hand_with_extended(fingers: usize) -> LandmarkFrame {
        let mut hand = hand_at(0.5, 0.5, 0.0);
        for (i, &(tip, pip)) in FINGER_TIP_PIP.iter().enumerate() {
            hand.set(pip, Point3::new(0.5, 0.6, 0.0));
            let y = if i < fingers { 0.4 } else { 0.7 };
            hand.set(tip, Point3::new(0.5, y, 0.0));
        }
        hand
    }

    #[test]
    fn open_hand_counts_all_four_fingers() {
        let c = GestureClassifier::default();
        assert!(c.is_hand_open(Some(&hand_with_extended(4))));
        assert!(c.is_hand_open(Some(&hand_with_extended(3))));
        assert!(!c.is_hand_open(Some(&hand_with_extended(2))));
    }

    #[test]
    fn index_finger_alone_is_not_an_open_hand() {
        // a one-finger check could never reach three; counting every finger
        // is what makes an open hand reachable at all
        let c = GestureClassifier::default();
        assert!(!c.is_hand_open(Some(&hand_with_extended(1))));
        assert!(!c.is_hand_open(None));
    }

    // ── update ────────────────────────────────────────────────────────────
    #[test]
    fn update_records_once_per_frame() {
        let mut c = GestureClassifier::default();
        for _ in 0..3 { c.update(Some(&hand_at(0.5, 0.5, 0.0))); }
        assert_eq!(c.history().len(), 3);
        c.update(None);
        assert_eq!(c.history().len(), 3);
    }

    #[test]
    fn update_reports_tap_and_open_hand() {
        let mut c = GestureClassifier::default();
        let mut last = Vec::new();
        for z in [0.0, 0.15, 0.30, 0.15, 0.0] {
            let mut hand = hand_with_extended(4);
            let tip = hand[Joint::IndexTip];
            hand.set(Joint::IndexTip, Point3::new(tip.x, tip.y, z));
            last = c.update(Some(&hand));
        }
        assert_eq!(last, vec![Gesture::Tap, Gesture::OpenHand]);
    }

    #[test]
    fn custom_history_capacity_is_honoured() {
        let mut c = GestureClassifier::new(GestureConfig { history_capacity: 8, ..Default::default() });
        for i in 0..15 { c.observe(Some(&hand_at(i as f32 * 0.01, 0.5, 0.0))); }
        assert_eq!(c.history().len(), 8);
        assert!((c.history().oldest().unwrap().x - 0.07).abs() < 1e-6);
    }
}
