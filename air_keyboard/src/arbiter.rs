//! Input arbiter: hover + pinch + cooldown → one key press.
//!
//! Each frame the arbiter hit-tests the index fingertip against the layout.
//! While a key is hovered, a tight thumb-to-index pinch activates it, but only
//! if the previous activation is older than the cooldown.  Activations that
//! arrive inside the cooldown are dropped, never queued, so a held pinch
//! repeats at most once per cooldown period.
//!
//! ```text
//!   Idle ──(hover ∧ pinch < 0.04 ∧ cooldown elapsed)──▶ Activated{key, at}
//!    ▲                                                        │
//!    └──────────────────(press animation window over)─────────┘
//! ```

use std::time::{Duration, Instant};

use hand_landmarks::{distance_3d, Joint, LandmarkFrame};
use key_layout::KeyboardLayout;
use tracing::{debug, info, warn};

use crate::sink::{KeyCommand, KeySink};

// ════════════════════════════════════════════════════════════════════════════
// ArbiterConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct ArbiterConfig {
    /// Thumb-to-index distance (normalised) that activates the hovered key.
    /// Deliberately tighter than the ambient pinch gesture.
    pub activation_pinch: f32,
    /// Minimum gap between two accepted activations.
    pub cooldown:         Duration,
    /// How long a pressed key is reported for feedback.
    pub press_animation:  Duration,
    /// Characters of typed text shown by [`InputArbiter::display_text`].
    pub display_text_len: usize,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        ArbiterConfig {
            activation_pinch: 0.04,
            cooldown:         Duration::from_millis(500),
            press_animation:  Duration::from_millis(200),
            display_text_len: 50,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Phase / press events
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Idle,
    Activated { key: &'static str, at: Instant },
}

/// An accepted activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key:     &'static str,
    /// What was sent to the key sink, if the key has an OS equivalent.
    pub command: Option<KeyCommand>,
    pub at:      Instant,
}

// ════════════════════════════════════════════════════════════════════════════
// InputArbiter
// ════════════════════════════════════════════════════════════════════════════

pub struct InputArbiter {
    layout:          &'static KeyboardLayout,
    config:          ArbiterConfig,
    hovered:         Option<&'static str>,
    pressed:         Option<(&'static str, Instant)>,
    last_activation: Option<Instant>,
    text:            String,
}

impl InputArbiter {
    pub fn new(layout: &'static KeyboardLayout, config: ArbiterConfig) -> Self {
        InputArbiter {
            layout,
            config,
            hovered:         None,
            pressed:         None,
            last_activation: None,
            text:            String::new(),
        }
    }

    // ── per-frame entry point ─────────────────────────────────────────────

    /// Run one frame.  `hand` is the tracked hand, `None` when no hand was
    /// detected.  Returns the press accepted this frame, if any.
    pub fn process_frame(
        &mut self,
        hand:         Option<&LandmarkFrame>,
        frame_width:  u32,
        frame_height: u32,
        now:          Instant,
        sink:         &mut dyn KeySink,
    ) -> Option<KeyPress> {
        self.tick(now);

        let hovered = hand.and_then(|h| {
            let (x, y) = h.to_pixels(Joint::IndexTip, frame_width, frame_height);
            self.layout.key_at(x, y)
        });
        if hovered != self.hovered {
            debug!(from = ?self.hovered, to = ?hovered, "hover changed");
        }
        self.hovered = hovered;

        let (hand, key) = (hand?, hovered?);
        if !self.is_activation_pinch(hand) || !self.cooldown_elapsed(now) {
            return None;
        }

        self.last_activation = Some(now);
        let command = self.process_key(key, sink);
        self.pressed = Some((key, now));
        info!(key, text_len = self.text.len(), "key pressed");

        Some(KeyPress { key, command, at: now })
    }

    /// Apply one key to the text buffer and forward its command to `sink`.
    pub fn process_key(&mut self, key: &str, sink: &mut dyn KeySink) -> Option<KeyCommand> {
        let command = match key {
            "SPACE" => {
                self.text.push(' ');
                Some(KeyCommand::Space)
            }
            "BACKSPACE" => {
                self.text.pop();
                Some(KeyCommand::Backspace)
            }
            "ENTER" => {
                self.text.push('\n');
                Some(KeyCommand::Enter)
            }
            "CLEAR" => {
                self.text.clear();
                None
            }
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        let c = c.to_ascii_lowercase();
                        self.text.push(c);
                        Some(KeyCommand::Char(c))
                    }
                    _ => {
                        warn!(key = other, "no action bound to key");
                        None
                    }
                }
            }
        };

        if let Some(cmd) = command {
            sink.send(cmd);
        }
        command
    }

    /// Return to idle once the press animation window has passed.
    pub fn tick(&mut self, now: Instant) {
        if let Some((_, at)) = self.pressed {
            if now.saturating_duration_since(at) >= self.config.press_animation {
                self.pressed = None;
            }
        }
    }

    fn is_activation_pinch(&self, hand: &LandmarkFrame) -> bool {
        distance_3d(hand[Joint::ThumbTip], hand[Joint::IndexTip]) < self.config.activation_pinch
    }

    fn cooldown_elapsed(&self, now: Instant) -> bool {
        match self.last_activation {
            None       => true,
            Some(last) => now.saturating_duration_since(last) > self.config.cooldown,
        }
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn layout(&self)          -> &'static KeyboardLayout { self.layout }
    pub fn config(&self)          -> &ArbiterConfig          { &self.config }
    pub fn hovered_key(&self)     -> Option<&'static str>    { self.hovered }
    pub fn last_activation(&self) -> Option<Instant>         { self.last_activation }
    pub fn typed_text(&self)      -> &str                    { &self.text }

    /// The pressed key, only while its animation window is open.
    pub fn pressed_key(&self, now: Instant) -> Option<&'static str> {
        match self.phase(now) {
            KeyPhase::Activated { key, .. } => Some(key),
            KeyPhase::Idle                  => None,
        }
    }

    pub fn press_time(&self) -> Option<Instant> {
        self.pressed.map(|(_, at)| at)
    }

    pub fn phase(&self, now: Instant) -> KeyPhase {
        match self.pressed {
            Some((key, at)) if now.saturating_duration_since(at) < self.config.press_animation => {
                KeyPhase::Activated { key, at }
            }
            _ => KeyPhase::Idle,
        }
    }

    /// The tail of the typed text that fits the display box.
    pub fn display_text(&self) -> &str {
        let max   = self.config.display_text_len;
        let count = self.text.chars().count();
        if count <= max {
            return &self.text;
        }
        let start = self.text
            .char_indices()
            .nth(count - max)
            .map_or(self.text.len(), |(i, _)| i);
        &self.text[start..]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
