//! Top-level application state.
//!
//! [`Session`] is the per-run context: one gesture classifier and one input
//! arbiter fed the same frames.  [`AppState`] wraps a session with the key
//! sink and the status line, and [`run`] drives it from the preview window.

use std::sync::mpsc::{self, TryRecvError};
use std::time::Instant;

use hand_gestures::{Gesture, GestureClassifier, GestureConfig};
use hand_landmarks::LandmarkFrame;
use key_layout::KeyboardLayout;
use tracing::{debug, info};

use crate::arbiter::{ArbiterConfig, InputArbiter, KeyPress};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::sink::{open_key_sink, KeySink};
use crate::source::{spawn_landmark_source, SimInput, SimLandmarkSource};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

/// What one frame produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutcome {
    pub gestures: Vec<Gesture>,
    pub press:    Option<KeyPress>,
}

pub struct Session {
    classifier:   GestureClassifier,
    arbiter:      InputArbiter,
    frame_width:  u32,
    frame_height: u32,
    /// The tracked hand from the latest frame.
    hand:         Option<LandmarkFrame>,
}

impl Session {
    pub fn new(
        layout:       &'static KeyboardLayout,
        gestures:     GestureConfig,
        arbiter:      ArbiterConfig,
        frame_width:  u32,
        frame_height: u32,
    ) -> Self {
        Session {
            classifier: GestureClassifier::new(gestures),
            arbiter:    InputArbiter::new(layout, arbiter),
            frame_width,
            frame_height,
            hand:       None,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Session::new(
            cfg.layout(),
            cfg.gesture_config(),
            cfg.arbiter_config(),
            cfg.frame_width,
            cfg.frame_height,
        )
    }

    /// Process one camera frame.  Only the first hand is tracked.
    pub fn step(
        &mut self,
        hands: &[LandmarkFrame],
        now:   Instant,
        sink:  &mut dyn KeySink,
    ) -> FrameOutcome {
        self.hand = hands.first().copied();
        let hand = self.hand.as_ref();

        let gestures = self.classifier.update(hand);
        let press = self.arbiter.process_frame(hand, self.frame_width, self.frame_height, now, sink);

        FrameOutcome { gestures, press }
    }

    pub fn tick(&mut self, now: Instant) {
        self.arbiter.tick(now);
    }

    pub fn arbiter(&self)      -> &InputArbiter         { &self.arbiter }
    pub fn classifier(&self)   -> &GestureClassifier    { &self.classifier }
    pub fn hand(&self)         -> Option<&LandmarkFrame> { self.hand.as_ref() }
    pub fn frame_size(&self)   -> (u32, u32)            { (self.frame_width, self.frame_height) }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    session:       Session,
    sink:          Box<dyn KeySink>,
    last_gestures: Vec<Gesture>,
    pub status:    String,
}

impl AppState {
    pub fn new(cfg: &AppConfig, sink: Box<dyn KeySink>) -> Self {
        let session = Session::from_config(cfg);
        let status = format!("Ready. Layout: {}  (hover a key, pinch to type)",
                             session.arbiter().layout().name);
        AppState {
            session,
            sink,
            last_gestures: Vec::new(),
            status,
        }
    }

    // ── process one frame ─────────────────────────────────────────────────

    pub fn handle_frame(&mut self, hands: &[LandmarkFrame], now: Instant) -> FrameOutcome {
        let outcome = self.session.step(hands, now, self.sink.as_mut());

        if outcome.gestures != self.last_gestures {
            debug!(gestures = ?outcome.gestures, "gestures changed");
            self.last_gestures = outcome.gestures.clone();
        }

        if let Some(press) = outcome.press {
            self.status = match press.command {
                Some(cmd) => format!("KEY {}  -> {}", press.key, cmd),
                None      => format!("KEY {}", press.key),
            };
        } else if hands.is_empty() {
            self.status = "No hand in view".to_string();
        } else if !outcome.gestures.is_empty() {
            let names: Vec<String> = outcome.gestures.iter().map(|g| g.to_string()).collect();
            self.status = format!("Gestures: {}", names.join(" "));
        }

        outcome
    }

    // ── per-frame tick ────────────────────────────────────────────────────

    pub fn tick(&mut self, now: Instant) {
        self.session.tick(now);
    }

    // ── accessors for the render loop ─────────────────────────────────────

    pub fn session(&self)       -> &Session      { &self.session }
    pub fn arbiter(&self)       -> &InputArbiter { self.session.arbiter() }
    pub fn last_gestures(&self) -> &[Gesture]    { &self.last_gestures }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// Creates the preview window, the simulated landmark source and the key
/// sink, then drives the frame/render loop at ~60 fps until the window closes
/// or the source hangs up.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim landmark channel ──────────────────────────────────────────────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let landmark_rx = spawn_landmark_source(SimLandmarkSource { rx: sim_rx });

    // ── Visualizer (owns the window and the sim input sender) ─────────────
    let mut vis = Visualizer::new(sim_tx, cfg.frame_width, cfg.frame_height)?;

    // ── App state ─────────────────────────────────────────────────────────
    let mut app = AppState::new(&cfg, open_key_sink(cfg.inject));
    info!(layout = app.arbiter().layout().name, inject = cfg.inject, "session started");

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        if !vis.poll_input() { break; }

        loop {
            match landmark_rx.try_recv() {
                Ok(hands) => { app.handle_frame(&hands, Instant::now()); }
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => {
                    info!(typed = app.arbiter().typed_text().len(), "landmark source closed");
                    return Ok(());
                }
            }
        }

        let now = Instant::now();
        app.tick(now);
        vis.render(&app, now)?;
    }

    info!(typed = app.arbiter().typed_text().len(), "window closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
