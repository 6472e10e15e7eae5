//! Software-rendered preview window using `minifb`.
//!
//! Layout (800×600 frame):
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │ typed text█                                      │   │
//! │   └──────────────────────────────────────────────────┘   │
//! │   [Q][W][E][R][T][Y][U][I][O][P]                         │
//! │     [A][S][D][F][G][H][J][K][L]        ◯ ← fingertip     │
//! │       [Z][X][C][V][B][N][M]                              │
//! │         [      SPACE      ]  [BACKSPACE]  [ENTER]        │
//! │  status bar                                              │
//! │  legend                                                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use hand_gestures::Gesture;
use hand_landmarks::{Joint, Rect};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::app::AppState;
use crate::error::AppError;
use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const TEXT_BOX:       Rect = Rect::new(50, 20, 750, 70);
const TEXT_SCALE:     i32  = 3;
const KEY_SCALE:      i32  = 2;
const CURSOR_PERIOD:  u128 = 500;   // ms per blink phase
const FINGERTIP_R:    i32  = 10;

const BG_COLOR:       u32  = 0xFF1A1A2E;
const TEXT_BG:        u32  = 0xFF0F3460;
const KEY_COLOR:      u32  = 0xFF3C3C50;
const HOVER_COLOR:    u32  = 0xFF4682B4;   // steel blue
const PRESS_COLOR:    u32  = 0xFF32CD32;   // lime
const BORDER_COLOR:   u32  = 0xFFB4B4C8;
const LABEL_COLOR:    u32  = 0xFFF0F0F0;
const TIP_COLOR:      u32  = 0xFFFFD700;   // gold
const PINCH_COLOR:    u32  = 0xFFFF6347;   // tomato
const JOINT_COLOR:    u32  = 0xFF00C8C8;

// ════════════════════════════════════════════════════════════════════════════
// Canvas — the framebuffer and its drawing primitives
// ════════════════════════════════════════════════════════════════════════════

/// An ARGB framebuffer.  Everything drawn outside it is clipped.
pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![BG_COLOR; width * height] }
    }

    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 { return None; }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    pub fn fill_rect(&mut self, r: &Rect, color: u32) {
        let x1 = r.x1.max(0);
        let y1 = r.y1.max(0);
        let x2 = r.x2.min(self.width as i32 - 1);
        let y2 = r.y2.min(self.height as i32 - 1);
        for y in y1..=y2 {
            for x in x1..=x2 {
                self.buf[y as usize * self.width + x as usize] = color;
            }
        }
    }

    pub fn draw_border(&mut self, r: &Rect, color: u32) {
        for x in r.x1..=r.x2 {
            self.set_pixel(x, r.y1, color);
            self.set_pixel(x, r.y2, color);
        }
        for y in r.y1..=r.y2 {
            self.set_pixel(r.x1, y, color);
            self.set_pixel(r.x2, y, color);
        }
    }

    /// Ring of radius `r`, two pixels thick.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        let (outer, inner) = (r * r, (r - 2).max(0).pow(2));
        for dy in -r..=r {
            for dx in -r..=r {
                let d = dx * dx + dy * dy;
                if d <= outer && d >= inner {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` in the 3×5 bitmap font, each font pixel `scale` wide.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        let px = cx + col * scale;
                        let py = y + row as i32 * scale;
                        self.fill_rect(&Rect::new(px, py, px + scale - 1, py + scale - 1), color);
                    }
                }
            }
            cx += text_advance(scale);
            if cx >= self.width as i32 { break; }
        }
    }
}

/// Horizontal pixels per character at `scale`.
fn text_advance(scale: i32) -> i32 { 4 * scale }

fn text_width(text: &str, scale: i32) -> i32 {
    (text.chars().count() as i32 * text_advance(scale) - scale).max(0)
}

// ════════════════════════════════════════════════════════════════════════════
// FrameRate
// ════════════════════════════════════════════════════════════════════════════

/// Rendered frames per second, refreshed once a second.
#[derive(Clone, Debug)]
pub struct FrameRate {
    since:  Instant,
    frames: u32,
    fps:    f32,
}

impl FrameRate {
    pub fn new(now: Instant) -> Self {
        FrameRate { since: now, frames: 0, fps: 0.0 }
    }

    /// Count one frame at `now` and return the latest rate.
    pub fn tick(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.since);
        if elapsed >= Duration::from_secs(1) {
            self.fps    = self.frames as f32 / elapsed.as_secs_f32();
            self.frames = 0;
            self.since  = now;
        }
        self.fps
    }

    pub fn fps(&self) -> f32 { self.fps }
}

fn fps_label(fps: f32) -> String {
    format!("FPS {:.0}", fps)
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    canvas:  Canvas,
    sim_tx:  Sender<SimInput>,
    started: Instant,
    rate:    FrameRate,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, width: u32, height: u32) -> Result<Self, AppError> {
        let (w, h) = (width as usize, height as usize);
        let mut window = Window::new(
            "Air Keyboard - hover and pinch to type",
            w, h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        let started = Instant::now();
        Ok(Visualizer {
            window,
            canvas:  Canvas::new(w, h),
            sim_tx,
            started,
            rate:    FrameRate::new(started),
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll mouse and keyboard and forward them as [`SimInput`] events.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            let _ = self.sim_tx.send(SimInput::Quit);
            return false;
        }
        let tap = one_shot(Key::T);

        let pinching = self.window.is_key_down(Key::Space)
                    || self.window.get_mouse_down(MouseButton::Left);

        let input = match self.window.get_mouse_pos(MouseMode::Discard) {
            Some((mx, my)) => SimInput::Pointer {
                x: mx / self.canvas.width as f32,
                y: my / self.canvas.height as f32,
                pinching,
            },
            None => SimInput::PointerLost,
        };
        let _ = self.sim_tx.send(input);
        if tap {
            let _ = self.sim_tx.send(SimInput::Tap);
        }

        true
    }

    /// Render one frame.
    pub fn render(&mut self, app: &AppState, now: Instant) -> Result<(), AppError> {
        let blink_on = (now.saturating_duration_since(self.started).as_millis() / CURSOR_PERIOD) % 2 == 0;
        let fps = self.rate.tick(now);
        draw_scene(&mut self.canvas, app, now, blink_on, fps);
        self.window.update_with_buffer(self.canvas.pixels(), self.canvas.width, self.canvas.height)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scene
// ════════════════════════════════════════════════════════════════════════════

/// Paint the whole frame for `app` at `now`.
pub fn draw_scene(canvas: &mut Canvas, app: &AppState, now: Instant, cursor_on: bool, fps: f32) {
    canvas.clear(BG_COLOR);

    draw_text_box(canvas, app.arbiter().display_text(), cursor_on);
    draw_keys(canvas, app, now);
    draw_hand(canvas, app);

    let (w, h) = (canvas.width as i32, canvas.height as i32);

    // ── Frame rate, top right ─────────────────────────────────────────────
    let label = fps_label(fps);
    canvas.draw_text(&label, w - text_width(&label, 2) - 8, 4, 2, 0xFF888888);

    // ── Status bar ────────────────────────────────────────────────────────
    canvas.fill_rect(&Rect::new(0, h - 44, w - 1, h - 22), TEXT_BG);
    canvas.draw_text(&app.status, 10, h - 38, 2, LABEL_COLOR);

    // ── Key legend ────────────────────────────────────────────────────────
    canvas.draw_text(
        "MOUSE=POINT  SPACE/CLICK=PINCH  T=TAP  Q/ESC=QUIT",
        10, h - 14, 2, 0xFF888888,
    );
}

fn draw_text_box(canvas: &mut Canvas, text: &str, cursor_on: bool) {
    canvas.fill_rect(&TEXT_BOX, TEXT_BG);
    canvas.draw_border(&TEXT_BOX, BORDER_COLOR);

    let line_h = 6 * TEXT_SCALE;
    let max_lines = ((TEXT_BOX.height() - 8) / line_h).max(1) as usize;
    let lines: Vec<&str> = text.split('\n').collect();
    let shown = &lines[lines.len().saturating_sub(max_lines)..];

    let x = TEXT_BOX.x1 + 8;
    let mut y = TEXT_BOX.y1 + 6;
    for line in shown {
        canvas.draw_text(line, x, y, TEXT_SCALE, LABEL_COLOR);
        y += line_h;
    }

    if cursor_on {
        let last = shown.last().copied().unwrap_or("");
        let cx = x + text_width(last, TEXT_SCALE) + TEXT_SCALE;
        let cy = y - line_h;
        canvas.fill_rect(&Rect::new(cx, cy, cx + TEXT_SCALE, cy + 5 * TEXT_SCALE - 1), LABEL_COLOR);
    }
}

fn draw_keys(canvas: &mut Canvas, app: &AppState, now: Instant) {
    let arbiter = app.arbiter();
    let hovered = arbiter.hovered_key();
    let pressed = arbiter.pressed_key(now);

    for (label, rect) in arbiter.layout().keys() {
        let fill = if pressed == Some(label) {
            PRESS_COLOR
        } else if hovered == Some(label) {
            HOVER_COLOR
        } else {
            KEY_COLOR
        };
        canvas.fill_rect(&rect, fill);
        canvas.draw_border(&rect, BORDER_COLOR);

        let (cx, cy) = rect.center();
        let tx = cx - text_width(label, KEY_SCALE) / 2;
        let ty = cy - 5 * KEY_SCALE / 2;
        canvas.draw_text(label, tx, ty, KEY_SCALE, LABEL_COLOR);
    }
}

fn draw_hand(canvas: &mut Canvas, app: &AppState) {
    let session = app.session();
    let Some(hand) = session.hand() else { return };
    let (w, h) = session.frame_size();

    for joint in Joint::ALL {
        let (x, y) = hand.to_pixels(joint, w, h);
        canvas.fill_rect(&Rect::new(x - 1, y - 1, x + 1, y + 1), JOINT_COLOR);
    }

    let (tx, ty) = hand.to_pixels(Joint::IndexTip, w, h);
    let color = if app.last_gestures().contains(&Gesture::Pinch) { PINCH_COLOR } else { TIP_COLOR };
    canvas.draw_circle(tx, ty, FINGERTIP_R, color);
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ';' => [0b000, 0b010, 0b000, 0b010, 0b100],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::sink::NullSink;
    use crate::source::synthetic_hand;
    use key_layout::QWERTY;

    fn key_rect(label: &str) -> Rect {
        QWERTY.keys().find(|(l, _)| *l == label).map(|(_, r)| r).expect("key on layout")
    }

    #[test]
    fn drawing_is_clipped() {
        let mut c = Canvas::new(10, 10);
        c.fill_rect(&Rect::new(-5, -5, 20, 20), 0xFF123456);
        c.draw_circle(0, 0, 30, 0xFF000000);
        c.set_pixel(-1, 3, 0xFF000000);
        assert_eq!(c.pixel(9, 9), Some(0xFF123456));
        assert_eq!(c.pixel(10, 0), None);
    }

    #[test]
    fn text_uses_the_glyph_table() {
        let mut c = Canvas::new(20, 10);
        c.draw_text("I", 0, 0, 1, 0xFFFFFFFF);
        // top bar of I
        assert_eq!(c.pixel(0, 0), Some(0xFFFFFFFF));
        assert_eq!(c.pixel(2, 0), Some(0xFFFFFFFF));
        // stem only in the middle column
        assert_eq!(c.pixel(0, 2), Some(BG_COLOR));
        assert_eq!(c.pixel(1, 2), Some(0xFFFFFFFF));
    }

    #[test]
    fn lower_case_shares_upper_case_glyphs() {
        assert_eq!(char_glyph('q'), char_glyph('Q'));
        assert_ne!(char_glyph('Q'), char_glyph('?'));
    }

    #[test]
    fn text_width_counts_gaps() {
        assert_eq!(text_width("", 2), 0);
        assert_eq!(text_width("A", 2), 6);
        assert_eq!(text_width("AB", 2), 14);
    }

    #[test]
    fn hovered_and_pressed_keys_change_colour() {
        let mut app = AppState::new(&AppConfig::default(), Box::new(NullSink));
        let mut canvas = Canvas::new(800, 600);
        let t0 = Instant::now();

        let g = key_rect("G");
        let (gx, gy) = g.center();
        app.handle_frame(&[synthetic_hand(gx as f32 / 800.0, gy as f32 / 600.0, 0.0, false)], t0);
        draw_scene(&mut canvas, &app, t0, false, 60.0);
        assert_eq!(canvas.pixel(g.x1 + 2, g.y1 + 2), Some(HOVER_COLOR));
        assert_eq!(canvas.pixel(key_rect("Q").x1 + 2, key_rect("Q").y1 + 2), Some(KEY_COLOR));

        app.handle_frame(&[synthetic_hand(gx as f32 / 800.0, gy as f32 / 600.0, 0.0, true)], t0);
        draw_scene(&mut canvas, &app, t0, false, 60.0);
        assert_eq!(canvas.pixel(g.x1 + 2, g.y1 + 2), Some(PRESS_COLOR));

        draw_scene(&mut canvas, &app, t0 + Duration::from_millis(300), false, 60.0);
        assert_eq!(canvas.pixel(g.x1 + 2, g.y1 + 2), Some(HOVER_COLOR));
    }

    #[test]
    fn text_box_is_painted() {
        let app = AppState::new(&AppConfig::default(), Box::new(NullSink));
        let mut canvas = Canvas::new(800, 600);
        draw_scene(&mut canvas, &app, Instant::now(), true, 60.0);
        assert_eq!(canvas.pixel(TEXT_BOX.x1, TEXT_BOX.y1), Some(BORDER_COLOR));
        assert_eq!(canvas.pixel(TEXT_BOX.x2 - 4, TEXT_BOX.y2 - 4), Some(TEXT_BG));
    }

    #[test]
    fn frame_rate_updates_once_a_second() {
        let t0 = Instant::now();
        let mut rate = FrameRate::new(t0);
        for i in 1..10 {
            assert_eq!(rate.tick(t0 + Duration::from_millis(i * 100)), 0.0);
        }
        let fps = rate.tick(t0 + Duration::from_millis(1000));
        assert!((fps - 10.0).abs() < 1e-3);
        // holds until the next full second
        assert_eq!(rate.tick(t0 + Duration::from_millis(1100)), fps);
        assert_eq!(rate.fps(), fps);
    }

    #[test]
    fn frame_rate_is_drawn_top_right() {
        assert_eq!(fps_label(59.6), "FPS 60");
        let app = AppState::new(&AppConfig::default(), Box::new(NullSink));
        let mut canvas = Canvas::new(800, 600);
        draw_scene(&mut canvas, &app, Instant::now(), false, 60.0);
        let x0 = 800 - text_width("FPS 60", 2) - 8;
        let lit = (x0..792).any(|x| (4..14).any(|y| canvas.pixel(x, y) == Some(0xFF888888)));
        assert!(lit);
    }
}
