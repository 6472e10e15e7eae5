//! # key_layout
//!
//! The three built-in on-screen keyboards and the pixel geometry they are
//! drawn and hit-tested with.
//!
//! Layouts are immutable static tables.  Geometry is never stored: every
//! rectangle is recomputed from the fixed constants below, so the renderer and
//! the hit test can't disagree about where a key is.
//!
//! ```text
//!   x = 50                                                    y = 100
//!   [Q ][W ][E ][R ][T ][Y ][U ][I ][O ][P ]                  row 0
//!      [A ][S ][D ][F ][G ][H ][J ][K ][L ]                   row 1  (+¼ key)
//!         [Z ][X ][C ][V ][B ][N ][M ]                        row 2  (+½ key)
//!           [     SPACE     ]     [BACKSP]  [EN]              special row
//! ```
//!
//! ```rust
//! use key_layout::KeyboardLayout;
//!
//! let qwerty = KeyboardLayout::by_name("QWERTY");
//! assert_eq!(qwerty.key_at(80, 130), Some("Q"));
//! assert_eq!(qwerty.key_at(300, 340), Some("SPACE"));
//! assert_eq!(qwerty.key_at(5, 5), None);
//! ```

use hand_landmarks::Rect;
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// Geometry constants (frame pixels)
// ════════════════════════════════════════════════════════════════════════════

pub const KEY_WIDTH:  i32 = 60;
pub const KEY_HEIGHT: i32 = 60;
pub const KEY_MARGIN: i32 = 10;
pub const ORIGIN_X:   i32 = 50;
pub const ORIGIN_Y:   i32 = 100;

/// Row index of the special-key row, beneath the three letter rows.
pub const SPECIAL_ROW: i32 = 3;

/// Special-key slots as `(start column, width in pixels)`.
///
/// Slot widths are fixed; they do not follow the label text.
const SPECIAL_SLOTS: [(i32, i32); 3] = [
    (2,  4 * KEY_WIDTH + 3 * KEY_MARGIN),  // SPACE-sized
    (7,  2 * KEY_WIDTH),                    // BACKSPACE-sized
    (10, KEY_WIDTH),                        // ENTER-sized
];

/// Pixel pitch of one key cell (key plus margin).
const fn pitch(extent: i32) -> i32 { extent + KEY_MARGIN }

/// Horizontal stagger of a letter row.
fn row_offset(row: usize) -> i32 {
    match row {
        1 => KEY_WIDTH / 4,
        2 => KEY_WIDTH / 2,
        _ => 0,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LayoutKind
// ════════════════════════════════════════════════════════════════════════════

/// Which built-in layout to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    #[default]
    Qwerty,
    Dvorak,
    Numeric,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 3] = [LayoutKind::Qwerty, LayoutKind::Dvorak, LayoutKind::Numeric];

    /// Map a layout name to a kind, ignoring ASCII case.
    ///
    /// Unknown names fall back to [`LayoutKind::Qwerty`].
    pub fn from_name(name: &str) -> LayoutKind {
        if name.eq_ignore_ascii_case("qwerty") {
            LayoutKind::Qwerty
        } else if name.eq_ignore_ascii_case("dvorak") {
            LayoutKind::Dvorak
        } else if name.eq_ignore_ascii_case("numeric") {
            LayoutKind::Numeric
        } else {
            debug!(requested = name, "unknown keyboard layout, using QWERTY");
            LayoutKind::Qwerty
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Qwerty  => "qwerty",
            LayoutKind::Dvorak  => "dvorak",
            LayoutKind::Numeric => "numeric",
        }
    }

    pub fn layout(&self) -> &'static KeyboardLayout {
        match self {
            LayoutKind::Qwerty  => &QWERTY,
            LayoutKind::Dvorak  => &DVORAK,
            LayoutKind::Numeric => &NUMERIC,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyboardLayout
// ════════════════════════════════════════════════════════════════════════════

/// A static keyboard: letter rows plus a row of special keys.
#[derive(Debug, PartialEq, Eq)]
pub struct KeyboardLayout {
    pub name:         &'static str,
    pub rows:         &'static [&'static [&'static str]],
    pub special_keys: &'static [&'static str],
}

pub static QWERTY: KeyboardLayout = KeyboardLayout {
    name: "QWERTY",
    rows: &[
        &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P"],
        &["A", "S", "D", "F", "G", "H", "J", "K", "L"],
        &["Z", "X", "C", "V", "B", "N", "M"],
    ],
    special_keys: &["SPACE", "BACKSPACE", "ENTER"],
};

pub static DVORAK: KeyboardLayout = KeyboardLayout {
    name: "DVORAK",
    rows: &[
        &["'", ",", ".", "P", "Y", "F", "G", "C", "R", "L"],
        &["A", "O", "E", "U", "I", "D", "H", "T", "N", "S"],
        &[";", "Q", "J", "K", "X", "B", "M", "W", "V", "Z"],
    ],
    special_keys: &["SPACE", "BACKSPACE", "ENTER"],
};

/// Keypad.  Its fourth row shares the special-key row; where the two overlap
/// the regular key wins the hit test.
pub static NUMERIC: KeyboardLayout = KeyboardLayout {
    name: "NUMERIC",
    rows: &[
        &["1", "2", "3"],
        &["4", "5", "6"],
        &["7", "8", "9"],
        &["0", ".", "+"],
    ],
    special_keys: &["ENTER", "BACKSPACE", "CLEAR"],
};

impl KeyboardLayout {
    /// Look up a built-in layout by name; see [`LayoutKind::from_name`].
    pub fn by_name(name: &str) -> &'static KeyboardLayout {
        LayoutKind::from_name(name).layout()
    }

    /// Rectangle of the regular key at `(row, col)`.
    pub fn key_rect(&self, row: usize, col: usize) -> Rect {
        let x = ORIGIN_X + col as i32 * pitch(KEY_WIDTH) + row_offset(row);
        let y = ORIGIN_Y + row as i32 * pitch(KEY_HEIGHT);
        Rect::new(x, y, x + KEY_WIDTH, y + KEY_HEIGHT)
    }

    /// Rectangle of the special key in slot `index`, or `None` past the
    /// last slot.
    pub fn special_key_rect(&self, index: usize) -> Option<Rect> {
        let &(col, width) = SPECIAL_SLOTS.get(index)?;
        let x = ORIGIN_X + col * pitch(KEY_WIDTH);
        let y = ORIGIN_Y + SPECIAL_ROW * pitch(KEY_HEIGHT);
        Some(Rect::new(x, y, x + width, y + KEY_HEIGHT))
    }

    /// Every drawable key with its rectangle, in hit-test order: regular
    /// keys row by row, then special keys.
    pub fn keys(&self) -> impl Iterator<Item = (&'static str, Rect)> + '_ {
        let regular = self.rows.iter().enumerate().flat_map(move |(r, row)| {
            row.iter().enumerate().map(move |(c, &label)| (label, self.key_rect(r, c)))
        });
        let special = self.special_keys.iter().enumerate().filter_map(move |(i, &label)| {
            self.special_key_rect(i).map(|rect| (label, rect))
        });
        regular.chain(special)
    }

    /// The key under pixel `(x, y)`.  First match in [`keys`](Self::keys)
    /// order wins.
    pub fn key_at(&self, x: i32, y: i32) -> Option<&'static str> {
        self.keys().find(|(_, rect)| rect.contains(x, y)).map(|(label, _)| label)
    }

    /// Whether `label` names a key on this layout.
    pub fn has_key(&self, label: &str) -> bool {
        self.rows.iter().any(|row| row.contains(&label)) || self.special_keys.contains(&label)
    }

    pub fn is_special(&self, label: &str) -> bool {
        self.special_keys.contains(&label)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ── layout selection ──────────────────────────────────────────────────
    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(LayoutKind::from_name("DVORAK"),  LayoutKind::Dvorak);
        assert_eq!(LayoutKind::from_name("Numeric"), LayoutKind::Numeric);
        assert_eq!(LayoutKind::from_name("qwerty"),  LayoutKind::Qwerty);
    }

    #[test]
    fn unknown_name_falls_back_to_qwerty() {
        assert_eq!(LayoutKind::from_name("colemak"), LayoutKind::Qwerty);
        assert_eq!(LayoutKind::from_name(""),        LayoutKind::Qwerty);
        assert_eq!(KeyboardLayout::by_name("azerty").name, "QWERTY");
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in LayoutKind::ALL {
            assert_eq!(LayoutKind::from_name(kind.as_str()), kind);
        }
    }

    // ── key rectangles ────────────────────────────────────────────────────
    #[test]
    fn first_key_sits_at_origin() {
        assert_eq!(QWERTY.key_rect(0, 0), Rect::new(50, 100, 110, 160));
        assert_eq!(QWERTY.key_rect(0, 1), Rect::new(120, 100, 180, 160));
    }

    #[test]
    fn rows_are_staggered() {
        // ¼ and ½ of a 60 px key
        assert_eq!(QWERTY.key_rect(1, 0).x1, 65);
        assert_eq!(QWERTY.key_rect(2, 0).x1, 80);
        assert_eq!(QWERTY.key_rect(2, 0).y1, 240);
        // rows past the third are not shifted
        assert_eq!(NUMERIC.key_rect(3, 0), Rect::new(50, 310, 110, 370));
    }

    #[test]
    fn special_slots_use_fixed_columns() {
        assert_eq!(QWERTY.special_key_rect(0), Some(Rect::new(190, 310, 460, 370)));
        assert_eq!(QWERTY.special_key_rect(1), Some(Rect::new(540, 310, 660, 370)));
        assert_eq!(QWERTY.special_key_rect(2), Some(Rect::new(750, 310, 810, 370)));
        assert_eq!(QWERTY.special_key_rect(3), None);
    }

    // ── hit testing ───────────────────────────────────────────────────────
    #[test]
    fn hit_inside_first_key() {
        let r = QWERTY.key_rect(0, 0);
        let (cx, cy) = r.center();
        assert_eq!(QWERTY.key_at(cx, cy), Some("Q"));
        assert_eq!(QWERTY.key_at(r.x1, r.y1), Some("Q"));
    }

    #[test]
    fn miss_outside_every_key() {
        assert_eq!(QWERTY.key_at(0, 0), None);
        // gap between Q and W
        assert_eq!(QWERTY.key_at(115, 130), None);
        // below the special row
        assert_eq!(QWERTY.key_at(300, 400), None);
    }

    #[test]
    fn special_keys_are_hit_after_regular_rows() {
        assert_eq!(QWERTY.key_at(300, 340), Some("SPACE"));
        assert_eq!(QWERTY.key_at(600, 340), Some("BACKSPACE"));
        assert_eq!(QWERTY.key_at(780, 340), Some("ENTER"));
        assert_eq!(DVORAK.key_at(300, 340), Some("SPACE"));
    }

    #[test]
    fn regular_key_wins_an_overlap() {
        // NUMERIC "+" (row 3, col 2) covers the left end of slot 0
        assert_eq!(NUMERIC.key_at(200, 340), Some("+"));
        assert_eq!(NUMERIC.key_at(300, 340), Some("ENTER"));
        assert_eq!(NUMERIC.key_at(780, 340), Some("CLEAR"));
    }

    #[test]
    fn dvorak_punctuation_row() {
        assert_eq!(DVORAK.key_at(80, 130), Some("'"));
        let (cx, cy) = DVORAK.key_rect(2, 0).center();
        assert_eq!(DVORAK.key_at(cx, cy), Some(";"));
    }

    #[test]
    fn every_hit_names_a_layout_key() {
        for kind in LayoutKind::ALL {
            let layout = kind.layout();
            for y in (0..450).step_by(7) {
                for x in (0..900).step_by(7) {
                    if let Some(label) = layout.key_at(x, y) {
                        assert!(layout.has_key(label), "{} not on {}", label, layout.name);
                    }
                }
            }
        }
    }

    #[test]
    fn keys_iterates_in_scan_order() {
        let labels: Vec<&str> = QWERTY.keys().map(|(l, _)| l).collect();
        assert_eq!(labels.len(), 10 + 9 + 7 + 3);
        assert_eq!(labels[0], "Q");
        assert_eq!(labels[26], "SPACE");
        assert_eq!(labels[28], "ENTER");
    }
}
