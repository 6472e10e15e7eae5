//! Keystroke output: where accepted key presses go after the text box.
//!
//! The arbiter fires a [`KeyCommand`] into a [`KeySink`] and never looks at
//! the outcome.  [`open_key_sink`] picks the OS injector when it is compiled
//! in and usable, and falls back to [`NullSink`] otherwise.

use std::fmt;

use tracing::{debug, warn};

// ════════════════════════════════════════════════════════════════════════════
// KeyCommand
// ════════════════════════════════════════════════════════════════════════════

/// One "send key X" instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Space,
    Backspace,
    Enter,
    /// A printable character, already lower-cased.
    Char(char),
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCommand::Space     => f.write_str("space"),
            KeyCommand::Backspace => f.write_str("backspace"),
            KeyCommand::Enter     => f.write_str("enter"),
            KeyCommand::Char(c)   => write!(f, "{}", c),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeySink
// ════════════════════════════════════════════════════════════════════════════

/// Fire-and-forget receiver of key commands.
pub trait KeySink {
    fn send(&mut self, command: KeyCommand);
}

/// Drops every command.
#[derive(Debug, Default)]
pub struct NullSink;

impl KeySink for NullSink {
    fn send(&mut self, command: KeyCommand) {
        debug!(%command, "key not injected (null sink)");
    }
}

/// Keeps every command in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<KeyCommand>,
}

impl KeySink for RecordingSink {
    fn send(&mut self, command: KeyCommand) {
        self.sent.push(command);
    }
}

// ── enigo backend ─────────────────────────────────────────────────────────

#[cfg(feature = "inject")]
pub use injector::EnigoSink;

#[cfg(feature = "inject")]
mod injector {
    use enigo::{Direction, Enigo, Key, Keyboard, Settings};
    use tracing::warn;

    use super::{KeyCommand, KeySink};
    use crate::error::AppError;

    /// Sends key presses to whichever OS window has focus.
    pub struct EnigoSink {
        enigo: Enigo,
    }

    impl EnigoSink {
        pub fn new() -> Result<Self, AppError> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| AppError::Injector(e.to_string()))?;
            Ok(EnigoSink { enigo })
        }
    }

    impl KeySink for EnigoSink {
        fn send(&mut self, command: KeyCommand) {
            let key = match command {
                KeyCommand::Space     => Key::Space,
                KeyCommand::Backspace => Key::Backspace,
                KeyCommand::Enter     => Key::Return,
                KeyCommand::Char(c)   => Key::Unicode(c),
            };
            if let Err(e) = self.enigo.key(key, Direction::Click) {
                warn!(%command, error = %e, "key injection failed");
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// open_key_sink
// ════════════════════════════════════════════════════════════════════════════

/// Open the OS injector when `inject` is requested, or a [`NullSink`].
///
/// Any failure to start the injector degrades to the null sink with a
/// warning; typing into the on-screen text box keeps working either way.
pub fn open_key_sink(inject: bool) -> Box<dyn KeySink> {
    if !inject {
        return Box::new(NullSink);
    }

    #[cfg(feature = "inject")]
    {
        match EnigoSink::new() {
            Ok(sink) => {
                tracing::info!("injecting key presses into the focused window");
                Box::new(sink)
            }
            Err(e) => {
                warn!(error = %e, "keystroke injection unavailable, using null sink");
                Box::new(NullSink)
            }
        }
    }

    #[cfg(not(feature = "inject"))]
    {
        warn!("built without the `inject` feature, key presses stay in the app");
        Box::new(NullSink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names() {
        assert_eq!(KeyCommand::Space.to_string(), "space");
        assert_eq!(KeyCommand::Backspace.to_string(), "backspace");
        assert_eq!(KeyCommand::Enter.to_string(), "enter");
        assert_eq!(KeyCommand::Char('q').to_string(), "q");
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        sink.send(KeyCommand::Char('h'));
        sink.send(KeyCommand::Enter);
        assert_eq!(sink.sent, vec![KeyCommand::Char('h'), KeyCommand::Enter]);
    }

    #[test]
    fn no_injection_requested_gives_working_sink() {
        let mut sink = open_key_sink(false);
        sink.send(KeyCommand::Space);
    }
}
