//! Commands queued for the hosted session.

use sortscope_engine::{Intent, RunState};
use tokio::sync::mpsc;

/// A request from a handler, resolved by the ticker against the live run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Key(String),
}

impl Command {
    /// The intent this command means in `state`, if any.
    pub fn resolve(self, state: RunState) -> Option<Intent> {
        match self {
            Command::Intent(intent) => Some(intent),
            Command::Key(key) => intent_for_key(&key, state),
        }
    }
}

/// Commands queued by HTTP and WebSocket handlers, drained once per tick.
pub struct CommandQueue {
    rx: mpsc::UnboundedReceiver<Command>,
}

impl CommandQueue {
    pub fn new() -> (Self, mpsc::UnboundedSender<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { rx }, tx)
    }

    /// Take the next queued command without waiting.
    pub fn try_next(&mut self) -> Option<Command> {
        self.rx.try_recv().ok()
    }
}

/// Map a key press to an intent.
///
/// | Key   | Intent                                      |
/// |-------|---------------------------------------------|
/// | q     | quit                                        |
/// | r     | reset                                       |
/// | space | start when idle, otherwise pause / resume   |
/// | a / d | ascending / descending                      |
/// | i b s h | insertion, bubble, selection, heap sort   |
///
/// Space depends on `state`, so keys must be resolved against the session's
/// current state at the moment they are applied, not a published frame.
/// [`Command::Key`] defers the lookup to the ticker for that reason.
pub fn intent_for_key(key: &str, state: RunState) -> Option<Intent> {
    let select = |name: &str| {
        Some(Intent::SelectAlgorithm {
            name: name.to_string(),
        })
    };

    match key.to_ascii_lowercase().as_str() {
        "q" => Some(Intent::Quit),
        "r" => Some(Intent::Reset),
        " " | "space" => match state {
            RunState::Idle => Some(Intent::Start),
            _ => Some(Intent::PauseResumeToggle),
        },
        "a" => Some(Intent::SetAscending),
        "d" => Some(Intent::SetDescending),
        "i" => select("insertion"),
        "b" => select("bubble"),
        "s" => select("selection"),
        "h" => select("heap"),
        _ => None,
    }
}

/// Whether `key` is bound to anything.
pub fn is_bound_key(key: &str) -> bool {
    intent_for_key(key, RunState::Idle).is_some()
}
