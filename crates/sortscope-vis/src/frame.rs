//! Frames published to the browser.

use serde::{Deserialize, Serialize};
use sortscope_engine::{Bounds, Direction, Frame, Marker, Renderer, RunState, Value};
use tokio::sync::watch;

/// One highlighted bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightEntry {
    pub index: usize,
    pub marker: Marker,
}

/// Owned, serializable copy of an engine [`Frame`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameMessage {
    /// Monotonic tick counter, starting at 0 for the initial frame
    pub tick: u64,
    pub values: Vec<Value>,
    pub bounds: Bounds,
    pub highlight: Vec<HighlightEntry>,
    pub algorithm: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub direction: Direction,
    pub state: RunState,
    pub steps: u64,
}

impl FrameMessage {
    pub fn from_frame(frame: &Frame<'_>, tick: u64) -> Self {
        Self {
            tick,
            values: frame.values.to_vec(),
            bounds: frame.bounds,
            highlight: frame
                .highlight
                .iter()
                .map(|(index, marker)| HighlightEntry { index, marker })
                .collect(),
            algorithm: frame.algorithm.name.to_string(),
            time_complexity: frame.algorithm.time_complexity.to_string(),
            space_complexity: frame.algorithm.space_complexity.to_string(),
            direction: frame.direction,
            state: frame.state,
            steps: frame.steps,
        }
    }
}

/// Renderer that publishes every frame on a watch channel.
///
/// Slow readers only ever see the latest frame.
pub struct WatchRenderer {
    tx: watch::Sender<FrameMessage>,
    tick: u64,
}

impl WatchRenderer {
    pub fn new() -> (Self, watch::Receiver<FrameMessage>) {
        let (tx, rx) = watch::channel(FrameMessage::default());
        (Self { tx, tick: 0 }, rx)
    }

    /// Ticks rendered so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }
}

impl Renderer for WatchRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.tx.send_replace(FrameMessage::from_frame(frame, self.tick));
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_engine::{AlgorithmRegistry, Highlight, Session, SessionConfig};

    fn session() -> Session {
        Session::with_values(
            SessionConfig {
                algorithm: "heap".into(),
                ..Default::default()
            },
            AlgorithmRegistry::default(),
            vec![3, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn message_copies_frame() {
        let session = session();
        let msg = FrameMessage::from_frame(&session.frame(Highlight::pair(0, 2)), 7);

        assert_eq!(msg.tick, 7);
        assert_eq!(msg.values, vec![3, 1, 2]);
        assert_eq!(msg.bounds, Bounds { min: 1, max: 3 });
        assert_eq!(msg.algorithm, "Heap Sort");
        assert_eq!(msg.time_complexity, "O(n log n)");
        assert_eq!(
            msg.highlight,
            vec![
                HighlightEntry { index: 0, marker: Marker::Primary },
                HighlightEntry { index: 2, marker: Marker::Secondary },
            ]
        );
    }

    #[test]
    fn message_serializes_snake_case() {
        let session = session();
        let msg = FrameMessage::from_frame(&session.frame(Highlight::pair(1, 2)), 0);
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"state\":\"idle\""));
        assert!(json.contains("\"direction\":\"ascending\""));
        assert!(json.contains("\"marker\":\"primary\""));

        let parsed: FrameMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }

    #[test]
    fn watch_renderer_publishes_latest() {
        let session = session();
        let (mut renderer, rx) = WatchRenderer::new();

        renderer.render(&session.frame(Highlight::NONE));
        renderer.render(&session.frame(Highlight::pair(0, 1)));

        assert_eq!(renderer.ticks(), 2);
        let latest = rx.borrow();
        assert_eq!(latest.tick, 1);
        assert_eq!(latest.highlight.len(), 2);
    }
}
