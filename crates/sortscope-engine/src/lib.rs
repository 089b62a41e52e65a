//! Sortscope Engine
//!
//! Step-driven sorting engine for visualizing comparison sorts.
//!
//! # Architecture
//!
//! - **Sequence**: the values being sorted plus their `(min, max)` bounds
//! - **Algorithms**: bubble, insertion, selection and heap sort, each written
//!   as a resumable [`StepGenerator`] that performs one visible mutation per
//!   `advance()` call
//! - **Session**: the run-state machine that applies host intents and, once
//!   per tick, advances the active generator and hands a [`Frame`] to the
//!   host's [`Renderer`]
//!
//! Visualization speed is controlled entirely by how often the host ticks.
//!
//! # Usage
//!
//! ```
//! use sortscope_engine::{Frame, Intent, Session, SessionConfig, RunState};
//!
//! let mut session = Session::new(SessionConfig { length: 16, ..Default::default() })?;
//! let mut intents = vec![Intent::Start];
//! let mut draw = |frame: &Frame<'_>| {
//!     let _ = (frame.values, frame.highlight);
//! };
//!
//! while session.state() != RunState::Done {
//!     session.tick(&mut intents, &mut draw)?;
//! }
//! # Ok::<(), sortscope_engine::Error>(())
//! ```

pub mod algorithms;
mod config;
mod error;
mod registry;
mod sequence;
mod session;
mod step;

pub use algorithms::{AlgorithmInfo, SortAlgorithm, StepGenerator};
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use registry::AlgorithmRegistry;
pub use sequence::{Bounds, Sequence, Value};
pub use session::{
    Frame, Intent, IntentSource, Renderer, RunState, RunStats, Session, Tick, Transition,
};
pub use step::{Direction, Highlight, Marker, Step};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_sorts_random_sequence_end_to_end() {
        for algorithm in ["bubble", "insertion", "selection", "heap"] {
            for direction in [Direction::Ascending, Direction::Descending] {
                let config = SessionConfig {
                    length: 40,
                    seed: Some(3),
                    algorithm: algorithm.to_string(),
                    direction,
                    ..Default::default()
                };
                let mut session = Session::new(config).unwrap();
                let mut intents = vec![Intent::Start];
                let mut frames = 0usize;
                let mut count = |_: &Frame<'_>| frames += 1;

                while session.state() != RunState::Done {
                    session.tick(&mut intents, &mut count).unwrap();
                }

                assert!(direction.is_sorted(session.sequence().as_slice()));
                assert!(frames > 0);
            }
        }
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let config = SessionConfig {
            length: 20,
            seed: Some(1234),
            ..Default::default()
        };
        let a = Session::new(config.clone()).unwrap();
        let b = Session::new(config).unwrap();
        assert_eq!(a.sequence(), b.sequence());
    }
}
