//! Session controller: run-state machine, intents, and the per-tick loop.
//!
//! # State machine
//!
//! ```text
//!            Start                   generator Finished
//!   Idle ───────────► Running ─────────────────────────► Done
//!    ▲                 │   ▲                               │
//!    │           Toggle│   │Toggle                         │
//!    │                 ▼   │                               │
//!    └───── Reset ──── Paused                              │
//!    └───────────────────────────── Reset ─────────────────┘
//! ```
//!
//! Direction and algorithm changes are accepted only in `Idle` and `Done`.
//! `Quit` is accepted everywhere. Anything else is ignored.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::algorithms::{AlgorithmInfo, StepGenerator};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::registry::AlgorithmRegistry;
use crate::sequence::{random_values, Bounds, Sequence, Value};
use crate::step::{Direction, Highlight, Step};

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RunState {
    /// No generator bound
    #[default]
    Idle,
    /// Advancing one step per tick
    Running,
    /// Generator bound but held
    Paused,
    /// Generator exhausted
    Done,
}

/// Control request from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Intent {
    Start,
    PauseResumeToggle,
    Reset,
    SetAscending,
    SetDescending,
    SelectAlgorithm { name: String },
    Quit,
}

/// What the controller did with an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Applied,
    Ignored,
    Quit,
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
}

/// Everything a renderer needs for one frame. Borrowed, read-only.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub values: &'a [Value],
    pub bounds: Bounds,
    pub highlight: Highlight,
    pub algorithm: AlgorithmInfo,
    pub direction: Direction,
    pub state: RunState,
    /// Visible steps taken in the current run
    pub steps: u64,
}

/// Draws frames. Called exactly once per tick.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&Frame<'_>),
{
    fn render(&mut self, frame: &Frame<'_>) {
        self(frame)
    }
}

/// Supplies the intents that arrived since the previous tick.
pub trait IntentSource {
    fn poll(&mut self) -> Vec<Intent>;
}

impl IntentSource for Vec<Intent> {
    fn poll(&mut self) -> Vec<Intent> {
        std::mem::take(self)
    }
}

/// Statistics for the current (or last) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub steps: u64,
    pub elapsed: Duration,
}

/// Owns the sequence, the active generator and the run state.
pub struct Session {
    registry: AlgorithmRegistry,
    sequence: Sequence,
    min_value: Value,
    max_value: Value,
    rng: StdRng,
    algorithm: AlgorithmInfo,
    direction: Direction,
    state: RunState,
    generator: Option<Box<dyn StepGenerator>>,
    steps: u64,
    started_at: Option<Instant>,
    last_run: Option<RunStats>,
}

impl Session {
    /// Create a session with the bundled algorithms and a random sequence.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Self::with_registry(config, AlgorithmRegistry::default())
    }

    /// Create a session over a custom registry and a random sequence.
    pub fn with_registry(config: SessionConfig, registry: AlgorithmRegistry) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let values = random_values(config.length, config.min_value, config.max_value, &mut rng)?;
        Self::assemble(config, registry, Sequence::from_values(values), rng)
    }

    /// Create a session over explicit starting values.
    ///
    /// Resets still draw fresh values of the same length from the configured range.
    pub fn with_values(
        config: SessionConfig,
        registry: AlgorithmRegistry,
        values: Vec<Value>,
    ) -> Result<Self> {
        config.validate()?;
        if values.is_empty() {
            return Err(Error::Configuration("sequence must not be empty".into()));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::assemble(config, registry, Sequence::from_values(values), rng)
    }

    fn assemble(
        config: SessionConfig,
        registry: AlgorithmRegistry,
        sequence: Sequence,
        rng: StdRng,
    ) -> Result<Self> {
        let algorithm = registry
            .get(&config.algorithm)
            .map(|a| a.info())
            .ok_or_else(|| {
                Error::Configuration(format!("unknown algorithm: {}", config.algorithm))
            })?;

        info!(
            algorithm = algorithm.name,
            direction = %config.direction,
            length = sequence.len(),
            "session created"
        );

        Ok(Self {
            registry,
            sequence,
            min_value: config.min_value,
            max_value: config.max_value,
            rng,
            algorithm,
            direction: config.direction,
            state: RunState::Idle,
            generator: None,
            steps: 0,
            started_at: None,
            last_run: None,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn algorithm(&self) -> AlgorithmInfo {
        self.algorithm
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Whether a step generator is currently bound.
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// Statistics of the most recently completed run.
    pub fn last_run(&self) -> Option<RunStats> {
        self.last_run
    }

    /// Apply a single intent according to the state machine.
    pub fn apply(&mut self, intent: Intent) -> Result<Transition> {
        use RunState::*;

        let transition = match (&intent, self.state) {
            (Intent::Quit, _) => {
                info!(state = ?self.state, "quit requested");
                self.generator = None;
                return Ok(Transition::Quit);
            }
            (Intent::Start, Idle) => {
                self.bind_generator()?;
                Transition::Applied
            }
            (Intent::PauseResumeToggle, Running) => {
                self.state = Paused;
                info!(steps = self.steps, "paused");
                Transition::Applied
            }
            (Intent::PauseResumeToggle, Paused) => {
                self.state = Running;
                info!(steps = self.steps, "resumed");
                Transition::Applied
            }
            (Intent::Reset, Idle | Done | Paused) => {
                self.reset()?;
                Transition::Applied
            }
            (Intent::SetAscending, Idle | Done) => {
                self.direction = Direction::Ascending;
                Transition::Applied
            }
            (Intent::SetDescending, Idle | Done) => {
                self.direction = Direction::Descending;
                Transition::Applied
            }
            (Intent::SelectAlgorithm { name }, Idle | Done) => match self.registry.get(name) {
                Some(algorithm) => {
                    self.algorithm = algorithm.info();
                    info!(algorithm = self.algorithm.name, "algorithm selected");
                    Transition::Applied
                }
                None => {
                    debug!(name = %name, "unknown algorithm ignored");
                    Transition::Ignored
                }
            },
            _ => Transition::Ignored,
        };

        if transition == Transition::Ignored {
            debug!(?intent, state = ?self.state, "intent ignored");
        }
        Ok(transition)
    }

    /// Perform one visible step of the bound generator.
    ///
    /// Only legal while `Running`; otherwise a contract violation.
    pub fn advance(&mut self) -> Result<Step> {
        if self.state != RunState::Running {
            return Err(Error::ContractViolation(format!(
                "advance called while {:?}",
                self.state
            )));
        }
        let Some(generator) = self.generator.as_mut() else {
            return Err(Error::ContractViolation(
                "running without a bound generator".into(),
            ));
        };

        let step = generator.advance(&mut self.sequence)?;
        match step {
            Step::Continue(_) => self.steps += 1,
            Step::Finished => self.finish(),
        }
        Ok(step)
    }

    /// Run one tick: apply polled intents, then step (if running) and render.
    ///
    /// A `Quit` intent ends the tick immediately without rendering.
    pub fn tick<I, R>(&mut self, intents: &mut I, renderer: &mut R) -> Result<Tick>
    where
        I: IntentSource + ?Sized,
        R: Renderer + ?Sized,
    {
        for intent in intents.poll() {
            if self.apply(intent)? == Transition::Quit {
                return Ok(Tick::Quit);
            }
        }

        let highlight = match self.state {
            RunState::Running => match self.advance()? {
                Step::Continue(highlight) => highlight,
                Step::Finished => Highlight::NONE,
            },
            _ => Highlight::NONE,
        };

        renderer.render(&self.frame(highlight));
        Ok(Tick::Continue)
    }

    /// Drive ticks until a `Quit` intent arrives.
    ///
    /// Pacing is left to the caller's intent source or renderer.
    pub fn run<I, R>(&mut self, intents: &mut I, renderer: &mut R) -> Result<()>
    where
        I: IntentSource + ?Sized,
        R: Renderer + ?Sized,
    {
        while self.tick(intents, renderer)? == Tick::Continue {}
        Ok(())
    }

    /// Snapshot of the current state with the given highlight.
    pub fn frame(&self, highlight: Highlight) -> Frame<'_> {
        Frame {
            values: self.sequence.as_slice(),
            bounds: self.sequence.bounds(),
            highlight,
            algorithm: self.algorithm,
            direction: self.direction,
            state: self.state,
            steps: self.steps,
        }
    }

    fn bind_generator(&mut self) -> Result<()> {
        let algorithm = self.registry.get(self.algorithm.name).ok_or_else(|| {
            Error::ContractViolation(format!(
                "selected algorithm {} missing from registry",
                self.algorithm.name
            ))
        })?;
        self.generator = Some(algorithm.generator(&self.sequence, self.direction));
        self.state = RunState::Running;
        self.steps = 0;
        self.started_at = Some(Instant::now());
        info!(
            algorithm = self.algorithm.name,
            direction = %self.direction,
            length = self.sequence.len(),
            "sort started"
        );
        Ok(())
    }

    fn finish(&mut self) {
        let stats = RunStats {
            steps: self.steps,
            elapsed: self.started_at.map(|t| t.elapsed()).unwrap_or_default(),
        };
        self.generator = None;
        self.state = RunState::Done;
        self.last_run = Some(stats);
        info!(
            algorithm = self.algorithm.name,
            steps = stats.steps,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "sort finished"
        );
    }

    fn reset(&mut self) -> Result<()> {
        let values = random_values(
            self.sequence.len(),
            self.min_value,
            self.max_value,
            &mut self.rng,
        )?;
        self.sequence.replace(values);
        self.generator = None;
        self.state = RunState::Idle;
        self.steps = 0;
        self.started_at = None;
        info!(length = self.sequence.len(), "sequence reset");
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("algorithm", &self.algorithm.name)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("length", &self.sequence.len())
            .field("steps", &self.steps)
            .finish()
    }
}
