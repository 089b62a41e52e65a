//! Tokio ticker that owns the session.
//!
//! The session never leaves the driver task. Handlers talk to it only by
//! queueing commands and reading published frames.

use std::time::Duration;

use sortscope_engine::{Highlight, Intent, Renderer, Session, Tick, Transition};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::frame::{FrameMessage, WatchRenderer};
use crate::input::{Command, CommandQueue};

/// Handles held by everything outside the ticker.
#[derive(Clone)]
pub struct DriverHandle {
    pub commands: mpsc::UnboundedSender<Command>,
    pub frames: watch::Receiver<FrameMessage>,
}

/// Drives a [`Session`] one tick per period.
pub struct SessionDriver {
    session: Session,
    commands: CommandQueue,
    renderer: WatchRenderer,
    period: Duration,
}

impl SessionDriver {
    /// Wrap a session and publish its initial frame.
    pub fn new(session: Session, period: Duration) -> (Self, DriverHandle) {
        let (commands, command_tx) = CommandQueue::new();
        let (mut renderer, frames) = WatchRenderer::new();
        renderer.render(&session.frame(Highlight::NONE));

        let driver = Self {
            session,
            commands,
            renderer,
            period,
        };
        let handle = DriverHandle {
            commands: command_tx,
            frames,
        };
        (driver, handle)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a single tick against queued commands.
    ///
    /// Each command is resolved against the state left by the one before it,
    /// so two space presses in one tick start and then pause.
    pub fn tick(&mut self) -> Result<Tick> {
        while let Some(command) = self.commands.try_next() {
            let Some(intent) = command.resolve(self.session.state()) else {
                continue;
            };
            if self.session.apply(intent)? == Transition::Quit {
                return Ok(Tick::Quit);
            }
        }
        Ok(self.session.tick(&mut Vec::<Intent>::new(), &mut self.renderer)?)
    }

    /// Tick at the configured period until a quit intent arrives.
    ///
    /// Dropping the driver on return closes the frame channel, which ends
    /// every WebSocket stream.
    pub async fn run(mut self) -> Result<()> {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            match self.tick() {
                Ok(Tick::Continue) => {}
                Ok(Tick::Quit) => {
                    tracing::info!(ticks = self.renderer.ticks(), "session quit");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!(error = %e, "session tick failed");
                    return Err(e);
                }
            }
        }
    }
}
