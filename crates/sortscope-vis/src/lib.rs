//! Sortscope Visualization
//!
//! Browser host for the sortscope engine.
//!
//! # Architecture
//!
//! - **Driver**: owns the [`Session`](sortscope_engine::Session) on a tokio
//!   ticker, one algorithm step per tick
//! - **Frames**: every tick publishes a [`FrameMessage`] on a watch channel
//! - **WebSocket**: streams frames to the bar chart page and accepts key/intent commands
//! - **REST API**: status, latest frame, intent and key submission
//!
//! # Usage
//!
//! ```ignore
//! let session = Session::new(SessionConfig::from_env()?)?;
//! let server = VisServer::new(session, VisConfig::from_env()?);
//! server.serve().await?;
//! ```

mod config;
mod driver;
mod error;
mod frame;
mod input;
mod server;

pub use config::VisConfig;
pub use driver::{DriverHandle, SessionDriver};
pub use error::{Error, Result};
pub use frame::{FrameMessage, HighlightEntry, WatchRenderer};
pub use input::{intent_for_key, is_bound_key, Command, CommandQueue};
pub use server::VisServer;
