//! Axum web server with WebSocket streaming for visualization.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use sortscope_engine::{AlgorithmInfo, Intent, RunState, Session};
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;

use crate::config::VisConfig;
use crate::driver::{DriverHandle, SessionDriver};
use crate::error::{Error, Result};
use crate::frame::FrameMessage;
use crate::input::{is_bound_key, Command};

/// Shared application state.
pub struct AppState {
    handle: DriverHandle,
    algorithms: Vec<AlgorithmInfo>,
}

impl AppState {
    /// Queue a command for the next tick. Fails once the session has quit.
    fn send(&self, command: Command) -> bool {
        tracing::debug!(?command, "command queued");
        self.handle.commands.send(command).is_ok()
    }

    /// Keys are queued unresolved; the ticker maps them against the live state.
    fn dispatch(&self, command: WsCommand) -> bool {
        match command {
            WsCommand::Intent { intent } => self.send(Command::Intent(intent)),
            WsCommand::Key { key } if is_bound_key(&key) => self.send(Command::Key(key)),
            WsCommand::Key { .. } => false,
        }
    }
}

/// Visualization server.
pub struct VisServer {
    config: VisConfig,
    driver: SessionDriver,
    state: Arc<AppState>,
}

impl VisServer {
    /// Create a server hosting the given session.
    pub fn new(session: Session, config: VisConfig) -> Self {
        let algorithms = session.registry().infos();
        let (driver, handle) = SessionDriver::new(session, config.tick_period());
        Self {
            config,
            driver,
            state: Arc::new(AppState { handle, algorithms }),
        }
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            // Bar chart page
            .route("/", get(index_handler))
            // API routes
            .route("/api/status", get(status_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/intent", post(intent_handler))
            .route("/api/key", post(key_handler))
            // WebSocket for frame streaming
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Run the ticker and the server until the session quits.
    pub async fn serve(self) -> Result<()> {
        self.config.validate()?;
        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Visualization server running on http://localhost:{}", self.config.port);

        let router = self.router();
        let commands = self.state.handle.commands.clone();
        let driver = self.driver;
        let (quit_tx, quit_rx) = oneshot::channel::<()>();

        let ticker = tokio::spawn(async move {
            let result = driver.run().await;
            let _ = quit_tx.send(());
            result
        });

        // Ctrl-C goes through the session like any other quit.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, quitting");
                let _ = commands.send(Command::Intent(Intent::Quit));
            }
        });

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = quit_rx.await;
            })
            .await?;

        ticker.await.map_err(|e| Error::Task(e.to_string()))?
    }
}

/// Serve the bar chart page.
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// Server status response.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    state: RunState,
    algorithm: String,
    length: usize,
    tick: u64,
    algorithms: Vec<AlgorithmInfo>,
}

async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let frame = state.handle.frames.borrow();
    Json(StatusResponse {
        status: "ok",
        state: frame.state,
        algorithm: frame.algorithm.clone(),
        length: frame.values.len(),
        tick: frame.tick,
        algorithms: state.algorithms.clone(),
    })
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<FrameMessage> {
    Json(state.handle.frames.borrow().clone())
}

#[derive(Serialize)]
struct QueuedResponse {
    queued: bool,
}

async fn intent_handler(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<Intent>,
) -> std::result::Result<Json<QueuedResponse>, StatusCode> {
    if state.send(Command::Intent(intent)) {
        Ok(Json(QueuedResponse { queued: true }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[derive(Deserialize)]
struct KeyRequest {
    key: String,
}

async fn key_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeyRequest>,
) -> Json<QueuedResponse> {
    let queued = state.dispatch(WsCommand::Key { key: req.key });
    Json(QueuedResponse { queued })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut frames = state.handle.frames.clone();

    // Push the current frame, then every new one until the session quits.
    let mut send_task = tokio::spawn(async move {
        loop {
            let json = {
                let frame = frames.borrow_and_update();
                serde_json::to_string(&*frame)
            };
            match json {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to encode frame"),
            }
            if frames.changed().await.is_err() {
                break;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<WsCommand>(text.as_str()) {
                    Ok(cmd) => {
                        state.dispatch(cmd);
                    }
                    Err(e) => tracing::debug!(error = %e, "ignoring malformed command"),
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    Intent { intent: Intent },
    Key { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_engine::{AlgorithmRegistry, SessionConfig, Tick};

    fn server() -> VisServer {
        let session = Session::with_values(
            SessionConfig {
                seed: Some(9),
                ..Default::default()
            },
            AlgorithmRegistry::default(),
            vec![4, 3, 2, 1],
        )
        .unwrap();
        VisServer::new(session, VisConfig::default())
    }

    #[test]
    fn router_builds() {
        let server = server();
        let _router = server.router();
    }

    #[tokio::test]
    async fn status_lists_algorithms() {
        let server = server();
        let Json(status) = status_handler(State(server.state.clone())).await;
        assert_eq!(status.state, RunState::Idle);
        assert_eq!(status.length, 4);
        assert_eq!(status.algorithm, "Bubble Sort");
        assert_eq!(status.algorithms.len(), 4);
    }

    #[tokio::test]
    async fn posted_intent_runs_on_next_tick() {
        let mut server = server();
        let result = intent_handler(State(server.state.clone()), Json(Intent::Start)).await;
        assert!(result.is_ok());

        assert_eq!(server.driver.tick().unwrap(), Tick::Continue);
        let Json(frame) = frame_handler(State(server.state.clone())).await;
        assert_eq!(frame.state, RunState::Running);
        assert_eq!(frame.values, vec![3, 4, 2, 1]);
        assert_eq!(frame.highlight.len(), 2);
    }

    #[tokio::test]
    async fn key_press_maps_through_current_state() {
        let mut server = server();

        let Json(ack) = key_handler(
            State(server.state.clone()),
            Json(KeyRequest { key: " ".into() }),
        )
        .await;
        assert!(ack.queued);
        server.driver.tick().unwrap();
        assert_eq!(server.driver.session().state(), RunState::Running);

        key_handler(State(server.state.clone()), Json(KeyRequest { key: " ".into() })).await;
        server.driver.tick().unwrap();
        assert_eq!(server.driver.session().state(), RunState::Paused);

        let Json(ack) = key_handler(
            State(server.state.clone()),
            Json(KeyRequest { key: "z".into() }),
        )
        .await;
        assert!(!ack.queued);
    }

    #[test]
    fn ws_commands_parse() {
        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"intent","intent":{"type":"select_algorithm","name":"heap"}}"#)
                .unwrap();
        assert!(matches!(
            cmd,
            WsCommand::Intent { intent: Intent::SelectAlgorithm { ref name } } if name == "heap"
        ));

        let cmd: WsCommand = serde_json::from_str(r#"{"type":"key","key":"q"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Key { ref key } if key == "q"));
    }

    #[tokio::test]
    async fn serve_refuses_zero_tick_period() {
        let session = Session::with_values(
            SessionConfig::default(),
            AlgorithmRegistry::default(),
            vec![2, 1],
        )
        .unwrap();
        let config = VisConfig {
            port: 0,
            ticks_per_second: u32::MAX,
        };
        let result = VisServer::new(session, config).serve().await;
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn intent_rejected_after_quit() {
        let server = server();
        let state = server.state.clone();
        drop(server);

        let result = intent_handler(State(state), Json(Intent::Reset)).await;
        assert_eq!(result.err(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
