//! Host network loop and TUI.
//!
//! Accepts WebSocket connections, hands each one off to the shared session
//! behind a lock, and runs the host's terminal UI. The session is the only
//! writer of game truth; connection tasks and the deadline timer all funnel
//! their events through the same mutex.

use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::data;
use crate::error::GameError;
use crate::protocol::{parse_guess, validate_display_name, ClientMessage, ServerMessage};
use crate::transport;

use super::session::{
    AdmitOutcome, AdvanceOutcome, Phase, RoundStarted, Session, MAX_CLIENTS,
};
use super::ui;

/// Attempts to claim a room code before giving up.
const CODE_ATTEMPTS: usize = 16;

/// Host configuration from the CLI.
pub struct HostConfig {
    /// Optional question file; the built-in pool is used otherwise.
    pub questions: Option<PathBuf>,
    pub base_port: u16,
}

/// Session state plus the host's own input line, behind one lock.
pub struct HostApp {
    pub session: Session,
    /// The host's answer (or name) being typed.
    pub input: String,
    pub input_error: Option<String>,
    pub should_quit: bool,
}

impl HostApp {
    fn new(session: Session) -> Self {
        Self {
            session,
            input: String::new(),
            input_error: None,
            should_quit: false,
        }
    }
}

/// Shared host state.
type SharedApp = Arc<Mutex<HostApp>>;

/// Host a game: claim a room code, accept clients, run the TUI.
pub async fn run(config: HostConfig) -> anyhow::Result<()> {
    let pool = match &config.questions {
        Some(path) => data::load_questions_from_json(path)
            .with_context(|| format!("loading questions from {}", path.display()))?,
        None => data::builtin_questions(),
    };

    let (code, listener) = claim_room_code(config.base_port).await?;
    info!(%code, addr = %listener.local_addr().map_err(GameError::Transport)?, "session open");

    let app = Arc::new(Mutex::new(HostApp::new(Session::new(code, pool))));

    let acceptor_app = Arc::clone(&app);
    let accept_task = tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    tokio::spawn(handle_connection(stream, addr, Arc::clone(&acceptor_app)));
                }
                Err(e) => {
                    warn!(error = %e, "failed to accept connection");
                }
            }
        }
    });

    run_tui(app).await?;
    accept_task.abort();
    Ok(())
}

/// Claim a room code by binding the port it maps to. `AddrInUse` means the
/// name is taken by another session; regenerate and retry.
async fn claim_room_code(base_port: u16) -> Result<(String, TcpListener), GameError> {
    let mut attempts = 0;
    loop {
        let code = transport::generate_room_code(&mut rand::thread_rng());
        let port = transport::code_to_port(&code, base_port);
        match TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await {
            Ok(listener) => return Ok((code, listener)),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                warn!(%code, port, "room code collision, regenerating");
                attempts += 1;
                if attempts >= CODE_ATTEMPTS {
                    return Err(GameError::NameCollision { code });
                }
            }
            Err(e) => return Err(GameError::Transport(e)),
        }
    }
}

/// Handle a single client connection for its lifetime.
async fn handle_connection(stream: TcpStream, addr: SocketAddr, app: SharedApp) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(%addr, error = %e, "websocket handshake failed");
            return;
        }
    };
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let admitted = { app.lock().await.session.admit(tx) };
    let id = match admitted {
        AdmitOutcome::Admitted(id) => id,
        AdmitOutcome::RoomFull => {
            info!(%addr, "connection rejected: room full");
            let notice = GameError::RoomFull { max: MAX_CLIENTS + 1 }.to_string();
            reject(&mut ws_sender, &notice).await;
            return;
        }
        AdmitOutcome::GameStarted => {
            info!(%addr, "connection rejected: game already started");
            reject(&mut ws_sender, "The game has already started.").await;
            return;
        }
    };

    // Forward broadcasts queued for this participant onto the socket.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let Ok(json) = serde_json::to_string(&msg) else {
                continue;
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(msg) = ws_receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text.to_string(),
            Ok(Message::Close(_)) => break,
            Err(_) => break,
            _ => continue,
        };

        let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) else {
            debug!(%id, "unparseable client message, ignored");
            continue;
        };
        handle_client_message(id, client_msg, &app).await;
    }

    app.lock().await.session.participant_left(id);
    send_task.abort();
}

/// Send a terminal notice to a rejected channel, then close it.
async fn reject(
    ws_sender: &mut futures_util::stream::SplitSink<WebSocketStream<TcpStream>, Message>,
    message: &str,
) {
    let msg = ServerMessage::Error {
        message: message.to_string(),
    };
    if let Ok(json) = serde_json::to_string(&msg) {
        let _ = ws_sender.send(Message::Text(json.into())).await;
    }
    let _ = ws_sender.close().await;
}

/// Handle one request from a client.
async fn handle_client_message(id: Uuid, msg: ClientMessage, app: &SharedApp) {
    let mut app = app.lock().await;
    match msg {
        ClientMessage::SetName { name } => match validate_display_name(&name) {
            Ok(name) => app.session.set_name(id, name.to_string()),
            Err(reason) => debug!(%id, reason, "rejected display name"),
        },
        ClientMessage::Answer { value } => {
            if value.is_finite() {
                app.session.receive_answer(id, value);
            } else {
                debug!(%id, "non-finite guess, ignored");
            }
        }
    }
}

/// Arm the deadline timer for a just-started round. Stale fires are no-ops
/// in `deadline_elapsed`, keyed by round index.
fn arm_deadline_timer(app: &SharedApp, started: RoundStarted) -> JoinHandle<()> {
    let app = Arc::clone(app);
    tokio::spawn(async move {
        tokio::time::sleep(started.deadline).await;
        app.lock().await.session.deadline_elapsed(started.index);
    })
}

/// Run the host TUI.
async fn run_tui(app: SharedApp) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    loop {
        {
            let app = app.lock().await;
            if app.should_quit {
                break;
            }
        }

        {
            let app = app.lock().await;
            terminal.draw(|frame| ui::render(frame, &app))?;
        }

        // Poll with a timeout so the countdown keeps ticking.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_input(&app, key.code).await {
                    break;
                }
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Handle keyboard input for the host. Returns true to quit.
async fn handle_input(app: &SharedApp, key: KeyCode) -> bool {
    let mut guard = app.lock().await;
    let host_id = guard.session.host_id();

    match guard.session.phase() {
        Phase::Lobby => {
            let host_named = guard
                .session
                .participant(host_id)
                .is_some_and(|p| p.name.is_some());
            if host_named {
                match key {
                    KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                        match guard.session.begin_game() {
                            Ok(started) => {
                                let handle = arm_deadline_timer(app, started);
                                guard.session.set_deadline_timer(handle);
                                guard.input_error = None;
                            }
                            Err(reason) => {
                                guard.input_error = Some(reason.to_string());
                            }
                        }
                    }
                    KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                        guard.should_quit = true;
                        return true;
                    }
                    _ => {}
                }
            } else {
                // Host is still naming itself.
                match key {
                    KeyCode::Char(c) => {
                        guard.input_error = None;
                        guard.input.push(c);
                    }
                    KeyCode::Backspace => {
                        guard.input.pop();
                    }
                    KeyCode::Enter => {
                        let input = std::mem::take(&mut guard.input);
                        match validate_display_name(&input) {
                            Ok(name) => {
                                let name = name.to_string();
                                guard.session.set_name(host_id, name);
                                guard.input_error = None;
                            }
                            Err(reason) => {
                                guard.input = input;
                                guard.input_error = Some(reason.to_string());
                            }
                        }
                    }
                    KeyCode::Esc => {
                        guard.should_quit = true;
                        return true;
                    }
                    _ => {}
                }
            }
        }
        Phase::InRound => {
            let already_submitted = guard
                .session
                .current_round()
                .is_some_and(|r| r.has_submitted(host_id));
            match key {
                KeyCode::Char(c) if !already_submitted => {
                    guard.input_error = None;
                    guard.input.push(c);
                }
                KeyCode::Backspace if !already_submitted => {
                    guard.input.pop();
                }
                KeyCode::Enter if !already_submitted => {
                    let input = std::mem::take(&mut guard.input);
                    match parse_guess(&input) {
                        Ok(value) => {
                            guard.session.receive_answer(host_id, value);
                            guard.input_error = None;
                        }
                        Err(e) => {
                            guard.input = input;
                            guard.input_error = Some(e.to_string());
                        }
                    }
                }
                KeyCode::Esc => {
                    guard.should_quit = true;
                    return true;
                }
                _ => {}
            }
        }
        Phase::RoundResults => match key {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char('N') => {
                match guard.session.advance() {
                    Ok(AdvanceOutcome::NextRound(started)) => {
                        let handle = arm_deadline_timer(app, started);
                        guard.session.set_deadline_timer(handle);
                        guard.input.clear();
                    }
                    Ok(AdvanceOutcome::Finished) => {}
                    Err(reason) => {
                        guard.input_error = Some(reason.to_string());
                    }
                }
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                guard.should_quit = true;
                return true;
            }
            _ => {}
        },
        Phase::Finished => {
            if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')) {
                guard.should_quit = true;
                return true;
            }
        }
    }

    false
}
