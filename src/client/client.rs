//! Client network loop and TUI.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::transport;

use super::state::{ClientApp, ClientPhase};
use super::ui;

/// Shared client state.
type SharedApp = Arc<Mutex<ClientApp>>;

/// Join configuration from the CLI.
pub struct JoinConfig {
    pub code: String,
    pub address: String,
    pub base_port: u16,
}

/// Join a game by room code and run the client TUI.
pub async fn run(config: JoinConfig) -> anyhow::Result<()> {
    let code = transport::normalize_room_code(&config.code)?;
    let port = transport::code_to_port(&code, config.base_port);
    let url = format!("ws://{}:{}", config.address, port);
    info!(%url, %code, "connecting");

    let (ws_stream, _) = tokio_tungstenite::connect_async(&url)
        .await
        .context("connection failed")?;
    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let app = Arc::new(Mutex::new(ClientApp::new(code)));

    let (tx, mut rx) = mpsc::unbounded_channel::<ClientMessage>();

    // Forward local requests onto the socket.
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

    // Apply every host broadcast to the local projection.
    let recv_app = Arc::clone(&app);
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_receiver.next().await {
            let text = match msg {
                Ok(Message::Text(text)) => text.to_string(),
                Ok(Message::Close(_)) => {
                    recv_app
                        .lock()
                        .await
                        .disconnect("Disconnected from host.".to_string());
                    break;
                }
                Err(e) => {
                    recv_app.lock().await.disconnect(format!("Connection failed: {e}"));
                    break;
                }
                _ => continue,
            };

            let Ok(server_msg) = serde_json::from_str::<ServerMessage>(&text) else {
                debug!("unparseable host message, ignored");
                continue;
            };
            recv_app.lock().await.apply(server_msg);
        }
    });

    run_tui(app, tx).await?;

    recv_task.abort();
    send_task.abort();
    Ok(())
}

/// Run the client TUI.
async fn run_tui(app: SharedApp, tx: mpsc::UnboundedSender<ClientMessage>) -> anyhow::Result<()> {
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
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_input(&app, &tx, key.code).await {
                    break;
                }
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Handle keyboard input. Returns true to quit.
async fn handle_input(
    app: &SharedApp,
    tx: &mpsc::UnboundedSender<ClientMessage>,
    key: KeyCode,
) -> bool {
    let mut app = app.lock().await;

    match &app.phase {
        ClientPhase::Connecting => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.should_quit = true;
                return true;
            }
        }
        ClientPhase::NameEntry { .. } => match key {
            KeyCode::Char(c) => app.input_push(c),
            KeyCode::Backspace => app.input_pop(),
            KeyCode::Enter => {
                if let Some(name) = app.submit_name() {
                    let _ = tx.send(ClientMessage::SetName { name });
                }
            }
            KeyCode::Esc => {
                app.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientPhase::Lobby => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.should_quit = true;
                return true;
            }
        }
        ClientPhase::InRound(_) => match key {
            KeyCode::Char(c) => app.input_push(c),
            KeyCode::Backspace => app.input_pop(),
            KeyCode::Enter => {
                if let Some(value) = app.submit_answer() {
                    let _ = tx.send(ClientMessage::Answer { value });
                }
            }
            KeyCode::Esc => {
                app.should_quit = true;
                return true;
            }
            _ => {}
        },
        ClientPhase::RoundResults(_) | ClientPhase::GameOver { .. } => {
            if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                app.should_quit = true;
                return true;
            }
        }
        ClientPhase::Disconnected { .. } => {
            if matches!(
                key,
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc | KeyCode::Enter
            ) {
                app.should_quit = true;
                return true;
            }
        }
    }

    false
}
