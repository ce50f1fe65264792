use std::io::BufRead;

use kanal::{AsyncReceiver, AsyncSender, Sender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tolk_session::TranslationSession;

use crate::events::{InputEvent, event_loop, parse_line};
use crate::ui::{OutputFormat, UiMessage, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (Sender<InputEvent>, AsyncReceiver<InputEvent>),
    pub app_to_ui: (AsyncSender<UiMessage>, AsyncReceiver<UiMessage>),
}

impl ChannelSet {
    pub fn new() -> Self {
        let (input_tx, input_rx) = kanal::bounded(64);

        Self {
            input_to_app: (input_tx, input_rx.to_async()),
            app_to_ui: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    session: TranslationSession,
    format: OutputFormat,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(session: TranslationSession, format: OutputFormat) -> Self {
        Self {
            channels: ChannelSet::new(),
            session,
            format,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Subscribe before anything can submit
        let session_events = self.session.subscribe();

        // UI loop
        tasks.spawn(ui_loop(
            session_events,
            self.channels.app_to_ui.1.clone(),
            self.format,
            self.cancel_token.child_token(),
        ));

        // Event loop
        tasks.spawn(event_loop(
            self.session.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        // Stdin is read on a plain thread so a pending read never holds up runtime shutdown
        let input_tx = self.channels.input_to_app.0.clone();
        std::thread::spawn(move || read_input(input_tx));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
        // Already closed when the input thread hit EOF
        let _ = self.channels.input_to_app.0.close();
    }
}

fn read_input(input_tx: Sender<InputEvent>) {
    let stdin = std::io::stdin();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read stdin: {e}");
                break;
            }
        };

        if input_tx.send(parse_line(&line)).is_err() {
            return;
        }
    }

    tracing::debug!("Input closed");
    let _ = input_tx.send(InputEvent::Quit);
}
