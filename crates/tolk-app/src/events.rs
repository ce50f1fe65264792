use kanal::AsyncReceiver;
use tolk_session::TranslationSession;

use crate::ui::UiMessage;

/// User actions read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Plain line: becomes the form text and is submitted
    Translate(String),
    SetSource(String),
    SetTarget(String),
    Swap,
    Clear,
    Status,
    Help,
    Unknown(String),
    Quit,
}

pub const HELP: &str = "\
Type text and press enter to translate it.
  :from <code>   set source language
  :to <code>     set target language
  :swap          swap source and target
  :clear         clear the form and cancel a pending request
  :status        show the current form and outcome
  :quit          exit";

/// Lines starting with `:` are commands, anything else is text to translate
pub fn parse_line(line: &str) -> InputEvent {
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return InputEvent::Translate(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    // No command takes more than one argument
    if parts.next().is_some() {
        return InputEvent::Unknown(line.trim().to_string());
    }

    match (name, arg) {
        ("from", Some(code)) => InputEvent::SetSource(code.to_string()),
        ("to", Some(code)) => InputEvent::SetTarget(code.to_string()),
        ("swap", None) => InputEvent::Swap,
        ("clear", None) => InputEvent::Clear,
        ("status", None) => InputEvent::Status,
        ("help" | "h", None) => InputEvent::Help,
        ("quit" | "q", None) => InputEvent::Quit,
        _ => InputEvent::Unknown(line.trim().to_string()),
    }
}

/// App's main loop
pub async fn event_loop(
    session: TranslationSession,
    input_rx: AsyncReceiver<InputEvent>,
    app_to_ui_tx: kanal::AsyncSender<UiMessage>,
) -> anyhow::Result<()> {
    tracing::debug!("Event loop started");

    while let Ok(event) = input_rx.recv().await {
        tracing::debug!(?event, "Input event");

        match event {
            InputEvent::Translate(text) => {
                session.set_text(text);
                session.submit_form();
            }
            InputEvent::SetSource(code) => {
                session.set_source_language(code);
                app_to_ui_tx
                    .send(UiMessage::Snapshot(session.snapshot()))
                    .await?;
            }
            InputEvent::SetTarget(code) => {
                session.set_target_language(code);
                app_to_ui_tx
                    .send(UiMessage::Snapshot(session.snapshot()))
                    .await?;
            }
            InputEvent::Swap => {
                session.swap_languages();
                app_to_ui_tx
                    .send(UiMessage::Snapshot(session.snapshot()))
                    .await?;
            }
            InputEvent::Clear => session.clear(),
            InputEvent::Status => {
                app_to_ui_tx
                    .send(UiMessage::Snapshot(session.snapshot()))
                    .await?;
            }
            InputEvent::Help => {
                app_to_ui_tx.send(UiMessage::Notice(HELP.to_string())).await?;
            }
            InputEvent::Unknown(command) => {
                app_to_ui_tx
                    .send(UiMessage::Notice(format!(
                        "unknown command {command}, try :help"
                    )))
                    .await?;
            }
            InputEvent::Quit => break,
        }
    }

    settle_pending(&session).await;
    tracing::debug!("Event loop finished");
    Ok(())
}

/// Let an in-flight request finish so its result still gets rendered
async fn settle_pending(session: &TranslationSession) {
    let events = session.subscribe();

    while session.is_in_progress() {
        match events.recv().await {
            Ok(event) if event.outcome.is_settled() => break,
            Ok(_) => {}
            Err(_) => break,
        }
    }
}
