use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use tolk_core::{SessionEvent, TranslationOutcome};
use tolk_session::SessionSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Things the event loop asks the terminal to show
#[derive(Debug, Clone)]
pub enum UiMessage {
    Snapshot(SessionSnapshot),
    Notice(String),
}

fn describe(outcome: &TranslationOutcome) -> String {
    match outcome {
        TranslationOutcome::Idle => "(cleared)".to_string(),
        TranslationOutcome::Validating => "checking input...".to_string(),
        TranslationOutcome::InFlight { request, .. } => format!(
            "translating {} -> {}...",
            request.source_language(),
            request.target_language()
        ),
        TranslationOutcome::Succeeded { translated_text } => translated_text.clone(),
        TranslationOutcome::Failed { message, .. } => format!("error: {message}"),
    }
}

pub fn render_event(event: &SessionEvent, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(describe(&event.outcome)),
        OutputFormat::Json => Ok(serde_json::to_string(event)?),
    }
}

pub fn render_message(message: &UiMessage, format: OutputFormat) -> anyhow::Result<String> {
    match (message, format) {
        (UiMessage::Notice(text), _) => Ok(text.clone()),
        (UiMessage::Snapshot(snapshot), OutputFormat::Json) => Ok(serde_json::to_string(snapshot)?),
        (UiMessage::Snapshot(snapshot), OutputFormat::Text) => Ok(format!(
            "[{} -> {}] {}",
            snapshot.form.source_language,
            snapshot.form.target_language,
            describe(&snapshot.outcome)
        )),
    }
}

/// Prints session transitions and event loop messages until cancelled
pub async fn ui_loop(
    session_events: AsyncReceiver<SessionEvent>,
    app_to_ui_rx: AsyncReceiver<UiMessage>,
    format: OutputFormat,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            event = session_events.recv() => match event {
                Ok(event) => println!("{}", render_event(&event, format)?),
                Err(_) => break,
            },
            message = app_to_ui_rx.recv() => match message {
                Ok(message) => println!("{}", render_message(&message, format)?),
                Err(_) => break,
            },
            _ = cancel.cancelled() => break,
        }
    }

    // Flush whatever was published before shutdown
    while let Ok(Some(event)) = session_events.try_recv() {
        println!("{}", render_event(&event, format)?);
    }

    Ok(())
}
