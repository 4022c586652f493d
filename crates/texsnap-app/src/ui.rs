//! Console front-end: feeds requests to the app and collects what comes back

use std::path::PathBuf;

use kanal::{AsyncReceiver, AsyncSender};
use texsnap_types::{AppEvent, Recognition};

#[derive(Debug, Default)]
pub struct Outcome {
    pub recognitions: Vec<Recognition>,
    pub saved: Vec<PathBuf>,
    pub failures: Vec<String>,
}

pub async fn console_loop(
    requests: Vec<AppEvent>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::default();

    for request in requests {
        ui_to_app_tx.send(request).await?;

        loop {
            let event = app_to_ui_rx
                .recv()
                .await
                .map_err(|_| anyhow::anyhow!("App stopped before finishing the request"))?;

            match event {
                AppEvent::RequestDone => break,
                AppEvent::StatusUpdate { status, busy } => {
                    tracing::info!("[STATUS] {} (busy: {})", status, busy);
                }
                AppEvent::Failed { reason } => {
                    outcome.failures.push(reason);
                }
                AppEvent::FormulaRecognized(recognition) => {
                    tracing::debug!(
                        "[UI] Formula with score {}",
                        recognition.score_percent()
                    );
                    outcome.recognitions.push(recognition);
                }
                AppEvent::DocumentSaved(path) => {
                    outcome.saved.push(path);
                }
                other => {
                    tracing::debug!("[UI] Ignoring {:?}", std::mem::discriminant(&other));
                }
            }
        }
    }

    Ok(outcome)
}
