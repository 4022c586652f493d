use std::sync::Arc;

use kanal::AsyncSender;
use texsnap_ocr::FormulaRecognizer;
use texsnap_types::AppEvent;

use crate::state::AppState;

/// Shared dependencies of the request handlers
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<AppState>,
    pub event_tx: AsyncSender<AppEvent>,
    pub recognizer: Arc<dyn FormulaRecognizer>,
}

impl AppContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        recognizer: Arc<dyn FormulaRecognizer>,
    ) -> Self {
        Self {
            state,
            event_tx,
            recognizer,
        }
    }

    pub async fn status(&self, status: impl Into<String>, busy: bool) -> anyhow::Result<()> {
        self.event_tx
            .send(AppEvent::StatusUpdate {
                status: status.into(),
                busy,
            })
            .await?;
        Ok(())
    }

    /// Report a failed request to the front-end
    pub async fn fail(&self, reason: impl Into<String>) -> anyhow::Result<()> {
        let reason = reason.into();
        tracing::error!("{}", reason);
        self.event_tx.send(AppEvent::Failed { reason }).await?;
        Ok(())
    }
}
