use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use texsnap_ocr::FormulaRecognizer;
use texsnap_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::events::event_loop;
use crate::state::AppState;
use crate::ui::{Outcome, console_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(request_queue: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(request_queue.max(1)),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, request_queue: usize) -> Self {
        Self {
            channels: ChannelSet::new(request_queue),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Run the event loop until the console front-end has handled `requests`
    pub async fn run(
        self,
        recognizer: Arc<dyn FormulaRecognizer>,
        requests: Vec<AppEvent>,
    ) -> anyhow::Result<Outcome> {
        let ChannelSet {
            app_to_ui: (app_to_ui_tx, app_to_ui_rx),
            ui_to_app: (ui_to_app_tx, ui_to_app_rx),
        } = self.channels;

        tracing::debug!(
            "Starting with {} recognizer",
            recognizer.metadata().name
        );

        let mut tasks: JoinSet<anyhow::Result<()>> = JoinSet::new();

        // Event loop owns the only app -> ui sender, so the console sees
        // the channel close if the loop dies
        let ctx = AppContext::new(self.state.clone(), app_to_ui_tx, recognizer);
        tasks.spawn(event_loop(ctx, ui_to_app_rx, self.cancel_token.child_token()));

        let outcome = console_loop(requests, app_to_ui_rx, ui_to_app_tx).await;

        self.cancel_token.cancel();
        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("event loop exited: {}", e),
                Err(e) => tracing::error!("event loop panicked: {}", e),
            }
        }

        outcome
    }
}
