use kanal::AsyncReceiver;
use texsnap_types::AppEvent;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;

pub mod capture_region;
pub mod document;
pub mod recognize;

use capture_region::handle_region_capture;
use document::{handle_document_copy, handle_document_save};
use recognize::handle_file_recognition;

/// App's main loop
pub async fn event_loop(
    ctx: AppContext,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::debug!("[EVENT_LOOP] Waiting for requests");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => {
                    tracing::debug!("[EVENT_LOOP] Front-end closed the channel");
                    break;
                }
            },
        };

        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(&ctx, event).await?;
        ctx.event_tx.send(AppEvent::RequestDone).await?;
    }

    Ok(())
}

async fn handle_events(ctx: &AppContext, event: AppEvent) -> anyhow::Result<()> {
    match event {
        AppEvent::CaptureRegion { source, events } => {
            handle_region_capture(ctx, source, events).await?;
        }
        AppEvent::RecognizeFile(path) => {
            handle_file_recognition(ctx, path).await?;
        }
        AppEvent::SaveDocument(path) => {
            handle_document_save(ctx, path).await?;
        }
        AppEvent::CopyDocument => {
            handle_document_copy(ctx).await?;
        }
        AppEvent::StatusUpdate { .. }
        | AppEvent::Failed { .. }
        | AppEvent::FormulaRecognized(_)
        | AppEvent::DocumentSaved(_)
        | AppEvent::RequestDone => {
            // Front-end only events
        }
    }

    Ok(())
}
