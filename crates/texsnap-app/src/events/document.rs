use std::path::PathBuf;

use texsnap_types::AppEvent;

use crate::context::AppContext;

pub async fn handle_document_save(ctx: &AppContext, path: Option<PathBuf>) -> anyhow::Result<()> {
    let result = {
        let mut document = ctx.state.document.write().await;
        match path {
            Some(path) => document.save_as(path),
            None => document.save(),
        }
    };

    match result {
        Ok(path) => {
            ctx.status(format!("Wrote {}", path.display()), false).await?;
            ctx.event_tx.send(AppEvent::DocumentSaved(path)).await?;
            Ok(())
        }
        Err(e) => ctx.fail(e.to_string()).await,
    }
}

pub async fn handle_document_copy(ctx: &AppContext) -> anyhow::Result<()> {
    let text = ctx.state.document.read().await.text().to_string();

    match tokio::task::spawn_blocking(move || texsnap_io::clipboard::copy_text(&text)).await {
        Ok(Ok(())) => ctx.status("Copied to clipboard", false).await,
        Ok(Err(e)) => ctx.fail(format!("{:#}", e)).await,
        Err(e) => ctx.fail(format!("Clipboard task error: {}", e)).await,
    }
}
