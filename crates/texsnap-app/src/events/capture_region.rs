use anyhow::Context;
use texsnap_capture::{BitmapSource, CaptureError, CaptureSession, FileSource};
use texsnap_types::{ImageSource, PointerEvent};

use crate::context::AppContext;

use super::recognize::recognize_png;

pub async fn handle_region_capture(
    ctx: &AppContext,
    source: ImageSource,
    events: Vec<PointerEvent>,
) -> anyhow::Result<()> {
    ctx.status("Capturing", true).await?;

    let result = tokio::task::spawn_blocking(move || {
        let source = bitmap_source(&source)?;
        let mut session =
            CaptureSession::grab(source.as_ref()).context("Failed to grab the screen")?;

        for event in events {
            session.handle(event);
        }

        Ok::<_, anyhow::Error>(session.confirm())
    })
    .await;

    match result {
        Ok(Ok(Ok(captured))) => {
            tracing::debug!(">>> [CAPTURE] Selection {}", captured.rect);
            recognize_png(ctx, captured.png).await?;
        }
        Ok(Ok(Err(CaptureError::Selection(e)))) => {
            tracing::warn!(">>> [CAPTURE] {}", e);
            ctx.status("Selection is empty", false).await?;
            ctx.fail(format!("Nothing to recognize: {}", e)).await?;
        }
        Ok(Ok(Err(e))) => {
            ctx.fail(format!("Capture failed: {}", e)).await?;
        }
        Ok(Err(e)) => {
            ctx.fail(format!("Capture failed: {:#}", e)).await?;
        }
        Err(e) => {
            ctx.fail(format!("Capture task error: {}", e)).await?;
        }
    }

    Ok(())
}

fn bitmap_source(source: &ImageSource) -> anyhow::Result<Box<dyn BitmapSource>> {
    match source {
        ImageSource::File(path) => Ok(Box::new(FileSource::new(path.clone()))),
        #[cfg(feature = "screen")]
        ImageSource::Screen => Ok(Box::new(texsnap_capture::MonitorSource)),
        #[cfg(not(feature = "screen"))]
        ImageSource::Screen => {
            anyhow::bail!("Screen grabbing is not compiled in, rebuild with the `screen` feature")
        }
    }
}
