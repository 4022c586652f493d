use std::path::{Path, PathBuf};

use chrono::Local;
use texsnap_capture::capture_file_name;
use texsnap_types::AppEvent;
use tokio::io::AsyncWriteExt;

use crate::context::AppContext;

const MAX_NAME_ATTEMPTS: u32 = 1000;

pub async fn handle_file_recognition(ctx: &AppContext, path: PathBuf) -> anyhow::Result<()> {
    match tokio::fs::read(&path).await {
        Ok(png) => recognize_png(ctx, png).await,
        Err(e) => ctx
            .fail(format!("Could not read {}: {}", path.display(), e))
            .await,
    }
}

/// Store the image, upload it and put the formula into the document
pub async fn recognize_png(ctx: &AppContext, png: Vec<u8>) -> anyhow::Result<()> {
    let (output_dir, save_response, delimiter, insert_mode) = {
        let config = ctx.state.config.read().await;
        (
            config.capture.output_dir.clone(),
            config.ocr.save_response,
            config.editor.formula_delimiter.clone(),
            config.editor.insert_mode,
        )
    };

    let png_path = match write_new_capture(&output_dir, &png).await {
        Ok(path) => path,
        Err(e) => {
            return ctx
                .fail(format!("Could not save capture in {}: {}", output_dir.display(), e))
                .await;
        }
    };
    let file_name = png_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::debug!(">>> [OCR] Saved capture to {}", png_path.display());

    ctx.status("Recognizing", true).await?;

    let response = match ctx.recognizer.recognize(&png, &file_name).await {
        Ok(response) => response,
        Err(e) => {
            ctx.status("Ready", false).await?;
            return ctx.fail(format!("Recognition failed: {}", e)).await;
        }
    };

    if save_response {
        let json_path = png_path.with_extension("json");
        let saved = match serde_json::to_vec_pretty(&response.raw) {
            Ok(json) => write_file(&json_path, &json).await,
            Err(e) => Err(std::io::Error::other(e)),
        };
        if let Err(e) = saved {
            tracing::warn!("Could not save {}: {}", json_path.display(), e);
        }
    }

    let recognition = response.recognition;
    tracing::info!(
        "Recognized formula ({}%): {}",
        recognition.score_percent(),
        recognition.latex
    );

    ctx.state
        .document
        .write()
        .await
        .insert_formula(&recognition.latex, &delimiter, insert_mode);

    ctx.event_tx
        .send(AppEvent::FormulaRecognized(recognition))
        .await?;
    ctx.status("Ready", false).await
}

/// Write `png` under the first free capture name for the current second
async fn write_new_capture(dir: &Path, png: &[u8]) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let now = Local::now();

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(capture_file_name(&now, attempt));
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;

        match file {
            Ok(mut file) => {
                file.write_all(png).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AlreadyExists,
        "no free capture file name",
    ))
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await
}
