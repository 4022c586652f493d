use anyhow::Context;
use arboard::Clipboard;

/// Put `text` on the system clipboard
pub fn copy_text(text: &str) -> Result<(), anyhow::Error> {
    let mut clipboard = Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text.to_string())
        .context("Failed to write clipboard")?;

    tracing::info!("Copied {} chars to clipboard", text.chars().count());
    Ok(())
}
