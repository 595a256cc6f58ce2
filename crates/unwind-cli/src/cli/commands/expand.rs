//! `unwind expand <url>` – print the final destination.

use anyhow::{Context, Result};
use std::sync::Arc;
use unwind_core::{UnwindService, Unwinder};

use super::UNKNOWN;

pub async fn run_expand(unwinder: Arc<Unwinder>, url: String, strict: bool) -> Result<()> {
    let destination = tokio::task::spawn_blocking(move || {
        if strict {
            unwinder
                .final_uri(&url)
                .map(|found| found.map(String::from))
        } else {
            unwinder.final_url(&url)
        }
    })
    .await
    .context("expand task join")??;

    println!("{}", destination.as_deref().unwrap_or(UNKNOWN));
    Ok(())
}
