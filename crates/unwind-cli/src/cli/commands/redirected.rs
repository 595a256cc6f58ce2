//! `unwind redirected <url>` – does the URL redirect?

use anyhow::{Context, Result};
use std::sync::Arc;
use unwind_core::{UnwindService, Unwinder};

use super::UNKNOWN;

pub async fn run_redirected(unwinder: Arc<Unwinder>, url: String) -> Result<()> {
    let outcome = tokio::task::spawn_blocking(move || unwinder.is_redirected_url(&url))
        .await
        .context("redirect probe task join")??;
    match outcome.as_bool() {
        Some(redirected) => println!("{redirected}"),
        None => println!("{UNKNOWN}"),
    }
    Ok(())
}
