//! `unwind check <url>` – offline shortener check.

use anyhow::Result;
use unwind_core::{UnwindService, Unwinder};

pub fn run_check(unwinder: &Unwinder, url: &str) -> Result<()> {
    let shortened = unwinder.is_major_shortener(url)?;
    println!("{shortened}");
    Ok(())
}
