//! `unwind shorteners` – list known shortener hosts.

use unwind_core::ShortenerRegistry;

pub fn run_shorteners(registry: &ShortenerRegistry) {
    if registry.is_empty() {
        println!("No shortener hosts configured.");
        return;
    }
    let mut hosts: Vec<String> = registry.hosts().into_iter().collect();
    hosts.sort();
    for host in hosts {
        println!("{host}");
    }
}
