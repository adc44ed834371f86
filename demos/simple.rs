use std::time::Duration;

use task_forever::{config::env, ForeverBuilder, ForeverTask, TaskResult};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

struct Flaky {
    emoji: char,
    ticks: u64,
    fail_every: u64,
}

impl ForeverTask for Flaky {
    async fn run(&mut self, token: CancellationToken) -> TaskResult {
        loop {
            tokio::select! {
                _ = token.cancelled() => return Ok(()),
                _ = tokio::time::sleep(Duration::from_secs(1)) => {}
            }
            self.ticks += 1;
            println!("{} tick {}", self.emoji, self.ticks);
            if self.ticks % self.fail_every == 0 {
                if self.ticks % (2 * self.fail_every) == 0 {
                    panic!("{} panicked after {} ticks", self.emoji, self.ticks);
                }
                return Err(
                    anyhow::anyhow!("{} failed after {} ticks", self.emoji, self.ticks).into(),
                );
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let token = CancellationToken::new();
    let fail_every = env::get_int("FLAKY_FAIL_EVERY", 3).max(1) as u64;

    let handles = env::get_string_list("FLAKY_EMOJIS", &["🥴", "🧑"])
        .into_iter()
        .filter_map(|emoji| {
            let first = emoji.chars().next()?;
            ForeverBuilder::new(format!("flaky-{emoji}"))
                .with_task(Flaky {
                    emoji: first,
                    ticks: 0,
                    fail_every,
                })
                .with_fault_handler(move || println!("{first} recovered, going again"))
                .with_completion_handler(move || println!("{first} stopped"))
                .build()
                .run(token.clone())
        })
        .collect::<Vec<_>>();

    tokio::signal::ctrl_c().await?;
    token.cancel();

    for handle in handles {
        let report = handle.wait().await?;
        println!(
            "{}: {} iterations, {} faults",
            report.name, report.iterations, report.faults
        );
    }
    Ok(())
}
