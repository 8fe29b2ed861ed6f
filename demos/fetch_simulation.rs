//! Simulates a fetch-and-refresh loop driven by Rust futures.
//!
//! Run with: cargo run --example fetch_simulation

use futurable::FutureValue;
use std::time::Duration;
use tokio::time::sleep;

async fn fetch_profile(attempt: u32) -> Result<String, String> {
    sleep(Duration::from_millis(50)).await;
    if attempt == 1 {
        Err("connection reset".to_string())
    } else {
        Ok(format!("profile v{attempt}"))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let profile: FutureValue<String, String> = FutureValue::new();

    let _render = profile.subscribe(|_, new| {
        let shown = new.match_with(
            |value, active| {
                if active {
                    format!("{value} (refreshing)")
                } else {
                    value.clone()
                }
            },
            |error, active| {
                if active {
                    format!("{error} (retrying)")
                } else {
                    format!("{error}!")
                }
            },
            |_| "loading...".to_string(),
        );
        println!("render: {shown} [{}]", new.state());
    });

    // First fetch fails, the second recovers, the third refreshes.
    for attempt in 1..=3 {
        profile.accept_future(fetch_profile(attempt)).await;
    }

    println!("final: {}", profile.success_or_else(|| "<none>".to_string()));
}
