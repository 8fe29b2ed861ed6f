//! Walks one holder through the full six-state lifecycle.
//!
//! Run with: cargo run --example basic_lifecycle

use futurable::{Deferred, FutureValue};

fn main() {
    let temperature: FutureValue<f64, String> = FutureValue::new();

    let _log = temperature.subscribe(|old, new| {
        println!("  {} -> {}", old.state(), new.state());
    });

    println!("initial state: {}", temperature.state());

    // First read: empty -> pending -> success.
    let reading = Deferred::new();
    temperature.accept(&reading);
    reading.resolve(21.5).expect("first settlement");
    println!(
        "first reading: {} ({:?})",
        temperature.state(),
        temperature.value()
    );

    // Refresh: the previous value stays on display while reloading.
    let refresh = Deferred::new();
    temperature.accept(&refresh);
    println!(
        "while refreshing, show: {}",
        temperature.success_or(f64::NAN)
    );
    refresh
        .reject("sensor offline".to_string())
        .expect("second settlement");

    // Retry after the failure.
    let retry = Deferred::new();
    temperature.accept(&retry);
    println!("retrying, last error: {}", temperature.failure_or_else(String::new));
    retry.resolve(22.0).expect("third settlement");

    temperature.match_with(
        |value, active| println!("done: {value} (loading: {active})"),
        |error, _| println!("failed: {error}"),
        |_| println!("no data"),
    );
}
