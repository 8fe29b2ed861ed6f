//! Read-only views that stay synchronized with their source.
//!
//! Run with: cargo run --example derived_views

use futurable::{DeriveOptions, FutureValue};

fn main() {
    let response: FutureValue<u32, String> = FutureValue::new();

    // map transforms the success payload; failures pass through.
    let doubled = response.map(|v| Ok(v * 2));

    // A fallible transform: an Err becomes the view's failure state.
    let validated = response.map(|v| {
        if *v > 100 {
            Err(format!("{v} is out of range"))
        } else {
            Ok(*v)
        }
    });

    // rescue recovers failures into a usable default.
    let resilient = validated.rescue(|_| Ok(0));

    // A full derivation with a placeholder for the empty/pending states.
    let display = response.derive(
        DeriveOptions::transforming(
            |v: &u32| Ok::<_, String>(format!("{v} items")),
            |e: &String| Ok(format!("error: {e}")),
        )
        .pending(|| Ok("fetching...".to_string())),
    );

    println!("before any data:");
    println!("  display = {:?}", display.value());

    response.success(42);
    println!("after success(42):");
    println!("  doubled   = {:?}", doubled.value());
    println!("  validated = {:?} ({})", validated.value(), validated.state());
    println!("  display   = {:?}", display.value());

    response.success(250);
    println!("after success(250):");
    println!("  validated = {:?} ({})", validated.error(), validated.state());
    println!("  resilient = {:?} ({})", resilient.value(), resilient.state());

    response.loading();
    println!("while reloading:");
    println!("  doubled keeps {:?}, loading = {}", doubled.value(), doubled.is_loading());
}
