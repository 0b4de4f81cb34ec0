//! # Demo: ticker
//!
//! Demonstrates a timer-backed pipeline: [`Observable::interval`] feeding
//! `map` and `distinct_until_changed`, observed by the built-in [`LogWriter`].
//!
//! ## Flow
//! ```text
//! interval(300ms) ──► 1, 2, 3, 4, 5, 6 …
//!   map(n / 2)    ──► 0, 1, 1, 2, 2, 3 …
//!   distinct      ──► 0, 1,    2,    3 …
//!   LogWriter     ──► [next] value=…  then, on unsubscribe, [complete]
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example ticker --features logging
//! ```

use std::time::Duration;

use coldstream::{LogWriter, Observable};
use tokio::{task, time};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let local = task::LocalSet::new();
    local
        .run_until(async {
            // 1. A tick every 300ms, halved and de-duplicated
            let ticks = Observable::interval(Duration::from_millis(300))
                .map(|n| n / 2)
                .distinct_until_changed();

            // 2. LogWriter prints every signal
            let subscription = ticks.subscribe(LogWriter);

            // 3. Let it run, then cancel; interval completes on teardown
            time::sleep(Duration::from_millis(2_000)).await;
            subscription.unsubscribe();
        })
        .await;
}
