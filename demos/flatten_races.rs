//! # Demo: flatten_races
//!
//! Runs the same burst of source values through `switch_map` and
//! `exhaust_map`, each projecting to a delayed inner observable, to show how
//! differently the two resolve the race.
//!
//! ## Flow
//! ```text
//! burst: 1, 2, 3 (synchronous), then complete
//! project: v ──► delay(100ms) ──► v * 2, complete
//!
//! switch_map   ──► 6   (each new value cancels the previous inner)
//! exhaust_map  ──► 2   (values arriving while an inner runs are dropped)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example flatten_races
//! ```

use std::time::Duration;

use coldstream::{Emitter, Observable};
use tokio::{task, time};

fn burst() -> Observable<u32> {
    Observable::create(|emitter: Emitter<u32>| {
        for v in [1, 2, 3] {
            emitter.next(v);
        }
        emitter.complete();
        None
    })
}

fn single(value: u32) -> Observable<u32> {
    Observable::create(move |emitter: Emitter<u32>| {
        emitter.next(value);
        emitter.complete();
        None
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let local = task::LocalSet::new();
    local
        .run_until(async {
            let switched = burst().switch_map(|v| single(v * 2).delay(Duration::from_millis(100)));
            switched.subscribe_fn(
                |v| println!("[switch_map] next={v}"),
                |e| println!("[switch_map] error={e}"),
                || println!("[switch_map] complete"),
            );

            let exhausted =
                burst().exhaust_map(|v| single(v * 2).delay(Duration::from_millis(100)));
            exhausted.subscribe_fn(
                |v| println!("[exhaust_map] next={v}"),
                |e| println!("[exhaust_map] error={e}"),
                || println!("[exhaust_map] complete"),
            );

            time::sleep(Duration::from_millis(300)).await;
        })
        .await;
}
