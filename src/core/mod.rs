//! Engine core: the producer/consumer contracts and the subscription
//! lifecycle they are bridged by.
//!
//! Internal modules:
//! - [`worker`]: the producer contract ([`Worker`], [`WorkerFn`], [`Teardown`]);
//! - [`emitter`]: the bound producer-side callbacks ([`Emitter`]);
//! - [`observer`]: the consumer contract ([`Observer`], [`FnObserver`]);
//! - [`subscription`]: the lifecycle state machine ([`Subscription`]);
//! - [`observable`]: the immutable wrapper, factories, and subscribe entry
//!   points ([`Observable`]).

mod emitter;
mod observable;
mod observer;
mod subscription;
mod worker;

pub use emitter::Emitter;
pub use observable::Observable;
pub use observer::{FnObserver, Observer};
pub use subscription::Subscription;
pub use worker::{Teardown, Worker, WorkerFn, WorkerRef};
