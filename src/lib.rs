//! `minirx` is a compact reactive-extensions substrate together with a set
//! of demonstration sequences built on it.
//!
//! An [`Observable`] is a cold producer: it emits zero or more values to the
//! single [`Subscriber`](subscribe::Subscriber) attached by a `subscribe`
//! call, then ends with at most one terminal signal, either completion or
//! failure. Operators ([`map`](ObservableExt::map),
//! [`skip`](ObservableExt::skip), [`take`](ObservableExt::take), the error
//! stages) compose onto a sequence before subscribing. Producers can run
//! inline, on a dedicated OS thread, or on a `Tokio` task; the
//! [`Subscription`](subscribe::Subscription) returned from `subscribe`
//! unsubscribes them and can await the thread or task driving the emissions.
//!
//! The [`demos`] module holds the demonstration sequences the binary walks
//! through: a greeting sequence, a blocking producer wired to an
//! error-operator chain, a background-thread producer with cancellation, and
//! a per-article fetch that emits `Content-Encoding` headers.
//!
//! # Example
//!
//! ```no_run
//! use minirx::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
//! use minirx::{Observable, ObservableExt, Observer, Subscribeable};
//!
//! let observable = Observable::new(|mut o: Subscriber<_>| {
//!     for i in 0..10 {
//!         o.next(i);
//!     }
//!     o.complete();
//!
//!     Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
//! });
//!
//! let mut observable = observable
//!     .filter(|v| v % 2 == 0)
//!     .map(|v| format!("even {v}"));
//!
//! observable.subscribe(Subscriber::new(
//!     |v| println!("{v}"),
//!     None::<fn(_)>,
//!     Some(|| println!("Completed")),
//! ));
//! ```
pub mod demos;
mod errors;
mod observable;
pub mod observer;
mod subscription;

pub use errors::*;
pub use observable::{Observable, ObservableExt};
pub use observer::Observer;
pub use subscription::subscribe::{Subscribeable, Unsubscribeable};

/// Subscription-side types: `Subscriber`, `Subscription`, join handles and
/// unsubscribe logic.
pub mod subscribe {
    pub use crate::subscription::subscribe::{
        Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic, Unsubscribeable,
    };
}
