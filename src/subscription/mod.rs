//! Structures and traits related to subscription management.
//!
//! This module holds `Subscriber` for handling observed values, errors and
//! completions, and `Subscription` for controlling an established
//! subscription: unsubscribing, or awaiting the thread or task backing it.
pub mod subscribe;
