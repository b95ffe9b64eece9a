use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use minirx::subscribe::Subscriber;

/// Shared handles into everything a recording subscriber observed.
pub struct Recorded<T> {
    pub emissions: Arc<Mutex<Vec<T>>>,
    pub completions: Arc<Mutex<u32>>,
    pub errors: Arc<Mutex<Vec<String>>>,
}

/// Builds a subscriber that records every `next`, `complete` and `error`
/// callback so tests can assert on what actually reached it.
pub fn recording_subscriber<T: Send + 'static>() -> (Subscriber<T>, Recorded<T>) {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let completions = Arc::new(Mutex::new(0));
    let errors = Arc::new(Mutex::new(Vec::new()));

    let emissions_c = Arc::clone(&emissions);
    let completions_c = Arc::clone(&completions);
    let errors_c = Arc::clone(&errors);

    let subscriber = Subscriber::new(
        move |v| emissions_c.lock().unwrap().push(v),
        Some(move |e: Arc<dyn Error + Send + Sync>| {
            errors_c.lock().unwrap().push(e.to_string());
        }),
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    (
        subscriber,
        Recorded {
            emissions,
            completions,
            errors,
        },
    )
}
