//! The demonstration sequences.
//!
//! Each function here builds a single-use observable: a bounded synchronous
//! loop, a background-thread producer, or a per-article network fetch. The
//! sequences are consumed by exactly one subscriber and are discarded once
//! the terminal signal fires; the interesting behavior is what reaches the
//! subscriber, all of it printed by the driver.

use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_ENCODING;

use crate::errors::DemoError;
use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
};
use crate::{Observable, ObservableExt};

/// Greets each of the given names.
///
/// Builds a sequence from the names and subscribes immediately; zero names
/// mean zero emissions and an immediate completion.
pub fn hello<I>(names: I)
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();

    let mut observable = Observable::from_iter(names);
    observable.subscribe(Subscriber::on_next(|name: String| {
        println!("Hello {name}!");
    }));
}

/// A synchronous sequence of 50 values that runs `func` on every iteration.
///
/// Subscribing blocks the current thread until the whole loop has run. Each
/// iteration first checks the cancellation flag, then invokes `func`; a
/// failing closure gets its error forwarded to the subscriber as a failure
/// signal, and the iteration emits its `value_<i>` regardless. `func` runs on
/// every pass, so a closure that always fails signals an error on every
/// iteration; the subscriber-side terminal gate means only the first one is
/// observed, after which the remaining emissions are suppressed.
///
/// Three error stages are pre-composed on the returned sequence: the error is
/// logged, replaced with an `onErrorReturn` value, and a resume stage stands
/// by to continue with a new failing sequence.
pub fn custom_observable_blocking<F, E>(func: F) -> Observable<String>
where
    F: FnMut() -> Result<(), E> + Send + Sync + 'static,
    E: Error + Send + Sync + 'static,
{
    let func = Arc::new(Mutex::new(func));

    Observable::new(move |mut o: Subscriber<String>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let func = Arc::clone(&func);

        for i in 0..50 {
            if !*done.lock().unwrap() {
                if let Err(e) = func.lock().unwrap()() {
                    o.error(Arc::new(e));
                }
                o.next(format!("value_{i}"));
            }
        }
        o.complete();

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                *done_c.lock().unwrap() = true;
            })),
            SubscriptionHandle::Nil,
        )
    })
    .tap_error(|e| println!("error {e}"))
    .on_error_return(|e| format!("onErrorReturn {e}"))
    .on_error_resume_next(|e| {
        println!("onErrorResumeNext: {e}");
        Observable::error(e)
    })
}

/// A sequence of 75 values emitted from a dedicated OS thread.
///
/// Subscribing does not block: the producer thread checks the cancellation
/// flag before every emission and returns early, without any terminal
/// signal, once the subscriber has unsubscribed. Otherwise it signals
/// completion after the loop. The returned subscription holds the thread's
/// join handle.
pub fn custom_observable_non_blocking() -> Observable<String> {
    Observable::new(|mut o: Subscriber<String>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, rx) = std::sync::mpsc::channel();

        // Wait for a signal sent from the unsubscribe logic.
        std::thread::spawn(move || {
            if let Ok(signal) = rx.recv() {
                *done_c.lock().unwrap() = signal;
            }
        });

        let join_handle = std::thread::spawn(move || {
            for i in 0..75 {
                if *done.lock().unwrap() {
                    return;
                }
                o.next(format!("value_{i}"));
                // Give `take` a chance to cancel between emits.
                std::thread::sleep(Duration::from_millis(1));
            }
            o.complete();
        });

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                if tx.send(true).is_err() {
                    tracing::debug!("unsubscribe receiver dropped");
                }
            })),
            SubscriptionHandle::JoinThread(join_handle),
        )
    })
}

/// Fetches the named articles from their fixed wikipedia URLs, emitting each
/// response's `Content-Encoding` header value.
///
/// One GET per name, issued synchronously from a dedicated producer thread
/// with no timeout or retry; `identity` is emitted when the header is
/// absent. A failed fetch is reported and the loop continues with the next
/// article.
pub fn fetch_article_encodings<I>(names: I) -> Observable<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let client = Client::new();

    fetch_encodings_with(names, move |article| {
        let response = client
            .get(format!("http://en.wikipedia.org/wiki/{article}"))
            .send()
            .map_err(|source| DemoError::Fetch {
                article: article.to_owned(),
                source,
            })?;

        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("identity")
            .to_owned();

        Ok::<String, DemoError>(encoding)
    })
}

/// Per-article fetch loop behind [`fetch_article_encodings`], generic over
/// the fetch function.
///
/// The producer thread checks the cancellation flag before each fetch and
/// returns early, without any terminal signal, once unsubscribed. Fetch
/// failures are reported to the diagnostic output and skipped; the sequence
/// completes after the last name either way.
pub fn fetch_encodings_with<I, F, E>(names: I, fetch: F) -> Observable<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
    F: FnMut(&str) -> Result<String, E> + Send + Sync + 'static,
    E: Error + Send + Sync + 'static,
{
    let names: Vec<String> = names.into_iter().map(Into::into).collect();
    let fetch = Arc::new(Mutex::new(fetch));

    Observable::new(move |mut o: Subscriber<String>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            if let Ok(signal) = rx.recv() {
                *done_c.lock().unwrap() = signal;
            }
        });

        let names = names.clone();
        let fetch = Arc::clone(&fetch);
        let join_handle = std::thread::spawn(move || {
            for article in names {
                if *done.lock().unwrap() {
                    return;
                }
                match fetch.lock().unwrap()(&article) {
                    Ok(encoding) => o.next(encoding),
                    Err(e) => tracing::error!(%article, error = %e, "article fetch failed"),
                }
            }
            o.complete();
        });

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                if tx.send(true).is_err() {
                    tracing::debug!("unsubscribe receiver dropped");
                }
            })),
            SubscriptionHandle::JoinThread(join_handle),
        )
    })
}
