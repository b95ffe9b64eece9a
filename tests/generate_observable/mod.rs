use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use minirx::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
use minirx::{Observable, Observer};

/// Emits `0..end` from a dedicated OS thread, checking the cancellation flag
/// before every emission and returning early, without a terminal signal,
/// once it is set. `last_emit_assert` runs with the last emitted value right
/// before the producer thread exits.
pub fn generate_u32_observable(
    end: u32,
    last_emit_assert: impl FnMut(u32) + Send + Sync + 'static,
) -> Observable<u32> {
    let last_emit_assert = Arc::new(Mutex::new(last_emit_assert));

    Observable::new(move |mut o: Subscriber<_>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            if let Ok(signal) = rx.recv() {
                *done_c.lock().unwrap() = signal;
            }
        });

        let last_emit_assert = Arc::clone(&last_emit_assert);
        let jh = std::thread::spawn(move || {
            let mut last_emit = 0;

            for i in 0..end {
                if *done.lock().unwrap() {
                    last_emit_assert.lock().unwrap()(last_emit);
                    return;
                }
                last_emit = i;
                o.next(i);
                // Give `take` a chance to cancel between emits.
                std::thread::sleep(Duration::from_millis(1));
            }
            o.complete();
            last_emit_assert.lock().unwrap()(last_emit);
        });

        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                if tx.send(true).is_err() {
                    eprintln!("receiver dropped");
                }
            })),
            SubscriptionHandle::JoinThread(jh),
        )
    })
}

/// Tokio-task variant of [`generate_u32_observable`], returning a
/// subscription with async unsubscribe logic and a task join handle.
pub fn generate_u32_observable_async(
    end: u32,
    last_emit_assert: impl FnMut(u32) + Send + Sync + 'static,
) -> Observable<u32> {
    let last_emit_assert = Arc::new(Mutex::new(last_emit_assert));

    Observable::new(move |mut o: Subscriber<_>| {
        let done = Arc::new(Mutex::new(false));
        let done_c = Arc::clone(&done);
        let (tx, mut rx) = tokio::sync::mpsc::channel(10);

        tokio::task::spawn(async move {
            if let Some(signal) = rx.recv().await {
                *done_c.lock().unwrap() = signal;
            }
        });

        let last_emit_assert = Arc::clone(&last_emit_assert);
        let join_handle = tokio::task::spawn(async move {
            let mut last_emit = 0;

            for i in 0..end {
                if *done.lock().unwrap() {
                    last_emit_assert.lock().unwrap()(last_emit);
                    return;
                }
                last_emit = i;
                o.next(i);
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            o.complete();
            last_emit_assert.lock().unwrap()(last_emit);
        });

        Subscription::new(
            UnsubscribeLogic::Future(Box::pin(async move {
                if tx.send(true).await.is_err() {
                    eprintln!("receiver dropped");
                }
            })),
            SubscriptionHandle::JoinTask(join_handle),
        )
    })
}
