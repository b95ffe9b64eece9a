use std::sync::{Arc, Mutex};

use tokio::runtime::{Handle, RuntimeFlavor, TryCurrentError};

use crate::{
    subscription::subscribe::{Subscription, SubscriptionHandle, UnsubscribeLogic},
    Unsubscribeable,
};

enum SignalSender {
    Os(std::sync::mpsc::Sender<bool>),
    Task(tokio::sync::mpsc::Sender<bool>),
}

/// Sending half of the cancellation channel. Safe to fire from inside an
/// emission callback; delivery happens on another thread or task.
pub(super) struct CancelSignal {
    tokio_handle: Result<Handle, TryCurrentError>,
    sender: SignalSender,
}

impl CancelSignal {
    pub(super) fn send(&self) {
        match &self.sender {
            SignalSender::Task(s) => {
                let s = s.clone();
                if let Ok(h) = &self.tokio_handle {
                    h.spawn(async move {
                        let _ = s.send(true).await;
                    });
                }
            }
            SignalSender::Os(s) => {
                let _ = s.send(true);
            }
        }
    }
}

/// Receiving half of the cancellation channel.
pub(super) enum CancelListener {
    Os(std::sync::mpsc::Receiver<bool>),
    Task(tokio::sync::mpsc::Receiver<bool>),
}

impl CancelListener {
    /// Consumes the upstream subscription and returns a replacement that
    /// unsubscribes it either explicitly or when the cancel signal arrives,
    /// whichever comes first. The upstream join handle moves into the
    /// returned subscription so callers can still await the producer.
    pub(super) fn unsubscribe_on_signal(self, mut upstream: Subscription) -> Subscription {
        let handle = upstream.subscription_future;
        upstream.subscription_future = SubscriptionHandle::Nil;

        let is_future = matches!(upstream.unsubscribe_logic, UnsubscribeLogic::Future(_));

        let upstream = Arc::new(Mutex::new(Some(upstream)));
        let upstream_c = Arc::clone(&upstream);

        match self {
            CancelListener::Task(mut receiver) => {
                tokio::task::spawn(async move {
                    if receiver.recv().await.is_some() {
                        if let Some(s) = upstream.lock().unwrap().take() {
                            s.unsubscribe();
                        }
                    }
                });
            }
            CancelListener::Os(receiver) => {
                std::thread::spawn(move || {
                    if receiver.recv().is_ok() {
                        if let Some(s) = upstream.lock().unwrap().take() {
                            s.unsubscribe();
                        }
                    }
                });
            }
        }

        if is_future {
            return Subscription::new(
                UnsubscribeLogic::Future(Box::pin(async move {
                    if let Some(s) = upstream_c.lock().unwrap().take() {
                        s.unsubscribe();
                    }
                })),
                handle,
            );
        }
        Subscription::new(
            UnsubscribeLogic::Logic(Box::new(move || {
                if let Some(s) = upstream_c.lock().unwrap().take() {
                    s.unsubscribe();
                }
            })),
            handle,
        )
    }
}

fn tokio_runtime() -> (Result<Handle, TryCurrentError>, bool) {
    let mut is_current_thread = false;

    let tokio_handle = Handle::try_current();
    if let Ok(h) = &tokio_handle {
        if let RuntimeFlavor::CurrentThread = h.runtime_flavor() {
            is_current_thread = true;
        }
    }
    (tokio_handle, is_current_thread)
}

/// Opens the cancellation channel, picking the flavor to match the runtime.
///
/// A `current_thread` Tokio runtime cannot poll the listener task while a
/// subscriber callback blocks its only thread, so that case falls back to an
/// OS channel serviced by a plain thread, same as running without Tokio.
pub(super) fn cancel_channel() -> (CancelSignal, CancelListener) {
    let (tokio_handle, is_current_thread) = tokio_runtime();

    if let (Ok(_), false) = (&tokio_handle, is_current_thread) {
        let (tx, rx) = tokio::sync::mpsc::channel(10);
        let signal = CancelSignal {
            tokio_handle,
            sender: SignalSender::Task(tx),
        };
        (signal, CancelListener::Task(rx))
    } else {
        let (tx, rx) = std::sync::mpsc::channel();
        let signal = CancelSignal {
            tokio_handle,
            sender: SignalSender::Os(tx),
        };
        (signal, CancelListener::Os(rx))
    }
}
