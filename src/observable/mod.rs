//! Building blocks for creating and transforming observable sequences.

mod cancel;

use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::observer::Observer;
use crate::subscription::subscribe::{
    Subscribeable, Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic,
};

/// A source of values that can be observed and transformed.
///
/// An `Observable` is cold: nothing runs until `subscribe` is called, at
/// which point the stored subscribe function is invoked to drive emissions
/// to the supplied [`Subscriber`]. The subscribe function returns a
/// [`Subscription`] that can unsubscribe the producer and, for producers
/// running on their own thread or task, await it.
///
/// # Example: synchronous `Observable`
///
/// Emits values and completes, blocking the current thread until it is done.
/// It returns an empty `Subscription`, so it cannot be unsubscribed from
/// mid-emission.
///
/// ```no_run
/// use minirx::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use minirx::{Observable, Observer, Subscribeable};
///
/// let mut emit_5 = Observable::new(|mut subscriber| {
///     for i in 1..=5 {
///         subscriber.next(i);
///     }
///     subscriber.complete();
///
///     Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
/// });
///
/// let observer = Subscriber::new(
///     |v| println!("Emitted {}", v),
///     None::<fn(_)>,
///     Some(|| println!("Completed")),
/// );
///
/// emit_5.subscribe(observer);
/// ```
///
/// # Example: `Observable` emitting from an OS thread
///
/// Emits from a dedicated thread, checking a cancellation flag before every
/// emission and returning a `Subscription` whose unsubscribe logic sets that
/// flag. The stored join handle lets the caller wait for the producer.
///
/// ```no_run
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// use minirx::subscribe::{Subscriber, Subscription, SubscriptionHandle, UnsubscribeLogic};
/// use minirx::{Observable, ObservableExt, Observer, Subscribeable};
///
/// let observable = Observable::new(|mut o: Subscriber<_>| {
///     let done = Arc::new(Mutex::new(false));
///     let done_c = Arc::clone(&done);
///     let (tx, rx) = std::sync::mpsc::channel();
///
///     // Wait for a signal sent from the unsubscribe logic.
///     std::thread::spawn(move || {
///         if let Ok(signal) = rx.recv() {
///             *done_c.lock().unwrap() = signal;
///         }
///     });
///
///     let join_handle = std::thread::spawn(move || {
///         for i in 0..100 {
///             if *done.lock().unwrap() {
///                 return;
///             }
///             o.next(i);
///             // Give operators like `take` a chance to cancel between emits.
///             std::thread::sleep(Duration::from_millis(1));
///         }
///         o.complete();
///     });
///
///     Subscription::new(
///         UnsubscribeLogic::Logic(Box::new(move || {
///             let _ = tx.send(true);
///         })),
///         SubscriptionHandle::JoinThread(join_handle),
///     )
/// });
///
/// let subscription = observable
///     .take(7)
///     .map(|v| format!("Mapped {}", v))
///     .subscribe(Subscriber::on_next(|v| println!("{}", v)));
///
/// // The producer runs on its own thread; wait for it before exiting.
/// if subscription.join().is_err() {
///     eprintln!("producer thread panicked");
/// }
/// ```
pub struct Observable<T> {
    subscribe_fn: Box<dyn FnMut(Subscriber<T>) -> Subscription + Send + Sync>,
}

impl<T> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The closure `sf` defines the behavior of the `Observable`: it is
    /// invoked on every `subscribe` call to deliver values to the
    /// `Subscriber`, and it must return the `Subscription` that controls the
    /// producer it set in motion.
    pub fn new(sf: impl FnMut(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Box::new(sf),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Creates an `Observable` that emits each of the given values in order
    /// and then completes.
    ///
    /// Zero values produce zero emissions and an immediate completion.
    pub fn from_iter(values: impl IntoIterator<Item = T>) -> Observable<T> {
        let values: Vec<T> = values.into_iter().collect();

        Observable::new(move |mut o: Subscriber<T>| {
            for v in values.clone() {
                o.next(v);
            }
            o.complete();

            Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
        })
    }

    /// Creates an `Observable` that emits a single value and completes.
    pub fn just(value: T) -> Observable<T> {
        Observable::from_iter([value])
    }
}

impl<T: 'static> Observable<T> {
    /// Creates an `Observable` that signals the given failure to every
    /// subscriber and never emits a value.
    pub fn error(observable_error: Arc<dyn Error + Send + Sync>) -> Observable<T> {
        Observable::new(move |mut o: Subscriber<T>| {
            o.error(Arc::clone(&observable_error));

            Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
        })
    }
}

/// Extension methods composed onto observables to transform their emissions
/// or reshape their error behavior.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Transforms each emitted item with `f`, emitting the result.
    fn map<U, F>(mut self, f: F) -> Observable<U>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnOnce(T) -> U) + Copy + Sync + Send + 'static,
        U: 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    let t = f(v);
                    o_shared.lock().unwrap().next(t);
                },
                Some(move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Emits only the items for which `predicate` returns `true`.
    fn filter<P>(mut self, predicate: P) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        P: (FnOnce(&T) -> bool) + Copy + Sync + Send + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    if predicate(&v) {
                        o_shared.lock().unwrap().next(v);
                    }
                },
                Some(move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Skips the first `n` items, emitting the rest.
    ///
    /// If the sequence holds fewer than `n` items, nothing is emitted and
    /// only the terminal signal propagates.
    fn skip(mut self, n: usize) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let mut n = n;
            let u = Subscriber::new(
                move |v| {
                    if n > 0 {
                        n -= 1;
                        return;
                    }
                    o_shared.lock().unwrap().next(v);
                },
                Some(move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Emits at most the first `n` items, then unsubscribes the upstream.
    ///
    /// The unsubscribe signal travels over a channel serviced off the
    /// emitting callstack, so a producer may slip in a few more emissions
    /// before it lands; they are dropped here. Completion is not
    /// synthesized: it propagates only if the upstream signals it.
    fn take(mut self, n: usize) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let (signal, listener) = cancel::cancel_channel();
            let mut signal_sent = false;
            let mut i = 0;

            let u = Subscriber::new(
                move |v| {
                    if i < n {
                        i += 1;
                        o_shared.lock().unwrap().next(v);
                    } else if !signal_sent {
                        signal_sent = true;
                        signal.send();
                    }
                },
                Some(move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );

            let upstream = self.subscribe(u);
            listener.unsubscribe_on_signal(upstream)
        })
    }

    /// Delays each emission by the given number of milliseconds.
    ///
    /// The sleep happens on whichever thread the upstream emits from.
    fn delay(mut self, num_of_ms: u64) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let u = Subscriber::new(
                move |v| {
                    std::thread::sleep(Duration::from_millis(num_of_ms));
                    o_shared.lock().unwrap().next(v);
                },
                Some(move |observable_error| {
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Observes failures without consuming them: runs `f` on each error
    /// signal, then forwards the error downstream unchanged. Values and
    /// completion pass through untouched.
    fn tap_error<F>(mut self, f: F) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnMut(&Arc<dyn Error + Send + Sync>)) + Sync + Send + 'static,
    {
        let f = Arc::new(Mutex::new(f));

        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let f = Arc::clone(&f);

            let u = Subscriber::new(
                move |v| {
                    o_shared.lock().unwrap().next(v);
                },
                Some(move |observable_error: Arc<dyn Error + Send + Sync>| {
                    f.lock().unwrap()(&observable_error);
                    o_cloned_e.lock().unwrap().error(observable_error);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Replaces a failure with a single value: on an error signal, emits
    /// `f(error)` downstream and completes. The error itself is swallowed.
    fn on_error_return<F>(mut self, f: F) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnMut(Arc<dyn Error + Send + Sync>) -> T) + Sync + Send + 'static,
    {
        let f = Arc::new(Mutex::new(f));

        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let f = Arc::clone(&f);

            let u = Subscriber::new(
                move |v| {
                    o_shared.lock().unwrap().next(v);
                },
                Some(move |observable_error| {
                    let replacement = f.lock().unwrap()(observable_error);
                    let mut downstream = o_cloned_e.lock().unwrap();
                    downstream.next(replacement);
                    downstream.complete();
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }

    /// Continues a failed sequence with another one: on an error signal,
    /// `project` maps the error to a fallback observable, and the downstream
    /// subscriber is attached to it. Values and completion of a healthy
    /// upstream pass through untouched.
    fn on_error_resume_next<F>(mut self, project: F) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        F: (FnMut(Arc<dyn Error + Send + Sync>) -> Observable<T>) + Sync + Send + 'static,
    {
        let project = Arc::new(Mutex::new(project));

        Observable::new(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);

            let project = Arc::clone(&project);

            let u = Subscriber::new(
                move |v| {
                    o_shared.lock().unwrap().next(v);
                },
                Some(move |observable_error| {
                    let fallback_next = Arc::clone(&o_cloned_e);
                    let fallback_err = Arc::clone(&o_cloned_e);
                    let fallback_cmpl = Arc::clone(&o_cloned_e);

                    let mut fallback = project.lock().unwrap()(observable_error);

                    let fallback_subscriber = Subscriber::new(
                        move |v| {
                            fallback_next.lock().unwrap().next(v);
                        },
                        Some(move |e| {
                            fallback_err.lock().unwrap().error(e);
                        }),
                        Some(move || {
                            fallback_cmpl.lock().unwrap().complete();
                        }),
                    );
                    fallback.subscribe(fallback_subscriber);
                }),
                Some(move || {
                    o_cloned_c.lock().unwrap().complete();
                }),
            );
            self.subscribe(u)
        })
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, v: Subscriber<Self::ObsType>) -> Subscription {
        (self.subscribe_fn)(v)
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}

#[cfg(test)]
mod tests;
