use std::{
    any::Any,
    error::Error,
    future::Future,
    pin::Pin,
    sync::Arc,
    thread::JoinHandle as ThreadJoinHandle,
};

use tokio::runtime;
use tokio::task::JoinHandle;

use crate::observer::Observer;

/// A trait for types that can be subscribed to, allowing consumers to receive
/// the values emitted by an observable sequence.
pub trait Subscribeable {
    /// The type of items emitted by the observable sequence.
    type ObsType;

    /// Subscribes to the sequence and specifies how to handle emitted values.
    ///
    /// The `Subscriber` parameter defines the behavior for processing values
    /// emitted by the sequence. The returned `Subscription` lets the consumer
    /// manage the subscription, such as unsubscribing or awaiting the thread
    /// or task that produces the emissions.
    fn subscribe(&mut self, s: Subscriber<Self::ObsType>) -> Subscription;
}

/// A trait for types that can be unsubscribed, releasing the resources
/// associated with a subscription.
///
/// Unsubscribing also serves as a signal to the producer that it should stop
/// emitting values, which matters for producers running on their own threads
/// or tasks. The `Subscription` this is called on is consumed.
pub trait Unsubscribeable {
    fn unsubscribe(self);
}

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type CompleteFn = Box<dyn FnMut() + Send + Sync>;
type ErrorFn = Box<dyn FnMut(Arc<dyn Error + Send + Sync>) + Send + Sync>;

/// The consumer side of a sequence: holds the `next`, `error` and `complete`
/// callbacks and enforces the terminal-signal contract.
///
/// After the first `error` no further callbacks run for this subscriber, and
/// after `complete` neither values nor another terminal signal get through.
/// Producers are free to keep calling; the gate is here so every operator
/// stage and every demonstration producer gets the same behavior.
pub struct Subscriber<NextFnType> {
    next_fn: NextFn<NextFnType>,
    complete_fn: Option<CompleteFn>,
    error_fn: Option<ErrorFn>,
    completed: bool,
    errored: bool,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Creates a new `Subscriber` with a mandatory `next` function and
    /// optional `error` and `complete` functions.
    ///
    /// Pass `None::<fn(_)>` or `None::<fn()>` to skip the optional handlers.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static + Send,
        error_fn: Option<impl FnMut(Arc<dyn Error + Send + Sync>) + 'static + Send + Sync>,
        complete_fn: Option<impl FnMut() + 'static + Send + Sync>,
    ) -> Self {
        let mut s = Subscriber {
            next_fn: Box::new(next_fn),
            complete_fn: None,
            error_fn: None,
            completed: false,
            errored: false,
        };

        if let Some(efn) = error_fn {
            s.error_fn = Some(Box::new(efn));
        }
        if let Some(cfn) = complete_fn {
            s.complete_fn = Some(Box::new(cfn));
        }
        s
    }

    /// Creates a `Subscriber` with only a `next` function.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static + Send) -> Self {
        Subscriber {
            next_fn: Box::new(next_fn),
            complete_fn: None,
            error_fn: None,
            completed: false,
            errored: false,
        }
    }

    /// Sets the completion function, called when the sequence completes.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static + Send + Sync) {
        self.complete_fn = Some(Box::new(complete_fn));
    }

    /// Sets the error function, called when the sequence signals a failure.
    pub fn on_error(
        &mut self,
        error_fn: impl FnMut(Arc<dyn Error + Send + Sync>) + 'static + Send + Sync,
    ) {
        self.error_fn = Some(Box::new(error_fn));
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        if self.errored || self.completed {
            return;
        }
        (self.next_fn)(v);
    }

    fn complete(&mut self) {
        if self.errored || self.completed {
            return;
        }
        self.completed = true;
        if let Some(cfn) = &mut self.complete_fn {
            (cfn)();
        }
    }

    fn error(&mut self, observable_error: Arc<dyn Error + Send + Sync>) {
        if self.errored || self.completed {
            return;
        }
        self.errored = true;
        if let Some(efn) = &mut self.error_fn {
            (efn)(observable_error);
        }
    }
}

/// Handle used by a `Subscription` to await the thread or task that backs
/// an asynchronous sequence.
pub enum SubscriptionHandle {
    /// Nothing to await.
    Nil,

    /// Join handle of a `Tokio` task driving the emissions.
    JoinTask(JoinHandle<()>),

    /// Join handle of an OS thread driving the emissions.
    JoinThread(ThreadJoinHandle<()>),
}

/// Represents an established subscription, allowing control over it.
///
/// Subscribing to an observable returns a `Subscription`. It can be used to
/// unsubscribe, and for asynchronous sequences, to await the OS thread or
/// `Tokio` task producing the emissions so the caller does not outrun them.
pub struct Subscription {
    pub(crate) unsubscribe_logic: UnsubscribeLogic,
    pub(crate) subscription_future: SubscriptionHandle,
    pub(crate) runtime_handle: Result<runtime::Handle, runtime::TryCurrentError>,
}

impl Subscription {
    /// Creates a new `Subscription` from the unsubscribe logic the producer
    /// supplied and an optional handle for awaiting its thread or task.
    ///
    /// See [`UnsubscribeLogic`] for the available unsubscribe strategies and
    /// [`SubscriptionHandle`] for the handle variants.
    #[must_use]
    pub fn new(
        unsubscribe_logic: UnsubscribeLogic,
        subscription_future: SubscriptionHandle,
    ) -> Self {
        let runtime_handle = runtime::Handle::try_current();
        Subscription {
            unsubscribe_logic,
            subscription_future,
            runtime_handle,
        }
    }

    /// Awaits the task or thread associated with this subscription without
    /// blocking the current thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the awaited task was cancelled or panicked, or if
    /// joining the observable's thread fails.
    pub async fn join_concurrent(self) -> Result<(), Box<dyn Any + Send>> {
        match self.subscription_future {
            SubscriptionHandle::JoinTask(task_handle) => task_handle
                .await
                .map_err(|e| Box::new(e) as Box<dyn Any + Send>),
            SubscriptionHandle::JoinThread(thread_handle) => thread_handle.join(),
            SubscriptionHandle::Nil => Ok(()),
        }
    }

    /// Blocks the current thread until the OS thread backing this
    /// subscription finishes.
    ///
    /// # Errors
    ///
    /// Returns an error if joining the observable's thread fails.
    ///
    /// # Panics
    ///
    /// Panics when the subscription is backed by a `Tokio` task; await those
    /// with `join_concurrent().await` instead.
    pub fn join(self) -> Result<(), Box<dyn Any + Send>> {
        match self.subscription_future {
            SubscriptionHandle::JoinThread(thread_handle) => thread_handle.join(),
            SubscriptionHandle::Nil => Ok(()),
            SubscriptionHandle::JoinTask(_) => {
                panic!("subscription is backed by a Tokio task; use `join_concurrent().await` instead of `join()`")
            }
        }
    }
}

impl Unsubscribeable for Subscription {
    fn unsubscribe(self) {
        self.unsubscribe_logic.unsubscribe(self.runtime_handle);
    }
}

/// Enumerates the unsubscribe strategies a producer can hand back.
pub enum UnsubscribeLogic {
    /// No unsubscribe logic.
    Nil,

    /// This subscription depends on another one, which is unsubscribed in
    /// turn.
    Wrapped(Box<Subscription>),

    /// Unsubscribe logic defined by a function.
    Logic(Box<dyn FnOnce() + Send>),

    /// Asynchronous unsubscribe logic represented by a future. Use when the
    /// logic needs to spawn `Tokio` tasks or `.await` as part of cleaning up.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

impl UnsubscribeLogic {
    fn unsubscribe(
        mut self,
        runtime_handle: Result<runtime::Handle, runtime::TryCurrentError>,
    ) -> Self {
        match self {
            UnsubscribeLogic::Nil => (),
            UnsubscribeLogic::Logic(fnc) => {
                fnc();
                self = Self::Nil;
            }
            UnsubscribeLogic::Wrapped(subscription) => {
                subscription.unsubscribe();
                self = Self::Nil;
            }
            UnsubscribeLogic::Future(future) => {
                match runtime_handle {
                    Ok(handle) => {
                        handle.spawn(async {
                            future.await;
                        });
                    }
                    Err(e) => {
                        panic!("observable with async unsubscribe logic used outside of a Tokio runtime: {e}");
                    }
                }
                self = Self::Nil;
            }
        }
        self
    }
}
