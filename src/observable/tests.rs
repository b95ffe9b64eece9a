use super::*;

#[derive(Debug)]
struct TestError;

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "test error")
    }
}

impl Error for TestError {}

#[test]
fn from_iter_emits_in_order_then_completes() {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);
    let completions = Arc::new(Mutex::new(0));
    let completions_c = Arc::clone(&completions);

    let o = Subscriber::new(
        move |v: u32| emissions_c.lock().unwrap().push(v),
        None::<fn(_)>,
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    let mut s = Observable::from_iter([1, 2, 3]);
    s.subscribe(o);

    assert_eq!(*emissions.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn just_emits_single_value_then_completes() {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);
    let completions = Arc::new(Mutex::new(0));
    let completions_c = Arc::clone(&completions);

    let o = Subscriber::new(
        move |v: &str| emissions_c.lock().unwrap().push(v),
        None::<fn(_)>,
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    let mut s = Observable::just("one object");
    s.subscribe(o);

    assert_eq!(*emissions.lock().unwrap(), vec!["one object"]);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn error_observable_signals_failure_and_nothing_else() {
    let emissions: Arc<Mutex<Vec<i32>>> = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);
    let errors = Arc::new(Mutex::new(Vec::new()));
    let errors_c = Arc::clone(&errors);
    let completions = Arc::new(Mutex::new(0));
    let completions_c = Arc::clone(&completions);

    let o = Subscriber::new(
        move |v| emissions_c.lock().unwrap().push(v),
        Some(move |e: Arc<dyn Error + Send + Sync>| {
            errors_c.lock().unwrap().push(e.to_string());
        }),
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    let mut s = Observable::<i32>::error(Arc::new(TestError));
    s.subscribe(o);

    assert!(emissions.lock().unwrap().is_empty());
    assert_eq!(*errors.lock().unwrap(), vec!["test error".to_string()]);
    assert_eq!(*completions.lock().unwrap(), 0);
}

#[test]
fn subscriber_suppresses_callbacks_after_error() {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);
    let errors = Arc::new(Mutex::new(0));
    let errors_c = Arc::clone(&errors);
    let completions = Arc::new(Mutex::new(0));
    let completions_c = Arc::clone(&completions);

    let mut subscriber = Subscriber::new(
        move |v: i32| emissions_c.lock().unwrap().push(v),
        Some(move |_| *errors_c.lock().unwrap() += 1),
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    subscriber.next(1);
    subscriber.error(Arc::new(TestError));
    subscriber.next(2);
    subscriber.error(Arc::new(TestError));
    subscriber.complete();

    assert_eq!(*emissions.lock().unwrap(), vec![1]);
    assert_eq!(*errors.lock().unwrap(), 1);
    assert_eq!(*completions.lock().unwrap(), 0);
}

#[test]
fn subscriber_suppresses_callbacks_after_complete() {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);
    let errors = Arc::new(Mutex::new(0));
    let errors_c = Arc::clone(&errors);
    let completions = Arc::new(Mutex::new(0));
    let completions_c = Arc::clone(&completions);

    let mut subscriber = Subscriber::new(
        move |v: i32| emissions_c.lock().unwrap().push(v),
        Some(move |_| *errors_c.lock().unwrap() += 1),
        Some(move || *completions_c.lock().unwrap() += 1),
    );

    subscriber.next(1);
    subscriber.complete();
    subscriber.next(2);
    subscriber.complete();
    subscriber.error(Arc::new(TestError));

    assert_eq!(*emissions.lock().unwrap(), vec![1]);
    assert_eq!(*errors.lock().unwrap(), 0);
    assert_eq!(*completions.lock().unwrap(), 1);
}

#[test]
fn skip_drops_leading_values() {
    let emissions = Arc::new(Mutex::new(Vec::new()));
    let emissions_c = Arc::clone(&emissions);

    let s = Observable::new(move |mut o: Subscriber<u32>| {
        for i in 0..10 {
            o.next(i);
        }
        o.complete();

        Subscription::new(UnsubscribeLogic::Nil, SubscriptionHandle::Nil)
    });

    let mut s = s.skip(4);
    s.subscribe(Subscriber::on_next(move |v| {
        emissions_c.lock().unwrap().push(v);
    }));

    assert_eq!(*emissions.lock().unwrap(), vec![4, 5, 6, 7, 8, 9]);
}
