use minirx::subscribe::Subscriber;
use minirx::{demos, DemoError, Observable, ObservableExt, Subscribeable};

use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr so the demonstration output on stdout stays
    // clean. Tune with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    demos::hello(["a", "b", "c"]);

    // Observables are cold: building one emits nothing until subscribed.
    let _source = Observable::from_iter(["a", "b", "c"].map(String::from));
    let _single = Observable::just(String::from("one object"));

    let mut blocking = demos::custom_observable_blocking(|| {
        println!("in closure");
        Err::<(), _>(DemoError::ClosureFailed)
    });
    blocking.subscribe(Subscriber::on_next(|v: String| println!("{v}")));

    println!("sync");

    let mut background = demos::custom_observable_non_blocking();
    let emissions = background.subscribe(Subscriber::on_next(|v: String| println!("{v}")));

    println!("async");

    let mut articles = demos::fetch_article_encodings(["Tiger", "Elephant"]);
    let fetches = articles.subscribe(Subscriber::on_next(|v: String| println!("{v}")));

    let mut windowed = demos::custom_observable_non_blocking()
        .skip(10)
        .take(5)
        .map(|v| format!("{v}_form"));
    let window = windowed.subscribe(Subscriber::on_next(|v: String| println!("{v}")));

    // The last three sequences emit from their own threads; wait for them so
    // the process does not exit mid-emission.
    for subscription in [emissions, fetches, window] {
        if subscription.join().is_err() {
            tracing::error!("producer thread panicked");
        }
    }
}
