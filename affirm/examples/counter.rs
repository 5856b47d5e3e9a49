use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread::{self, ThreadId},
    time::Duration,
};

use affirm::{
    Assertion, MatchesBefore, RunsInThreads,
    matchers::{Matches, MatcherOf, Not},
};

const THREADS: usize = 20;
const ATTEMPTS: usize = 100;

// Adds ATTEMPTS to the counter, one atomic step at a time
fn synchronized(counter: &AtomicUsize) -> bool {
    for _ in 0..ATTEMPTS {
        counter.fetch_add(1, Ordering::SeqCst);
    }
    true
}

// Only the first thread to arrive gets to touch the counter
struct Unsynchronized {
    owner: Mutex<Option<ThreadId>>,
}

impl Unsynchronized {
    fn apply(&self, counter: &AtomicUsize) -> bool {
        let me = thread::current().id();
        let owner = *self
            .owner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get_or_insert(me);
        if owner != me {
            return false;
        }
        synchronized(counter)
    }
}

fn main() -> affirm::Result {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let counter = AtomicUsize::new(0);
    let result = Assertion::value(
        "synchronized counter survives concurrent callers",
        RunsInThreads::with_threads(&counter, THREADS)?,
        Matches::labeled("synchronized", |c: &&AtomicUsize| synchronized(c)),
    )
    .affirm();
    println!(
        "synchronized: {:?}, counter = {}",
        result,
        counter.load(Ordering::SeqCst)
    );

    let counter = AtomicUsize::new(0);
    let unsynchronized = Unsynchronized {
        owner: Mutex::new(None),
    };
    let result = Assertion::value(
        "unsynchronized counter loses updates",
        RunsInThreads::with_threads(&counter, THREADS)?,
        Not::new(Matches::labeled("unsynchronized", |c: &&AtomicUsize| {
            unsynchronized.apply(c)
        })),
    )
    .affirm();
    println!(
        "unsynchronized: {:?}, counter = {}",
        result,
        counter.load(Ordering::SeqCst)
    );

    let slow = MatchesBefore::millis(
        50,
        MatcherOf::new(
            |n: &u64| {
                thread::sleep(Duration::from_millis(*n));
                true
            },
            |desc: &mut affirm::Description| {
                desc.append_text("sleeps and agrees");
            },
            |_: &u64, _: &mut affirm::Description| {},
        ),
    );
    if let Err(e) = Assertion::value("answers in time", 500, slow).affirm() {
        println!("{e}");
    }
    Ok(())
}
