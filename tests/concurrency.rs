use connector_queue::{Queue, QueueError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Barrier};
use std::thread;
use std::time::Duration;

// Upper bound for "promptly"; generous so loaded CI machines do not flake.
const PROMPT: Duration = Duration::from_secs(5);

#[test]
fn cancel_wakes_blocked_consumer_promptly() {
    let q: Queue<u32> = Queue::new();
    let c = Arc::new(q.new_consumer().unwrap());
    let (tx, rx) = mpsc::channel();

    let reader = {
        let c = Arc::clone(&c);
        thread::spawn(move || tx.send(c.consume()).unwrap())
    };
    thread::sleep(Duration::from_millis(50));
    c.cancel();

    let result = rx.recv_timeout(PROMPT).expect("blocked consume never woke up");
    assert_eq!(result, Err(QueueError::ConsumerCancelled));
    reader.join().unwrap();
}

#[test]
fn cancel_wakes_every_thread_blocked_on_one_consumer() {
    let q: Queue<u32> = Queue::new();
    let c = Arc::new(q.new_consumer().unwrap());
    let (tx, rx) = mpsc::channel();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let c = Arc::clone(&c);
            let tx = tx.clone();
            thread::spawn(move || tx.send(c.consume()).unwrap())
        })
        .collect();
    thread::sleep(Duration::from_millis(50));
    c.cancel();

    for _ in 0..4 {
        let result = rx.recv_timeout(PROMPT).expect("a blocked reader never woke up");
        assert_eq!(result, Err(QueueError::ConsumerCancelled));
    }
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn blocked_consumer_receives_value_produced_later() {
    let q: Queue<String> = Queue::new();
    let c = q.new_consumer().unwrap();
    let p = q.new_producer().unwrap();

    let reader = thread::spawn(move || (c.consume(), c.consume()));
    thread::sleep(Duration::from_millis(20));
    p.produce("five".to_string()).unwrap();
    p.produce("six".to_string()).unwrap();

    let (first, second) = reader.join().unwrap();
    assert_eq!(first.as_deref(), Ok("five"));
    assert_eq!(second.as_deref(), Ok("six"));
}

#[test]
fn many_producers_many_consumers_keep_per_producer_order() {
    const PRODUCERS: usize = 4;
    const CONSUMERS: usize = 4;
    const PER_PRODUCER: u32 = 2_000;

    let q: Queue<(usize, u32)> = Queue::new();
    let consumers: Vec<_> = (0..CONSUMERS).map(|_| q.new_consumer().unwrap()).collect();
    let start = Arc::new(Barrier::new(PRODUCERS));

    let writers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let p = q.new_producer().unwrap();
            let start = Arc::clone(&start);
            thread::spawn(move || {
                start.wait();
                for i in 0..PER_PRODUCER {
                    p.produce((id, i)).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = consumers
        .into_iter()
        .map(|c| {
            thread::spawn(move || {
                let mut next = [0u32; PRODUCERS];
                for _ in 0..(PRODUCERS as u32 * PER_PRODUCER) {
                    let (id, i) = c.consume().unwrap();
                    assert_eq!(i, next[id], "producer {} out of order", id);
                    next[id] += 1;
                }
                assert_eq!(c.try_consume(), Ok(None));
                next
            })
        })
        .collect();

    for w in writers {
        w.join().unwrap();
    }
    for r in readers {
        assert_eq!(r.join().unwrap(), [PER_PRODUCER; PRODUCERS]);
    }
}

#[test]
fn consumers_registered_mid_stream_see_a_gapless_suffix() {
    const TOTAL: u32 = 5_000;

    let q: Queue<u32> = Queue::new();
    let p = q.new_producer().unwrap();
    let joined = Arc::new(Mutex::new(Vec::new()));
    let done = Arc::new(AtomicBool::new(false));

    let registrar = {
        let q = q.clone();
        let joined = Arc::clone(&joined);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::Acquire) {
                joined.lock().push(q.new_consumer().unwrap());
                thread::sleep(Duration::from_micros(100));
            }
        })
    };

    for i in 0..TOTAL {
        p.produce(i).unwrap();
    }
    done.store(true, Ordering::Release);
    registrar.join().unwrap();

    let consumers = joined.lock();
    for c in consumers.iter() {
        let mut got = Vec::new();
        while let Ok(Some(v)) = c.try_consume() {
            got.push(v);
        }
        // Whatever a consumer saw must be TOTAL-k..TOTAL with nothing missing.
        if let Some(&first) = got.first() {
            let expected: Vec<u32> = (first..TOTAL).collect();
            assert_eq!(got, expected);
        }
    }
}

#[test]
fn random_cancellation_churn_never_hangs_or_leaks_values() {
    let q: Queue<u64> = Queue::new();
    let stop = Arc::new(AtomicBool::new(false));

    let producer = {
        let p = q.new_producer().unwrap();
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut i = 0u64;
            while !stop.load(Ordering::Acquire) {
                p.produce(i).unwrap();
                i += 1;
            }
        })
    };

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let q = q.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let c = Arc::new(q.new_consumer().unwrap());
                    let canceller = {
                        let handle = c.cancel_handle();
                        let delay = Duration::from_micros(fastrand::u64(0..500));
                        thread::spawn(move || {
                            thread::sleep(delay);
                            handle.cancel();
                        })
                    };
                    let mut last = None;
                    loop {
                        match c.consume() {
                            Ok(v) => {
                                if let Some(prev) = last {
                                    assert!(v > prev, "values must arrive in production order");
                                }
                                last = Some(v);
                            }
                            Err(QueueError::ConsumerCancelled) => break,
                            Err(e) => panic!("unexpected error {e}"),
                        }
                    }
                    canceller.join().unwrap();
                    assert_eq!(c.consume(), Err(QueueError::ConsumerCancelled));
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }
    stop.store(true, Ordering::Release);
    producer.join().unwrap();
    assert_eq!(q.consumer_count(), 0);
}
