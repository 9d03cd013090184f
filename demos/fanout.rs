// In demos/fanout.rs
//
// Usage: cargo run --example fanout [num_messages] [num_consumers]
//
// Two producer threads broadcast "<producer>:<i>:<sha256>" lines; every
// consumer thread checks each digest and per-producer ordering. Ctrl+C
// cancels all consumers early.
use connector_queue::{init_tracing, Queue, QueueBuilder, QueueError};
use sha2::{Digest, Sha256};
use std::env;
use std::thread;

const PRODUCERS: usize = 2;

fn digest(producer: usize, i: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("message_{}_{}", producer, i).as_bytes());
    format!("{:x}", hasher.finalize())
}

fn main() -> Result<(), QueueError> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let num_messages: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1000);
    let num_consumers: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(4);

    let queue: Queue<String> = QueueBuilder::new().with_name("fanout-demo").build();

    // Consumers first, so nothing produced below is missed.
    let consumers = (0..num_consumers)
        .map(|_| queue.new_consumer())
        .collect::<Result<Vec<_>, _>>()?;
    let cancel_handles: Vec<_> = consumers.iter().map(|c| c.cancel_handle()).collect();

    ctrlc::set_handler(move || {
        println!("Interrupted: cancelling consumers");
        for handle in &cancel_handles {
            handle.cancel();
        }
    })
    .expect("Error setting Ctrl+C handler");

    println!(
        "Fan-out: {} producers x {} messages -> {} consumers",
        PRODUCERS, num_messages, num_consumers
    );
    let start = std::time::Instant::now();

    let readers: Vec<_> = consumers
        .into_iter()
        .enumerate()
        .map(|(n, consumer)| {
            thread::spawn(move || {
                let mut next = [0usize; PRODUCERS];
                let mut received = 0;
                while received < PRODUCERS * num_messages {
                    let line = match consumer.consume() {
                        Ok(line) => line,
                        Err(e) => {
                            eprintln!("Consumer {}: stopped after {} messages: {}", n, received, e);
                            return received;
                        }
                    };
                    let mut parts = line.splitn(3, ':');
                    let (p, i, hash) = match (parts.next(), parts.next(), parts.next()) {
                        (Some(p), Some(i), Some(hash)) => (p, i, hash),
                        _ => panic!("malformed line {:?}", line),
                    };
                    let p: usize = p.parse().expect("producer index");
                    let i: usize = i.parse().expect("message index");
                    assert_eq!(i, next[p], "out of order from producer {}", p);
                    assert_eq!(hash, digest(p, i), "corrupt digest");
                    next[p] += 1;
                    received += 1;
                }
                println!("Consumer {}: all {} messages verified", n, received);
                received
            })
        })
        .collect();

    let writers: Vec<_> = (0..PRODUCERS)
        .map(|p| -> Result<_, QueueError> {
            let producer = queue.new_producer()?;
            Ok(thread::spawn(move || {
                for i in 0..num_messages {
                    if let Err(e) = producer.produce(format!("{}:{}:{}", p, i, digest(p, i))) {
                        eprintln!("Producer {}: failed at {}: {}", p, i, e);
                        return;
                    }
                }
            }))
        })
        .collect::<Result<Vec<_>, QueueError>>()?;

    for w in writers {
        w.join().expect("producer thread panicked");
    }
    let total: usize = readers
        .into_iter()
        .map(|r| r.join().expect("consumer thread panicked"))
        .sum();

    let elapsed = start.elapsed();
    println!("Delivered {} messages in {:.2?}", total, elapsed);
    println!(
        "Throughput: {:.2} deliveries/sec",
        total as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
