use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

use super::Buffer::{BufferState, ConsumerBuffer};
use crate::Broadcast::ClientId;
use crate::Core::QueueError;

impl<T> ConsumerBuffer<T> {
    /// Create an empty, live buffer for `owner`.
    pub(crate) fn new(owner: ClientId, capacity: usize) -> Self {
        Self {
            owner,
            state: Mutex::new(BufferState {
                values: VecDeque::with_capacity(capacity),
                live: true,
            }),
            ready: Condvar::new(),
        }
    }

    /// Append a value at the tail and wake one reader.
    /// Returns false, dropping the value, if the buffer was already cancelled.
    pub(crate) fn push(&self, value: T) -> bool {
        let mut state = self.state.lock();
        if !state.live {
            return false;
        }
        state.values.push_back(value);
        drop(state);

        self.ready.notify_one();
        true
    }

    /// Pop the oldest value without waiting.
    pub(crate) fn try_pop(&self) -> Result<Option<T>, QueueError> {
        let mut state = self.state.lock();
        if !state.live {
            return Err(QueueError::ConsumerCancelled);
        }
        Ok(state.values.pop_front())
    }

    /// Pop the oldest value, parking until one arrives, the buffer is
    /// cancelled, or `deadline` passes (`None` waits indefinitely).
    pub(crate) fn pop(&self, deadline: Option<Instant>) -> Result<T, QueueError> {
        let mut state = self.state.lock();
        loop {
            // Cancellation wins over pending values: they were discarded.
            if !state.live {
                return Err(QueueError::ConsumerCancelled);
            }
            if let Some(value) = state.values.pop_front() {
                return Ok(value);
            }

            match deadline {
                None => self.ready.wait(&mut state),
                Some(deadline) => {
                    if self.ready.wait_until(&mut state, deadline).timed_out() {
                        // One last look: a push or cancel may have raced the timer.
                        if !state.live {
                            return Err(QueueError::ConsumerCancelled);
                        }
                        return state.values.pop_front().ok_or(QueueError::Timeout);
                    }
                }
            }
        }
    }

    /// Mark the buffer dead, discard unread values and wake every waiter.
    /// Returns the number of values discarded; a second close discards none.
    pub(crate) fn close(&self) -> usize {
        let mut state = self.state.lock();
        state.live = false;
        let discarded = state.values.len();
        // Drop the values outside the lock; their destructors are arbitrary code.
        let values = std::mem::take(&mut state.values);
        drop(state);

        self.ready.notify_all();
        drop(values);
        discarded
    }

    /// Number of values waiting to be read.
    pub(crate) fn len(&self) -> usize {
        self.state.lock().values.len()
    }

    pub(crate) fn is_live(&self) -> bool {
        self.state.lock().live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn buffer() -> ConsumerBuffer<u32> {
        ConsumerBuffer::new(ClientId(1), 4)
    }

    #[test]
    fn pops_in_push_order() {
        let b = buffer();
        for i in 0..10 {
            assert!(b.push(i));
        }
        assert_eq!(b.len(), 10);
        for i in 0..10 {
            assert_eq!(b.pop(None), Ok(i));
        }
        assert_eq!(b.try_pop(), Ok(None));
    }

    #[test]
    fn close_discards_and_rejects() {
        let b = buffer();
        b.push(1);
        b.push(2);
        assert_eq!(b.close(), 2);
        assert!(!b.is_live());
        assert!(!b.push(3));
        assert_eq!(b.len(), 0);
        assert_eq!(b.try_pop(), Err(QueueError::ConsumerCancelled));
        assert_eq!(b.pop(None), Err(QueueError::ConsumerCancelled));
        assert_eq!(b.close(), 0);
    }

    #[test]
    fn close_wakes_parked_reader() {
        let b = Arc::new(buffer());
        let reader = {
            let b = Arc::clone(&b);
            thread::spawn(move || b.pop(None))
        };
        thread::sleep(Duration::from_millis(50));
        b.close();
        assert_eq!(reader.join().unwrap(), Err(QueueError::ConsumerCancelled));
    }

    #[test]
    fn push_wakes_parked_reader() {
        let b = Arc::new(buffer());
        let reader = {
            let b = Arc::clone(&b);
            thread::spawn(move || b.pop(None))
        };
        thread::sleep(Duration::from_millis(50));
        b.push(7);
        assert_eq!(reader.join().unwrap(), Ok(7));
    }

    #[test]
    fn deadline_expires_on_empty_buffer() {
        let b = buffer();
        let deadline = Instant::now() + Duration::from_millis(20);
        assert_eq!(b.pop(Some(deadline)), Err(QueueError::Timeout));
        assert!(b.is_live());
    }
}
