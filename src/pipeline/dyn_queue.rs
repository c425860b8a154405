//! Unbounded, order-preserving hand-off between producers and consumers.
//!
//! A relay thread sits between a small bounded input channel and a small bounded output
//! channel and keeps everything in between in an owned `VecDeque`. The relay is always ready
//! to receive, so a pool that both pops and pushes (the folder scan pool) can never block on
//! a full buffer while every worker is itself waiting to push.
//!
//! Closing (via [`QueueCloser::close`], dropping the closer, or dropping every
//! [`QueueInput`]) stops intake; buffered items are still delivered before [`QueueOutput::pop`]
//! starts returning `None`.

use crossbeam_channel::{Receiver, Select, Sender, bounded};
use std::collections::VecDeque;
use std::io;
use std::thread::{self, JoinHandle};

/// Producer handle. Cheap to clone.
pub struct QueueInput<T> {
    tx: Sender<T>,
}

impl<T> Clone for QueueInput<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueInput<T> {
    /// Hand `item` to the relay. Only waits for the relay to pick it up, never for consumers.
    /// Returns the item back if the queue was closed.
    pub fn push(&self, item: T) -> Result<(), T> {
        self.tx.send(item).map_err(|e| e.into_inner())
    }
}

/// Consumer handle. Cheap to clone.
pub struct QueueOutput<T> {
    rx: Receiver<T>,
}

impl<T> Clone for QueueOutput<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T> QueueOutput<T> {
    /// Block until an item is available. `None` once the queue is closed and drained.
    pub fn pop(&self) -> Option<T> {
        self.rx.recv().ok()
    }
}

/// Closes the queue input side. Dropping it has the same effect as [`QueueCloser::close`]
/// except that the relay thread is not joined.
pub struct QueueCloser {
    close_tx: Sender<()>,
    relay: JoinHandle<()>,
}

impl QueueCloser {
    /// Stop intake and wait for the relay to hand out (or give up on) its backlog.
    pub fn close(self) -> thread::Result<()> {
        drop(self.close_tx);
        self.relay.join()
    }
}

/// Create a queue whose channel buffers hold `capacity` items on each side of the relay.
/// Fails only if the relay thread cannot be spawned.
pub fn dyn_queue<T: Send + 'static>(
    capacity: usize,
) -> io::Result<(QueueInput<T>, QueueOutput<T>, QueueCloser)> {
    let (in_tx, in_rx) = bounded::<T>(capacity);
    let (out_tx, out_rx) = bounded::<T>(capacity);
    let (close_tx, close_rx) = bounded::<()>(0);
    let relay = thread::Builder::new()
        .name("m3ugen-queue-relay".to_string())
        .spawn(move || relay_loop(in_rx, out_tx, close_rx))?;
    Ok((
        QueueInput { tx: in_tx },
        QueueOutput { rx: out_rx },
        QueueCloser { close_tx, relay },
    ))
}

fn relay_loop<T>(input: Receiver<T>, output: Sender<T>, close_rx: Receiver<()>) {
    let mut backlog: VecDeque<T> = VecDeque::new();
    loop {
        let mut sel = Select::new();
        let close_op = sel.recv(&close_rx);
        let input_op = sel.recv(&input);
        // Offer the head of the backlog only when there is one.
        let output_op = (!backlog.is_empty()).then(|| sel.send(&output));

        let oper = sel.select();
        let index = oper.index();
        if index == close_op {
            // Closer dropped: the recv completes with a disconnect.
            let _ = oper.recv(&close_rx);
            break;
        } else if index == input_op {
            match oper.recv(&input) {
                Ok(item) => backlog.push_back(item),
                Err(_) => break,
            }
        } else if Some(index) == output_op
            && let Some(item) = backlog.pop_front()
            && oper.send(&output, item).is_err()
        {
            // Every consumer is gone; nothing left to serve.
            return;
        }
    }

    // Intake stopped. Anything already sitting in the input buffer was accepted before the close.
    backlog.extend(input.try_iter());
    drop(input);
    for item in backlog {
        if output.send(item).is_err() {
            return;
        }
    }
    // Dropping `output` disconnects consumers once they have drained it.
}
