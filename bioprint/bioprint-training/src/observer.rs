//! Training progress reporting and cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use crate::config::ModelType;
use crate::metrics::EpochMetrics;

/// Progress notification emitted during training.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    /// Preprocessing finished and training is about to begin.
    Started {
        /// Model family being trained.
        model_type: ModelType,
        /// Rows in the training split.
        train_samples: usize,
        /// Rows in the test split.
        test_samples: usize,
    },

    /// A neural training epoch completed.
    EpochFinished(EpochMetrics),

    /// Training completed.
    Finished {
        /// Accuracy of the final result.
        accuracy: f64,
    },
}

/// Receives training progress.
///
/// Implemented for closures and for [`ChannelObserver`].
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use bioprint_training::{TrainingEvent, TrainingObserver};
///
/// let seen = AtomicUsize::new(0);
/// let observer = |_: &TrainingEvent| {
///     seen.fetch_add(1, Ordering::Relaxed);
/// };
/// observer.on_event(&TrainingEvent::Finished { accuracy: 1.0 });
/// assert_eq!(seen.load(Ordering::Relaxed), 1);
/// ```
pub trait TrainingObserver: Send + Sync {
    /// Handles one event. Must not block for long.
    fn on_event(&self, event: &TrainingEvent);
}

impl<F> TrainingObserver for F
where
    F: Fn(&TrainingEvent) + Send + Sync,
{
    fn on_event(&self, event: &TrainingEvent) {
        self(event);
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrainingObserver for NoopObserver {
    fn on_event(&self, _event: &TrainingEvent) {}
}

/// Forwards events over a `std::sync::mpsc` channel.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::Sender<TrainingEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<TrainingEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Wraps an existing sender.
    #[must_use]
    pub const fn from_sender(sender: mpsc::Sender<TrainingEvent>) -> Self {
        Self { sender }
    }
}

impl TrainingObserver for ChannelObserver {
    fn on_event(&self, event: &TrainingEvent) {
        // A closed channel means nobody is listening.
        let _ = self.sender.send(event.clone());
    }
}

/// Shared flag that asks a running training loop to stop.
///
/// Clones share state. The loop checks the flag between epochs and fails
/// with [`crate::TrainingError::Interrupted`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
