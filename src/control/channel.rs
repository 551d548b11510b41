use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::ControlMessage;
use crate::util::ChannelError;

/// Producer side of the bounded channel to the motor task.
/// Sends never block: a full channel drops the message, counts it and reports it.
#[derive(Clone, Debug)]
pub struct ControlChannel {
    tx: mpsc::Sender<ControlMessage>,
    dropped: Arc<AtomicU64>,
}

impl ControlChannel {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ControlMessage>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (
            Self {
                tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            rx,
        )
    }

    pub fn send(&self, msg: ControlMessage) -> Result<(), ChannelError> {
        match self.tx.try_send(msg) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(msg)) => {
                let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::warn!("Control channel full, dropped {:?} ({} total)", msg, dropped);
                Err(ChannelError::Full)
            }
            Err(TrySendError::Closed(msg)) => {
                tracing::error!("Control channel closed, dropped {:?}", msg);
                Err(ChannelError::Closed)
            }
        }
    }

    /// Number of messages dropped on a full channel so far
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> usize {
        self.tx.max_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drop_on_full() {
        let (channel, mut rx) = ControlChannel::new(1);
        assert_eq!(channel.send(ControlMessage::StartTracking), Ok(()));
        assert_eq!(
            channel.send(ControlMessage::StopTracking),
            Err(ChannelError::Full)
        );
        assert_eq!(channel.dropped(), 1);
        assert_eq!(rx.recv().await, Some(ControlMessage::StartTracking));
        assert_eq!(channel.send(ControlMessage::StopTracking), Ok(()));
        assert_eq!(rx.recv().await, Some(ControlMessage::StopTracking));
    }

    #[tokio::test]
    async fn test_closed() {
        let (channel, rx) = ControlChannel::new(4);
        drop(rx);
        assert_eq!(
            channel.send(ControlMessage::GotoHome),
            Err(ChannelError::Closed)
        );
        assert_eq!(channel.dropped(), 0);
    }
}
