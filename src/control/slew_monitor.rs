use async_trait::async_trait;
use tokio::sync::watch;

use crate::util::ChannelError;

/// Slew status published by the motor task
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct SlewState {
    pub slewing: bool,
    /// Goto commands the motor task has finished so far
    pub gotos_done: u64,
}

/// View of the motor task's slewing status
#[async_trait]
pub trait SlewMonitor: Send + Sync {
    fn state(&self) -> SlewState;

    fn is_slewing(&self) -> bool {
        self.state().slewing
    }

    /// Suspends until a goto issued after `gotos_done` reading has finished
    /// and nothing is slewing. No timeout. `Closed` if the motor task went away first.
    async fn wait_goto_done(&self, gotos_done: u64) -> Result<(), ChannelError>;
}

/// Reader half of the motor task's slew status
#[derive(Clone, Debug)]
pub struct SlewFlag {
    rx: watch::Receiver<SlewState>,
}

/// Writer half, owned by the motor task
#[derive(Debug)]
pub struct SlewReporter {
    tx: watch::Sender<SlewState>,
}

pub fn slew_status() -> (SlewReporter, SlewFlag) {
    let (tx, rx) = watch::channel(SlewState::default());
    (SlewReporter { tx }, SlewFlag { rx })
}

impl SlewReporter {
    pub fn begin(&self) {
        self.tx.send_modify(|s| s.slewing = true);
    }

    /// Slew ended without completing a goto
    pub fn end(&self) {
        self.tx.send_modify(|s| s.slewing = false);
    }

    pub fn finish_goto(&self) {
        self.tx.send_modify(|s| {
            s.slewing = false;
            s.gotos_done += 1;
        });
    }
}

#[async_trait]
impl SlewMonitor for SlewFlag {
    fn state(&self) -> SlewState {
        *self.rx.borrow()
    }

    async fn wait_goto_done(&self, gotos_done: u64) -> Result<(), ChannelError> {
        let mut rx = self.rx.clone();
        let result = match rx
            .wait_for(|s| !s.slewing && gotos_done < s.gotos_done)
            .await
        {
            Ok(_) => Ok(()),
            Err(_) => Err(ChannelError::Closed),
        };
        result
    }
}
