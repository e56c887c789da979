//! Non-blocking hand-off of snapshot frames to another thread.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use tracing::{debug, warn};

use fleet_sim::{SimObserver, SimSnapshot, SnapshotFrame};

/// A [`SimObserver`] that copies each snapshot into an owned
/// [`SnapshotFrame`] and offers it to a bounded channel.
///
/// The tick loop never waits on the consumer: when the channel is full the
/// frame is dropped and counted.  Once the receiver is gone the observer
/// stops building frames altogether.
///
/// ```rust,ignore
/// let (mut frames, rx) = FrameChannelObserver::bounded(16);
/// let ui = std::thread::spawn(move || for frame in rx { draw(&frame) });
/// sim.run(&mut frames)?;
/// drop(frames); // closes the channel so the consumer loop ends
/// ui.join().unwrap();
/// ```
pub struct FrameChannelObserver {
    tx:           Sender<SnapshotFrame>,
    sent:         u64,
    dropped:      u64,
    disconnected: bool,
}

impl FrameChannelObserver {
    /// An observer plus the receiving end of a channel holding at most
    /// `capacity` frames.
    pub fn bounded(capacity: usize) -> (Self, Receiver<SnapshotFrame>) {
        let (tx, rx) = bounded(capacity);
        let observer = Self { tx, sent: 0, dropped: 0, disconnected: false };
        (observer, rx)
    }

    /// Frames delivered to the channel.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Frames discarded because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl SimObserver for FrameChannelObserver {
    fn on_snapshot(&mut self, snapshot: &SimSnapshot<'_>) {
        if self.disconnected {
            return;
        }
        match self.tx.try_send(snapshot.to_frame()) {
            Ok(()) => self.sent += 1,
            Err(TrySendError::Full(frame)) => {
                self.dropped += 1;
                debug!(tick = frame.tick.0, "snapshot channel full; frame dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(tick = snapshot.tick.0, "snapshot receiver gone; no more frames");
                self.disconnected = true;
            }
        }
    }
}
