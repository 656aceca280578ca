use crate::network::{DonationReply, FetchCommand};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, warn};
use tracker_common::{snapshot::DonationSnapshot, tracker::RequestTarget};

/// Polled donation data and its error slot, with a pluggable request target.
///
/// Fetches run on the networking thread. Every command carries a generation
/// number; a reply whose generation no longer matches (the target changed,
/// or a newer fetch superseded it) is stale and gets dropped, so a slow
/// response can never overwrite fresher state.
pub struct DonationProvider {
    fetch_tx: Sender<FetchCommand>,
    reply_rx: Receiver<DonationReply>,
    target: Option<RequestTarget>,
    generation: u64,
    in_flight: bool,
    data: Option<DonationSnapshot>,
    error: Option<String>,
}

impl DonationProvider {
    pub fn new(fetch_tx: Sender<FetchCommand>, reply_rx: Receiver<DonationReply>) -> Self {
        Self {
            fetch_tx,
            reply_rx,
            target: None,
            generation: 0,
            in_flight: false,
            data: None,
            error: None,
        }
    }

    /// Points subsequent fetches at `target`. A no-op under an unchanged
    /// target; an actual change invalidates any fetch still in flight and
    /// leaves the fetch itself to the next interval tick.
    pub fn set_request_target(&mut self, target: RequestTarget) {
        if self.target.as_ref() == Some(&target) {
            return;
        }
        debug!("Donation request target changed to {target:?}");
        self.target = Some(target);
        self.generation += 1;
        self.in_flight = false;
    }

    /// Requests a fetch of the current target. Never blocks. While a fetch
    /// is outstanding this is a no-op, so a response slower than the polling
    /// interval cannot stack up overlapping requests.
    pub fn refresh(&mut self) {
        let Some(target) = self.target.clone() else {
            return;
        };
        if self.in_flight {
            debug!("Previous donation fetch still in flight, skipping this tick");
            return;
        }
        self.generation += 1;
        match self.fetch_tx.try_send(FetchCommand {
            generation: self.generation,
            target,
        }) {
            Ok(()) => self.in_flight = true,
            Err(TrySendError::Full(_)) => warn!("Networking thread is not accepting fetches"),
            Err(TrySendError::Disconnected(_)) => warn!("Networking thread is gone"),
        }
    }

    /// Drains replies; returns whether the snapshot or the error slot
    /// changed. A failed fetch keeps the last good snapshot (stale reads
    /// beat a blank overlay) and only sets the error slot.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok(reply) = self.reply_rx.try_recv() {
            if reply.generation != self.generation {
                debug!(
                    "Dropping stale donation reply (generation {}, current {})",
                    reply.generation, self.generation
                );
                continue;
            }
            self.in_flight = false;
            match reply.result {
                Ok(snapshot) => {
                    changed |= self.data.as_ref() != Some(&snapshot) || self.error.is_some();
                    self.data = Some(snapshot);
                    self.error = None;
                }
                Err(message) => {
                    changed |= self.error.as_deref() != Some(message.as_str());
                    self.error = Some(message);
                }
            }
        }
        changed
    }

    pub fn data(&self) -> Option<&DonationSnapshot> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossbeam_channel::bounded;

    fn snapshot(num_donations: u64) -> DonationSnapshot {
        DonationSnapshot {
            display_name: String::from("Jane Doe"),
            event_name: None,
            num_donations,
            sum_donations: 10.0 * num_donations as f64,
            fundraising_goal: 1000.0,
        }
    }

    fn provider() -> (
        DonationProvider,
        Receiver<FetchCommand>,
        Sender<DonationReply>,
    ) {
        let (fetch_tx, fetch_rx) = bounded(3);
        let (reply_tx, reply_rx) = bounded(3);
        (DonationProvider::new(fetch_tx, reply_rx), fetch_rx, reply_tx)
    }

    #[test]
    fn test_refresh_without_target_is_noop() {
        let (mut provider, fetch_rx, _reply_tx) = provider();
        provider.refresh();
        assert!(fetch_rx.try_recv().is_err());
    }

    #[test]
    fn test_no_overlapping_fetches() {
        let (mut provider, fetch_rx, reply_tx) = provider();
        provider.set_request_target(RequestTarget::Team(String::from("T1")));

        provider.refresh();
        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();
        assert!(fetch_rx.try_recv().is_err(), "second refresh must coalesce");

        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Ok(snapshot(1)),
            })
            .unwrap();
        assert!(provider.poll());

        provider.refresh();
        assert!(fetch_rx.try_recv().is_ok(), "fetches resume after a reply");
    }

    #[test]
    fn test_stale_reply_dropped() {
        let (mut provider, fetch_rx, reply_tx) = provider();
        provider.set_request_target(RequestTarget::Team(String::from("T1")));
        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();

        // Retargeting abandons the outstanding fetch.
        provider.set_request_target(RequestTarget::Participant(String::from("P1")));
        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Ok(snapshot(5)),
            })
            .unwrap();
        assert!(!provider.poll());
        assert_eq!(provider.data(), None);
    }

    #[test]
    fn test_redundant_retarget_keeps_fetch_alive() {
        let (mut provider, fetch_rx, reply_tx) = provider();
        provider.set_request_target(RequestTarget::Team(String::from("T1")));
        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();

        provider.set_request_target(RequestTarget::Team(String::from("T1")));
        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Ok(snapshot(5)),
            })
            .unwrap();
        assert!(provider.poll());
        assert_eq!(provider.data().unwrap().num_donations, 5);
    }

    #[test]
    fn test_fetch_error_keeps_stale_snapshot() {
        let (mut provider, fetch_rx, reply_tx) = provider();
        provider.set_request_target(RequestTarget::Team(String::from("T1")));

        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();
        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Ok(snapshot(10)),
            })
            .unwrap();
        assert!(provider.poll());

        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();
        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Err(String::from("connection reset")),
            })
            .unwrap();
        assert!(provider.poll());
        assert_eq!(provider.data().unwrap().num_donations, 10);
        assert_eq!(provider.error(), Some("connection reset"));

        provider.refresh();
        let command = fetch_rx.try_recv().unwrap();
        reply_tx
            .send(DonationReply {
                generation: command.generation,
                result: Ok(snapshot(11)),
            })
            .unwrap();
        assert!(provider.poll());
        assert_eq!(provider.error(), None, "a success clears the error slot");
    }
}
