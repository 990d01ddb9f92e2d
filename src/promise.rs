use crate::{Message, Proposal};

/// Outcome of checking an incoming proposal against the current promise.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Decision {
    /// Proposal is lower than the promise; the acceptor will not move backward.
    Cancel,
    /// Proposal is acceptable, but a value accepted under an earlier
    /// proposal is still awaiting commit. The proposer must adopt it.
    PrevAccepted(Message),
    /// Proposal is acceptable and no value is held.
    Ok,
}

/// Current promise of the acceptor along with the value, if any, accepted
/// under that promise and not yet committed.
#[derive(Debug, Default)]
pub struct PromiseTracker {
    min_proposal: Proposal,
    accepted: Option<Message>,
}

impl PromiseTracker {
    pub fn new() -> PromiseTracker {
        PromiseTracker::default()
    }

    /// Highest proposal promised
    pub fn min_proposal(&self) -> Proposal {
        self.min_proposal
    }

    /// Value accepted under the current promise
    #[cfg(test)]
    pub fn accepted(&self) -> Option<&Message> {
        self.accepted.as_ref()
    }

    /// Compares the incoming proposal with the promise without changing state.
    pub fn evaluate(&self, incoming: Proposal) -> Decision {
        if incoming < self.min_proposal {
            Decision::Cancel
        } else if let Some(ref msg) = self.accepted {
            Decision::PrevAccepted(msg.clone())
        } else {
            Decision::Ok
        }
    }

    /// Phase 1 promise. The decision is computed before the promise moves,
    /// then the promise is raised to the incoming proposal. A cancelled
    /// proposal is lower than the promise and leaves it untouched.
    pub fn promise(&mut self, incoming: Proposal) -> Decision {
        let decision = self.evaluate(incoming);
        if decision != Decision::Cancel {
            trace!("Promise raised from {:?} to {:?}", self.min_proposal, incoming);
            self.min_proposal = incoming;
        }
        decision
    }

    /// Phase 2 acceptance of a value under `proposal`. The caller has
    /// already checked the proposal against the promise.
    pub fn accept(&mut self, proposal: Proposal, msg: Message) {
        debug_assert!(proposal >= self.min_proposal);
        self.min_proposal = proposal;
        self.accepted = Some(msg);
    }

    /// Drops both the promise and any accepted value, ready for the next slot.
    pub fn reset(&mut self) {
        self.min_proposal = Proposal::SENTINEL;
        self.accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate() {
        let mut tracker = PromiseTracker::new();
        assert_eq!(Decision::Ok, tracker.evaluate(Proposal::new(0, 0)));

        tracker.accept(Proposal::new(2, 1), "abc".into());

        // lower number, and equal number with lower id
        assert_eq!(Decision::Cancel, tracker.evaluate(Proposal::new(1, 9)));
        assert_eq!(Decision::Cancel, tracker.evaluate(Proposal::new(2, 0)));

        // equal and higher carry the accepted value forward
        assert_eq!(
            Decision::PrevAccepted("abc".into()),
            tracker.evaluate(Proposal::new(2, 1))
        );
        assert_eq!(
            Decision::PrevAccepted("abc".into()),
            tracker.evaluate(Proposal::new(3, 0))
        );
    }

    #[test]
    fn promise_is_monotonic() {
        let mut tracker = PromiseTracker::new();
        assert_eq!(Decision::Ok, tracker.promise(Proposal::new(5, 2)));
        assert_eq!(Proposal::new(5, 2), tracker.min_proposal());

        assert_eq!(Decision::Cancel, tracker.promise(Proposal::new(4, 7)));
        assert_eq!(Proposal::new(5, 2), tracker.min_proposal());

        assert_eq!(Decision::Ok, tracker.promise(Proposal::new(5, 3)));
        assert_eq!(Proposal::new(5, 3), tracker.min_proposal());
    }

    #[test]
    fn cancel_keeps_accepted_value() {
        let mut tracker = PromiseTracker::new();
        tracker.accept(Proposal::new(3, 3), "x".into());
        assert_eq!(Decision::Cancel, tracker.promise(Proposal::new(1, 1)));
        assert_eq!(Some(&Message::from("x")), tracker.accepted());
    }

    #[test]
    fn reset() {
        let mut tracker = PromiseTracker::new();
        tracker.accept(Proposal::new(3, 3), "x".into());
        tracker.reset();
        assert_eq!(Proposal::SENTINEL, tracker.min_proposal());
        assert_eq!(None, tracker.accepted());
        assert_eq!(Decision::Ok, tracker.evaluate(Proposal::new(0, 0)));
    }
}
