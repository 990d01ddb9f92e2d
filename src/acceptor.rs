use crate::{
    messages::*,
    promise::{Decision, PromiseTracker},
    slots::SlotLog,
    Configuration, Error, Proposal, Slot,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Paxos memory of an acceptor: the current promise and the log
/// of committed slots. Every request observes and updates both together.
#[derive(Debug, Default)]
pub struct AcceptorState {
    promise: PromiseTracker,
    log: SlotLog,
}

impl AcceptorState {
    /// Empty log with a promise lower than any proposal
    pub fn new() -> AcceptorState {
        AcceptorState::default()
    }

    /// Highest proposal currently promised
    pub fn min_proposal(&self) -> Proposal {
        self.promise.min_proposal()
    }

    /// Next slot believed to be unfilled
    pub fn next_index(&self) -> Slot {
        self.log.next_index()
    }

    /// Handler for a PREPARE message sent from a proposer. The proposal is
    /// either promised, possibly carrying forward a value accepted under an
    /// earlier proposal, or cancelled when it is lower than the promise.
    pub fn prepare(&mut self, args: PrepareArgs) -> PrepareReply {
        let (status, accepted_message) = match self.promise.promise(args.proposal) {
            Decision::Cancel => (PrepareStatus::Cancel, None),
            Decision::PrevAccepted(msg) => (PrepareStatus::PrevAccepted, Some(msg)),
            Decision::Ok => (PrepareStatus::Ok, None),
        };

        PrepareReply {
            status,
            accepted_message,
            index: self.log.next_index(),
            accepted_proposal_number: self.promise.min_proposal().number,
        }
    }

    /// Handler for an ACCEPT message, sent from a proposer once it has a
    /// quorum of promises. A slot that already holds a committed value is
    /// never handed to a new value; the committed value is returned instead.
    pub fn accept(&mut self, args: AcceptArgs) -> AcceptReply {
        let AcceptArgs { proposal, index, proposal_message } = args;

        let (status, message) = if proposal < self.promise.min_proposal() {
            (AcceptStatus::Cancel, None)
        } else if let Some(committed) = self.log.filled(index) {
            (AcceptStatus::AlreadyFilled, Some(committed.clone()))
        } else {
            self.promise.accept(proposal, proposal_message);
            (AcceptStatus::Ok, None)
        };

        AcceptReply { status, message, min_proposal_number: self.promise.min_proposal().number }
    }

    /// Handler for a COMMIT message. Commits are authoritative, so no
    /// proposal check is made. The promise is cleared so the acceptor can
    /// take part in the next slot.
    ///
    /// A slot the log cannot address is rejected and nothing changes.
    pub fn commit(&mut self, args: CommitArgs) -> Result<CommitReply, Error> {
        let CommitArgs { index, message } = args;
        self.log.commit(index, message)?;
        self.log.advance_cursor(index);
        self.promise.reset();
        Ok(CommitReply)
    }

    /// Every slot of the log, including holes
    pub fn get_messages(&self) -> GetMessagesReply {
        GetMessagesReply { messages: self.log.read_all() }
    }
}

/// Shared handle to a single acceptor.
///
/// Each request holds the lock for its whole duration, so requests are
/// atomic with respect to each other regardless of the slot they target.
#[derive(Clone)]
pub struct Acceptor {
    port: u16,
    state: Arc<Mutex<AcceptorState>>,
}

impl Acceptor {
    pub fn new(config: &Configuration) -> Acceptor {
        Acceptor { port: config.port(), state: Arc::new(Mutex::new(AcceptorState::new())) }
    }

    pub async fn prepare(&self, args: PrepareArgs) -> PrepareReply {
        debug!("[{}] Received PREPARE {:?}", self.port, args.proposal);
        let mut state = self.state.lock().await;
        let reply = state.prepare(args);
        debug!("[{}] PREPARE {:?}, next index {}", self.port, reply.status, reply.index);
        reply
    }

    pub async fn accept(&self, args: AcceptArgs) -> AcceptReply {
        debug!("[{}] Received ACCEPT {:?} for slot {}", self.port, args.proposal, args.index);
        let mut state = self.state.lock().await;
        let reply = state.accept(args);
        debug!("[{}] ACCEPT {:?}", self.port, reply.status);
        reply
    }

    pub async fn commit(&self, args: CommitArgs) -> Result<CommitReply, Error> {
        let mut state = self.state.lock().await;
        info!("[{}] Committing slot {}: {:?}", self.port, args.index, args.message);
        state.commit(args).map_err(|e| {
            warn!("[{}] Rejected COMMIT: {}", self.port, e);
            e
        })
    }

    pub async fn get_messages(&self, _args: GetMessagesArgs) -> GetMessagesReply {
        let state = self.state.lock().await;
        let reply = state.get_messages();
        debug!("[{}] Returning {} slots", self.port, reply.messages.len());
        reply
    }

    /// Promise and cursor as seen by a single request
    #[cfg(test)]
    pub async fn snapshot(&self) -> (Proposal, Slot) {
        let state = self.state.lock().await;
        (state.min_proposal(), state.next_index())
    }
}
