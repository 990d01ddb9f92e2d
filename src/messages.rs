//! Requests and replies exchanged between proposers, learners and an acceptor.
use crate::{Entry, Message, Proposal, Slot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote methods served by an acceptor. Calls are dispatched by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Prepare,
    Accept,
    Commit,
    GetMessages,
}

impl Method {
    /// Name of the method as it appears on the wire
    pub fn name(self) -> &'static str {
        match self {
            Method::Prepare => "Prepare",
            Method::Accept => "Accept",
            Method::Commit => "Commit",
            Method::GetMessages => "GetMessages",
        }
    }

    /// Looks up a method by its wire name
    pub fn from_name(name: &str) -> Option<Method> {
        match name {
            "Prepare" => Some(Method::Prepare),
            "Accept" => Some(Method::Accept),
            "Commit" => Some(Method::Commit),
            "GetMessages" => Some(Method::GetMessages),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Phase 1a request for a promise.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct PrepareArgs {
    pub proposal: Proposal,
}

/// Outcome of a `Prepare`
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum PrepareStatus {
    /// Proposal is lower than the current promise
    Cancel,
    /// A value accepted under an earlier proposal must be re-proposed
    PrevAccepted,
    /// Promise granted with no outstanding value
    Ok,
}

/// Phase 1b reply to a `Prepare`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct PrepareReply {
    pub status: PrepareStatus,
    /// Previously accepted value, set iff the status is `PrevAccepted`
    pub accepted_message: Option<Message>,
    /// Next slot the acceptor believes is unfilled
    pub index: Slot,
    /// Number of the proposal the acceptor has promised
    pub accepted_proposal_number: i64,
}

/// Phase 2a request to accept a value for a slot.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct AcceptArgs {
    pub proposal: Proposal,
    pub index: Slot,
    pub proposal_message: Message,
}

/// Outcome of an `Accept`
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AcceptStatus {
    /// Proposal is lower than the current promise
    Cancel,
    /// The slot already holds a committed value
    AlreadyFilled,
    /// Value accepted
    Ok,
}

/// Phase 2b reply to an `Accept`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct AcceptReply {
    pub status: AcceptStatus,
    /// Committed value of the slot, set iff the status is `AlreadyFilled`
    pub message: Option<Message>,
    /// Number the proposer must exceed on its next attempt
    pub min_proposal_number: i64,
}

/// Final value of a slot once a quorum has accepted it.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct CommitArgs {
    pub index: Slot,
    pub message: Message,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct CommitReply;

#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct GetMessagesArgs;

/// Every slot of the log in order, including empty holes.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
pub struct GetMessagesReply {
    pub messages: Vec<Entry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        for method in &[Method::Prepare, Method::Accept, Method::Commit, Method::GetMessages] {
            assert_eq!(Some(*method), Method::from_name(method.name()));
        }
        assert_eq!(None, Method::from_name("prepare"));
        assert_eq!(None, Method::from_name(""));
    }

    #[test]
    fn log_holes_survive_encoding() {
        let reply = GetMessagesReply {
            messages: vec![Entry::Filled("a".into()), Entry::Empty, Entry::Filled("c".into())],
        };
        let bytes = bincode::serialize(&reply).unwrap();
        let decoded: GetMessagesReply = bincode::deserialize(&bytes).unwrap();
        assert_eq!(reply, decoded);
        assert!(!decoded.messages[1].is_filled());
    }
}
