use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Opaque payload agreed upon for a slot.
///
/// The acceptor never looks inside a message; it is stored and handed back
/// byte-for-byte. Any metadata a learner needs travels inside the payload.
#[derive(Serialize, Deserialize, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[serde(transparent)]
pub struct Message(pub Bytes);

impl From<Bytes> for Message {
    fn from(bytes: Bytes) -> Message {
        Message(bytes)
    }
}

impl From<Vec<u8>> for Message {
    fn from(vec: Vec<u8>) -> Message {
        Message(vec.into())
    }
}

impl From<String> for Message {
    fn from(s: String) -> Message {
        Message(s.into())
    }
}

impl From<&'static str> for Message {
    fn from(s: &'static str) -> Message {
        Message(Bytes::from_static(s.as_bytes()))
    }
}

impl Deref for Message {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.0.deref()
    }
}
