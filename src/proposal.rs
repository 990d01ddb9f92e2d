use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Round identifier of a proposer. The `number` is the round chosen by the
/// proposer and the `id` is the proposer's identity, used to break ties
/// between proposers that picked the same round.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub struct Proposal {
    pub number: i64,
    pub id: i64,
}

impl Proposal {
    /// Proposal that is lower than every proposal a proposer will send.
    pub const SENTINEL: Proposal = Proposal { number: -1, id: -1 };

    pub fn new(number: i64, id: i64) -> Proposal {
        Proposal { number, id }
    }
}

impl Default for Proposal {
    fn default() -> Proposal {
        Proposal::SENTINEL
    }
}

impl PartialOrd for Proposal {
    fn partial_cmp(&self, other: &Proposal) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Proposal {
    fn cmp(&self, other: &Proposal) -> Ordering {
        match self.number.cmp(&other.number) {
            Ordering::Equal => self.id.cmp(&other.id),
            o => o,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_dominates_id() {
        assert!(Proposal::new(1, 100) < Proposal::new(2, 0));
        assert!(Proposal::new(3, 0) > Proposal::new(2, 9));
    }

    #[test]
    fn id_breaks_ties() {
        assert!(Proposal::new(1, 0) < Proposal::new(1, 1));
        assert_eq!(Ordering::Equal, Proposal::new(4, 2).cmp(&Proposal::new(4, 2)));
    }

    #[test]
    fn sentinel_is_lowest() {
        assert!(Proposal::SENTINEL < Proposal::new(0, 0));
        assert!(Proposal::SENTINEL < Proposal::new(-1, 0));
        assert_eq!(Proposal::SENTINEL, Proposal::default());
    }
}
