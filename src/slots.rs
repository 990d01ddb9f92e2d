use crate::{Error, Message};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Index of a position in the replicated log
pub type Slot = u64;

/// Contents of a single slot in the log
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub enum Entry {
    /// Slot has been allocated but no value has been committed to it
    Empty,
    /// Final value for the slot
    Filled(Message),
}

impl Entry {
    pub fn is_filled(&self) -> bool {
        matches!(self, Entry::Filled(_))
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            Entry::Filled(msg) => Some(msg),
            Entry::Empty => None,
        }
    }
}

impl Default for Entry {
    fn default() -> Entry {
        Entry::Empty
    }
}

/// Log of committed values indexed by slot.
///
/// Slots may be committed out of order. Slots skipped by such a commit stay
/// `Empty` and the cursor still moves past the highest committed slot.
#[derive(Debug, Default)]
pub struct SlotLog {
    entries: Vec<Entry>,
    next_index: Slot,
}

impl SlotLog {
    pub fn new() -> SlotLog {
        SlotLog::default()
    }

    /// Next slot this log believes is unfilled
    pub fn next_index(&self) -> Slot {
        self.next_index
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slot: Slot) -> Option<&Entry> {
        usize::try_from(slot).ok().and_then(|i| self.entries.get(i))
    }

    /// Committed value of a slot below the cursor
    pub fn filled(&self, slot: Slot) -> Option<&Message> {
        if slot >= self.next_index {
            return None;
        }
        self.get(slot).and_then(Entry::message)
    }

    /// Extends the log with empty slots so that `slot` is addressable and
    /// returns its position. Existing entries are never moved or dropped.
    /// A slot the log cannot grow to leaves the log unchanged.
    pub fn ensure_capacity(&mut self, slot: Slot) -> Result<usize, Error> {
        let i = usize::try_from(slot).map_err(|_| Error::SlotOutOfRange(slot))?;
        let len = i.checked_add(1).ok_or(Error::SlotOutOfRange(slot))?;
        if len > self.entries.len() {
            self.entries
                .try_reserve(len - self.entries.len())
                .map_err(|_| Error::SlotOutOfRange(slot))?;
            self.entries.resize(len, Entry::Empty);
        }
        Ok(i)
    }

    /// Writes the final value of a slot.
    ///
    /// A slot that is already filled keeps its value.
    pub fn commit(&mut self, slot: Slot, msg: Message) -> Result<(), Error> {
        let i = self.ensure_capacity(slot)?;
        let entry = &mut self.entries[i];
        if let Entry::Filled(existing) = entry {
            if *existing != msg {
                warn!(
                    "Attempt to commit a different value to slot {}. Committed={:?}, Attempted={:?}",
                    slot, existing, msg
                );
            }
            return Ok(());
        }
        *entry = Entry::Filled(msg);
        Ok(())
    }

    /// Moves the cursor past `slot` if it is at or beyond the cursor.
    pub fn advance_cursor(&mut self, slot: Slot) {
        if slot >= self.next_index {
            if slot > self.next_index {
                // TODO: request the skipped slots from a peer instead of leaving holes
                debug!("Cursor skipping slots {}..{}", self.next_index, slot);
            }
            self.next_index = slot.saturating_add(1);
        }
    }

    /// Copy of every slot, including empty holes
    pub fn read_all(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}
