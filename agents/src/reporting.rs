use isolation_core::{Action, Square};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// The channel an agent reports its chosen action through.
///
/// The referee enforces the per-turn time budget and reads the channel
/// once the budget expires, so an agent must report at least one legal
/// action before it could be cut off, and may keep replacing it with
/// better ones as its search deepens. Only the last value reported
/// counts.
///
/// The sink is a single-slot latest-value cell: the action is packed
/// into one atomic word (0 is reserved for "nothing reported yet"), so
/// the searching thread can overwrite it and the referee can read it
/// without locking. The stop flag is how the referee tells an overrunning
/// search that its turn is over; the search observes it at its periodic
/// node checks, the same way it observes its own clock.
pub struct ActionSink {
    slot: AtomicU64,
    stop: AtomicBool,
}

// Tags distinguishing the packed action kind; 0 marks an empty slot.
const TAG_PLACE: u64 = 1;
const TAG_MOVE: u64 = 2;

impl ActionSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self {
            slot: AtomicU64::new(0),
            stop: AtomicBool::new(false),
        }
    }

    /// Reports an action, replacing any previously reported one.
    pub fn report(&self, action: Action) {
        self.slot.store(Self::pack(action), Ordering::Relaxed);
    }

    /// Returns the most recently reported action, if any.
    pub fn latest(&self) -> Option<Action> {
        Self::unpack(self.slot.load(Ordering::Relaxed))
    }

    /// Asks the producer to stop searching.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    /// Returns true if a stop has been requested.
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Packs an action into one non-zero word: kind tag and cell index.
    fn pack(action: Action) -> u64 {
        match action {
            Action::Place(square) => (TAG_PLACE << 8) | square.index() as u64,
            Action::Move(square) => (TAG_MOVE << 8) | square.index() as u64,
        }
    }

    /// Unpacks a word back into an action; 0 means the slot is empty.
    fn unpack(bits: u64) -> Option<Action> {
        let square = Square::from_index((bits & 0xFF) as u8);
        match bits >> 8 {
            TAG_PLACE => square.map(Action::Place),
            TAG_MOVE => square.map(Action::Move),
            _ => None,
        }
    }
}

impl Default for ActionSink {
    fn default() -> Self {
        Self::new()
    }
}
