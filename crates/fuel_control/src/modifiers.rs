use std::sync::atomic::{AtomicU8, Ordering};

use fuel_core::{Modifier, ModifierSet};

/// Modifier flags shared between control contexts and the tick task.
///
/// The flags live in one atomic bit-set: a tick snapshot is a single load
/// and can never observe a torn update, and a toggle is a single `fetch_xor`
/// that is never lost. Two racing toggles of the same flag cancel out, which
/// is exactly what two button presses mean.
///
/// Outlives any single run; toggling is valid whether or not a simulation is
/// running.
#[derive(Debug, Default)]
pub struct SharedModifiers {
    bits: AtomicU8,
}

impl SharedModifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one flag. Returns true when the flag is now active.
    pub fn toggle(&self, modifier: Modifier) -> bool {
        let prev = self.bits.fetch_xor(modifier.bit(), Ordering::AcqRel);
        prev & modifier.bit() == 0
    }

    pub fn snapshot(&self) -> ModifierSet {
        ModifierSet::from_bits(self.bits.load(Ordering::Acquire))
    }
}
