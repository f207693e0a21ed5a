use core::fmt;
use core::num::NonZeroU32;

/// Position of a component in its network's owner vectors.
///
/// Stored off by one in a `NonZeroU32` so `Option<CompId>` costs nothing
/// extra inside connection and slot tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompId(NonZeroU32);

impl CompId {
    /// Saturates past `u32::MAX - 1`; no network holds that many components.
    pub fn from_slot(slot: usize) -> Self {
        let raw = u32::try_from(slot).map_or(u32::MAX, |s| s.saturating_add(1));
        Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MAX))
    }

    pub fn slot(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompId({})", self.slot())
    }
}
