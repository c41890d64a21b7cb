//! Player pool and party composition.
//!
//! The pool holds three fungible player counts. A party is formed by taking a
//! fixed composition out of the pool in one step. Counts only ever go down.

use serde::{Deserialize, Serialize};

/// Players required to form one party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyCost {
    /// Tanks per party.
    pub tanks: u32,
    /// Healers per party.
    pub healers: u32,
    /// Damage dealers per party.
    pub dps: u32,
}

/// Composition of every party: 1 tank, 1 healer, 3 dps.
pub const PARTY_COST: PartyCost = PartyCost {
    tanks: 1,
    healers: 1,
    dps: 3,
};

/// Plain copy of the three player counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCounts {
    /// Tanks waiting in the pool.
    pub tanks: u32,
    /// Healers waiting in the pool.
    pub healers: u32,
    /// Damage dealers waiting in the pool.
    pub dps: u32,
}

impl PoolCounts {
    /// Build a count triple.
    #[must_use]
    pub const fn new(tanks: u32, healers: u32, dps: u32) -> Self {
        Self { tanks, healers, dps }
    }
}

/// Finite pool of players, consumed one party at a time.
///
/// The pool lives inside the run's guarded state, so every mutation happens
/// with the shared lock held. Only the scheduler calls
/// [`try_consume_one_party`](Self::try_consume_one_party).
#[derive(Debug, Clone)]
pub struct PartyPool {
    counts: PoolCounts,
    cost: PartyCost,
}

impl PartyPool {
    /// Create a pool from the initial player counts.
    #[must_use]
    pub const fn new(counts: PoolCounts) -> Self {
        Self {
            counts,
            cost: PARTY_COST,
        }
    }

    /// Whether the remaining players can still form a party.
    #[must_use]
    pub const fn has_available_party(&self) -> bool {
        self.counts.tanks >= self.cost.tanks
            && self.counts.healers >= self.cost.healers
            && self.counts.dps >= self.cost.dps
    }

    /// Take one party's worth of players out of the pool.
    ///
    /// Returns `false` and leaves the pool untouched when any role is short.
    pub fn try_consume_one_party(&mut self) -> bool {
        if !self.has_available_party() {
            return false;
        }
        self.counts.tanks -= self.cost.tanks;
        self.counts.healers -= self.cost.healers;
        self.counts.dps -= self.cost.dps;
        true
    }

    /// Number of whole parties the pool can still form.
    #[must_use]
    pub fn parties_available(&self) -> u32 {
        (self.counts.tanks / self.cost.tanks)
            .min(self.counts.healers / self.cost.healers)
            .min(self.counts.dps / self.cost.dps)
    }

    /// Current counts.
    #[must_use]
    pub const fn counts(&self) -> PoolCounts {
        self.counts
    }
}
