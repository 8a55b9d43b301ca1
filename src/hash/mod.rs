//! Open-addressing hash table keyed by word tokens.
//!
//! The table has a fixed capacity chosen at construction and never resizes.
//! Collisions are resolved by probing: either linear probing (step 1) or
//! double hashing (step derived from the key). Each key records the probe
//! distance paid at its first insertion, both per slot and in an append-only
//! insertion-order log, so fill statistics can be replayed for any prefix of
//! the insertion sequence.

use std::fmt;

/// Collision resolution strategy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Probe forward one slot at a time.
    Linear,
    /// Probe by a second hash-derived step, `1 + (h mod (capacity - 1))`.
    ///
    /// Visits all `capacity` slots only when `capacity` is prime; callers
    /// wanting the full-scan guarantee must pick a prime capacity.
    Double,
}

#[derive(Debug, Default)]
struct Slot {
    key: Option<String>,
    frequency: u64,
    /// Probes taken when the key first claimed this slot. 0 for a direct hit.
    probe_distance: usize,
}

/// One slot of the table, as seen by [`HashStore::slots`].
///
/// Empty slots are included: `key` is `None` and `frequency` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRecord<'a> {
    /// Address of the slot, `0..capacity`.
    pub index: usize,
    /// Number of times the key has been inserted.
    pub frequency: u64,
    /// Probes paid at first insertion; fixed thereafter.
    pub probe_distance: usize,
    /// The stored key, if the slot is occupied.
    pub key: Option<&'a str>,
}

/// One fill checkpoint from [`HashStore::stats_snapshot`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsLine {
    /// The checkpoint, as a percentage of capacity.
    pub percent_full: usize,
    /// Number of keys the table held at this checkpoint.
    pub entries: usize,
    /// Percentage of those keys placed with no collision.
    pub at_home_percent: f64,
    /// Mean probe distance over those keys.
    pub mean_probe_distance: f64,
    /// Largest probe distance paid by any of those keys.
    pub max_probe_distance: usize,
}

impl fmt::Display for StatsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:4} {:10} {:10.1} {:10.2} {:11}",
            self.percent_full,
            self.entries,
            self.at_home_percent,
            self.mean_probe_distance,
            self.max_probe_distance
        )
    }
}

/// Fixed-capacity open-addressing frequency table.
///
/// ```rust
/// use freqstore::{CollisionStrategy, HashStore};
///
/// let mut store = HashStore::new(113, CollisionStrategy::Double);
/// assert_eq!(store.insert("word"), 1);
/// assert_eq!(store.insert("word"), 2);
/// assert_eq!(store.search("word"), 2);
/// ```
#[derive(Debug)]
pub struct HashStore {
    slots: Vec<Slot>,
    /// Probe distance of the i-th distinct key inserted, in insertion order.
    insertion_probes: Vec<usize>,
    strategy: CollisionStrategy,
}

/// Fold a token into a 32-bit key: `h = b + 31*h` per byte, wrapping.
///
/// The wraparound is part of the addressing contract and must stay
/// bit-reproducible, hence the fixed-width modular arithmetic.
fn fold_token(token: &str) -> u32 {
    token
        .bytes()
        .fold(0u32, |h, b| u32::from(b).wrapping_add(h.wrapping_mul(31)))
}

impl HashStore {
    /// Create an empty table with `capacity` slots.
    ///
    /// The capacity is fixed for the life of the store.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, or if `capacity` is less than 2 under
    /// [`CollisionStrategy::Double`] (the step derivation divides by
    /// `capacity - 1`).
    pub fn new(capacity: usize, strategy: CollisionStrategy) -> Self {
        assert!(capacity > 0, "capacity must be positive");
        if strategy == CollisionStrategy::Double {
            assert!(capacity > 1, "double hashing needs capacity >= 2");
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::default);
        Self {
            slots,
            insertion_probes: Vec::new(),
            strategy,
        }
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.insertion_probes.len()
    }

    /// Whether no key has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.insertion_probes.is_empty()
    }

    /// The collision strategy chosen at construction.
    pub fn strategy(&self) -> CollisionStrategy {
        self.strategy
    }

    fn step(&self, hash: u32) -> usize {
        match self.strategy {
            CollisionStrategy::Linear => 1,
            CollisionStrategy::Double => 1 + hash as usize % (self.capacity() - 1),
        }
    }

    /// Insert a token, counting one occurrence.
    ///
    /// Returns the token's resulting frequency (at least 1), or 0 if the
    /// table is full and the token is not already present. The token is
    /// copied on first insertion; the probe distance paid then is recorded
    /// and never updated by later insertions of the same token.
    pub fn insert(&mut self, token: &str) -> u64 {
        let hash = fold_token(token);
        let step = self.step(hash);
        let capacity = self.capacity();
        let mut addr = hash as usize % capacity;
        for probes in 0..capacity {
            let slot = &mut self.slots[addr];
            match &slot.key {
                None => {
                    slot.key = Some(token.to_owned());
                    slot.frequency = 1;
                    slot.probe_distance = probes;
                    self.insertion_probes.push(probes);
                    return 1;
                }
                Some(key) if key == token => {
                    slot.frequency += 1;
                    return slot.frequency;
                }
                Some(_) => addr = (addr + step) % capacity,
            }
        }
        0
    }

    /// Look up a token's frequency; 0 if absent.
    ///
    /// Probing stops at the matching key or at the first empty slot. If the
    /// table is completely full and the token is absent, the whole table is
    /// scanned before concluding absence.
    pub fn search(&self, token: &str) -> u64 {
        let hash = fold_token(token);
        let step = self.step(hash);
        let capacity = self.capacity();
        let mut addr = hash as usize % capacity;
        for _ in 0..capacity {
            let slot = &self.slots[addr];
            match &slot.key {
                None => return 0,
                Some(key) if key == token => return slot.frequency,
                Some(_) => addr = (addr + step) % capacity,
            }
        }
        0
    }

    /// Enumerate every slot in address order, empty slots included.
    ///
    /// The iterator borrows the store; calling `slots` again restarts the
    /// enumeration from slot 0.
    pub fn slots(&self) -> impl Iterator<Item = SlotRecord<'_>> {
        self.slots.iter().enumerate().map(|(index, slot)| SlotRecord {
            index,
            frequency: slot.frequency,
            probe_distance: slot.probe_distance,
            key: slot.key.as_deref(),
        })
    }

    /// Replay fill statistics at `checkpoints` evenly spaced points.
    ///
    /// For each checkpoint percentage the table is imagined at
    /// `capacity * percent / 100` entries; if it actually reached that many,
    /// a line is produced over the first that-many insertions in insertion
    /// order (not slot order). Checkpoints the table never reached, and
    /// checkpoints that round down to zero entries, are omitted.
    pub fn stats_snapshot(&self, checkpoints: usize) -> Vec<StatsLine> {
        let mut lines = Vec::new();
        for i in 1..=checkpoints {
            let percent = (100 * i).div_ceil(checkpoints);
            let entries = self.capacity() * percent / 100;
            if entries == 0 || entries > self.len() {
                continue;
            }
            let window = &self.insertion_probes[..entries];
            let at_home = window.iter().filter(|&&p| p == 0).count();
            let total: usize = window.iter().sum();
            let max = window.iter().copied().max().unwrap_or(0);
            lines.push(StatsLine {
                percent_full: percent,
                entries,
                at_home_percent: at_home as f64 * 100.0 / entries as f64,
                mean_probe_distance: total as f64 / entries as f64,
                max_probe_distance: max,
            });
        }
        lines
    }
}
