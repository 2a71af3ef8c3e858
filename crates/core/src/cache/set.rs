//! Cache Sets and Blocks.
//!
//! A set is an ordered sequence of block slots. The order is the replacement state:
//! position 0 (the bottom) is always the next eviction victim, and the highest
//! occupied position (the top) holds the most recently inserted or promoted block.
//!
//! Occupied slots always form a contiguous prefix. Blocks are only ever added at
//! the top of that prefix and only ever removed from the bottom, so a set fills
//! from slot 0 upward and, once full, stays full.
//!
//! # Operations
//!
//! - `insert()`: O(W) when full (shift down by one), O(1) otherwise
//! - `promote()`: O(W), rotates the promoted block to the top
//! - `find()`: O(W) linear tag scan

use std::fmt;

use serde::Serialize;

/// Occupancy and dirty state of a block slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockState {
    /// Slot holds no block; its tag is meaningless.
    #[default]
    Empty,
    /// Block matches backing memory.
    Clean,
    /// Block was written under write-back and must be flushed on eviction.
    Dirty,
}

impl BlockState {
    /// Numeric state code used in set dumps (`-1` empty, `0` clean, `1` dirty).
    pub const fn code(self) -> i8 {
        match self {
            Self::Empty => -1,
            Self::Clean => 0,
            Self::Dirty => 1,
        }
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single block slot: state plus tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Block {
    /// Occupancy and dirty state.
    pub state: BlockState,
    /// Address tag; only meaningful when `state` is not [`BlockState::Empty`].
    pub tag: u64,
}

impl Block {
    /// An unoccupied slot.
    pub const EMPTY: Self = Self {
        state: BlockState::Empty,
        tag: 0,
    };

    /// A freshly installed, clean block.
    pub const fn clean(tag: u64) -> Self {
        Self {
            state: BlockState::Clean,
            tag,
        }
    }

    /// Returns `true` if the slot holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        !matches!(self.state, BlockState::Empty)
    }

    /// Returns `true` if the block must be written back before eviction.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        matches!(self.state, BlockState::Dirty)
    }
}

/// One set of an associative cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    /// Exactly `ways` slots, bottom (index 0) to top.
    slots: Vec<Block>,
    /// Number of occupied slots; slots `0..len` are valid, the rest are empty.
    len: usize,
}

impl CacheSet {
    /// Creates a set with `ways` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `ways` is zero. Configurations are validated before any set
    /// is built, so a cache never constructs a zero-way set.
    pub fn new(ways: usize) -> Self {
        assert!(ways > 0, "a cache set needs at least one way");
        Self {
            slots: vec![Block::EMPTY; ways],
            len: 0,
        }
    }

    /// Associativity of the set.
    #[inline]
    pub fn ways(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// All slots ordered bottom to top, including empty ones.
    pub fn blocks(&self) -> &[Block] {
        &self.slots
    }

    /// Occupied slots ordered bottom to top.
    pub fn occupied(&self) -> &[Block] {
        &self.slots[..self.len]
    }

    /// Finds the slot holding `tag`.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.occupied().iter().position(|block| block.tag == tag)
    }

    /// Returns `true` if a block with `tag` is resident.
    pub fn contains(&self, tag: u64) -> bool {
        self.find(tag).is_some()
    }

    /// The block that the next insertion into a full set would evict.
    pub fn victim(&self) -> Option<&Block> {
        if self.is_full() {
            self.slots.first()
        } else {
            None
        }
    }

    /// Moves the block at `slot` to the top of the occupied ordering.
    ///
    /// Every occupied block above `slot` shifts down one position. The moved
    /// block keeps its state. Out-of-range slots are ignored.
    pub fn promote(&mut self, slot: usize) {
        if slot < self.len {
            self.slots[slot..self.len].rotate_left(1);
        }
    }

    /// Marks the block at `slot` dirty. Empty or out-of-range slots are ignored.
    pub fn mark_dirty(&mut self, slot: usize) {
        if let Some(block) = self.slots[..self.len].get_mut(slot) {
            block.state = BlockState::Dirty;
        }
    }

    /// Installs a clean block with `tag` at the top of the set.
    ///
    /// With a free slot the block takes the lowest empty position. A full set
    /// first evicts position 0 and shifts every slot down by one.
    ///
    /// # Returns
    ///
    /// The evicted block, or `None` if the set had room.
    pub fn insert(&mut self, tag: u64) -> Option<Block> {
        let ways = self.slots.len();
        if self.len < ways {
            self.slots[self.len] = Block::clean(tag);
            self.len += 1;
            return None;
        }
        let victim = self.slots[0];
        self.slots.rotate_left(1);
        self.slots[ways - 1] = Block::clean(tag);
        Some(victim)
    }
}
