//! Transposition table keyed by Zobrist position keys.

use checkers_core::Move;

use crate::search::WIN_BOUND;

/// Type of node encountered during search.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum NodeType {
    /// The score is exact.
    Pv,

    /// The score is less than alpha (upper bound).
    All,

    /// The score is greater than or equal to beta (lower bound).
    Cut,
}

impl NodeType {
    #[inline(always)]
    pub fn new(score: i32, alpha: i32, beta: i32) -> Self {
        if score <= alpha {
            Self::All
        } else if score >= beta {
            Self::Cut
        } else {
            Self::Pv
        }
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct TTableEntry {
    pub key: u64,
    /// Remaining depth the entry was searched to.
    pub depth: u8,
    pub best_move: Option<Move>,
    /// Score with win distances measured from this node.
    pub score: i32,
    pub node_type: NodeType,
}

impl TTableEntry {
    /// Builds an entry, turning a win score found `ply` plies below the
    /// root into one relative to this node.
    pub fn new(
        key: u64,
        best_move: Option<Move>,
        score: i32,
        alpha: i32,
        beta: i32,
        depth: u8,
        ply: i32,
    ) -> Self {
        let node_type = NodeType::new(score, alpha, beta);
        let score = if score > WIN_BOUND {
            score + ply
        } else if score < -WIN_BOUND {
            score - ply
        } else {
            score
        };
        Self {
            key,
            depth,
            best_move,
            score,
            node_type,
        }
    }

    /// The stored score, if it settles a node searched with (`alpha`, `beta`).
    #[inline(always)]
    pub fn try_score(&self, alpha: i32, beta: i32, ply: i32) -> Option<i32> {
        let score = if self.score > WIN_BOUND {
            self.score - ply
        } else if self.score < -WIN_BOUND {
            self.score + ply
        } else {
            self.score
        };

        (self.node_type == NodeType::Pv
            || (self.node_type == NodeType::All && score <= alpha)
            || (self.node_type == NodeType::Cut && score >= beta))
            .then_some(score)
    }
}

/// Fixed-capacity, depth-preferred transposition table.
#[derive(Debug)]
pub struct TTable {
    cache: Vec<Option<TTableEntry>>,
    pub(crate) hits: usize,
    pub(crate) collisions: usize,
}

impl TTable {
    /// Default number of slots.
    pub const DEFAULT_CAPACITY: usize = 1 << 18;

    /// Creates a table with `capacity` slots, rounded up to a power of two.
    pub fn from_capacity(capacity: usize) -> Self {
        Self {
            cache: vec![None; capacity.max(1).next_power_of_two()],
            hits: 0,
            collisions: 0,
        }
    }

    pub fn clear(&mut self) {
        self.cache.iter_mut().for_each(|entry| *entry = None);
        self.hits = 0;
        self.collisions = 0;
    }

    pub fn capacity(&self) -> usize {
        self.cache.len()
    }

    pub fn num_entries(&self) -> usize {
        self.cache.iter().filter(|entry| entry.is_some()).count()
    }

    #[inline(always)]
    fn index(&self, key: u64) -> usize {
        key as usize & (self.capacity() - 1)
    }

    /// The entry for `key`, if the slot holds that exact position.
    pub fn get(&mut self, key: u64) -> Option<&TTableEntry> {
        let index = self.index(key);
        let found = self.cache[index].as_ref().filter(|e| e.key == key);
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Stores `entry` unless its slot holds a deeper result for a different
    /// position.
    pub fn store(&mut self, entry: TTableEntry) {
        let index = self.index(entry.key);
        let keep_old = matches!(
            &self.cache[index],
            Some(old) if old.key != entry.key && old.depth > entry.depth
        );
        if keep_old {
            self.collisions += 1;
        } else {
            self.cache[index] = Some(entry);
        }
    }
}

impl Default for TTable {
    fn default() -> Self {
        Self::from_capacity(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[path = "ttable_tests.rs"]
mod ttable_tests;
