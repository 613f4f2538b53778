//! Node degree type and consolidation table sizing.
//!
//! The degree of a node in a binomial or Fibonacci heap is its number of
//! direct children. Both heaps bound it by O(log n): a binomial tree of degree
//! k holds exactly 2ᵏ nodes, and a Fibonacci tree of degree k holds at least
//! F(k+2) ≥ φᵏ nodes. `u8` therefore covers any heap that fits in memory.

/// Number of direct children of a node.
pub type Degree = u8;

/// Increments a degree, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == Degree::MAX`. Reaching it would need a heap with more
/// than 2²⁵⁵ nodes, so overflow means the structure is corrupted.
///
/// # Example
///
/// ```rust
/// use classic_heaps::degree::checked_increment;
///
/// assert_eq!(checked_increment(5), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree
        .checked_add(1)
        .expect("degree overflow: node degree is bounded by log₂(n)")
}

/// Initial number of slots for a consolidation table over `len` nodes.
///
/// This is `⌊log₂(len)⌋ + 2`, enough for a binomial forest of `len` nodes.
/// Fibonacci consolidation grows the table on demand when a degree exceeds it.
///
/// ```rust
/// use classic_heaps::degree::table_slots;
///
/// assert_eq!(table_slots(0), 2);
/// assert_eq!(table_slots(1), 2);
/// assert_eq!(table_slots(8), 5);
/// ```
#[inline]
pub fn table_slots(len: usize) -> usize {
    match len {
        0 => 2,
        n => n.ilog2() as usize + 2,
    }
}
