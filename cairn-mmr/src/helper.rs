//! Position arithmetic for the 1-based flat index space.
//!
//! Leaves and internal nodes of all mountains share one index space starting
//! at 1. Within each mountain, nodes are numbered post-order: a subtree's
//! entire left child precedes its right child, which precedes the parent.
//! For ten leaves the forest looks like this (positions, peaks 15 and 18):
//!
//! ```text
//! Height 4:                 15
//! Height 3:         7               14
//! Height 2:     3       6       10      13        18
//! Height 1:   1   2   4   5   8   9   11  12    16  17
//! ```
//!
//! Mountains partition the index space contiguously, tallest first, one per
//! set bit of the leaf count ("width").

use crate::{Error, Result};

/// Number of mountains (peaks) in a forest of `width` leaves.
pub fn peak_count(width: u64) -> u32 {
    width.count_ones()
}

/// Total node count (leaves + internal) of the forest built from `width`
/// leaves.
///
/// # Safety (arithmetic)
///
/// Overflows when `width >= 2^63`. Callers must validate widths before
/// calling.
pub fn size_for_width(width: u64) -> u64 {
    2 * width - width.count_ones() as u64
}

/// Position assigned to the `width`-th appended leaf (`width >= 1`).
///
/// Odd widths start a fresh single-leaf mountain at the end of the forest;
/// even widths place the leaf one past the previous forest's end, leaving
/// room for the parents that close over it.
pub fn leaf_position(width: u64) -> u64 {
    if width % 2 == 1 {
        size_for_width(width)
    } else {
        size_for_width(width - 1) + 1
    }
}

/// Positions of all mountain peaks for `width` leaves, tallest mountain
/// first (ascending position order).
///
/// Each set bit of `width` at bit position `i` contributes a mountain of
/// `2^(i+1) - 1` nodes; its peak sits at the running node total.
///
/// # Safety (arithmetic)
///
/// Overflows when `width >= 2^63`.
pub fn peak_positions(width: u64) -> Vec<u64> {
    if width == 0 {
        return Vec::new();
    }
    let mut peaks = Vec::with_capacity(width.count_ones() as usize);
    let mut total = 0u64;
    let top = 63 - width.leading_zeros();
    for i in (0..=top).rev() {
        if width & (1u64 << i) != 0 {
            total += (1u64 << (i + 1)) - 1;
            peaks.push(total);
        }
    }
    peaks
}

/// Height of the node at `pos` (leaves have height 1). Requires `pos >= 1`.
///
/// Walks candidate mountain sizes from the largest perfect tree downward,
/// subtracting each complete mountain the position lies beyond; what remains
/// is the node's depth offset within its own mountain.
pub fn height_at(pos: u64) -> u64 {
    debug_assert!(pos >= 1, "positions are 1-based");
    let mut rel = pos - 1;
    if rel == 0 {
        return 1;
    }
    let mut peak_size = u64::MAX >> rel.leading_zeros();
    while peak_size > 0 {
        if rel >= peak_size {
            rel -= peak_size;
        }
        peak_size >>= 1;
    }
    rel + 1
}

/// `true` if the node at `pos` is a leaf.
pub fn is_leaf(pos: u64) -> bool {
    height_at(pos) == 1
}

/// Children of the node at `pos`, as `(left, right)`.
///
/// The post-order numbering puts the right child immediately before the
/// parent and the left child a full subtree earlier. Fails with
/// [`Error::NotAParent`] when `pos` is a leaf.
pub fn children(pos: u64) -> Result<(u64, u64)> {
    let height = height_at(pos);
    let right = pos - 1;
    let left = pos - (1u64 << (height - 1));
    if left == right {
        return Err(Error::NotAParent(pos));
    }
    Ok((left, right))
}
