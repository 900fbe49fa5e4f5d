// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed perimeter of walls
//!
//! The cyclic adjacency is plain index arithmetic (`(i + 1) % n`), never a
//! reference graph — walls live in one indexed array. Structural checks
//! (closure, corner consistency) are the allocator's normalize stage, not
//! the container's concern.

use crate::wall::{CornerType, Wall};

/// Closed ordered sequence of walls forming the building outline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Perimeter {
    walls: Vec<Wall>,
}

impl Perimeter {
    pub fn new(walls: Vec<Wall>) -> Self {
        Self { walls }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn len(&self) -> usize {
        self.walls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Index of the wall after `i`, wrapping at the end
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i + 1) % self.walls.len()
    }

    /// Index of the wall before `i`, wrapping at the start
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i + self.walls.len() - 1) % self.walls.len()
    }

    /// Corner type at the start of wall `i` (shared with wall `prev(i)`'s end)
    #[inline]
    pub fn corner_at(&self, i: usize) -> CornerType {
        self.walls[i].start_corner
    }

    /// Corner type at the end of wall `i` (= start corner of the next wall)
    #[inline]
    pub fn corner_after(&self, i: usize) -> CornerType {
        self.walls[self.next(i)].start_corner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wall::Heading;

    #[test]
    fn test_cyclic_indexing() {
        let p = Perimeter::new(vec![
            Wall::new(1000.0, Heading::East, CornerType::Convex),
            Wall::new(1000.0, Heading::North, CornerType::Convex),
            Wall::new(1000.0, Heading::West, CornerType::Convex),
            Wall::new(1000.0, Heading::South, CornerType::Convex),
        ]);
        assert_eq!(p.next(3), 0);
        assert_eq!(p.prev(0), 3);
        assert_eq!(p.corner_at(2), CornerType::Convex);
        assert_eq!(p.corner_after(3), CornerType::Convex);
    }
}
