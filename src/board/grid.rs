//! Row-major grid adjacency.

/// Up to four orthogonal neighbours of a tile, without heap allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    tiles: [usize; 4],
    len: u8,
}

impl Neighbors {
    /// The neighbours in enumeration order.
    #[must_use]
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.tiles[..usize::from(self.len)]
    }

    /// Iterate over the neighbours in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.as_slice().iter().copied()
    }

    fn push(&mut self, tile: usize) {
        self.tiles[usize::from(self.len)] = tile;
        self.len += 1;
    }
}

/// Neighbours of `tile` in the order right, left, up, down, clipped at the
/// grid edges.
///
/// The order is part of the routing tie-break and must not change.
#[must_use]
#[inline]
pub fn neighbors(tile: usize, width: usize, height: usize) -> Neighbors {
    let row = tile / width;
    let col = tile % width;
    let mut out = Neighbors {
        tiles: [0; 4],
        len: 0,
    };

    if col + 1 < width {
        out.push(tile + 1); // right
    }
    if col > 0 {
        out.push(tile - 1); // left
    }
    if row > 0 {
        out.push(tile - width); // up
    }
    if row + 1 < height {
        out.push(tile + width); // down
    }

    out
}

/// Manhattan distance between two tiles.
#[must_use]
pub fn manhattan(a: usize, b: usize, width: usize) -> usize {
    let (ar, ac) = (a / width, a % width);
    let (br, bc) = (b / width, b % width);
    ar.abs_diff(br) + ac.abs_diff(bc)
}
