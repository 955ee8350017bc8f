//! Index triple identifying a face of a triangle mesh.

use core::hash::{Hash, Hasher};
use core::ops::Index;

/// A triangle face, stored as three vertex indices.
///
/// Two triangles are equal if one is a cyclic rotation of the other:
/// `(a, b, c) == (b, c, a) == (c, a, b)`. The reversed winding `(a, c, b)`
/// describes the opposite face orientation and is **not** equal.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq)]
#[repr(C)]
pub struct Triangle {
    /// The first vertex index.
    pub a: u32,
    /// The second vertex index.
    pub b: u32,
    /// The third vertex index.
    pub c: u32,
}

impl Triangle {
    /// Creates a triangle from its three vertex indices.
    #[inline]
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    /// The three indices of this triangle, in winding order.
    #[inline]
    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    /// The three directed edges `(a, b)`, `(b, c)`, `(c, a)` of this triangle.
    #[inline]
    pub const fn edges(&self) -> [(u32, u32); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// The same face with its vertices rotated one step to the left: `(b, c, a)`.
    #[inline]
    pub const fn left_shifted(&self) -> Self {
        Self::new(self.b, self.c, self.a)
    }

    /// The same face with its vertices rotated one step to the right: `(c, a, b)`.
    #[inline]
    pub const fn right_shifted(&self) -> Self {
        Self::new(self.c, self.a, self.b)
    }

    /// The face with the opposite winding: `(a, c, b)`.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Self::new(self.a, self.c, self.b)
    }

    /// Does this triangle reference the same vertex more than once?
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.a == self.b || self.b == self.c || self.c == self.a
    }

    /// Is this a non-degenerate triangle referencing only vertices in `0..vertex_count`?
    #[inline]
    pub fn is_valid_for(&self, vertex_count: usize) -> bool {
        !self.is_degenerate() && self.indices().iter().all(|i| (*i as usize) < vertex_count)
    }

    /// Checks if this triangle and `other` share an edge with consistent winding.
    ///
    /// This is the case if one directed edge of `self` is the reverse of a
    /// directed edge of `other`, as happens for two adjacent faces of a
    /// consistently oriented closed surface.
    pub fn shares_edge_with(&self, other: &Triangle) -> bool {
        self.edges().iter().any(|(from, to)| {
            other
                .edges()
                .iter()
                .any(|(other_from, other_to)| from == other_to && to == other_from)
        })
    }

    /// The lexicographically smallest rotation of this triangle.
    fn canonical(&self) -> [u32; 3] {
        let rotations = [
            self.indices(),
            self.left_shifted().indices(),
            self.right_shifted().indices(),
        ];
        rotations.into_iter().min().unwrap_or(rotations[0])
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.indices() == other.indices()
            || self.indices() == other.left_shifted().indices()
            || self.indices() == other.right_shifted().indices()
    }
}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state)
    }
}

impl Index<usize> for Triangle {
    type Output = u32;

    #[inline]
    fn index(&self, i: usize) -> &u32 {
        match i {
            0 => &self.a,
            1 => &self.b,
            2 => &self.c,
            _ => panic!("triangle index out of bounds: {i}"),
        }
    }
}

impl From<[u32; 3]> for Triangle {
    #[inline]
    fn from(idx: [u32; 3]) -> Self {
        Self::new(idx[0], idx[1], idx[2])
    }
}

impl From<Triangle> for [u32; 3] {
    #[inline]
    fn from(tri: Triangle) -> Self {
        tri.indices()
    }
}
