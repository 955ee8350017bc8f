//! Padded, aligned, structure-of-arrays storage for triples.

/// Number of lanes of a storage block.
///
/// Logical buffers are padded to a multiple of this so fixed-width passes
/// never read past the allocation.
pub const LANE_WIDTH: usize = 8;

/// Eight consecutive values of one axis, aligned on 32 bytes so a whole block
/// can be loaded by a single aligned vector instruction.
#[derive(Copy, Clone, Debug, PartialEq)]
#[repr(C, align(32))]
pub struct Block<T>(pub [T; LANE_WIDTH]);

/// Planar storage of `len` triples.
///
/// The `x` components of every element are stored contiguously, followed by
/// all the `y` components, then all the `z` components. Each run is padded up
/// to the next multiple of [`LANE_WIDTH`]; after [`PlanarBuffer::fix_padding`]
/// the padding lanes hold copies of the last real element so that min, max and
/// argmax reductions over the padded range match the ones over `0..len`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanarBuffer<T> {
    blocks: Vec<Block<T>>,
    len: usize,
}

#[inline]
fn block_count(len: usize) -> usize {
    len.div_ceil(LANE_WIDTH)
}

impl<T: Copy + Default + PartialEq> PlanarBuffer<T> {
    /// Allocates a zero-initialized (`T::default()`) buffer for `len` triples.
    pub fn new(len: usize) -> Self {
        Self {
            blocks: vec![Block([T::default(); LANE_WIDTH]); 3 * block_count(len)],
            len,
        }
    }

    /// Builds a buffer from a sequence of triples, padding included.
    pub fn from_triples(triples: impl ExactSizeIterator<Item = [T; 3]>) -> Self {
        let mut result = Self::new(triples.len());
        for (i, triple) in triples.enumerate() {
            result.set(i, triple);
        }
        result.fix_padding();
        result
    }

    /// The number of logical triples.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is this buffer empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of triples this buffer can hold, padding included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.blocks_per_axis() * LANE_WIDTH
    }

    /// The number of blocks making up the run of a single axis.
    #[inline]
    pub fn blocks_per_axis(&self) -> usize {
        self.blocks.len() / 3
    }

    /// The blocks holding the `axis`-th component of every element.
    #[inline]
    pub fn axis(&self, axis: usize) -> &[Block<T>] {
        let n = self.blocks_per_axis();
        &self.blocks[axis * n..(axis + 1) * n]
    }

    /// The three axis runs.
    #[inline]
    pub fn axes(&self) -> [&[Block<T>]; 3] {
        [self.axis(0), self.axis(1), self.axis(2)]
    }

    #[inline]
    fn slot(&self, axis: usize, i: usize) -> (usize, usize) {
        (
            axis * self.blocks_per_axis() + i / LANE_WIDTH,
            i % LANE_WIDTH,
        )
    }

    #[inline]
    fn read(&self, axis: usize, i: usize) -> T {
        let (block, lane) = self.slot(axis, i);
        self.blocks[block].0[lane]
    }

    #[inline]
    fn write(&mut self, axis: usize, i: usize, value: T) {
        let (block, lane) = self.slot(axis, i);
        self.blocks[block].0[lane] = value;
    }

    /// The `i`-th triple.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    #[inline]
    pub fn get(&self, i: usize) -> [T; 3] {
        assert!(
            i < self.len,
            "planar buffer index out of bounds: {i} >= {}",
            self.len
        );
        [self.read(0, i), self.read(1, i), self.read(2, i)]
    }

    /// Overwrites the `i`-th triple.
    ///
    /// # Panics
    /// If `i >= self.len()`.
    #[inline]
    pub fn set(&mut self, i: usize, value: [T; 3]) {
        assert!(
            i < self.len,
            "planar buffer index out of bounds: {i} >= {}",
            self.len
        );
        for (axis, component) in value.into_iter().enumerate() {
            self.write(axis, i, component);
        }
    }

    /// Iterates through the logical triples.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = [T; 3]> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Replicates the last logical triple into every padding lane.
    pub fn fix_padding(&mut self) {
        if self.len == 0 {
            return;
        }

        let last = self.len - 1;
        for axis in 0..3 {
            let value = self.read(axis, last);
            for i in self.len..self.capacity() {
                self.write(axis, i, value);
            }
        }
    }

    /// Does every padding lane hold a copy of the last logical triple?
    pub fn is_padding_consistent(&self) -> bool {
        if self.len == 0 {
            return true;
        }

        let last = self.len - 1;
        (0..3).all(|axis| {
            let value = self.read(axis, last);
            (self.len..self.capacity()).all(|i| self.read(axis, i) == value)
        })
    }
}

#[cfg(test)]
mod test {
    use super::{Block, PlanarBuffer, LANE_WIDTH};

    #[test]
    fn capacity_is_padded_to_lane_width() {
        assert_eq!(PlanarBuffer::<f32>::new(0).capacity(), 0);
        assert_eq!(PlanarBuffer::<f32>::new(1).capacity(), LANE_WIDTH);
        assert_eq!(PlanarBuffer::<f32>::new(8).capacity(), 8);
        assert_eq!(PlanarBuffer::<f32>::new(9).capacity(), 16);
        assert_eq!(PlanarBuffer::<u32>::new(17).blocks_per_axis(), 3);
    }

    #[test]
    fn blocks_are_aligned() {
        assert_eq!(align_of::<Block<f32>>(), 32);
        let buf = PlanarBuffer::<f32>::new(20);
        for axis in buf.axes() {
            assert_eq!(axis.as_ptr() as usize % 32, 0);
        }
    }

    #[test]
    fn planar_layout() {
        let buf = PlanarBuffer::from_triples((0..10).map(|i| [i, 100 + i, 200 + i]));
        assert_eq!(buf.get(9), [9, 109, 209]);
        assert_eq!(buf.axis(0)[1].0[1], 9);
        assert_eq!(buf.axis(1)[0].0[3], 103);
        assert_eq!(buf.axis(2)[1].0[0], 208);
    }

    #[test]
    fn padding_replicates_last_element() {
        let mut buf = PlanarBuffer::from_triples((0..11).map(|i| [i as f32, -(i as f32), 1.0]));
        assert!(buf.is_padding_consistent());
        assert_eq!(buf.axis(0)[1].0[7], 10.0);
        assert_eq!(buf.axis(1)[1].0[5], -10.0);

        buf.set(10, [42.0, 0.0, 0.0]);
        assert!(!buf.is_padding_consistent());
        buf.fix_padding();
        assert!(buf.is_padding_consistent());
        assert_eq!(buf.axis(0)[1].0[7], 42.0);
    }

    #[test]
    fn clone_is_deep_and_take_leaves_empty() {
        let mut buf = PlanarBuffer::from_triples((0..3).map(|i| [i, i, i]));
        let copy = buf.clone();
        buf.set(0, [7, 7, 7]);
        assert_eq!(copy.get(0), [0, 0, 0]);

        let moved = core::mem::take(&mut buf);
        assert_eq!(moved.len(), 3);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_read_panics() {
        let buf = PlanarBuffer::<f32>::new(3);
        let _ = buf.get(3);
    }
}
