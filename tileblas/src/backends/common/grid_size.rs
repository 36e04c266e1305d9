#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl GridSize {
    pub const fn new(
        width: usize,
        height: usize,
        depth: usize,
    ) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub const fn linear(width: usize) -> Self {
        Self::new(width, 1, 1)
    }

    pub const fn volume(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Decomposes a linear index into `[x, y, z]`, `x` varying fastest.
    pub const fn position(
        &self,
        linear_index: usize,
    ) -> [usize; 3] {
        let x = linear_index % self.width;
        let y = (linear_index / self.width) % self.height;
        let z = linear_index / (self.width * self.height);
        [x, y, z]
    }
}
