use super::GridSize;

/// Coordinates of one thread inside its threadgroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadPosition {
    pub x: usize,
    pub y: usize,
    pub z: usize,
    /// Linear index, `x` varying fastest.
    pub index: usize,
}

/// One threadgroup of a dispatch.
///
/// Threads advance in phases: [`Threadgroup::for_each_thread`] runs its body
/// for every thread of the group and returns only after all of them have
/// finished, which acts as the barrier between phases. Values that threads
/// share live in locals owned by the kernel body (threadgroup memory); values
/// private to one thread are indexed by its position (registers).
#[derive(Debug)]
pub struct Threadgroup {
    position: [usize; 3],
    size: GridSize,
    barriers: usize,
}

impl Threadgroup {
    pub fn new(
        position: [usize; 3],
        size: GridSize,
    ) -> Self {
        Self {
            position,
            size,
            barriers: 0,
        }
    }

    /// Position of this threadgroup in the dispatch grid.
    pub fn position(&self) -> [usize; 3] {
        self.position
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn thread_count(&self) -> usize {
        self.size.volume()
    }

    pub fn barrier_count(&self) -> usize {
        self.barriers
    }

    pub fn for_each_thread<F>(
        &mut self,
        mut body: F,
    ) where
        F: FnMut(ThreadPosition),
    {
        let mut index = 0;
        for z in 0..self.size.depth {
            for y in 0..self.size.height {
                for x in 0..self.size.width {
                    body(ThreadPosition {
                        x,
                        y,
                        z,
                        index,
                    });
                    index += 1;
                }
            }
        }
        self.barriers += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_visits_every_thread_once() {
        let mut group = Threadgroup::new([0, 0, 0], GridSize::new(4, 2, 1));
        let mut visited = vec![0; group.thread_count()];
        group.for_each_thread(|thread| {
            assert_eq!(thread.index, thread.y * 4 + thread.x);
            visited[thread.index] += 1;
        });
        assert!(visited.iter().all(|&count| count == 1));
        assert_eq!(group.barrier_count(), 1);
    }
}
