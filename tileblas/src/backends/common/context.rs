use std::rc::Rc;

use super::{Backend, GridSize, Threadgroup};
use crate::config::Config;

/// Execution context able to run a grid of cooperating threadgroups.
pub trait Context: Sized {
    type Backend: Backend<Context = Self>;

    fn new(config: &Config) -> Result<Rc<Self>, <Self::Backend as Backend>::Error>;

    fn max_threads_per_threadgroup(&self) -> usize;

    fn max_threadgroup_memory_length(&self) -> usize;

    /// Runs `kernel` once per threadgroup of `threadgroups` and returns once every
    /// threadgroup has finished. Threadgroups execute in no particular order.
    /// `threadgroup_memory_length` is the shared memory, in bytes, each group needs.
    fn dispatch_threadgroups<F>(
        &self,
        threadgroups: GridSize,
        threads_per_threadgroup: GridSize,
        threadgroup_memory_length: usize,
        kernel: F,
    ) -> Result<(), <Self::Backend as Backend>::Error>
    where
        F: Fn(&mut Threadgroup) + Sync;

    /// Zero-initialized scratch memory that lives for the duration of one call.
    fn allocate_scratch<T: Clone + num_traits::Zero>(
        &self,
        length: usize,
    ) -> Result<Vec<T>, <Self::Backend as Backend>::Error>;
}
