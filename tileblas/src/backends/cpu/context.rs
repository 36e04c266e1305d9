use std::rc::Rc;

use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};

use crate::{
    backends::{
        common::{Backend, Context, GridSize, Threadgroup},
        cpu::{backend::Cpu, error::CpuError},
    },
    config::Config,
};

const MAX_THREADS_PER_THREADGROUP: usize = 1024;
const MAX_THREADGROUP_MEMORY_LENGTH: usize = 32 * 1024;

/// Runs threadgroups on a rayon worker pool; threads inside one group are
/// executed phase by phase on the worker that owns the group.
pub struct CpuContext {
    pool: ThreadPool,
}

impl CpuContext {
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Context for CpuContext {
    type Backend = Cpu;

    fn new(config: &Config) -> Result<Rc<Self>, <Self::Backend as Backend>::Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.num_threads.unwrap_or(0))
            .thread_name(|index| format!("tileblas-worker-{index}"))
            .build()?;
        tracing::debug!(num_threads = pool.current_num_threads(), "created cpu context");
        Ok(Rc::new(Self {
            pool,
        }))
    }

    fn max_threads_per_threadgroup(&self) -> usize {
        MAX_THREADS_PER_THREADGROUP
    }

    fn max_threadgroup_memory_length(&self) -> usize {
        MAX_THREADGROUP_MEMORY_LENGTH
    }

    fn dispatch_threadgroups<F>(
        &self,
        threadgroups: GridSize,
        threads_per_threadgroup: GridSize,
        threadgroup_memory_length: usize,
        kernel: F,
    ) -> Result<(), <Self::Backend as Backend>::Error>
    where
        F: Fn(&mut Threadgroup) + Sync,
    {
        let requested = threads_per_threadgroup.volume();
        if requested == 0 || requested > MAX_THREADS_PER_THREADGROUP {
            return Err(CpuError::ThreadgroupTooLarge {
                requested,
                limit: MAX_THREADS_PER_THREADGROUP,
            });
        }

        if threadgroup_memory_length > MAX_THREADGROUP_MEMORY_LENGTH {
            return Err(CpuError::ThreadgroupMemoryExceeded {
                requested: threadgroup_memory_length,
                limit: MAX_THREADGROUP_MEMORY_LENGTH,
            });
        }

        tracing::trace!(?threadgroups, ?threads_per_threadgroup, threadgroup_memory_length, "dispatch");

        self.pool.install(|| {
            (0..threadgroups.volume()).into_par_iter().for_each(|linear_index| {
                let mut group = Threadgroup::new(threadgroups.position(linear_index), threads_per_threadgroup);
                kernel(&mut group);
            });
        });
        Ok(())
    }

    fn allocate_scratch<T: Clone + num_traits::Zero>(
        &self,
        length: usize,
    ) -> Result<Vec<T>, <Self::Backend as Backend>::Error> {
        let bytes = length.saturating_mul(std::mem::size_of::<T>());
        let mut scratch = Vec::new();
        scratch.try_reserve_exact(length).map_err(|_| CpuError::OutOfMemory {
            bytes,
        })?;
        scratch.resize(length, T::zero());
        Ok(scratch)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn context() -> Rc<CpuContext> {
        CpuContext::new(&Config {
            num_threads: Some(2),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn every_threadgroup_runs_once() {
        let context = context();
        let counter = AtomicUsize::new(0);
        context
            .dispatch_threadgroups(GridSize::new(3, 2, 2), GridSize::linear(8), 0, |group| {
                assert_eq!(group.thread_count(), 8);
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();
        assert_eq!(counter.load(Ordering::Relaxed), 12);
    }

    #[test]
    fn oversized_threadgroups_are_rejected() {
        let context = context();
        let result = context.dispatch_threadgroups(GridSize::linear(1), GridSize::new(64, 64, 1), 0, |_| {});
        assert!(matches!(result, Err(CpuError::ThreadgroupTooLarge { .. })));

        let result = context.dispatch_threadgroups(GridSize::linear(1), GridSize::linear(32), 1 << 20, |_| {});
        assert!(matches!(result, Err(CpuError::ThreadgroupMemoryExceeded { .. })));
    }

    #[test]
    fn impossible_scratch_reports_out_of_memory() {
        let context = context();
        let result = context.allocate_scratch::<f64>(usize::MAX / 4);
        assert!(matches!(result, Err(CpuError::OutOfMemory { .. })));
        assert_eq!(context.allocate_scratch::<f32>(4).unwrap(), vec![0.0; 4]);
    }
}
