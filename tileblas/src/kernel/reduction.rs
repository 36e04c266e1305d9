use crate::{Scalar, backends::common::Threadgroup};

/// Tree-sums `values` (one slot per thread, power-of-two length) in
/// `log2(len)` barrier-separated halving steps. Only slot 0 holds the total
/// afterwards.
pub fn threadgroup_sum<T: Scalar>(
    group: &mut Threadgroup,
    values: &mut [T],
) -> T {
    debug_assert!(values.len().is_power_of_two());
    debug_assert_eq!(values.len(), group.thread_count());

    let mut stride = values.len() / 2;
    while stride > 0 {
        group.for_each_thread(|thread| {
            if thread.index < stride {
                values[thread.index] = values[thread.index] + values[thread.index + stride];
            }
        });
        stride /= 2;
    }
    values[0]
}
