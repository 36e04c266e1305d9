use crate::{Scalar, backends::common::OutputBuffer};

/// Final write of every kernel: `out = beta * sanitize(out) + alpha * acc`.
///
/// # Safety
/// The calling thread must be the only one touching `index` during the dispatch.
#[inline(always)]
pub unsafe fn accumulate_into<T: Scalar>(
    output: &OutputBuffer<'_, T>,
    index: usize,
    alpha: T,
    beta: T,
    accumulator: T,
) {
    unsafe {
        let existing = output.read(index).sanitize();
        output.write(index, beta * existing + alpha * accumulator);
    }
}
