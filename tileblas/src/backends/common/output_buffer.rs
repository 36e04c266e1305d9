use std::marker::PhantomData;

/// Output slice shared by every threadgroup of a dispatch.
///
/// Threadgroups run concurrently and each one owns a disjoint set of output
/// elements, so element access goes through raw pointers instead of `&mut`.
pub struct OutputBuffer<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

unsafe impl<T: Send> Send for OutputBuffer<'_, T> {}
unsafe impl<T: Send> Sync for OutputBuffer<'_, T> {}

impl<'a, T: Copy> OutputBuffer<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self {
            ptr: slice.as_mut_ptr(),
            len: slice.len(),
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// # Safety
    /// No other thread may write `index` during this dispatch.
    #[inline(always)]
    pub unsafe fn read(
        &self,
        index: usize,
    ) -> T {
        assert!(index < self.len, "output index {index} out of bounds for length {}", self.len);
        unsafe { self.ptr.add(index).read() }
    }

    /// # Safety
    /// `index` must be owned by the calling thread for the whole dispatch.
    #[inline(always)]
    pub unsafe fn write(
        &self,
        index: usize,
        value: T,
    ) {
        assert!(index < self.len, "output index {index} out of bounds for length {}", self.len);
        unsafe { self.ptr.add(index).write(value) }
    }
}
