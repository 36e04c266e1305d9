use crate::{Order, Scalar, Transpose};

/// Strided, bounds-checked window onto a flat matrix buffer.
///
/// Storage order and transposition are both folded into the two strides, so
/// kernels always address the logical operand `op(X)` by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixView {
    pub offset: usize,
    pub rows: usize,
    pub cols: usize,
    pub row_stride: usize,
    pub col_stride: usize,
    pub batch_stride: usize,
    pub conjugate: bool,
}

impl MatrixView {
    /// View of a `rows x cols` matrix stored with leading dimension `leading_dim`.
    pub fn new(
        order: Order,
        rows: usize,
        cols: usize,
        leading_dim: usize,
        offset: usize,
    ) -> Self {
        let (row_stride, col_stride) = match order {
            Order::RowMajor => (leading_dim, 1),
            Order::ColumnMajor => (1, leading_dim),
        };
        Self {
            offset,
            rows,
            cols,
            row_stride,
            col_stride,
            batch_stride: 0,
            conjugate: false,
        }
    }

    /// Column vector view, used when a vector takes part in a matrix kernel.
    pub fn column(vector: &VectorView) -> Self {
        Self {
            offset: vector.offset,
            rows: vector.len,
            cols: 1,
            row_stride: vector.increment,
            col_stride: 0,
            batch_stride: vector.batch_stride,
            conjugate: false,
        }
    }

    pub fn transposed(self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
            row_stride: self.col_stride,
            col_stride: self.row_stride,
            ..self
        }
    }

    /// Applies `op` to the stored matrix.
    pub fn with_transpose(
        self,
        transpose: Transpose,
    ) -> Self {
        let view = if transpose.is_transposed() {
            self.transposed()
        } else {
            self
        };
        Self {
            conjugate: view.conjugate ^ transpose.is_conjugated(),
            ..view
        }
    }

    pub fn with_batch_stride(
        self,
        batch_stride: usize,
    ) -> Self {
        Self {
            batch_stride,
            ..self
        }
    }

    #[inline(always)]
    pub fn index(
        &self,
        batch: usize,
        row: usize,
        col: usize,
    ) -> usize {
        self.offset + batch * self.batch_stride + row * self.row_stride + col * self.col_stride
    }

    #[inline(always)]
    pub fn contains(
        &self,
        row: usize,
        col: usize,
    ) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline(always)]
    pub fn load<T: Scalar>(
        &self,
        data: &[T],
        batch: usize,
        row: usize,
        col: usize,
    ) -> T {
        let value = data[self.index(batch, row, col)];
        if self.conjugate {
            value.conj()
        } else {
            value
        }
    }

    /// Loads an element, substituting zero outside the logical extent.
    #[inline(always)]
    pub fn load_or_zero<T: Scalar>(
        &self,
        data: &[T],
        batch: usize,
        row: usize,
        col: usize,
    ) -> T {
        if self.contains(row, col) {
            self.load(data, batch, row, col)
        } else {
            T::zero()
        }
    }

    /// Elements spanned by one batch, offset excluded. `None` when the extent
    /// does not fit in `usize`.
    pub fn footprint(&self) -> Option<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Some(0);
        }
        let last_row = (self.rows - 1).checked_mul(self.row_stride)?;
        let last_col = (self.cols - 1).checked_mul(self.col_stride)?;
        last_row.checked_add(last_col)?.checked_add(1)
    }

    /// Number of buffer elements needed to address every batch. Every index
    /// the view produces is below this value, so `None` marks a view that
    /// cannot be addressed at all.
    pub fn required_len(
        &self,
        batch_count: usize,
    ) -> Option<usize> {
        if self.rows == 0 || self.cols == 0 || batch_count == 0 {
            return Some(0);
        }
        (batch_count - 1).checked_mul(self.batch_stride)?.checked_add(self.offset)?.checked_add(self.footprint()?)
    }
}

/// Strided vector window with an optional batch stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorView {
    pub offset: usize,
    pub len: usize,
    pub increment: usize,
    pub batch_stride: usize,
}

impl VectorView {
    pub fn new(
        len: usize,
        increment: usize,
        offset: usize,
    ) -> Self {
        Self {
            offset,
            len,
            increment,
            batch_stride: 0,
        }
    }

    pub fn with_batch_stride(
        self,
        batch_stride: usize,
    ) -> Self {
        Self {
            batch_stride,
            ..self
        }
    }

    #[inline(always)]
    pub fn index(
        &self,
        batch: usize,
        position: usize,
    ) -> usize {
        self.offset + batch * self.batch_stride + position * self.increment
    }

    #[inline(always)]
    pub fn load<T: Scalar>(
        &self,
        data: &[T],
        batch: usize,
        position: usize,
    ) -> T {
        data[self.index(batch, position)]
    }

    #[inline(always)]
    pub fn load_or_zero<T: Scalar>(
        &self,
        data: &[T],
        batch: usize,
        position: usize,
    ) -> T {
        if position < self.len {
            self.load(data, batch, position)
        } else {
            T::zero()
        }
    }

    pub fn footprint(&self) -> Option<usize> {
        if self.len == 0 {
            return Some(0);
        }
        (self.len - 1).checked_mul(self.increment)?.checked_add(1)
    }

    pub fn required_len(
        &self,
        batch_count: usize,
    ) -> Option<usize> {
        if self.len == 0 || batch_count == 0 {
            return Some(0);
        }
        (batch_count - 1).checked_mul(self.batch_stride)?.checked_add(self.offset)?.checked_add(self.footprint()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_major_transpose_matches_row_major() {
        let row_major = MatrixView::new(Order::RowMajor, 3, 4, 4, 0);
        let column_major = MatrixView::new(Order::ColumnMajor, 4, 3, 4, 0).transposed();
        for row in 0..3 {
            for col in 0..4 {
                assert_eq!(row_major.index(0, row, col), column_major.index(0, row, col));
            }
        }
    }

    #[test]
    fn conj_trans_sets_conjugate_flag() {
        let view = MatrixView::new(Order::RowMajor, 2, 5, 5, 0).with_transpose(Transpose::ConjTrans);
        assert!(view.conjugate);
        assert_eq!((view.rows, view.cols), (5, 2));
    }

    #[test]
    fn required_len_accounts_for_offset_and_batches() {
        let view = MatrixView::new(Order::RowMajor, 2, 3, 4, 5).with_batch_stride(10);
        assert_eq!(view.footprint(), Some(4 + 2 + 1));
        assert_eq!(view.required_len(1), Some(5 + 4 + 2 + 1));
        assert_eq!(view.required_len(3), Some(5 + 20 + 4 + 2 + 1));

        let vector = VectorView::new(4, 3, 1);
        assert_eq!(vector.required_len(1), Some(1 + 9 + 1));
        assert_eq!(VectorView::new(0, 1, 0).required_len(1), Some(0));
    }

    #[test]
    fn unaddressable_extents_are_none() {
        let offset = MatrixView::new(Order::RowMajor, 2, 2, 2, usize::MAX - 1);
        assert_eq!(offset.required_len(1), None);

        let batched = MatrixView::new(Order::RowMajor, 2, 2, 2, 0).with_batch_stride(usize::MAX / 2);
        assert_eq!(batched.required_len(2), Some(usize::MAX / 2 + 4));
        assert_eq!(batched.required_len(3), None);

        let vector = VectorView::new(3, usize::MAX / 2 + 1, 0);
        assert_eq!(vector.footprint(), None);
        assert_eq!(VectorView::new(2, 1, 0).with_batch_stride(usize::MAX).required_len(2), None);
    }

    #[test]
    fn padding_loads_zero() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let view = MatrixView::new(Order::RowMajor, 2, 2, 2, 0);
        assert_eq!(view.load_or_zero(&data, 0, 1, 1), 4.0);
        assert_eq!(view.load_or_zero(&data, 0, 2, 0), 0.0);
    }
}
