#![allow(clippy::too_many_arguments)]

use crate::{MatrixView, Order, Scalar, Transpose, VectorView, error::BlasError};

/// `C = alpha * op(A) * op(B) + beta * C`, optionally over `batch_count`
/// independent matrices.
#[derive(Debug)]
pub struct GemmArguments<'a, T: Scalar> {
    pub order: Order,
    pub transpose_a: Transpose,
    pub transpose_b: Transpose,
    /// Rows of `op(A)` and `C`.
    pub m: i32,
    /// Columns of `op(B)` and `C`.
    pub n: i32,
    /// Columns of `op(A)`, rows of `op(B)`.
    pub k: i32,
    pub alpha: T,
    pub a: &'a [T],
    pub a_offset: usize,
    pub lda: i32,
    pub b: &'a [T],
    pub b_offset: usize,
    pub ldb: i32,
    pub beta: T,
    pub c: &'a mut [T],
    pub c_offset: usize,
    pub ldc: i32,
    pub batch_count: i32,
    pub a_batch_stride: usize,
    pub b_batch_stride: usize,
    pub c_batch_stride: usize,
}

/// Validated GEMM geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemmLayout {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub batch_count: usize,
    /// `op(A)`, `m x k`.
    pub a_view: MatrixView,
    /// `op(B)`, `k x n`.
    pub b_view: MatrixView,
    pub c_view: MatrixView,
}

impl<'a, T: Scalar> GemmArguments<'a, T> {
    pub fn new(
        order: Order,
        transpose_a: Transpose,
        transpose_b: Transpose,
        m: i32,
        n: i32,
        k: i32,
        alpha: T,
        a: &'a [T],
        lda: i32,
        b: &'a [T],
        ldb: i32,
        beta: T,
        c: &'a mut [T],
        ldc: i32,
    ) -> Self {
        Self {
            order,
            transpose_a,
            transpose_b,
            m,
            n,
            k,
            alpha,
            a,
            a_offset: 0,
            lda,
            b,
            b_offset: 0,
            ldb,
            beta,
            c,
            c_offset: 0,
            ldc,
            batch_count: 1,
            a_batch_stride: 0,
            b_batch_stride: 0,
            c_batch_stride: 0,
        }
    }

    pub fn with_offsets(
        self,
        a_offset: usize,
        b_offset: usize,
        c_offset: usize,
    ) -> Self {
        Self {
            a_offset,
            b_offset,
            c_offset,
            ..self
        }
    }

    pub fn with_batches(
        self,
        batch_count: i32,
        a_batch_stride: usize,
        b_batch_stride: usize,
        c_batch_stride: usize,
    ) -> Self {
        Self {
            batch_count,
            a_batch_stride,
            b_batch_stride,
            c_batch_stride,
            ..self
        }
    }

    pub fn layout(&self) -> Result<GemmLayout, BlasError> {
        let m = positive("m", self.m)?;
        let n = positive("n", self.n)?;
        let k = positive("k", self.k)?;
        let batch_count = positive("batch_count", self.batch_count)?;

        let (a_rows, a_cols) = if self.transpose_a.is_transposed() {
            (k, m)
        } else {
            (m, k)
        };
        let (b_rows, b_cols) = if self.transpose_b.is_transposed() {
            (n, k)
        } else {
            (k, n)
        };

        let a_view = matrix("a", self.order, a_rows, a_cols, self.lda, self.a_offset)?
            .with_transpose(self.transpose_a)
            .with_batch_stride(self.a_batch_stride);
        let b_view = matrix("b", self.order, b_rows, b_cols, self.ldb, self.b_offset)?
            .with_transpose(self.transpose_b)
            .with_batch_stride(self.b_batch_stride);
        let c_view = matrix("c", self.order, m, n, self.ldc, self.c_offset)?.with_batch_stride(self.c_batch_stride);

        require_len("a", self.a.len(), a_view.required_len(batch_count))?;
        require_len("b", self.b.len(), b_view.required_len(batch_count))?;
        require_len("c", self.c.len(), c_view.required_len(batch_count))?;
        require_disjoint_batches("c", batch_count, self.c_batch_stride, c_view.footprint())?;

        Ok(GemmLayout {
            m,
            n,
            k,
            batch_count,
            a_view,
            b_view,
            c_view,
        })
    }
}

/// `y = alpha * op(A) * x + beta * y` where `A` is stored as `m x n`.
#[derive(Debug)]
pub struct GemvArguments<'a, T: Scalar> {
    pub order: Order,
    pub transpose: Transpose,
    pub m: i32,
    pub n: i32,
    pub alpha: T,
    pub a: &'a [T],
    pub a_offset: usize,
    pub lda: i32,
    pub x: &'a [T],
    pub x_offset: usize,
    pub incx: i32,
    pub beta: T,
    pub y: &'a mut [T],
    pub y_offset: usize,
    pub incy: i32,
    pub batch_count: i32,
    pub a_batch_stride: usize,
    pub x_batch_stride: usize,
    pub y_batch_stride: usize,
}

/// Validated GEMV geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GemvLayout {
    pub batch_count: usize,
    /// `op(A)`, `y.len x x.len`.
    pub a_view: MatrixView,
    pub x_view: VectorView,
    pub y_view: VectorView,
}

impl GemvLayout {
    pub fn output_len(&self) -> usize {
        self.a_view.rows
    }

    pub fn reduction_len(&self) -> usize {
        self.a_view.cols
    }
}

impl<'a, T: Scalar> GemvArguments<'a, T> {
    pub fn new(
        order: Order,
        transpose: Transpose,
        m: i32,
        n: i32,
        alpha: T,
        a: &'a [T],
        lda: i32,
        x: &'a [T],
        incx: i32,
        beta: T,
        y: &'a mut [T],
        incy: i32,
    ) -> Self {
        Self {
            order,
            transpose,
            m,
            n,
            alpha,
            a,
            a_offset: 0,
            lda,
            x,
            x_offset: 0,
            incx,
            beta,
            y,
            y_offset: 0,
            incy,
            batch_count: 1,
            a_batch_stride: 0,
            x_batch_stride: 0,
            y_batch_stride: 0,
        }
    }

    pub fn with_offsets(
        self,
        a_offset: usize,
        x_offset: usize,
        y_offset: usize,
    ) -> Self {
        Self {
            a_offset,
            x_offset,
            y_offset,
            ..self
        }
    }

    pub fn with_batches(
        self,
        batch_count: i32,
        a_batch_stride: usize,
        x_batch_stride: usize,
        y_batch_stride: usize,
    ) -> Self {
        Self {
            batch_count,
            a_batch_stride,
            x_batch_stride,
            y_batch_stride,
            ..self
        }
    }

    pub fn layout(&self) -> Result<GemvLayout, BlasError> {
        let m = positive("m", self.m)?;
        let n = positive("n", self.n)?;
        let incx = positive("incx", self.incx)?;
        let incy = positive("incy", self.incy)?;
        let batch_count = positive("batch_count", self.batch_count)?;

        let a_view = matrix("a", self.order, m, n, self.lda, self.a_offset)?
            .with_transpose(self.transpose)
            .with_batch_stride(self.a_batch_stride);
        let x_view = VectorView::new(a_view.cols, incx, self.x_offset).with_batch_stride(self.x_batch_stride);
        let y_view = VectorView::new(a_view.rows, incy, self.y_offset).with_batch_stride(self.y_batch_stride);

        require_len("a", self.a.len(), a_view.required_len(batch_count))?;
        require_len("x", self.x.len(), x_view.required_len(batch_count))?;
        require_len("y", self.y.len(), y_view.required_len(batch_count))?;
        require_disjoint_batches("y", batch_count, self.y_batch_stride, y_view.footprint())?;

        Ok(GemvLayout {
            batch_count,
            a_view,
            x_view,
            y_view,
        })
    }
}

/// `y = alpha * x + y` over `n` strided elements.
#[derive(Debug)]
pub struct AxpyArguments<'a, T: Scalar> {
    pub n: i32,
    pub alpha: T,
    pub x: &'a [T],
    pub x_offset: usize,
    pub incx: i32,
    pub y: &'a mut [T],
    pub y_offset: usize,
    pub incy: i32,
}

impl<'a, T: Scalar> AxpyArguments<'a, T> {
    pub fn new(
        n: i32,
        alpha: T,
        x: &'a [T],
        incx: i32,
        y: &'a mut [T],
        incy: i32,
    ) -> Self {
        Self {
            n,
            alpha,
            x,
            x_offset: 0,
            incx,
            y,
            y_offset: 0,
            incy,
        }
    }

    pub fn with_offsets(
        self,
        x_offset: usize,
        y_offset: usize,
    ) -> Self {
        Self {
            x_offset,
            y_offset,
            ..self
        }
    }

    pub fn layout(&self) -> Result<(VectorView, VectorView), BlasError> {
        let n = positive("n", self.n)?;
        let x_view = VectorView::new(n, positive("incx", self.incx)?, self.x_offset);
        let y_view = VectorView::new(n, positive("incy", self.incy)?, self.y_offset);
        require_len("x", self.x.len(), x_view.required_len(1))?;
        require_len("y", self.y.len(), y_view.required_len(1))?;
        Ok((x_view, y_view))
    }
}

/// `A = alpha * x * y^T + A` with `A` stored as `m x n`.
#[derive(Debug)]
pub struct GerArguments<'a, T: Scalar> {
    pub order: Order,
    pub m: i32,
    pub n: i32,
    pub alpha: T,
    pub x: &'a [T],
    pub x_offset: usize,
    pub incx: i32,
    pub y: &'a [T],
    pub y_offset: usize,
    pub incy: i32,
    pub a: &'a mut [T],
    pub a_offset: usize,
    pub lda: i32,
}

impl<'a, T: Scalar> GerArguments<'a, T> {
    pub fn new(
        order: Order,
        m: i32,
        n: i32,
        alpha: T,
        x: &'a [T],
        incx: i32,
        y: &'a [T],
        incy: i32,
        a: &'a mut [T],
        lda: i32,
    ) -> Self {
        Self {
            order,
            m,
            n,
            alpha,
            x,
            x_offset: 0,
            incx,
            y,
            y_offset: 0,
            incy,
            a,
            a_offset: 0,
            lda,
        }
    }

    pub fn with_offsets(
        self,
        x_offset: usize,
        y_offset: usize,
        a_offset: usize,
    ) -> Self {
        Self {
            x_offset,
            y_offset,
            a_offset,
            ..self
        }
    }

    pub fn layout(&self) -> Result<(VectorView, VectorView, MatrixView), BlasError> {
        let m = positive("m", self.m)?;
        let n = positive("n", self.n)?;
        let x_view = VectorView::new(m, positive("incx", self.incx)?, self.x_offset);
        let y_view = VectorView::new(n, positive("incy", self.incy)?, self.y_offset);
        let a_view = matrix("a", self.order, m, n, self.lda, self.a_offset)?;
        require_len("x", self.x.len(), x_view.required_len(1))?;
        require_len("y", self.y.len(), y_view.required_len(1))?;
        require_len("a", self.a.len(), a_view.required_len(1))?;
        Ok((x_view, y_view, a_view))
    }
}

fn positive(
    name: &str,
    value: i32,
) -> Result<usize, BlasError> {
    if value <= 0 {
        return Err(BlasError::invalid(format!("{name} must be positive, got {value}")));
    }
    Ok(value as usize)
}

/// View of a stored `rows x cols` matrix after checking its leading dimension.
fn matrix(
    name: &str,
    order: Order,
    rows: usize,
    cols: usize,
    leading_dim: i32,
    offset: usize,
) -> Result<MatrixView, BlasError> {
    let minimum = match order {
        Order::RowMajor => cols,
        Order::ColumnMajor => rows,
    };
    if leading_dim <= 0 || (leading_dim as usize) < minimum {
        return Err(BlasError::invalid(format!(
            "leading dimension of {name} must be at least {minimum}, got {leading_dim}"
        )));
    }
    Ok(MatrixView::new(order, rows, cols, leading_dim as usize, offset))
}

/// Extent that overflows `usize` can never be backed by a buffer.
fn addressable(
    name: &str,
    extent: Option<usize>,
) -> Result<usize, BlasError> {
    extent.ok_or_else(|| BlasError::invalid(format!("offsets and strides of {name} overflow the address space")))
}

fn require_len(
    name: &str,
    actual: usize,
    required: Option<usize>,
) -> Result<(), BlasError> {
    if actual == 0 {
        return Err(BlasError::invalid(format!("buffer {name} is empty")));
    }
    let required = addressable(name, required)?;
    if actual < required {
        return Err(BlasError::invalid(format!("buffer {name} holds {actual} elements, {required} required")));
    }
    Ok(())
}

fn require_disjoint_batches(
    name: &str,
    batch_count: usize,
    batch_stride: usize,
    footprint: Option<usize>,
) -> Result<(), BlasError> {
    let footprint = addressable(name, footprint)?;
    if batch_count > 1 && batch_stride < footprint {
        return Err(BlasError::invalid(format!(
            "batch stride of {name} ({batch_stride}) is smaller than one batch element ({footprint})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemm_layout_applies_transposes() {
        let a = [0.0f32; 6];
        let b = [0.0f32; 12];
        let mut c = [0.0f32; 8];
        let arguments = GemmArguments::new(
            Order::RowMajor,
            Transpose::Trans,
            Transpose::NoTrans,
            2,
            4,
            3,
            1.0,
            &a,
            2,
            &b,
            4,
            0.0,
            &mut c,
            4,
        );
        let layout = arguments.layout().unwrap();
        assert_eq!((layout.a_view.rows, layout.a_view.cols), (2, 3));
        assert_eq!((layout.b_view.rows, layout.b_view.cols), (3, 4));
        assert_eq!(layout.a_view.index(0, 1, 2), 2 * 2 + 1);
    }

    #[test]
    fn gemv_layout_swaps_lengths_when_transposed() {
        let a = [0.0f64; 12];
        let x = [0.0f64; 3];
        let mut y = [0.0f64; 4];
        let layout =
            GemvArguments::new(Order::RowMajor, Transpose::Trans, 3, 4, 1.0, &a, 4, &x, 1, 0.0, &mut y, 1)
                .layout()
                .unwrap();
        assert_eq!(layout.output_len(), 4);
        assert_eq!(layout.reduction_len(), 3);
    }

    #[test]
    fn overlapping_output_batches_are_rejected() {
        let a = [0.0f32; 64];
        let b = [0.0f32; 64];
        let mut c = [0.0f32; 64];
        let arguments =
            GemmArguments::new(Order::RowMajor, Transpose::NoTrans, Transpose::NoTrans, 2, 2, 2, 1.0, &a, 2, &b, 2, 0.0, &mut c, 2)
                .with_batches(2, 4, 4, 3);
        assert!(matches!(arguments.layout(), Err(BlasError::InvalidArgument(_))));
    }
}
