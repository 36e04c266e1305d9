#![allow(dead_code)]

use std::rc::Rc;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tileblas::{Blas, Complex, Config, Context, Cpu, CpuContext, Order, Scalar, Transpose};

pub const SEED: u64 = 2025;

pub fn create_test_blas() -> Blas<Cpu> {
    create_test_blas_with(Config {
        num_threads: Some(4),
        ..Default::default()
    })
}

pub fn create_test_blas_with(config: Config) -> Blas<Cpu> {
    let context = CpuContext::new(&config).expect("cpu context");
    Blas::new(context, config).expect("blas")
}

pub fn test_context() -> Rc<CpuContext> {
    CpuContext::new(&Config::default()).expect("cpu context")
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

pub trait TestScalar: Scalar {
    fn random(rng: &mut StdRng) -> Self;

    fn from_real(value: f64) -> Self;

    /// Absolute tolerance per unit of accumulated magnitude.
    const TOLERANCE: f64;
}

impl TestScalar for f32 {
    const TOLERANCE: f64 = 1e-4;

    fn random(rng: &mut StdRng) -> Self {
        rng.random_range(-1.0..1.0)
    }

    fn from_real(value: f64) -> Self {
        value as f32
    }
}

impl TestScalar for f64 {
    const TOLERANCE: f64 = 1e-10;

    fn random(rng: &mut StdRng) -> Self {
        rng.random_range(-1.0..1.0)
    }

    fn from_real(value: f64) -> Self {
        value
    }
}

impl TestScalar for Complex<f32> {
    const TOLERANCE: f64 = 1e-4;

    fn random(rng: &mut StdRng) -> Self {
        Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    }

    fn from_real(value: f64) -> Self {
        Complex::new(value as f32, 0.0)
    }
}

impl TestScalar for Complex<f64> {
    const TOLERANCE: f64 = 1e-10;

    fn random(rng: &mut StdRng) -> Self {
        Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0))
    }

    fn from_real(value: f64) -> Self {
        Complex::new(value, 0.0)
    }
}

pub fn random_vec<T: TestScalar>(
    rng: &mut StdRng,
    len: usize,
) -> Vec<T> {
    (0..len).map(|_| T::random(rng)).collect()
}

/// Element `(row, col)` of `op(X)` where `X` is stored with leading dimension `ld`.
pub fn op_element<T: Scalar>(
    data: &[T],
    order: Order,
    transpose: Transpose,
    ld: usize,
    row: usize,
    col: usize,
) -> T {
    let (stored_row, stored_col) = if transpose.is_transposed() {
        (col, row)
    } else {
        (row, col)
    };
    let index = match order {
        Order::RowMajor => stored_row * ld + stored_col,
        Order::ColumnMajor => stored_col * ld + stored_row,
    };
    if transpose.is_conjugated() {
        data[index].conj()
    } else {
        data[index]
    }
}

fn write_back<T: Scalar>(
    existing: T,
    alpha: T,
    beta: T,
    accumulator: T,
) -> T {
    if alpha == T::zero() {
        if beta == T::zero() {
            T::zero()
        } else {
            beta * existing.sanitize()
        }
    } else {
        beta * existing.sanitize() + alpha * accumulator
    }
}

pub struct GemmCase {
    pub order: Order,
    pub transpose_a: Transpose,
    pub transpose_b: Transpose,
    pub m: usize,
    pub n: usize,
    pub k: usize,
}

impl GemmCase {
    pub fn new(
        order: Order,
        transpose_a: Transpose,
        transpose_b: Transpose,
        m: usize,
        n: usize,
        k: usize,
    ) -> Self {
        Self {
            order,
            transpose_a,
            transpose_b,
            m,
            n,
            k,
        }
    }

    fn stored(
        &self,
        rows: usize,
        cols: usize,
        transpose: Transpose,
    ) -> (usize, usize) {
        if transpose.is_transposed() {
            (cols, rows)
        } else {
            (rows, cols)
        }
    }

    fn leading_dim(
        &self,
        rows: usize,
        cols: usize,
    ) -> usize {
        match self.order {
            Order::RowMajor => cols,
            Order::ColumnMajor => rows,
        }
    }

    pub fn lda(&self) -> usize {
        let (rows, cols) = self.stored(self.m, self.k, self.transpose_a);
        self.leading_dim(rows, cols)
    }

    pub fn ldb(&self) -> usize {
        let (rows, cols) = self.stored(self.k, self.n, self.transpose_b);
        self.leading_dim(rows, cols)
    }

    pub fn ldc(&self) -> usize {
        self.leading_dim(self.m, self.n)
    }

    pub fn c_index(
        &self,
        row: usize,
        col: usize,
    ) -> usize {
        match self.order {
            Order::RowMajor => row * self.ldc() + col,
            Order::ColumnMajor => col * self.ldc() + row,
        }
    }

    /// Reference triple loop over densely packed operands.
    pub fn reference<T: Scalar>(
        &self,
        alpha: T,
        a: &[T],
        b: &[T],
        beta: T,
        c: &[T],
    ) -> Vec<T> {
        let mut out = c.to_vec();
        for row in 0..self.m {
            for col in 0..self.n {
                let mut accumulator = T::zero();
                for p in 0..self.k {
                    let a_value = op_element(a, self.order, self.transpose_a, self.lda(), row, p);
                    let b_value = op_element(b, self.order, self.transpose_b, self.ldb(), p, col);
                    accumulator = accumulator + a_value * b_value;
                }
                let index = self.c_index(row, col);
                out[index] = write_back(c[index], alpha, beta, accumulator);
            }
        }
        out
    }
}

/// Reference GEMV over densely packed `A` (`m x n` stored) and strided vectors.
pub fn gemv_reference<T: Scalar>(
    order: Order,
    transpose: Transpose,
    m: usize,
    n: usize,
    alpha: T,
    a: &[T],
    x: &[T],
    incx: usize,
    beta: T,
    y: &[T],
    incy: usize,
) -> Vec<T> {
    let (output_len, reduction_len) = if transpose.is_transposed() {
        (n, m)
    } else {
        (m, n)
    };
    let lda = match order {
        Order::RowMajor => n,
        Order::ColumnMajor => m,
    };
    let mut out = y.to_vec();
    for row in 0..output_len {
        let mut accumulator = T::zero();
        for column in 0..reduction_len {
            accumulator = accumulator + op_element(a, order, transpose, lda, row, column) * x[column * incx];
        }
        out[row * incy] = write_back(y[row * incy], alpha, beta, accumulator);
    }
    out
}

pub fn assert_close<T: TestScalar>(
    expected: &[T],
    got: &[T],
    scale: f64,
) {
    assert_eq!(expected.len(), got.len());
    let tolerance = T::TOLERANCE * scale.max(1.0);
    for (i, (&e, &g)) in expected.iter().zip(got.iter()).enumerate() {
        let diff = (e - g).magnitude();
        assert!(diff <= tolerance, "idx {i}: exp {e:?} got {g:?} diff {diff}");
    }
}
