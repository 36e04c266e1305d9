//! BLAS-named entry points returning [`Status`] codes.

#![allow(clippy::too_many_arguments)]

use num_complex::{Complex32, Complex64};

use super::Blas;
use crate::{
    Order, Status, Transpose,
    arguments::{AxpyArguments, GemmArguments, GemvArguments, GerArguments},
    backends::common::Backend,
};

macro_rules! gemm_entry_points {
    ($($gemm:ident, $gemm_batched:ident => $type:ty;)+) => {
        $(
            pub fn $gemm(
                &self,
                order: Order,
                transpose_a: Transpose,
                transpose_b: Transpose,
                m: i32,
                n: i32,
                k: i32,
                alpha: $type,
                a: &[$type],
                a_offset: usize,
                lda: i32,
                b: &[$type],
                b_offset: usize,
                ldb: i32,
                beta: $type,
                c: &mut [$type],
                c_offset: usize,
                ldc: i32,
            ) -> Status {
                let arguments = GemmArguments::new(order, transpose_a, transpose_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
                    .with_offsets(a_offset, b_offset, c_offset);
                self.gemm(arguments).into()
            }

            pub fn $gemm_batched(
                &self,
                order: Order,
                transpose_a: Transpose,
                transpose_b: Transpose,
                m: i32,
                n: i32,
                k: i32,
                alpha: $type,
                a: &[$type],
                a_offset: usize,
                a_batch_stride: usize,
                lda: i32,
                b: &[$type],
                b_offset: usize,
                b_batch_stride: usize,
                ldb: i32,
                beta: $type,
                c: &mut [$type],
                c_offset: usize,
                c_batch_stride: usize,
                ldc: i32,
                batch_count: i32,
            ) -> Status {
                let arguments = GemmArguments::new(order, transpose_a, transpose_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc)
                    .with_offsets(a_offset, b_offset, c_offset)
                    .with_batches(batch_count, a_batch_stride, b_batch_stride, c_batch_stride);
                self.gemm(arguments).into()
            }
        )+
    };
}

macro_rules! gemv_entry_points {
    ($($gemv:ident, $gemv_batched:ident => $type:ty;)+) => {
        $(
            pub fn $gemv(
                &self,
                order: Order,
                transpose: Transpose,
                m: i32,
                n: i32,
                alpha: $type,
                a: &[$type],
                a_offset: usize,
                lda: i32,
                x: &[$type],
                x_offset: usize,
                incx: i32,
                beta: $type,
                y: &mut [$type],
                y_offset: usize,
                incy: i32,
            ) -> Status {
                let arguments = GemvArguments::new(order, transpose, m, n, alpha, a, lda, x, incx, beta, y, incy)
                    .with_offsets(a_offset, x_offset, y_offset);
                self.gemv(arguments).into()
            }

            pub fn $gemv_batched(
                &self,
                order: Order,
                transpose: Transpose,
                m: i32,
                n: i32,
                alpha: $type,
                a: &[$type],
                a_offset: usize,
                a_batch_stride: usize,
                lda: i32,
                x: &[$type],
                x_offset: usize,
                x_batch_stride: usize,
                incx: i32,
                beta: $type,
                y: &mut [$type],
                y_offset: usize,
                y_batch_stride: usize,
                incy: i32,
                batch_count: i32,
            ) -> Status {
                let arguments = GemvArguments::new(order, transpose, m, n, alpha, a, lda, x, incx, beta, y, incy)
                    .with_offsets(a_offset, x_offset, y_offset)
                    .with_batches(batch_count, a_batch_stride, x_batch_stride, y_batch_stride);
                self.gemv(arguments).into()
            }
        )+
    };
}

macro_rules! axpy_entry_points {
    ($($axpy:ident => $type:ty;)+) => {
        $(
            pub fn $axpy(
                &self,
                n: i32,
                alpha: $type,
                x: &[$type],
                x_offset: usize,
                incx: i32,
                y: &mut [$type],
                y_offset: usize,
                incy: i32,
            ) -> Status {
                self.axpy(AxpyArguments::new(n, alpha, x, incx, y, incy).with_offsets(x_offset, y_offset)).into()
            }
        )+
    };
}

macro_rules! ger_entry_points {
    ($($ger:ident => $type:ty;)+) => {
        $(
            pub fn $ger(
                &self,
                order: Order,
                m: i32,
                n: i32,
                alpha: $type,
                x: &[$type],
                x_offset: usize,
                incx: i32,
                y: &[$type],
                y_offset: usize,
                incy: i32,
                a: &mut [$type],
                a_offset: usize,
                lda: i32,
            ) -> Status {
                let arguments = GerArguments::new(order, m, n, alpha, x, incx, y, incy, a, lda)
                    .with_offsets(x_offset, y_offset, a_offset);
                self.ger(arguments).into()
            }
        )+
    };
}

impl<B: Backend> Blas<B> {
    gemm_entry_points! {
        sgemm, sgemm_batched => f32;
        dgemm, dgemm_batched => f64;
        cgemm, cgemm_batched => Complex32;
        zgemm, zgemm_batched => Complex64;
    }

    gemv_entry_points! {
        sgemv, sgemv_batched => f32;
        dgemv, dgemv_batched => f64;
        cgemv, cgemv_batched => Complex32;
        zgemv, zgemv_batched => Complex64;
    }

    axpy_entry_points! {
        saxpy => f32;
        daxpy => f64;
        caxpy => Complex32;
        zaxpy => Complex64;
    }

    ger_entry_points! {
        sger => f32;
        dger => f64;
    }
}
