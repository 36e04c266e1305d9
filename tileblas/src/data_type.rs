use std::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

use num_complex::Complex;
use num_traits::{One, Zero};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum DataType {
    F32,
    F64,
    ComplexF32,
    ComplexF64,
}

impl DataType {
    pub const fn size_in_bits(&self) -> usize {
        match self {
            DataType::F32 => 32,
            DataType::F64 | DataType::ComplexF32 => 64,
            DataType::ComplexF64 => 128,
        }
    }

    pub const fn size_in_bytes(&self) -> usize {
        self.size_in_bits().div_ceil(8)
    }

    pub const fn is_complex(&self) -> bool {
        matches!(self, DataType::ComplexF32 | DataType::ComplexF64)
    }

    /// Single-letter BLAS prefix (`s`, `d`, `c`, `z`).
    pub const fn prefix(&self) -> char {
        match self {
            DataType::F32 => 's',
            DataType::F64 => 'd',
            DataType::ComplexF32 => 'c',
            DataType::ComplexF64 => 'z',
        }
    }
}

/// Element type accepted by every kernel.
pub trait Scalar:
    Copy + Debug + PartialEq + Send + Sync + Zero + One + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + 'static
{
    const DATA_TYPE: DataType;

    /// Complex conjugate; identity for real types.
    fn conj(self) -> Self;

    /// Replaces every non-finite component with zero.
    fn sanitize(self) -> Self;

    fn is_finite(self) -> bool;

    /// Euclidean magnitude widened to `f64`.
    fn magnitude(self) -> f64;
}

fn sanitize_component<F: num_traits::Float>(value: F) -> F {
    if value.is_finite() {
        value
    } else {
        F::zero()
    }
}

macro_rules! impl_real_scalar {
    ($($type:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Scalar for $type {
                const DATA_TYPE: DataType = DataType::$variant;

                #[inline(always)]
                fn conj(self) -> Self {
                    self
                }

                #[inline(always)]
                fn sanitize(self) -> Self {
                    sanitize_component(self)
                }

                #[inline(always)]
                fn is_finite(self) -> bool {
                    <$type>::is_finite(self)
                }

                fn magnitude(self) -> f64 {
                    (self as f64).abs()
                }
            }
        )+
    };
}

macro_rules! impl_complex_scalar {
    ($($type:ty => $variant:ident),+ $(,)?) => {
        $(
            impl Scalar for Complex<$type> {
                const DATA_TYPE: DataType = DataType::$variant;

                #[inline(always)]
                fn conj(self) -> Self {
                    Complex::conj(&self)
                }

                #[inline(always)]
                fn sanitize(self) -> Self {
                    Complex::new(sanitize_component(self.re), sanitize_component(self.im))
                }

                #[inline(always)]
                fn is_finite(self) -> bool {
                    Complex::is_finite(self)
                }

                fn magnitude(self) -> f64 {
                    (self.re as f64).hypot(self.im as f64)
                }
            }
        )+
    };
}

impl_real_scalar! {
    f32 => F32,
    f64 => F64,
}

impl_complex_scalar! {
    f32 => ComplexF32,
    f64 => ComplexF64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_zeroes_non_finite_reals() {
        assert_eq!(f32::NAN.sanitize(), 0.0);
        assert_eq!(f64::NEG_INFINITY.sanitize(), 0.0);
        assert_eq!(2.5f32.sanitize(), 2.5);
    }

    #[test]
    fn sanitize_treats_complex_components_separately() {
        let value = Complex::new(f32::NAN, 3.0).sanitize();
        assert_eq!(value, Complex::new(0.0, 3.0));

        let value = Complex::new(1.0f64, f64::INFINITY).sanitize();
        assert_eq!(value, Complex::new(1.0, 0.0));
    }

    #[test]
    fn conj_only_affects_complex() {
        assert_eq!(Scalar::conj(4.0f64), 4.0);
        assert_eq!(Scalar::conj(Complex::new(1.0f32, 2.0)), Complex::new(1.0, -2.0));
    }

    #[test]
    fn sizes_match_element_types() {
        assert_eq!(<f32 as Scalar>::DATA_TYPE.size_in_bytes(), std::mem::size_of::<f32>());
        assert_eq!(<Complex<f64> as Scalar>::DATA_TYPE.size_in_bytes(), std::mem::size_of::<Complex<f64>>());
        assert!(DataType::ComplexF32.is_complex());
    }
}
