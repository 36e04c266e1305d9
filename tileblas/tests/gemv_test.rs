mod common;

use common::{TestScalar, assert_close, create_test_blas, create_test_blas_with, gemv_reference, random_vec, rng};
use tileblas::{Blas, Complex, Config, Cpu, GemvArguments, Order, Status, Transpose};

const ORDERS: [Order; 2] = [Order::RowMajor, Order::ColumnMajor];
const TRANSPOSES: [Transpose; 3] = [Transpose::NoTrans, Transpose::Trans, Transpose::ConjTrans];

fn check_gemv<T: TestScalar>(
    blas: &Blas<Cpu>,
    order: Order,
    transpose: Transpose,
    m: usize,
    n: usize,
    incx: usize,
    incy: usize,
) {
    let mut rng = rng();
    let (output_len, reduction_len) = if transpose.is_transposed() {
        (n, m)
    } else {
        (m, n)
    };
    let lda = match order {
        Order::RowMajor => n,
        Order::ColumnMajor => m,
    };
    let a: Vec<T> = random_vec(&mut rng, m * n);
    let x: Vec<T> = random_vec(&mut rng, (reduction_len - 1) * incx + 1);
    let y: Vec<T> = random_vec(&mut rng, (output_len - 1) * incy + 1);
    let alpha = T::from_real(1.5);
    let beta = T::from_real(-0.5);

    let expected = gemv_reference(order, transpose, m, n, alpha, &a, &x, incx, beta, &y, incy);
    let mut got = y.clone();
    let arguments = GemvArguments::new(
        order,
        transpose,
        m as i32,
        n as i32,
        alpha,
        &a,
        lda as i32,
        &x,
        incx as i32,
        beta,
        &mut got,
        incy as i32,
    );
    blas.gemv(arguments).expect("gemv");
    assert_close(&expected, &got, reduction_len as f64);
}

#[test]
fn gemv_all_orders_and_transposes() {
    let blas = create_test_blas();
    for order in ORDERS {
        for transpose in TRANSPOSES {
            check_gemv::<f32>(&blas, order, transpose, 45, 300, 1, 1);
            check_gemv::<f64>(&blas, order, transpose, 513, 7, 1, 1);
        }
    }
}

#[test]
fn gemv_strided_vectors() {
    let blas = create_test_blas();
    for transpose in TRANSPOSES {
        check_gemv::<f64>(&blas, Order::ColumnMajor, transpose, 31, 260, 3, 2);
    }
}

#[test]
fn gemv_complex_conjugate() {
    let blas = create_test_blas();
    for order in ORDERS {
        for transpose in TRANSPOSES {
            check_gemv::<Complex<f32>>(&blas, order, transpose, 40, 19, 1, 2);
            check_gemv::<Complex<f64>>(&blas, order, transpose, 9, 270, 2, 1);
        }
    }
}

#[test]
fn grid_reduction_matches_reference() {
    let blas = create_test_blas();
    for order in ORDERS {
        check_gemv::<f64>(&blas, order, Transpose::Trans, 6000, 3, 1, 1);
        check_gemv::<f64>(&blas, order, Transpose::Trans, 5300, 17, 2, 1);
    }
}

#[test]
fn grid_reduction_threshold_is_configurable() {
    let blas = create_test_blas_with(Config {
        num_threads: Some(2),
        gemv_grid_reduction_threshold: Some(0),
        ..Default::default()
    });
    check_gemv::<f32>(&blas, Order::RowMajor, Transpose::Trans, 700, 30, 1, 1);
    check_gemv::<Complex<f64>>(&blas, Order::ColumnMajor, Transpose::ConjTrans, 300, 2, 1, 1);
}

#[test]
fn zero_alpha_rescales_without_reading_inputs() {
    let blas = create_test_blas();
    let (m, n) = (20, 8);
    let a = vec![f32::NAN; m * n];
    let x = vec![f32::INFINITY; n];
    let mut y: Vec<f32> = (0..m).map(|i| i as f32).collect();
    y[5] = f32::NEG_INFINITY;

    let status =
        blas.sgemv(Order::RowMajor, Transpose::NoTrans, m as i32, n as i32, 0.0, &a, 0, n as i32, &x, 0, 1, 3.0, &mut y, 0, 1);
    assert_eq!(status, Status::Success);
    for (i, &value) in y.iter().enumerate() {
        let expected = if i == 5 { 0.0 } else { 3.0 * i as f32 };
        assert_eq!(value, expected, "idx {i}");
    }

    let x = vec![f32::NAN; m];
    let mut y = vec![f32::NAN; n];
    let status = blas.sgemv(Order::RowMajor, Transpose::Trans, m as i32, n as i32, 0.0, &a, 0, n as i32, &x, 0, 1, 0.0, &mut y, 0, 1);
    assert_eq!(status, Status::Success);
    assert!(y.iter().all(|&value| value == 0.0));
}

#[test]
fn non_finite_y_is_sanitized() {
    let blas = create_test_blas();
    let mut rng = rng();
    let (m, n) = (6000, 2);
    let a: Vec<f64> = random_vec(&mut rng, m * n);
    let x: Vec<f64> = random_vec(&mut rng, m);
    let zeros = vec![0.0; n];
    let expected = gemv_reference(Order::RowMajor, Transpose::Trans, m, n, 2.0, &a, &x, 1, 0.0, &zeros, 1);

    let mut y = vec![f64::NAN, f64::INFINITY];
    let status = blas.dgemv(Order::RowMajor, Transpose::Trans, m as i32, n as i32, 2.0, &a, 0, n as i32, &x, 0, 1, 4.0, &mut y, 0, 1);
    assert_eq!(status, Status::Success);
    assert_close(&expected, &y, m as f64);
}

#[test]
fn offsets_select_the_right_elements() {
    let blas = create_test_blas();
    let a = [9.0f32, 1.0, 2.0, 3.0, 4.0];
    let x = [9.0f32, 9.0, 1.0, 1.0];
    let mut y = [7.0f32, 0.0, 0.0];
    let status = blas.sgemv(Order::RowMajor, Transpose::NoTrans, 2, 2, 1.0, &a, 1, 2, &x, 2, 1, 0.0, &mut y, 1, 1);
    assert_eq!(status, Status::Success);
    assert_eq!(y, [7.0, 3.0, 7.0]);
}
