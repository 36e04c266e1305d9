use comfy_table::{CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use console::Style;
use indicatif::ProgressBar;
use rand::{SeedableRng, rngs::StdRng};
use tileblas::{
    Blas, Config, Cpu, GemmArguments, GemvArguments, Order, Transpose,
    kernel::{gemm, gemv},
};

use super::common::{dense_leading_dim, random_values};

const TOLERANCE: f64 = 1e-9;
const ORDERS: [Order; 2] = [Order::RowMajor, Order::ColumnMajor];
const TRANSPOSES: [Transpose; 2] = [Transpose::NoTrans, Transpose::Trans];

struct Check {
    operation: &'static str,
    shape: String,
    layout: String,
    kernel: String,
    max_error: f64,
}

pub fn handle_verify(
    max_size: usize,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let blas = Blas::<Cpu>::with_config(config)?;
    let sizes = shape_grid(max_size);

    let gemm_cases = sizes.len() * ORDERS.len() * TRANSPOSES.len() * TRANSPOSES.len();
    let gemv_cases = sizes.len() * ORDERS.len() * TRANSPOSES.len();
    let progress_bar = ProgressBar::new((gemm_cases + gemv_cases) as u64);

    let mut checks = Vec::new();
    for &(m, n, k) in &sizes {
        for order in ORDERS {
            for transpose_a in TRANSPOSES {
                for transpose_b in TRANSPOSES {
                    checks.push(verify_gemm(&blas, order, transpose_a, transpose_b, m, n, k)?);
                    progress_bar.inc(1);
                }
                checks.push(verify_gemv(&blas, order, transpose_a, m, k)?);
                progress_bar.inc(1);
            }
        }
    }
    progress_bar.finish();

    let failed = Style::new().red().bold();
    let passed = Style::new().green();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Operation", "Shape", "Layout", "Kernel", "Max error", "Result"]);
    for check in &checks {
        let result = if check.max_error <= TOLERANCE {
            passed.apply_to("ok").to_string()
        } else {
            failed.apply_to("FAIL").to_string()
        };
        table.add_row(vec![
            check.operation.to_string(),
            check.shape.clone(),
            check.layout.clone(),
            check.kernel.clone(),
            format!("{:.2e}", check.max_error),
            result,
        ]);
    }
    if let Some(column) = table.column_mut(4) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    println!("{table}");

    let failures = checks.iter().filter(|check| check.max_error > TOLERANCE).count();
    if failures > 0 {
        return Err(format!("{failures} of {} checks exceeded tolerance {TOLERANCE:e}", checks.len()).into());
    }
    println!("All {} checks passed", checks.len());
    Ok(())
}

fn shape_grid(max_size: usize) -> Vec<(usize, usize, usize)> {
    let max_size = max_size.max(1);
    let mut sizes = vec![(1, 1, 1), (2, 2, 2), (17, 33, 5), (16, 16, 16), (31, 7, 64)];
    sizes.push((max_size, max_size.div_ceil(2), max_size.saturating_sub(3).max(1)));
    sizes.retain(|&(m, n, k)| m <= max_size && n <= max_size && k <= max_size);
    sizes
}

fn layout_name(
    order: Order,
    transposes: &[Transpose],
) -> String {
    let order = match order {
        Order::RowMajor => "row",
        Order::ColumnMajor => "col",
    };
    let transposes: String = transposes
        .iter()
        .map(|transpose| match transpose {
            Transpose::NoTrans => 'n',
            Transpose::Trans => 't',
            Transpose::ConjTrans => 'c',
        })
        .collect();
    format!("{order}/{transposes}")
}

fn stored_element(
    data: &[f64],
    order: Order,
    transpose: Transpose,
    ld: usize,
    row: usize,
    col: usize,
) -> f64 {
    let (row, col) = if transpose.is_transposed() {
        (col, row)
    } else {
        (row, col)
    };
    match order {
        Order::RowMajor => data[row * ld + col],
        Order::ColumnMajor => data[col * ld + row],
    }
}

fn max_error(
    expected: &[f64],
    got: &[f64],
) -> f64 {
    expected.iter().zip(got).map(|(e, g)| (e - g).abs()).fold(0.0, f64::max)
}

fn verify_gemm(
    blas: &Blas<Cpu>,
    order: Order,
    transpose_a: Transpose,
    transpose_b: Transpose,
    m: usize,
    n: usize,
    k: usize,
) -> Result<Check, Box<dyn std::error::Error>> {
    let stored = |rows: usize, cols: usize, transpose: Transpose| {
        if transpose.is_transposed() {
            (cols, rows)
        } else {
            (rows, cols)
        }
    };
    let (a_rows, a_cols) = stored(m, k, transpose_a);
    let (b_rows, b_cols) = stored(k, n, transpose_b);
    let lda = dense_leading_dim(order, a_rows, a_cols);
    let ldb = dense_leading_dim(order, b_rows, b_cols);
    let ldc = dense_leading_dim(order, m, n);

    let mut rng = StdRng::seed_from_u64((m * 31 + n * 7 + k) as u64);
    let a: Vec<f64> = random_values(&mut rng, m * k);
    let b: Vec<f64> = random_values(&mut rng, k * n);
    let c: Vec<f64> = random_values(&mut rng, m * n);
    let (alpha, beta) = (1.25, -0.5);

    let mut expected = c.clone();
    for row in 0..m {
        for col in 0..n {
            let accumulator: f64 = (0..k)
                .map(|p| {
                    stored_element(&a, order, transpose_a, lda, row, p)
                        * stored_element(&b, order, transpose_b, ldb, p, col)
                })
                .sum();
            let index = stored_element_index(order, ldc, row, col);
            expected[index] = beta * c[index] + alpha * accumulator;
        }
    }

    let mut got = c;
    let arguments = GemmArguments::new(
        order,
        transpose_a,
        transpose_b,
        m as i32,
        n as i32,
        k as i32,
        alpha,
        &a,
        lda as i32,
        &b,
        ldb as i32,
        beta,
        &mut got,
        ldc as i32,
    );
    let variant = gemm::DispatchDescriptor::try_new(&arguments, blas.config(), None)?
        .variant()
        .map(|variant| variant.name().to_string())
        .unwrap_or_else(|| "scale".to_string());
    blas.gemm(arguments)?;

    Ok(Check {
        operation: "gemm",
        shape: format!("{m}x{n}x{k}"),
        layout: layout_name(order, &[transpose_a, transpose_b]),
        kernel: variant,
        max_error: max_error(&expected, &got),
    })
}

fn stored_element_index(
    order: Order,
    ld: usize,
    row: usize,
    col: usize,
) -> usize {
    match order {
        Order::RowMajor => row * ld + col,
        Order::ColumnMajor => col * ld + row,
    }
}

fn verify_gemv(
    blas: &Blas<Cpu>,
    order: Order,
    transpose: Transpose,
    m: usize,
    n: usize,
) -> Result<Check, Box<dyn std::error::Error>> {
    let (output_len, reduction_len) = if transpose.is_transposed() {
        (n, m)
    } else {
        (m, n)
    };
    let lda = dense_leading_dim(order, m, n);

    let mut rng = StdRng::seed_from_u64((m * 131 + n) as u64);
    let a: Vec<f64> = random_values(&mut rng, m * n);
    let x: Vec<f64> = random_values(&mut rng, reduction_len);
    let y: Vec<f64> = random_values(&mut rng, output_len);
    let (alpha, beta) = (-0.75, 2.0);

    let expected: Vec<f64> = (0..output_len)
        .map(|row| {
            let accumulator: f64 =
                (0..reduction_len).map(|column| stored_element(&a, order, transpose, lda, row, column) * x[column]).sum();
            beta * y[row] + alpha * accumulator
        })
        .collect();

    let mut got = y;
    let arguments =
        GemvArguments::new(order, transpose, m as i32, n as i32, alpha, &a, lda as i32, &x, 1, beta, &mut got, 1);
    let strategy = gemv::DispatchDescriptor::try_new(&arguments, blas.config())?.strategy;
    blas.gemv(arguments)?;

    Ok(Check {
        operation: "gemv",
        shape: format!("{m}x{n}"),
        layout: layout_name(order, &[transpose]),
        kernel: format!("{strategy:?}"),
        max_error: max_error(&expected, &got),
    })
}
