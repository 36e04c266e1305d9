use std::{fs, time::Instant};

use clap::ValueEnum;
use comfy_table::{CellAlignment, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use indicatif::ProgressBar;
use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use tileblas::{
    Blas, Config, Cpu, GemmArguments, GemmVariant, GemvArguments, Order, Scalar, Transpose, TransposeCombination,
    kernel::gemv,
};

use super::common::{dense_leading_dim, random_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Gemm,
    Gemv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    F32,
    F64,
}

#[derive(Debug, Clone)]
pub struct BenchOptions {
    pub operation: Operation,
    pub precision: Precision,
    pub order: Order,
    pub transpose_a: Transpose,
    pub transpose_b: Transpose,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub number_of_runs: u64,
    /// Time every variant instead of only the ones the dispatcher can pick.
    pub all_variants: bool,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct BenchResult {
    operation: Operation,
    precision: Precision,
    kernel: String,
    m: usize,
    n: usize,
    k: usize,
    durations: Vec<f64>,
    mean_duration: Option<f64>,
    std_dev_duration: Option<f64>,
    gflops: Option<f64>,
}

impl BenchResult {
    fn new(
        options: &BenchOptions,
        kernel: String,
        durations: Vec<f64>,
    ) -> Self {
        let flops = match options.operation {
            Operation::Gemm => 2.0 * (options.m * options.n * options.k) as f64,
            Operation::Gemv => 2.0 * (options.m * options.n) as f64,
        };
        let mean_duration = mean(&durations);
        Self {
            operation: options.operation,
            precision: options.precision,
            kernel,
            m: options.m,
            n: options.n,
            k: options.k,
            std_dev_duration: std_dev(&durations),
            gflops: mean_duration.filter(|duration| *duration > 0.0).map(|duration| flops / duration / 1e9),
            mean_duration,
            durations,
        }
    }
}

pub fn handle_bench(
    options: BenchOptions,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let blas = Blas::<Cpu>::with_config(config)?;
    println!(
        "{:?} {:?}: m={} n={} k={} ({} threads)",
        options.operation,
        options.precision,
        options.m,
        options.n,
        options.k,
        blas.context().num_threads()
    );

    let results = match (options.operation, options.precision) {
        (Operation::Gemm, Precision::F32) => bench_gemm::<f32>(&blas, &options)?,
        (Operation::Gemm, Precision::F64) => bench_gemm::<f64>(&blas, &options)?,
        (Operation::Gemv, Precision::F32) => bench_gemv::<f32>(&blas, &options)?,
        (Operation::Gemv, Precision::F64) => bench_gemv::<f64>(&blas, &options)?,
    };

    if let Some(output_path) = &options.output_path {
        let results_data = serde_json::to_string_pretty(&results)?;
        fs::write(output_path, results_data)?;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Kernel", "Time, ms", "GFLOP/s"]);
    for result in &results {
        let time = format_metric(result.mean_duration.map(|mean| mean * 1e3), result.std_dev_duration.map(|std| std * 1e3));
        let gflops = result.gflops.map(|gflops| format!("{gflops:.2}")).unwrap_or_else(|| "-".to_string());
        table.add_row(vec![result.kernel.clone(), time, gflops]);
    }
    for index in 1..=2 {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    println!("{table}");

    Ok(())
}

fn bench_gemm<T: Scalar + From<f32>>(
    blas: &Blas<Cpu>,
    options: &BenchOptions,
) -> Result<Vec<BenchResult>, Box<dyn std::error::Error>> {
    let (m, n, k) = (options.m, options.n, options.k);
    let (a_rows, a_cols) = if options.transpose_a.is_transposed() {
        (k, m)
    } else {
        (m, k)
    };
    let (b_rows, b_cols) = if options.transpose_b.is_transposed() {
        (n, k)
    } else {
        (k, n)
    };

    let mut rng = StdRng::seed_from_u64(2025);
    let a: Vec<T> = random_values(&mut rng, m * k);
    let b: Vec<T> = random_values(&mut rng, k * n);
    let mut c: Vec<T> = random_values(&mut rng, m * n);

    let combination = TransposeCombination::new(options.transpose_a, options.transpose_b);
    let variants: Vec<GemmVariant> = if options.all_variants {
        GemmVariant::ALL.to_vec()
    } else {
        combination.eligible_variants().to_vec()
    };
    let selected = blas.config().gemm_variant.unwrap_or_else(|| combination.select(m, n, k));

    let progress_bar = ProgressBar::new(variants.len() as u64 * options.number_of_runs);
    let mut results = Vec::with_capacity(variants.len());
    for variant in variants {
        let mut durations = Vec::with_capacity(options.number_of_runs as usize);
        for _ in 0..options.number_of_runs {
            let arguments = GemmArguments::new(
                options.order,
                options.transpose_a,
                options.transpose_b,
                m as i32,
                n as i32,
                k as i32,
                T::one(),
                &a,
                dense_leading_dim(options.order, a_rows, a_cols) as i32,
                &b,
                dense_leading_dim(options.order, b_rows, b_cols) as i32,
                T::zero(),
                &mut c,
                dense_leading_dim(options.order, m, n) as i32,
            );
            let start = Instant::now();
            blas.gemm_with_variant(arguments, variant)?;
            durations.push(start.elapsed().as_secs_f64());
            progress_bar.inc(1);
        }
        let marker = if variant == selected {
            " *"
        } else {
            ""
        };
        results.push(BenchResult::new(options, format!("{}{marker}", variant.name()), durations));
    }
    progress_bar.finish();

    Ok(results)
}

fn bench_gemv<T: Scalar + From<f32>>(
    blas: &Blas<Cpu>,
    options: &BenchOptions,
) -> Result<Vec<BenchResult>, Box<dyn std::error::Error>> {
    let (m, n) = (options.m, options.n);
    let (output_len, reduction_len) = if options.transpose_a.is_transposed() {
        (n, m)
    } else {
        (m, n)
    };

    let mut rng = StdRng::seed_from_u64(2025);
    let a: Vec<T> = random_values(&mut rng, m * n);
    let x: Vec<T> = random_values(&mut rng, reduction_len);
    let mut y: Vec<T> = random_values(&mut rng, output_len);
    let strategy = gemv::DispatchDescriptor::try_new(&gemv_arguments(options, &a, &x, &mut y), blas.config())?.strategy;

    let progress_bar = ProgressBar::new(options.number_of_runs);
    let mut durations = Vec::with_capacity(options.number_of_runs as usize);
    for _ in 0..options.number_of_runs {
        let start = Instant::now();
        blas.gemv(gemv_arguments(options, &a, &x, &mut y))?;
        durations.push(start.elapsed().as_secs_f64());
        progress_bar.inc(1);
    }
    progress_bar.finish();

    Ok(vec![BenchResult::new(options, format!("{strategy:?}"), durations)])
}

fn gemv_arguments<'a, T: Scalar>(
    options: &BenchOptions,
    a: &'a [T],
    x: &'a [T],
    y: &'a mut [T],
) -> GemvArguments<'a, T> {
    GemvArguments::new(
        options.order,
        options.transpose_a,
        options.m as i32,
        options.n as i32,
        T::one(),
        a,
        dense_leading_dim(options.order, options.m, options.n) as i32,
        x,
        1,
        T::zero(),
        y,
        1,
    )
}

fn format_metric(
    mean: Option<f64>,
    std_dev: Option<f64>,
) -> String {
    match (mean, std_dev) {
        (Some(mean), Some(std_dev)) => format!("{:.3} ± {:.3}", mean, std_dev),
        (Some(mean), None) => format!("{:.3}", mean),
        _ => "-".to_string(),
    }
}

fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }

    Some(data.iter().sum::<f64>() / data.len() as f64)
}

fn std_dev(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 2 {
        return None;
    }

    let mean = mean(data)?;

    let variance = data
        .iter()
        .map(|x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n as f64 - 1.0);

    Some(variance.sqrt())
}
