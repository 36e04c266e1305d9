use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use cli::handlers::{BenchOptions, Operation, Precision, handle_bench, handle_verify, load_config};
use tileblas::{Order, Transpose};

#[derive(Parser)]
struct Cli {
    /// JSON file with a tileblas configuration
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Row,
    Column,
}

impl From<OrderArg> for Order {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Row => Order::RowMajor,
            OrderArg::Column => Order::ColumnMajor,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TransposeArg {
    N,
    T,
    C,
}

impl From<TransposeArg> for Transpose {
    fn from(transpose: TransposeArg) -> Self {
        match transpose {
            TransposeArg::N => Transpose::NoTrans,
            TransposeArg::T => Transpose::Trans,
            TransposeArg::C => Transpose::ConjTrans,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Time gemm or gemv kernels on random operands
    Bench {
        #[arg(value_enum, default_value_t = Operation::Gemm)]
        operation: Operation,
        #[arg(long, value_enum, default_value_t = Precision::F32)]
        precision: Precision,
        #[arg(long, value_enum, default_value_t = OrderArg::Row)]
        order: OrderArg,
        #[arg(long, value_enum, default_value_t = TransposeArg::N)]
        transpose_a: TransposeArg,
        #[arg(long, value_enum, default_value_t = TransposeArg::N)]
        transpose_b: TransposeArg,
        #[arg(short, default_value_t = 512)]
        m: usize,
        #[arg(short, default_value_t = 512)]
        n: usize,
        #[arg(short, default_value_t = 512)]
        k: usize,
        /// Number of timed runs per kernel
        #[arg(long, default_value_t = 5)]
        runs: u64,
        /// Time every gemm variant, not only the eligible ones
        #[arg(long)]
        all_variants: bool,
        /// Write results as JSON to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Compare dispatched kernels against a reference loop
    Verify {
        /// Largest matrix dimension to check
        #[arg(long, default_value_t = 64)]
        max_size: usize,
    },
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let config = match load_config(cli.config) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Failed to load configuration: {error}");
            std::process::exit(1);
        },
    };

    let result = match cli.command {
        Some(Commands::Bench {
            operation,
            precision,
            order,
            transpose_a,
            transpose_b,
            m,
            n,
            k,
            runs,
            all_variants,
            output,
        }) => {
            let options = BenchOptions {
                operation,
                precision,
                order: order.into(),
                transpose_a: transpose_a.into(),
                transpose_b: transpose_b.into(),
                m,
                n,
                k,
                number_of_runs: runs,
                all_variants,
                output_path: output,
            };
            handle_bench(options, config)
        },
        Some(Commands::Verify {
            max_size,
        }) => handle_verify(max_size, config),
        None => {
            let mut cmd = Cli::command();
            cmd.print_help().map_err(Into::into)
        },
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
