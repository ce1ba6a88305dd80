mod commands;
mod input;
mod output;
mod settings;
mod telemetry;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use bond_yield_core::BondAnalyticsError;
use commands::bond::QuoteArgs;

/// Single-bond cash-flow schedule and yield analytics
#[derive(Parser)]
#[command(
    name = "bond-yield",
    version,
    about = "Single-bond cash-flow schedule and yield analytics",
    long_about = "Quote a fixed-income instrument from its face value, coupon rate, market \
                  price, years to maturity and coupon frequency. Produces a period-by-period \
                  cash-flow schedule plus current yield, yield to maturity, total interest \
                  and price relative to face, with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "BOND_YIELD_CONFIG")]
    config: Option<String>,

    /// Log verbosity on stderr (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote a bond: echoed inputs, yield summary and cash-flow schedule
    Quote(QuoteArgs),
    /// Print only the cash-flow schedule
    Schedule(QuoteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

/// Exit code for each engine error, so callers can tell failures apart.
///
/// 5 is reserved: `quote` reports an unreachable yield through `ytmStatus`
/// and still exits 0, and `schedule` never solves for a yield.
fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<BondAnalyticsError>() {
        Some(BondAnalyticsError::InvalidParameter { .. }) => 3,
        Some(BondAnalyticsError::InvalidSchedule { .. }) => 4,
        Some(BondAnalyticsError::YieldNotFound { .. }) => 5,
        Some(BondAnalyticsError::NumericOverflow { .. }) => 6,
        None => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = match settings::load_engine_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(exit_code(e.as_ref()));
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::bond::run_quote(args, &config),
        Commands::Schedule(args) => commands::bond::run_schedule(args, &config),
        Commands::Version => {
            println!("bond-yield {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(exit_code(e.as_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code_for(err: BondAnalyticsError) -> i32 {
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        exit_code(boxed.as_ref())
    }

    #[test]
    fn test_each_engine_error_has_its_own_code() {
        let codes = [
            code_for(BondAnalyticsError::InvalidParameter {
                field: "face_value".into(),
                reason: "must be positive".into(),
            }),
            code_for(BondAnalyticsError::InvalidSchedule {
                periods: 0,
                reason: "too short".into(),
            }),
            code_for(BondAnalyticsError::YieldNotFound {
                reason: "no bracket".into(),
                lower: rust_decimal::Decimal::ZERO,
                upper: rust_decimal::Decimal::TEN,
            }),
            code_for(BondAnalyticsError::NumericOverflow {
                context: "coupon".into(),
            }),
        ];
        assert_eq!(codes, [3, 4, 5, 6]);
    }

    #[test]
    fn test_other_errors_exit_with_one() {
        let err: Box<dyn std::error::Error> = "File not found: x.json".into();
        assert_eq!(exit_code(err.as_ref()), 1);
    }
}
