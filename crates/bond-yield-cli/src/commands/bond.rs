use chrono::{NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use bond_yield_core::bond::{self, BondParameters, CouponFrequency};
use bond_yield_core::EngineConfig;

use crate::input;

/// Arguments describing one bond
#[derive(Args)]
pub struct QuoteArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Face (par) value
    #[arg(long)]
    pub face_value: Option<Decimal>,

    /// Annual coupon rate as a decimal (0.05 = 5%)
    #[arg(long)]
    pub coupon_rate: Option<Decimal>,

    /// Current market price
    #[arg(long)]
    pub market_price: Option<Decimal>,

    /// Years to maturity
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Coupon frequency: annual or semi-annual
    #[arg(long, default_value = "annual")]
    pub frequency: CouponFrequency,

    /// Schedule start date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Resolve bond parameters from, in order: an input file, command-line
/// flags, or JSON piped on stdin.
fn bond_parameters(args: QuoteArgs) -> Result<BondParameters, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_input(path);
    }

    let any_flag = args.face_value.is_some()
        || args.coupon_rate.is_some()
        || args.market_price.is_some()
        || args.years.is_some();
    if !any_flag {
        if let Some(params) = input::stdin::read_stdin()? {
            return Ok(params);
        }
    }

    let face_value = args
        .face_value
        .ok_or("--face-value is required (or provide --input)")?;
    let annual_coupon_rate = args
        .coupon_rate
        .ok_or("--coupon-rate is required (or provide --input)")?;
    let market_price = args
        .market_price
        .ok_or("--market-price is required (or provide --input)")?;
    let years_to_maturity = args
        .years
        .ok_or("--years is required (or provide --input)")?;

    Ok(BondParameters {
        face_value,
        annual_coupon_rate,
        market_price,
        years_to_maturity,
        coupon_frequency: args.frequency,
        start_date: args.start_date,
    })
}

pub fn run_quote(
    args: QuoteArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params = bond_parameters(args)?;
    let result = bond::quote_bond(&params, config)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(
    args: QuoteArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let params = bond_parameters(args)?;
    config.validate()?;
    let start = params.start_date.unwrap_or_else(|| Utc::now().date_naive());
    let schedule = bond::generate_schedule(&params, start, config)?;
    Ok(serde_json::to_value(schedule)?)
}
