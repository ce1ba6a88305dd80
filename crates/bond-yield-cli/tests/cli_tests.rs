use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::io::Write;

fn bond_yield() -> Command {
    let mut cmd = Command::cargo_bin("bond-yield").unwrap();
    cmd.env_remove("BOND_YIELD_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn discount_bond_args() -> [&'static str; 11] {
    [
        "--face-value",
        "1000",
        "--coupon-rate",
        "0.05",
        "--market-price",
        "950",
        "--years",
        "5",
        "--start-date",
        "2025-01-15",
        "--frequency=annual",
    ]
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn quote_from_flags() {
    let json = stdout_json(bond_yield().arg("quote").args(discount_bond_args()));

    let result = &json["result"];
    assert_eq!(result["cashFlows"].as_array().unwrap().len(), 5);
    assert_eq!(result["cashFlows"][0]["paymentDate"], "2026-01-15");
    assert_eq!(result["summary"]["priceRelativeToFace"], "DISCOUNT");
    assert_eq!(result["summary"]["ytmStatus"]["status"], "CONVERGED");
    assert!(json["methodology"].is_string());
}

#[test]
fn schedule_prints_bare_rows() {
    let json = stdout_json(
        bond_yield()
            .args(["schedule", "--frequency", "semi-annual"])
            .args(&discount_bond_args()[..10]),
    );

    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["paymentDate"], "2025-07-15");
    assert_eq!(rows[9]["remainingPrincipal"].as_f64(), Some(0.0));
}

#[test]
fn quote_from_json_input_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"faceValue": 1000, "annualCouponRate": 0.08, "marketPrice": 1040,
            "yearsToMaturity": 10, "couponFrequency": "SEMI_ANNUAL",
            "startDate": "2025-06-15"}}"#
    )
    .unwrap();

    let json = stdout_json(
        bond_yield()
            .arg("quote")
            .arg("--input")
            .arg(file.path()),
    );
    assert_eq!(json["result"]["cashFlows"].as_array().unwrap().len(), 20);
    assert_eq!(json["result"]["summary"]["priceRelativeToFace"], "PREMIUM");
}

#[test]
fn minimal_output_prints_yield() {
    bond_yield()
        .args(["quote", "--output", "minimal"])
        .args(discount_bond_args())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("0.0"));
}

#[test]
fn csv_output_has_schedule_header() {
    bond_yield()
        .args(["schedule", "--output", "csv"])
        .args(discount_bond_args())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "period,paymentDate,couponPayment,principalPayment",
        ));
}

#[test]
fn table_output_shows_summary_and_schedule() {
    bond_yield()
        .args(["quote", "--output", "table"])
        .args(discount_bond_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("Yield to Maturity"))
        .stdout(predicate::str::contains("Remaining Principal"));
}

#[test]
fn sub_period_maturity_exits_with_schedule_error() {
    bond_yield()
        .args([
            "quote",
            "--face-value",
            "1000",
            "--coupon-rate",
            "0.05",
            "--market-price",
            "990",
            "--years",
            "0.25",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn negative_price_exits_with_parameter_error() {
    bond_yield()
        .args([
            "quote",
            "--face-value",
            "1000",
            "--coupon-rate",
            "0.05",
            "--market-price=-1",
            "--years",
            "5",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("market_price"));
}

#[test]
fn missing_flags_are_reported() {
    bond_yield()
        .args(["quote", "--face-value", "1000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--coupon-rate is required"));
}

#[test]
fn config_file_switches_amortization() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "amortization = \"bullet\"").unwrap();

    let json = stdout_json(
        bond_yield()
            .arg("schedule")
            .arg("--config")
            .arg(config.path())
            .args(discount_bond_args()),
    );
    let rows = json.as_array().unwrap();
    assert_eq!(rows[0]["principalPayment"].as_f64(), Some(0.0));
    assert_eq!(rows[4]["principalPayment"].as_f64(), Some(1000.0));
}

#[test]
fn invalid_config_file_is_rejected() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "tolerance_factor = 0.0").unwrap();

    bond_yield()
        .arg("quote")
        .env("BOND_YIELD_CONFIG", config.path())
        .args(discount_bond_args())
        .assert()
        .code(3);
}

#[test]
fn oversized_tolerance_is_rejected_before_quoting() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "tolerance_factor = 1e20").unwrap();

    bond_yield()
        .arg("quote")
        .arg("--config")
        .arg(config.path())
        .args(discount_bond_args())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("tolerance_factor"));
}
