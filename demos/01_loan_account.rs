/// loan account - compute, patch, and serialize a record
use loan_amortization_rs::{LoanAccount, LoanAccountPatch, Money, PaymentCalculator, PrecisionConfig};
use loan_amortization_rs::serialization::schedule_to_json;
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = PrecisionConfig::default();
    let calculator = PaymentCalculator::new(config);

    // record as it arrives from a client
    let incoming: LoanAccount = serde_json::from_str(
        r#"{"accountName": "home", "loanAmount": "200000.00", "interestRate": "6.0", "termMonths": 360}"#,
    )?;
    incoming.validate()?;

    let account = incoming.with_computed_payment(&calculator)?;
    println!("created:\n{}\n", account.json()?);

    // partial update: shorten the term
    let patch = LoanAccountPatch {
        term_months: Some(180),
        ..Default::default()
    };
    let account = account.apply_patch(&patch).with_computed_payment(&calculator)?;
    println!("after patch: payment {}", account.monthly_payment.unwrap_or(Money::ZERO));

    let schedule = account.amortization_schedule(config)?;
    let body = schedule_to_json(&schedule.entries[..3])?;
    println!("first three months: {}", body);

    Ok(())
}
