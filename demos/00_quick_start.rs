/// quick start - payment and schedule for a personal loan
use loan_amortization_rs::{AmortizationSchedule, LoanTerms, Money, PrecisionConfig};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // $10,000 at 12% over two years
    let terms = LoanTerms::new(Money::from_major(10_000), dec!(12.0), 24);
    let schedule = AmortizationSchedule::from_terms(&terms, PrecisionConfig::default())?;

    println!("monthly payment: {}", schedule.monthly_payment);
    println!("{:>5} {:>10} {:>10} {:>10} {:>12}", "month", "payment", "principal", "interest", "balance");
    for entry in &schedule.entries {
        println!(
            "{:>5} {:>10} {:>10} {:>10} {:>12}",
            entry.month,
            entry.payment,
            entry.principal_portion,
            entry.interest_portion,
            entry.remaining_balance
        );
    }
    println!("total interest: {}", schedule.total_interest);

    Ok(())
}
