pub mod amortization;
pub mod calculator;

pub use amortization::{AmortizationSchedule, ScheduleGenerator};
pub use calculator::{calculate_monthly_payment, PaymentCalculator};
