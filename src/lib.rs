pub mod account;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use account::{AccountOwner, LoanAccount, LoanAccountBuilder, LoanAccountPatch};
pub use config::PrecisionConfig;
pub use decimal::{Money, Rate};
pub use errors::{AmortizationError, Result};
pub use payments::{
    calculate_monthly_payment, AmortizationSchedule, PaymentCalculator, ScheduleGenerator,
};
pub use serialization::ScheduleView;
pub use types::{LoanTerms, PaymentResult, PaymentType, ScheduleEntry};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
