//! Change-due calculator.

pub mod calculator;
pub mod types;


pub use calculator::{ChangeCalculator, assess_payment, calculate_change};
pub use types::{ChangeDisplay, PaymentStatus};
