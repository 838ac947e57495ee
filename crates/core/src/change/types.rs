//! Change calculator types.

use bgneur_shared::Money;
use serde::Serialize;

/// How the paid amount compares to the price.
///
/// Exact and insufficient payment both show `€0.00`; the status keeps them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Price or paid amount not entered yet.
    Pending,
    /// Paid less than the price.
    Insufficient,
    /// Paid exactly the price.
    Exact,
    /// Change is owed.
    ChangeDue,
}

/// Display state of the change page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDisplay {
    /// Paid amount in leva, e.g. `"15.00 лв."`.
    pub paid_display: String,
    /// Change in euro, e.g. `"€2.56"`.
    pub change_display: String,
    /// Change amount alone, e.g. `"2.56"`.
    pub change_raw: String,
    /// Change owed, in euro.
    pub change: Money,
    /// Payment assessment.
    pub status: PaymentStatus,
}
