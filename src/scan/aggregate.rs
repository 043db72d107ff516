//! Balance aggregation per derivation mode
//!
//! Exact decimal addition only: the result does not depend on summation order.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::DerivationMode;

/// Total balance found under one derivation mode (both branches)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationSummary {
    pub derivation_mode: DerivationMode,
    pub balance: Decimal,
}

/// Sum balances, normalized so that zero renders as `0`
pub fn sum_balances<I>(balances: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    balances
        .into_iter()
        .fold(Decimal::ZERO, |total, balance| total + balance)
        .normalize()
}
