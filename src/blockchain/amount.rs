// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversions between base units and human-readable decimal amounts.

use crate::error::WalletError;

fn scale(decimals: u8) -> f64 {
    10f64.powi(i32::from(decimals))
}

/// Format base units (microAlgos, ASA base units) as a decimal amount.
///
/// `base_units / 10^decimals`
pub fn base_units_to_decimal(base_units: u64, decimals: u8) -> f64 {
    base_units as f64 / scale(decimals)
}

/// Parse a decimal amount to base units: `round(amount * 10^decimals)`.
///
/// Negative, NaN, infinite and out-of-range amounts are rejected.
pub fn decimal_to_base_units(amount: f64, decimals: u8) -> Result<u64, WalletError> {
    if !amount.is_finite() {
        return Err(WalletError::InvalidAmount(format!(
            "amount must be finite, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(WalletError::InvalidAmount(format!(
            "amount must not be negative, got {amount}"
        )));
    }

    let scaled = (amount * scale(decimals)).round();
    // u64::MAX is not representable as f64; anything at or above 2^64 overflows
    if scaled >= u64::MAX as f64 {
        return Err(WalletError::InvalidAmount(format!(
            "amount {amount} overflows with {decimals} decimals"
        )));
    }

    Ok(scaled as u64)
}
