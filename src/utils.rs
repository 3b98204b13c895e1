//! Utility functions for gateway operations.
//!
//! This module provides the amount and timestamp formatting helpers used when
//! building remittance requests.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// How long a remittance stays payable after creation.
pub const REMITTANCE_TTL_DAYS: i64 = 3;

/// Formats an order total for the remittance `amount` field.
///
/// The value is rounded half-away-from-zero to currency precision and
/// rendered with exactly two fraction digits and no thousands separators, so
/// it round-trips to the same numeric value server-side.
///
/// # Examples
///
/// ```
/// use glin_gateway::utils::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(19990, 2)), "199.90");
/// assert_eq!(format_amount(Decimal::ZERO), "0.00");
/// ```
pub fn format_amount(total: Decimal) -> String {
    let mut amount = total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    amount.to_string()
}

/// Computes the remittance expiry for a request created at `now`.
///
/// The expiry is exactly [`REMITTANCE_TTL_DAYS`] after the creation instant,
/// formatted as UTC with second precision and a literal `Z` suffix.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use glin_gateway::utils::remittance_expiry;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// assert_eq!(remittance_expiry(now), "2024-05-04T12:00:00Z");
/// ```
pub fn remittance_expiry(now: DateTime<Utc>) -> String {
    (now + Duration::days(REMITTANCE_TTL_DAYS))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}
