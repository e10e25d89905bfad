/// Decimal places kept for currency amounts at rest and in exports
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Decimal places kept for the costing profit percentage
pub const PERCENTAGE_DECIMAL_PLACES: u32 = 2;

/// Buyer summary cancel amount. No cancellation logic exists yet, so it is always zero.
pub const BUYER_CANCEL_AMOUNT: rust_decimal::Decimal = rust_decimal::Decimal::ZERO;

/// Date format used in reports and exports
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Largest magnitude accepted for a currency input. Anything above it is
/// treated as non-numeric.
pub const MAX_CURRENCY_AMOUNT: rust_decimal::Decimal =
    rust_decimal::Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);
