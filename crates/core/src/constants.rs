/// Asset every exchange rate is quoted against
pub const USD_ASSET_ID: &str = "usd";

/// Exchange rates: 24 significant digits, 12 of them decimal
pub const RATE_MAX_DIGITS: u32 = 24;
pub const RATE_SCALE: u32 = 12;

/// Balances and transaction amounts: 19 significant digits, 8 of them decimal
pub const AMOUNT_MAX_DIGITS: u32 = 19;
pub const AMOUNT_SCALE: u32 = 8;

/// Maximum length of free-text labels (wallet name, provider, category)
pub const MAX_LABEL_LENGTH: usize = 200;

/// Maximum length of an asset id
pub const MAX_ASSET_ID_LENGTH: usize = 24;
