/// PDA seeds used throughout the program for account derivation
pub mod seeds {
    /// Seed for the program state account
    pub const STATE: &[u8] = b"state";

    /// Seed for the offer registry account
    pub const OFFERS: &[u8] = b"offers";

    /// Seed for the offer vault authority (owner of the reserve token accounts)
    pub const OFFER_VAULT_AUTHORITY: &[u8] = b"offer_vault_authority";

    /// Seed for the permissionless intermediary authority account
    pub const PERMISSIONLESS_AUTHORITY: &[u8] = b"permissionless-1";

    /// Seed for the mint authority PDA
    pub const MINT_AUTHORITY: &[u8] = b"mint_authority";
}

/// Maximum number of offers held by the offer registry
pub const MAX_OFFERS: usize = 8;

/// Maximum number of pricing vectors allowed per offer
pub const MAX_VECTORS: usize = 10;

/// Maximum number of bounded pricing segments allowed per offer
pub const MAX_SEGMENTS: usize = 10;

/// Maximum number of admin accounts that can be stored in program state
pub const MAX_ADMINS: usize = 20;

/// Maximum length of the permissionless authority name
pub const MAX_NAME_LEN: usize = 50;

/// Number of decimals used for price representation
pub const PRICE_DECIMALS: u8 = 9;

/// Scale of the APR field (1_000_000 = 100%)
pub const APR_SCALE: u128 = 1_000_000;

/// Seconds in a (non-leap) year, used for APR accrual
pub const SECONDS_PER_YEAR: u128 = 31_536_000;

/// Maximum possible value of basis points (100%)
pub const MAX_BASIS_POINTS: u16 = 10000;
