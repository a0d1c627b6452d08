//! Delivery API rate tiers.
//!
//! The delivery API limits listings by how many entries each page carries.
//! These values mirror the backend's own thresholds.

/// Hard upper bound for any ceiling.
pub const MAX_RATE_LIMIT: u32 = 1000;

/// Ceiling used for management API requests unless overridden.
pub const MANAGEMENT_API_DEFAULT_RATE_LIMIT: u32 = 3;

/// Page size assumed when a request does not set `per_page`.
pub const DEFAULT_PER_PAGE: u64 = 25;

/// Listing size classes of the delivery API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ContentTier {
    /// Single entries or listings of at most 25 entries
    SingleOrSmall,
    /// 26 to 50 entries
    Medium,
    /// 51 to 75 entries
    Large,
    /// More than 75 entries
    VeryLarge,
}

impl ContentTier {
    /// Requests per second allowed for this tier.
    pub fn ceiling(&self) -> u32 {
        match self {
            ContentTier::SingleOrSmall => 50,
            ContentTier::Medium => 15,
            ContentTier::Large => 10,
            ContentTier::VeryLarge => 6,
        }
    }

    /// Tier for a listing of `per_page` entries.
    ///
    /// ```
    /// use folio_rate_limit::ContentTier;
    ///
    /// assert_eq!(ContentTier::for_page_size(25), ContentTier::SingleOrSmall);
    /// assert_eq!(ContentTier::for_page_size(26), ContentTier::Medium);
    /// assert_eq!(ContentTier::for_page_size(100), ContentTier::VeryLarge);
    /// ```
    pub fn for_page_size(per_page: u64) -> Self {
        match per_page {
            0..=25 => ContentTier::SingleOrSmall,
            26..=50 => ContentTier::Medium,
            51..=75 => ContentTier::Large,
            _ => ContentTier::VeryLarge,
        }
    }
}
