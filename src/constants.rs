//! Application constants for the storefront
//!
//! This module contains default sheet locations, fallback text, validation
//! limits and other fixed values used throughout the crate.

// =============================================================================
// Sheet Sources
// =============================================================================

/// Published order-builder catalog sheet (CSV)
pub const DEFAULT_CATALOG_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQUcQ6YgTSk_09Skk_5ggNglMpjx9yroR-L1AGSnH-04D4qlOoEf7Ywda5xHO4SEjtGUV0EXGfZ-QnO/pub?gid=0&single=true&output=csv";

/// Published store product sheet (CSV)
pub const DEFAULT_PRODUCTS_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRFSBdfwj1yPXJZq5A6QoFU1Zh1uTzff6DuKXCyxrnSIDJwI_JIMtmMcFwipVaO_BKobCobkS-_nvag/pub?gid=0&single=true&output=csv";

/// Published review sheet (TSV)
pub const DEFAULT_REVIEWS_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vS4m9d79TtDcJivToGkE4Uu5xoJ9yIRvY8g0SlEzWYghlfCfnqydvsxwzBo_sXaX-AI7rmw4zrQk435/pub?gid=0&single=true&output=tsv";

/// Apps Script endpoint accepting review submissions
pub const DEFAULT_REVIEW_SUBMIT_URL: &str = "https://script.google.com/macros/s/AKfycbyyBuhOvgX6NWxx6P9dMiEo1TUx1I9kctGoqSjsuKn__azpJzeSrnfzSpxlxuOmBSTp/exec";

/// CORS proxy prefix; the target URL is appended percent-encoded
pub const DEFAULT_PROXY_PREFIX: &str = "https://api.allorigins.win/raw?url=";

// =============================================================================
// Messaging
// =============================================================================

/// WhatsApp number receiving order hand-offs
pub const DEFAULT_WHATSAPP_NUMBER: &str = "+8801673064324";

/// WhatsApp number receiving product enquiries
pub const DEFAULT_ENQUIRY_NUMBER: &str = "8801673064324";

/// Base of the WhatsApp deep link
pub const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Shop name shown in the order summary header
pub const DEFAULT_SHOP_NAME: &str = "Nuts&SpicesBunker";

/// Weight of one order unit in grams
pub const DEFAULT_GRAMS_PER_UNIT: u32 = 50;

/// Currency label used in formatted amounts
pub const CURRENCY: &str = "BDT";

// =============================================================================
// Record Defaults
// =============================================================================

/// Username used when a review row leaves it blank
pub const ANONYMOUS_USERNAME: &str = "Anonymous";

/// Discount label used when a product row has none
pub const DEFAULT_DISCOUNT_LABEL: &str = "0% off";

/// Placeholder image for products without one
pub const DEFAULT_PRODUCT_IMAGE: &str = "https://images.unsplash.com/photo-1615485925505-2a5d0a5fd24c?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80";

/// Description used when a product row has none
pub const DEFAULT_PRODUCT_DESCRIPTION: &str = "No description available.";

/// Image cell value meaning "no image attached"
pub const NO_IMAGE_MARKER: &str = "No Image";

/// Banner text when no product carries a discount
pub const DEFAULT_DISCOUNT_BANNER: &str = "Special Offers Available - Shop Now!";

// =============================================================================
// Review Validation
// =============================================================================

/// Star rating bounds
pub const MIN_STAR_RATING: u8 = 1;
pub const MAX_STAR_RATING: u8 = 5;

/// Ratings at or above this value are highlighted as top reviews
pub const TOP_REVIEW_THRESHOLD: u8 = 4;

/// Minimum review body length in characters
pub const MIN_REVIEW_LENGTH: usize = 10;

/// Maximum attached image size in bytes (5 MiB)
pub const MAX_REVIEW_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted review image MIME types
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

// =============================================================================
// Network Defaults
// =============================================================================

/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Retry schedule
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;
pub const DEFAULT_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 5_000;

// =============================================================================
// Storage
// =============================================================================

/// Directory under the platform data/config dirs
pub const APP_DIR_NAME: &str = "storefront";

/// Selection map file name
pub const SELECTIONS_FILE_NAME: &str = "selections.json";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.json";
