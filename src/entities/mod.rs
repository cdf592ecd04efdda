// Entity Models
//
// - Merchant: stable id + descriptive values + matching data
// - Taxonomy: closed enumerations every merchant is classified with
// - MerchantRegistry: read-only lookup built once at startup

pub mod merchant;
pub mod taxonomy;

pub use merchant::{LogoHint, LogoHintType, Merchant, MerchantRegistry, RegexSignature};
pub use taxonomy::{Category, MerchantChannel, MerchantScope, RiskLevel, Subcategory};
