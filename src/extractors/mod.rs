//! HTML extraction modules
//!
//! Each module provides one extraction strategy; `retailer_extractor`
//! combines them for a single retailer profile.

mod css_extractor;
mod id_extractor;
mod retailer_extractor;
mod script_extractor;

pub use css_extractor::*;
pub use id_extractor::*;
pub use retailer_extractor::*;
pub use script_extractor::*;
