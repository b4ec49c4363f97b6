pub mod initialize;
pub mod initialize_offers;
pub mod initialize_permissionless;

pub use initialize::*;
pub use initialize_offers::*;
pub use initialize_permissionless::*;
