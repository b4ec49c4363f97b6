pub mod add_offer_segment;
pub mod add_offer_vector;
pub mod make_offer;
pub mod manage_offer;
pub mod offer_state;
pub mod offer_utils;
pub mod pricing;
pub mod take_offer;
pub mod take_offer_permissionless;

pub use add_offer_segment::*;
pub use add_offer_vector::*;
pub use make_offer::*;
pub use manage_offer::*;
pub use offer_state::*;
pub use offer_utils::*;
pub use pricing::*;
pub use take_offer::*;
pub use take_offer_permissionless::*;
