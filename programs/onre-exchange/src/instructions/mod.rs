pub mod initialization;
pub mod market_info;
pub mod mint_authority;
pub mod offer;
pub mod state_operations;
pub mod vault_operations;

pub use initialization::*;
pub use market_info::*;
pub use mint_authority::*;
pub use offer::*;
pub use state_operations::*;
pub use vault_operations::*;
