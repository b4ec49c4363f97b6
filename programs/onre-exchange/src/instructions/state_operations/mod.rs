pub mod admins;
pub mod governance;

pub use admins::*;
pub use governance::*;
