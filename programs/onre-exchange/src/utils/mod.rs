pub mod approver;
mod ed25519_parser;
pub mod math_utils;
pub mod token_utils;

pub use approver::*;
pub use token_utils::*;
