mod approver_utils;
mod message;

pub use approver_utils::*;
pub use message::*;
