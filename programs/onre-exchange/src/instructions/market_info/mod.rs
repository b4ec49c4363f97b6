pub mod get_nav;

pub use get_nav::*;
