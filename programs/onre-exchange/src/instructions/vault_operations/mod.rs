pub mod reserve;

pub use reserve::*;
