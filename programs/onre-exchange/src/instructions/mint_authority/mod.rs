pub mod handover;

pub use handover::*;
