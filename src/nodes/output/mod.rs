//! Output nodes

pub mod print;
