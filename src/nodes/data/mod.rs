//! Data nodes backed by the execution context

pub mod variable;
