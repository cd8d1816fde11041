//! Control nodes that choose which flow outputs run next

pub mod for_loop;
pub mod if_else;
pub mod start;
pub mod while_loop;

/// Iteration state of a For node between two passes over its body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForFrame {
    /// Index of the next pass; `None` once the counter cannot advance further
    pub next: Option<i64>,
    pub end: i64,
    /// Magnitude of the step, always positive
    pub step: i64,
    pub descending: bool,
}

/// State a loop node carries while its body runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFrame {
    For(ForFrame),
    /// While and DoWhile re-read their condition on every resume
    While,
}
