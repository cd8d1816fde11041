//! Flowgraph core library
//!
//! A node-graph runtime where the same graph runs imperatively along flow
//! connectors and lazily along data connectors. Pure nodes are memoized per
//! epoch; every control step opens a new epoch.

pub mod config;
pub mod constants;
pub mod error;
pub mod nodes;

// Re-export commonly used types
pub use config::FlowGraphConfig;
pub use error::{GraphError, Result};
pub use nodes::{
    ControlFlowGraph, DataFlowGraph, ExecutionContext, FlowGraph, InputRef, Node, NodeId, NodeLibrary,
    OutputRef, Value,
};
