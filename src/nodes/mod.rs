//! Node system - Core data structures and the built-in node variants

// Core node system modules
pub mod cache;
pub mod context;
pub mod control_flow;
pub mod data_flow;
pub mod execution_engine;
pub mod factory;
pub mod graph;
pub mod node;
pub mod port;
pub mod value;

// Node implementations
pub mod control;
pub mod data;
pub mod math;
pub mod output;

// Re-export core types
pub use cache::{Epoch, MemoStatistics};
pub use context::ExecutionContext;
pub use control_flow::ControlFlowGraph;
pub use data_flow::DataFlowGraph;
pub use execution_engine::{FlowGraph, NodeScope, Step};
pub use graph::{Connection, Graph};
pub use node::{FlowArity, Node, NodeId, NodeKind, NodeState};
pub use port::{DataType, Input, InputRef, Output, OutputRef, PortId};
pub use value::Value;

// Re-export factory and operator types
pub use factory::{LibraryEntry, NodeCategory, NodeLibrary, NodeMetadata, PortDefinition};
pub use math::{CompareOp, MathOp};
