use thiserror::Error;

use crate::nodes::NodeId;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Node {0} does not exist")]
    NodeNotFound(NodeId),
    #[error("Node {node} has no input {port}")]
    InputOutOfRange { node: NodeId, port: usize },
    #[error("Node {node} has no output {port}")]
    OutputOutOfRange { node: NodeId, port: usize },
    #[error("Cannot connect {from} connector to {to} connector")]
    FlowMismatch { from: &'static str, to: &'static str },
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
