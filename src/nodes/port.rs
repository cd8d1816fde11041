//! Connector types: typed input and output slots of a node

use super::node::NodeId;
use super::value::Value;
use crate::constants::epoch::INVALID_STAMP;
use serde::{Deserialize, Serialize};

/// Index of a connector within its node's inputs or outputs
pub type PortId = usize;

/// Data types that can flow through connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Control flow; carries no value
    Flow,
    Bool,
    Int,
    Float,
    Text,
    /// Any value type
    Any,
}

impl DataType {
    /// Flow connectors only link to flow connectors; value types coerce at read time
    pub fn can_connect_to(&self, other: &DataType) -> bool {
        self.is_flow() == other.is_flow()
    }

    pub fn is_flow(&self) -> bool {
        matches!(self, DataType::Flow)
    }

    /// Get a human-readable name for this data type
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Flow => "Flow",
            DataType::Bool => "Bool",
            DataType::Int => "Int",
            DataType::Float => "Float",
            DataType::Text => "Text",
            DataType::Any => "Any",
        }
    }
}

/// Address of an input connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputRef {
    pub node: NodeId,
    pub port: PortId,
}

impl InputRef {
    pub fn new(node: NodeId, port: PortId) -> Self {
        Self { node, port }
    }
}

/// Address of an output connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputRef {
    pub node: NodeId,
    pub port: PortId,
}

impl OutputRef {
    pub fn new(node: NodeId, port: PortId) -> Self {
        Self { node, port }
    }
}

/// Input slot: reads from at most one upstream output, or from its default
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub data_type: DataType,
    /// Upstream output; an index into the graph rather than an owning link
    pub(crate) source: Option<OutputRef>,
    /// Value read in epoch `last_valid_id`
    pub(crate) value: Value,
    pub(crate) last_valid_id: i64,
    /// Literal returned while unconnected
    pub(crate) default: Value,
}

impl Input {
    /// Creates a new unconnected input
    pub fn new(name: impl Into<String>, data_type: DataType, default: Value) -> Self {
        Self {
            name: name.into(),
            data_type,
            source: None,
            value: Value::None,
            last_valid_id: INVALID_STAMP,
            default,
        }
    }

    pub fn source(&self) -> Option<OutputRef> {
        self.source
    }

    pub fn is_connected(&self) -> bool {
        self.source.is_some()
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Value cached by the last refresh, regardless of its epoch
    pub fn cached_value(&self) -> &Value {
        &self.value
    }

    /// Epoch the cached value was read in, [`INVALID_STAMP`] if none
    pub fn last_valid_id(&self) -> i64 {
        self.last_valid_id
    }

    /// Forget the cached value's epoch
    pub(crate) fn invalidate(&mut self) {
        self.last_valid_id = INVALID_STAMP;
    }
}

/// Output slot: holds the value produced by the owning node's latest run
#[derive(Debug, Clone)]
pub struct Output {
    pub name: String,
    pub data_type: DataType,
    pub(crate) value: Value,
    /// Downstream inputs in connection order
    pub(crate) targets: Vec<InputRef>,
}

impl Output {
    /// Creates a new output with no targets
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            value: Value::None,
            targets: Vec::new(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn targets(&self) -> &[InputRef] {
        &self.targets
    }
}
