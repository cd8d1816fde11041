//! Node metadata and the prototype catalog used by authoring tools
//!
//! Nothing here affects execution: the library only describes node variants
//! and hands out fresh copies of its prototypes.

use super::math::{CompareOp, MathOp};
use super::node::{Node, NodeKind};
use super::port::DataType;
use super::value::Value;
use crate::error::{GraphError, Result};
use log::debug;
use once_cell::sync::Lazy;

/// Hierarchical category system for organizing nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeCategory {
    path: Vec<String>,
}

impl NodeCategory {
    /// Create a new category from path components
    pub fn new(path: &[&str]) -> Self {
        Self {
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Get the full path as a slice
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Get the category name (last component)
    pub fn name(&self) -> &str {
        self.path.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// Get the parent category
    pub fn parent(&self) -> Option<NodeCategory> {
        if self.path.len() > 1 {
            Some(NodeCategory {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        } else {
            None
        }
    }

    /// Check if this category is a child of another
    pub fn is_child_of(&self, other: &NodeCategory) -> bool {
        self.path.len() > other.path.len() && self.path[..other.path.len()] == other.path
    }

    pub fn display_string(&self) -> String {
        self.path.join(" > ")
    }
}

// Standard categories
impl NodeCategory {
    pub fn control() -> Self {
        Self::new(&["Flow", "Control"])
    }
    pub fn action() -> Self {
        Self::new(&["Flow", "Action"])
    }
    pub fn local() -> Self {
        Self::new(&["Flow", "Local"])
    }
    pub fn math() -> Self {
        Self::new(&["Math"])
    }
    pub fn logic() -> Self {
        Self::new(&["Logic"])
    }
}

/// Connector definition for node creation
#[derive(Debug, Clone)]
pub struct PortDefinition {
    pub name: String,
    pub data_type: DataType,
    /// Literal used while the input is unconnected; ignored for outputs
    pub default: Value,
    pub description: Option<String>,
}

impl PortDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
            default: Value::None,
            description: None,
        }
    }

    /// Flow connector
    pub fn flow(name: &str) -> Self {
        Self::new(name, DataType::Flow)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Add description to port
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Descriptive metadata of a node variant
#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub node_type: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: NodeCategory,
    pub inputs: Vec<PortDefinition>,
    pub outputs: Vec<PortDefinition>,
}

impl NodeMetadata {
    pub fn new(
        node_type: &'static str,
        display_name: &'static str,
        category: NodeCategory,
        description: &'static str,
    ) -> Self {
        Self {
            node_type,
            display_name,
            description,
            category,
            inputs: vec![],
            outputs: vec![],
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<PortDefinition>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortDefinition>) -> Self {
        self.outputs = outputs;
        self
    }
}

/// One catalog entry: a prototype node and its metadata
#[derive(Debug, Clone)]
pub struct LibraryEntry {
    pub metadata: NodeMetadata,
    prototype: Node,
}

impl LibraryEntry {
    pub fn new(prototype: Node) -> Self {
        Self {
            metadata: prototype.kind().metadata(),
            prototype,
        }
    }

    pub fn prototype(&self) -> &Node {
        &self.prototype
    }
}

/// Read-only catalog of prototype nodes
#[derive(Debug, Clone, Default)]
pub struct NodeLibrary {
    entries: Vec<LibraryEntry>,
}

static FLOW_NODES: Lazy<NodeLibrary> = Lazy::new(|| {
    let mut prototypes = vec![
        Node::start(),
        Node::print(),
        Node::for_loop(),
        Node::while_loop(),
        Node::do_while(),
        Node::if_else(),
        Node::new(NodeKind::GetLocalVariable),
        Node::new(NodeKind::SetLocalVariable),
    ];
    prototypes.extend(MathOp::ALL.iter().map(|op| Node::math(*op)));
    prototypes.extend(CompareOp::ALL.iter().map(|op| Node::compare(*op)));
    debug!("Built flow node library with {} prototypes", prototypes.len());
    NodeLibrary::new(prototypes)
});

impl NodeLibrary {
    pub fn new(prototypes: Vec<Node>) -> Self {
        Self {
            entries: prototypes.into_iter().map(LibraryEntry::new).collect(),
        }
    }

    /// Shared catalog of every built-in node variant
    pub fn flow_nodes() -> &'static NodeLibrary {
        &FLOW_NODES
    }

    /// This library plus additional prototypes
    pub fn extended_with(&self, prototypes: Vec<Node>) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(prototypes.into_iter().map(LibraryEntry::new));
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LibraryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fresh copy of the first prototype whose type name matches
    pub fn create(&self, node_type: &str) -> Result<Node> {
        self.entries
            .iter()
            .find(|entry| entry.metadata.node_type == node_type)
            .map(|entry| entry.prototype.clone())
            .ok_or_else(|| GraphError::UnknownNodeType(node_type.to_string()))
    }

    /// Entries in `category` or any of its subcategories
    pub fn by_category<'a>(&'a self, category: &'a NodeCategory) -> impl Iterator<Item = &'a LibraryEntry> {
        self.entries.iter().filter(move |entry| {
            entry.metadata.category == *category || entry.metadata.category.is_child_of(category)
        })
    }
}
