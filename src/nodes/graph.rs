//! Node graph data structures and wiring operations

use super::node::{Node, NodeId};
use super::port::{InputRef, OutputRef, PortId};
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};

/// Represents a link from an output connector to an input connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub from_node: NodeId,
    pub from_port: PortId,
    pub to_node: NodeId,
    pub to_port: PortId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Self {
        Self {
            from_node,
            from_port,
            to_node,
            to_port,
        }
    }

    pub fn from_ref(&self) -> OutputRef {
        OutputRef::new(self.from_node, self.from_port)
    }

    pub fn to_ref(&self) -> InputRef {
        InputRef::new(self.to_node, self.to_port)
    }
}

/// Ordered collection of nodes; wiring lives in the nodes' connectors
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node to the graph and returns its ID.
    ///
    /// Any wiring the node carried from elsewhere is dropped.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        node.id = id;
        node.detach();
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a connection between two connectors.
    ///
    /// An input reads from at most one output, so connecting an already
    /// connected input replaces its previous link.
    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        let from = connection.from_ref();
        let to = connection.to_ref();

        let from_type = self
            .node(from.node)?
            .output(from.port)
            .ok_or(GraphError::OutputOutOfRange { node: from.node, port: from.port })?
            .data_type;
        let to_type = self
            .node(to.node)?
            .input(to.port)
            .ok_or(GraphError::InputOutOfRange { node: to.node, port: to.port })?
            .data_type;
        if !from_type.can_connect_to(&to_type) {
            return Err(GraphError::FlowMismatch {
                from: from_type.name(),
                to: to_type.name(),
            });
        }

        self.disconnect(to)?;
        self.nodes[to.node].inputs[to.port].source = Some(from);
        self.nodes[from.node].outputs[from.port].targets.push(to);
        Ok(())
    }

    /// Helper method to add connection by node IDs and port indices
    pub fn connect(&mut self, from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Result<()> {
        self.add_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    /// Removes the link feeding an input; returns the output it was read from
    pub fn disconnect(&mut self, to: InputRef) -> Result<Option<OutputRef>> {
        let input = self
            .node_mut(to.node)?
            .inputs
            .get_mut(to.port)
            .ok_or(GraphError::InputOutOfRange { node: to.node, port: to.port })?;
        let previous = input.source.take();
        input.invalidate();
        if let Some(from) = previous {
            if let Some(output) = self
                .nodes
                .get_mut(from.node)
                .and_then(|node| node.outputs.get_mut(from.port))
            {
                output.targets.retain(|target| *target != to);
            }
        }
        Ok(previous)
    }

    /// All links in node order, then input order
    pub fn connections(&self) -> Vec<Connection> {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.inputs.iter().enumerate().filter_map(move |(port, input)| {
                    input
                        .source
                        .map(|from| Connection::new(from.node, from.port, node.id, port))
                })
            })
            .collect()
    }

    /// Nodes bound to the given output, in connection order
    pub fn next_nodes(&self, from: OutputRef) -> Vec<NodeId> {
        self.nodes
            .get(from.node)
            .and_then(|node| node.outputs.get(from.port))
            .map(|output| output.targets.iter().map(|target| target.node).collect())
            .unwrap_or_default()
    }
}
