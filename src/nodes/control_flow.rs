//! Flow graph with a designated entry node

use super::execution_engine::FlowGraph;
use super::node::NodeId;
use crate::config::FlowGraphConfig;
use crate::error::Result;
use log::debug;
use std::ops::{Deref, DerefMut};

/// Imperative graph driven from its start node
#[derive(Debug, Clone, Default)]
pub struct ControlFlowGraph {
    flow: FlowGraph,
    start_node: Option<NodeId>,
}

impl ControlFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlowGraphConfig) -> Self {
        Self {
            flow: FlowGraph::with_config(config),
            start_node: None,
        }
    }

    pub fn start_node(&self) -> Option<NodeId> {
        self.start_node
    }

    pub fn set_start_node(&mut self, start: NodeId) -> Result<()> {
        self.flow.node(start)?;
        self.start_node = Some(start);
        Ok(())
    }

    /// Execute from the start node; `None` when no start node is set
    pub fn run(&mut self) -> Result<Option<NodeId>> {
        let Some(start) = self.start_node else {
            debug!("Control flow graph has no start node, nothing to run");
            return Ok(None);
        };
        self.flow.execute(start).map(Some)
    }
}

impl Deref for ControlFlowGraph {
    type Target = FlowGraph;

    fn deref(&self) -> &FlowGraph {
        &self.flow
    }
}

impl DerefMut for ControlFlowGraph {
    fn deref_mut(&mut self) -> &mut FlowGraph {
        &mut self.flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ports::print;
    use crate::error::GraphError;
    use crate::nodes::node::Node;

    #[test]
    fn test_run_without_start_node() {
        let mut graph = ControlFlowGraph::new();
        assert_eq!(graph.run().unwrap(), None);
        assert!(matches!(graph.set_start_node(0), Err(GraphError::NodeNotFound(0))));
    }

    #[test]
    fn test_run_from_start_node() {
        let mut graph = ControlFlowGraph::new();
        let start = graph.add_node(Node::start());
        let hello = graph.add_node(Node::print().with_input(print::VALUE, "hello"));
        graph.connect(start, 0, hello, 0).unwrap();
        graph.set_start_node(start).unwrap();

        assert_eq!(graph.run().unwrap(), Some(hello));
        assert_eq!(graph.context().printed(), &["hello".to_string()]);
    }
}
