//! Flow graph evaluated by pulling values

use super::execution_engine::FlowGraph;
use super::port::{InputRef, OutputRef};
use super::value::Value;
use crate::config::FlowGraphConfig;
use crate::error::Result;
use std::ops::{Deref, DerefMut};

/// Graph read through its connectors rather than executed
#[derive(Debug, Clone, Default)]
pub struct DataFlowGraph {
    flow: FlowGraph,
}

impl DataFlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlowGraphConfig) -> Self {
        Self {
            flow: FlowGraph::with_config(config),
        }
    }

    /// Open one epoch and read every input in it, in order
    pub fn compute(&mut self, inputs: &[InputRef]) -> Result<Vec<Value>> {
        self.flow.request_id();
        inputs.iter().map(|&input| self.flow.get_value(input)).collect()
    }

    /// Open one epoch and bring every listed output up to date
    pub fn compute_outputs(&mut self, outputs: &[OutputRef]) -> Result<Vec<Value>> {
        self.flow.request_id();
        let mut ctx = std::mem::take(self.flow.context_mut());
        let values = outputs
            .iter()
            .map(|&output| self.flow.pull_output(output, &mut ctx))
            .collect();
        *self.flow.context_mut() = ctx;
        values
    }
}

impl Deref for DataFlowGraph {
    type Target = FlowGraph;

    fn deref(&self) -> &FlowGraph {
        &self.flow
    }
}

impl DerefMut for DataFlowGraph {
    fn deref_mut(&mut self) -> &mut FlowGraph {
        &mut self.flow
    }
}
