//! Flow graph execution engine
//!
//! A [`FlowGraph`] evaluates one shared graph in two ways:
//! - Control path: [`FlowGraph::execute`] runs nodes imperatively, starting at an
//!   entry node and following the flow outputs each node selects.
//! - Data path: reading an input ([`FlowGraph::get_value`]) recomputes pure
//!   upstream nodes on demand, memoized per epoch.
//!
//! Both paths share the epoch counter and the values stored in outputs, so a
//! value produced by a control step is visible to pulls in the same epoch and
//! vice versa.

use super::cache::{Advance, Epoch, MemoStatistics};
use super::context::ExecutionContext;
use super::control::LoopFrame;
use super::graph::{Connection, Graph};
use super::node::{FlowArity, Node, NodeId, NodeState};
use super::port::{InputRef, OutputRef, PortId};
use super::value::Value;
use crate::config::FlowGraphConfig;
use crate::constants::ports::FLOW_OUT;
use crate::error::{GraphError, Result};
use log::{debug, trace, warn};
use std::collections::HashMap;

/// What the interpreter does after a control step
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Continue on the nodes bound to these flow outputs, left to right
    Follow(Vec<PortId>),
    /// Run the nodes bound to `body`, then resume this node with `frame`
    Repeat { body: PortId, frame: LoopFrame },
}

impl Step {
    /// Nothing follows
    pub fn terminal() -> Self {
        Step::Follow(Vec::new())
    }

    /// Continue on a single flow output
    pub fn follow(port: PortId) -> Self {
        Step::Follow(vec![port])
    }
}

/// Pending work of the control-path interpreter
#[derive(Debug, Clone, PartialEq)]
enum Task {
    Enter(NodeId),
    Resume(NodeId, LoopFrame),
}

impl Task {
    fn node(&self) -> NodeId {
        match self {
            Task::Enter(node) | Task::Resume(node, _) => *node,
        }
    }
}

/// Handle a node body uses to read inputs, write outputs and reach the context
pub struct NodeScope<'a> {
    graph: &'a mut FlowGraph,
    ctx: &'a mut ExecutionContext,
    node: NodeId,
}

impl<'a> NodeScope<'a> {
    pub fn node_id(&self) -> NodeId {
        self.node
    }

    /// Read an input through the memoization protocol
    pub fn input(&mut self, port: PortId) -> Value {
        self.graph.read_input(InputRef::new(self.node, port), self.ctx)
    }

    /// Store a value in one of this node's outputs
    pub fn set_output(&mut self, port: PortId, value: Value) {
        if let Some(output) = self
            .graph
            .graph
            .nodes_mut()
            .get_mut(self.node)
            .and_then(|node| node.outputs.get_mut(port))
        {
            output.value = value;
        }
    }

    pub fn context(&mut self) -> &mut ExecutionContext {
        &mut *self.ctx
    }
}

/// Graph with an epoch counter, local-variable context and both evaluation paths
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    graph: Graph,
    epoch: Epoch,
    last_invalidation: Option<u64>,
    /// Context whose reads are memoized under the current epoch
    epoch_context: Option<u64>,
    context: ExecutionContext,
    stats: MemoStatistics,
    config: FlowGraphConfig,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FlowGraphConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &FlowGraphConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: FlowGraphConfig) {
        self.config = config;
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.graph.node(id)
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.graph.add_node(node)
    }

    /// Connect two connectors; cached reads are invalidated
    pub fn connect(&mut self, from_node: NodeId, from_port: PortId, to_node: NodeId, to_port: PortId) -> Result<()> {
        self.add_connection(Connection::new(from_node, from_port, to_node, to_port))
    }

    pub fn add_connection(&mut self, connection: Connection) -> Result<()> {
        self.graph.add_connection(connection)?;
        self.invalidate();
        Ok(())
    }

    pub fn disconnect(&mut self, to: InputRef) -> Result<Option<OutputRef>> {
        let previous = self.graph.disconnect(to)?;
        self.invalidate();
        Ok(previous)
    }

    /// Change the literal an unconnected input returns; cached reads are invalidated
    pub fn set_input_default(&mut self, at: InputRef, value: impl Into<Value>) -> Result<()> {
        let input = self
            .graph
            .node_mut(at.node)?
            .inputs
            .get_mut(at.port)
            .ok_or(GraphError::InputOutOfRange { node: at.node, port: at.port })?;
        input.default = value.into();
        self.invalidate();
        Ok(())
    }

    /// Current epoch (`validId`)
    pub fn valid_id(&self) -> i64 {
        self.epoch.valid_id()
    }

    #[cfg(test)]
    pub(crate) fn set_valid_id(&mut self, valid_id: i64) {
        self.epoch = Epoch::starting_at(valid_id);
    }

    /// Open a new epoch; on wrap-around every stamp is invalidated
    pub fn request_id(&mut self) -> i64 {
        if self.epoch.advance() == Advance::Wrapped {
            trace!("Epoch counter wrapped, invalidating all stamps");
            self.record(|stats| stats.wraps += 1);
            self.invalidate();
        }
        self.epoch_context = None;
        self.epoch.valid_id()
    }

    /// Memoized values belong to the context they were computed with; reading
    /// through another context opens a new epoch first.
    fn bind_context(&mut self, ctx: &ExecutionContext) {
        match self.epoch_context {
            Some(id) if id == ctx.id() => {}
            Some(_) => {
                trace!("Context changed within epoch {}, opening a new one", self.epoch.valid_id());
                self.request_id();
                self.epoch_context = Some(ctx.id());
            }
            None => self.epoch_context = Some(ctx.id()),
        }
    }

    /// Mark every cached input value and every pure node evaluation as stale
    pub fn invalidate(&mut self) {
        for node in self.graph.nodes_mut() {
            node.invalidate();
        }
        self.epoch_context = None;
        self.record(|stats| stats.invalidations += 1);
        trace!("Invalidated {} nodes at epoch {}", self.graph.len(), self.epoch.valid_id());
    }

    /// Invalidate unless already done for `marker` (e.g. a frame counter).
    /// Returns whether an invalidation happened.
    pub fn invalidate_once(&mut self, marker: u64) -> bool {
        if self.last_invalidation == Some(marker) {
            return false;
        }
        self.invalidate();
        self.last_invalidation = Some(marker);
        true
    }

    pub fn last_invalidation(&self) -> Option<u64> {
        self.last_invalidation
    }

    /// Context used by [`FlowGraph::execute`] and [`FlowGraph::get_value`]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    pub fn local_variables(&self) -> &HashMap<String, Value> {
        self.context.local_variables()
    }

    pub fn local_variable(&self, name: &str) -> Option<&Value> {
        self.context.local_variable(name)
    }

    /// Local variables are never cleared by execution itself
    pub fn reset_local_variables(&mut self) {
        self.context.reset_local_variables();
    }

    pub fn statistics(&self) -> &MemoStatistics {
        &self.stats
    }

    pub fn reset_statistics(&mut self) {
        self.stats.reset();
    }

    fn record(&mut self, update: impl FnOnce(&mut MemoStatistics)) {
        if self.config.collect_statistics {
            update(&mut self.stats);
        }
    }

    /// Run the control path from `start` against the graph's own context.
    ///
    /// Returns the last node that finished along the taken path: the node that
    /// ended the last branch, where branches are visited left to right.
    pub fn execute(&mut self, start: NodeId) -> Result<NodeId> {
        let mut ctx = std::mem::take(&mut self.context);
        let result = self.execute_with(start, &mut ctx);
        self.context = ctx;
        result
    }

    /// Run the control path from `start` against a caller-supplied context
    pub fn execute_with(&mut self, start: NodeId, ctx: &mut ExecutionContext) -> Result<NodeId> {
        self.graph.node(start)?;

        let mut pending = vec![Task::Enter(start)];
        let mut last = start;
        while let Some(task) = pending.pop() {
            let node = task.node();
            let valid_id = self.request_id();
            self.bind_context(ctx);
            if self.config.trace_execution {
                debug!("Executing node {} ({}) in epoch {}", node, self.graph.nodes()[node].title, valid_id);
            }

            match self.step(task, ctx) {
                Step::Follow(ports) => {
                    let next: Vec<NodeId> = ports
                        .into_iter()
                        .flat_map(|port| self.graph.next_nodes(OutputRef::new(node, port)))
                        .collect();
                    if next.is_empty() {
                        last = node;
                    }
                    pending.extend(next.into_iter().rev().map(Task::Enter));
                }
                Step::Repeat { body, frame } => {
                    pending.push(Task::Resume(node, frame));
                    let body_nodes = self.graph.next_nodes(OutputRef::new(node, body));
                    pending.extend(body_nodes.into_iter().rev().map(Task::Enter));
                }
            }
        }
        Ok(last)
    }

    /// Execute every node in the list, discarding the individual results
    pub fn execute_nodes(&mut self, nodes: &[NodeId]) -> Result<()> {
        for &node in nodes {
            self.execute(node)?;
        }
        Ok(())
    }

    /// Execute every node bound to the given flow outputs
    pub fn execute_connectors(&mut self, connectors: &[OutputRef]) -> Result<()> {
        for &connector in connectors {
            let nodes = self.graph.next_nodes(connector);
            self.execute_nodes(&nodes)?;
        }
        Ok(())
    }

    fn step(&mut self, task: Task, ctx: &mut ExecutionContext) -> Step {
        let id = task.node();
        let kind = self.graph.nodes()[id].kind();
        let step = match task {
            Task::Enter(_) => match kind.flow_arity() {
                FlowArity::None => {
                    self.evaluate(id, ctx);
                    return Step::terminal();
                }
                FlowArity::One => {
                    kind.execute_action(&mut NodeScope { graph: self, ctx, node: id });
                    Step::follow(FLOW_OUT)
                }
                FlowArity::Many => kind.execute_control(&mut NodeScope { graph: self, ctx, node: id }),
            },
            Task::Resume(_, frame) => kind.resume(frame, &mut NodeScope { graph: self, ctx, node: id }),
        };
        self.graph.nodes_mut()[id].evaluations += 1;
        self.record(|stats| stats.evaluations += 1);
        step
    }

    /// Read an input on the data path; see [`FlowGraph::get_value_with`]
    pub fn get_value(&mut self, at: InputRef) -> Result<Value> {
        let mut ctx = std::mem::take(&mut self.context);
        let result = self.get_value_with(at, &mut ctx);
        self.context = ctx;
        result
    }

    /// Read an input: its default when unconnected, the cached value when it
    /// was read in the current epoch, otherwise a fresh value pulled from
    /// upstream.
    pub fn get_value_with(&mut self, at: InputRef, ctx: &mut ExecutionContext) -> Result<Value> {
        self.graph
            .node(at.node)?
            .input(at.port)
            .ok_or(GraphError::InputOutOfRange { node: at.node, port: at.port })?;
        self.bind_context(ctx);
        Ok(self.read_input(at, ctx))
    }

    /// Value currently stored in an output, without recomputation
    pub fn output_value(&self, at: OutputRef) -> Result<Value> {
        self.graph
            .node(at.node)?
            .output(at.port)
            .map(|output| output.value.clone())
            .ok_or(GraphError::OutputOutOfRange { node: at.node, port: at.port })
    }

    /// Value of an output after bringing its node up to date for this epoch
    pub fn pull_output(&mut self, at: OutputRef, ctx: &mut ExecutionContext) -> Result<Value> {
        self.output_value(at)?;
        self.bind_context(ctx);
        self.refresh(at.node, ctx);
        self.output_value(at)
    }

    pub(crate) fn read_input(&mut self, at: InputRef, ctx: &mut ExecutionContext) -> Value {
        let Some(input) = self
            .graph
            .nodes()
            .get(at.node)
            .and_then(|node| node.inputs.get(at.port))
        else {
            return Value::None;
        };
        let Some(source) = input.source else {
            return input.default.clone();
        };
        if self.epoch.is_current(input.last_valid_id) {
            let value = input.value.clone();
            self.record(|stats| stats.hits += 1);
            return value;
        }

        self.record(|stats| stats.misses += 1);
        self.refresh(source.node, ctx);
        let value = self
            .graph
            .nodes()
            .get(source.node)
            .and_then(|node| node.outputs.get(source.port))
            .map(|output| output.value.clone())
            .unwrap_or_default();

        let valid_id = self.epoch.valid_id();
        let input = &mut self.graph.nodes_mut()[at.node].inputs[at.port];
        input.value = value.clone();
        input.last_valid_id = valid_id;
        value
    }

    /// Recompute a pure node unless it already ran in this epoch.
    /// Control and action nodes keep the outputs of their last control step.
    ///
    /// A pull that re-enters a node still computing is a cycle: it is flagged
    /// and answered with that node's previous output. Within that epoch the
    /// values of the nodes on the cycle are unspecified; an input cache on the
    /// cycle may disagree with the output its node computed.
    fn refresh(&mut self, id: NodeId, ctx: &mut ExecutionContext) {
        let Some(node) = self.graph.nodes().get(id) else {
            return;
        };
        if !node.kind().is_pure() || self.epoch.is_current(node.last_computed) {
            return;
        }
        if node.state == NodeState::Computing {
            warn!("Pull cycle through node {} ({}), using its previous output", id, node.title);
            self.record(|stats| stats.cycles_flagged += 1);
            return;
        }
        self.evaluate(id, ctx);
    }

    fn evaluate(&mut self, id: NodeId, ctx: &mut ExecutionContext) {
        let kind = self.graph.nodes()[id].kind();
        self.graph.nodes_mut()[id].state = NodeState::Computing;
        kind.compute(&mut NodeScope { graph: self, ctx, node: id });

        let valid_id = self.epoch.valid_id();
        let node = &mut self.graph.nodes_mut()[id];
        node.state = NodeState::Idle;
        node.last_computed = valid_id;
        node.evaluations += 1;
        self.record(|stats| stats.evaluations += 1);
    }
}
