//! Node types and core node functionality

use super::control::{for_loop, if_else, start, while_loop, LoopFrame};
use super::data::variable;
use super::execution_engine::{NodeScope, Step};
use super::factory::NodeMetadata;
use super::math::{self, CompareOp, MathOp};
use super::output::print;
use super::port::{Input, Output, PortId};
use super::value::Value;
use crate::constants::epoch::INVALID_STAMP;
use crate::constants::ports::variable::{GET_KEY, SET_KEY, SET_VALUE};

/// Unique identifier for a node; its index in the owning graph
pub type NodeId = usize;

/// Represents the evaluation state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    /// Not being evaluated
    #[default]
    Idle,
    /// Body currently running; a pull reaching the node again is a cycle
    Computing,
}

/// How many next connectors a node can present to the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowArity {
    /// Pure node: evaluated on demand, terminal when executed directly
    None,
    /// Action node: runs its action, then continues on its single flow output
    One,
    /// Control node: selects among several flow outputs, possibly repeatedly
    Many,
}

/// Closed set of node variants understood by the runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Start,
    Print,
    For,
    While,
    DoWhile,
    IfElse,
    Math(MathOp),
    Compare(CompareOp),
    GetLocalVariable,
    SetLocalVariable,
}

impl NodeKind {
    /// Next-connector cardinality of this variant
    pub fn flow_arity(&self) -> FlowArity {
        match self {
            NodeKind::Math(_) | NodeKind::Compare(_) | NodeKind::GetLocalVariable => FlowArity::None,
            NodeKind::Start | NodeKind::Print | NodeKind::SetLocalVariable => FlowArity::One,
            NodeKind::For | NodeKind::While | NodeKind::DoWhile | NodeKind::IfElse => FlowArity::Many,
        }
    }

    /// Pure nodes are recomputed when their outputs are pulled
    pub fn is_pure(&self) -> bool {
        self.flow_arity() == FlowArity::None
    }

    /// Port layout and descriptive metadata
    pub fn metadata(&self) -> NodeMetadata {
        match self {
            NodeKind::Start => start::metadata(),
            NodeKind::Print => print::metadata(),
            NodeKind::For => for_loop::metadata(),
            NodeKind::While => while_loop::metadata(),
            NodeKind::DoWhile => while_loop::do_while_metadata(),
            NodeKind::IfElse => if_else::metadata(),
            NodeKind::Math(op) => math::math_metadata(*op),
            NodeKind::Compare(op) => math::compare_metadata(*op),
            NodeKind::GetLocalVariable => variable::get_metadata(),
            NodeKind::SetLocalVariable => variable::set_metadata(),
        }
    }

    /// Produce output values from inputs (pure nodes)
    pub(crate) fn compute(&self, scope: &mut NodeScope<'_>) {
        match self {
            NodeKind::Math(op) => math::compute_math(*op, scope),
            NodeKind::Compare(op) => math::compute_compare(*op, scope),
            NodeKind::GetLocalVariable => variable::get(scope),
            _ => {}
        }
    }

    /// Side effect of an action node
    pub(crate) fn execute_action(&self, scope: &mut NodeScope<'_>) {
        match self {
            NodeKind::Print => print::execute_action(scope),
            NodeKind::SetLocalVariable => variable::set(scope),
            _ => {}
        }
    }

    /// First visit of a control node
    pub(crate) fn execute_control(&self, scope: &mut NodeScope<'_>) -> Step {
        match self {
            NodeKind::For => for_loop::enter(scope),
            NodeKind::While => while_loop::enter(scope),
            NodeKind::DoWhile => while_loop::enter_do(scope),
            NodeKind::IfElse => if_else::execute(scope),
            _ => Step::terminal(),
        }
    }

    /// Re-entry of a loop node after its body finished
    pub(crate) fn resume(&self, frame: LoopFrame, scope: &mut NodeScope<'_>) -> Step {
        match (self, frame) {
            (NodeKind::For, LoopFrame::For(frame)) => for_loop::resume(frame, scope),
            (NodeKind::While | NodeKind::DoWhile, LoopFrame::While) => while_loop::resume(scope),
            _ => Step::terminal(),
        }
    }
}

/// A unit of computation with ordered inputs and outputs
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    kind: NodeKind,
    pub(crate) inputs: Vec<Input>,
    pub(crate) outputs: Vec<Output>,
    pub(crate) state: NodeState,
    /// Epoch of the last pull evaluation
    pub(crate) last_computed: i64,
    pub(crate) evaluations: u64,
}

impl Node {
    /// Creates a node of the given variant with its connectors laid out from metadata
    pub fn new(kind: NodeKind) -> Self {
        let meta = kind.metadata();
        let inputs = meta
            .inputs
            .iter()
            .map(|def| Input::new(&def.name, def.data_type, def.default.clone()))
            .collect();
        let outputs = meta
            .outputs
            .iter()
            .map(|def| Output::new(&def.name, def.data_type))
            .collect();
        Self {
            id: 0,
            title: meta.display_name.to_string(),
            kind,
            inputs,
            outputs,
            state: NodeState::Idle,
            last_computed: INVALID_STAMP,
            evaluations: 0,
        }
    }

    pub fn start() -> Self {
        Self::new(NodeKind::Start)
    }

    pub fn print() -> Self {
        Self::new(NodeKind::Print)
    }

    pub fn for_loop() -> Self {
        Self::new(NodeKind::For)
    }

    pub fn while_loop() -> Self {
        Self::new(NodeKind::While)
    }

    pub fn do_while() -> Self {
        Self::new(NodeKind::DoWhile)
    }

    pub fn if_else() -> Self {
        Self::new(NodeKind::IfElse)
    }

    pub fn math(op: MathOp) -> Self {
        Self::new(NodeKind::Math(op))
    }

    pub fn compare(op: CompareOp) -> Self {
        Self::new(NodeKind::Compare(op))
    }

    /// GetLocalVariable reading `name`
    pub fn get_local(name: impl Into<String>) -> Self {
        Self::new(NodeKind::GetLocalVariable).with_input(GET_KEY, Value::Text(name.into()))
    }

    /// SetLocalVariable writing `value` to `name` unless its value input is connected
    pub fn set_local(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(NodeKind::SetLocalVariable)
            .with_input(SET_KEY, Value::Text(name.into()))
            .with_input(SET_VALUE, value.into())
    }

    /// Sets the literal default of an input; out-of-range ports are ignored
    pub fn with_input(mut self, port: PortId, value: impl Into<Value>) -> Self {
        if let Some(input) = self.inputs.get_mut(port) {
            input.default = value.into();
        }
        self
    }

    /// Sets the title of the node
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn input(&self, port: PortId) -> Option<&Input> {
        self.inputs.get(port)
    }

    pub fn output(&self, port: PortId) -> Option<&Output> {
        self.outputs.get(port)
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// How many times this node's body has run
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Drop all wiring and evaluation state, keeping defaults
    pub(crate) fn detach(&mut self) {
        for input in &mut self.inputs {
            input.source = None;
            input.invalidate();
        }
        for output in &mut self.outputs {
            output.targets.clear();
        }
        self.state = NodeState::Idle;
        self.last_computed = INVALID_STAMP;
    }

    /// Forget every epoch stamp held by this node
    pub(crate) fn invalidate(&mut self) {
        for input in &mut self.inputs {
            input.invalidate();
        }
        self.last_computed = INVALID_STAMP;
    }
}
