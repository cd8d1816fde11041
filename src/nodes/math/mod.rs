//! Pure math and comparison nodes
//!
//! - mod.rs: metadata and the node bodies
//! - functions.rs: operator enums and their arithmetic

mod functions;

pub use functions::*;

use crate::constants::ports::binary::{LHS, RESULT, RHS};
use crate::nodes::execution_engine::NodeScope;
use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

pub fn math_metadata(op: MathOp) -> NodeMetadata {
    NodeMetadata::new(op.node_type(), op.name(), NodeCategory::math(), "Applies an arithmetic operator to A and B")
        .with_inputs(vec![
            PortDefinition::new("A", DataType::Float).with_description("First operand"),
            PortDefinition::new("B", DataType::Float).with_description("Second operand"),
        ])
        .with_outputs(vec![PortDefinition::new("Result", DataType::Float)])
}

pub fn compare_metadata(op: CompareOp) -> NodeMetadata {
    NodeMetadata::new(op.node_type(), op.name(), NodeCategory::logic(), "Compares A with B")
        .with_inputs(vec![
            PortDefinition::new("A", DataType::Any),
            PortDefinition::new("B", DataType::Any),
        ])
        .with_outputs(vec![PortDefinition::new("Result", DataType::Bool)])
}

pub(crate) fn compute_math(op: MathOp, scope: &mut NodeScope<'_>) {
    let a = scope.input(LHS);
    let b = scope.input(RHS);
    scope.set_output(RESULT, op.apply(&a, &b));
}

pub(crate) fn compute_compare(op: CompareOp, scope: &mut NodeScope<'_>) {
    let a = scope.input(LHS);
    let b = scope.input(RHS);
    scope.set_output(RESULT, op.apply(&a, &b));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_metadata() {
        let metadata = math_metadata(MathOp::Div);
        assert_eq!(metadata.node_type, "Math.Divide");
        assert_eq!(metadata.display_name, "Divide");
        assert_eq!(metadata.inputs.len(), 2);
        assert_eq!(metadata.outputs[0].name, "Result");
        assert_eq!(metadata.category, NodeCategory::math());
    }

    #[test]
    fn test_compare_metadata() {
        let metadata = compare_metadata(CompareOp::Less);
        assert_eq!(metadata.outputs[0].data_type, DataType::Bool);
        assert_eq!(metadata.category, NodeCategory::logic());
    }
}
