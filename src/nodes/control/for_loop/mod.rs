//! Counting loop node
//!
//! - mod.rs: connector layout and metadata
//! - functions.rs: iteration logic driven by the interpreter

mod functions;

pub(crate) use functions::*;

use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

/// Runs its body once per index, then continues on Done
pub fn metadata() -> NodeMetadata {
    NodeMetadata::new(
        "For",
        "For",
        NodeCategory::control(),
        "Runs Body for every index from Start to End, then Done",
    )
    .with_inputs(vec![
        PortDefinition::flow("Flow"),
        PortDefinition::new("Start", DataType::Int)
            .with_default(0)
            .with_description("First index (exclusive upper bound when descending)"),
        PortDefinition::new("End", DataType::Int)
            .with_default(0)
            .with_description("Exclusive upper bound (inclusive lower bound when descending)"),
        PortDefinition::new("Step", DataType::Int).with_default(1),
        PortDefinition::new("Descending", DataType::Bool).with_default(false),
    ])
    .with_outputs(vec![
        PortDefinition::flow("Body"),
        PortDefinition::new("Index", DataType::Int).with_description("Index of the running pass"),
        PortDefinition::flow("Done"),
    ])
}
