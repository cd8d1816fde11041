//! Print node: logs a value and records it in the execution context
//!
//! - mod.rs: metadata
//! - functions.rs: the action body

mod functions;

pub(crate) use functions::*;

use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

pub fn metadata() -> NodeMetadata {
    NodeMetadata::new("Print", "Print", NodeCategory::action(), "Prints its value, then continues")
        .with_inputs(vec![
            PortDefinition::flow("Flow"),
            PortDefinition::new("Value", DataType::Any).with_description("Value to print"),
        ])
        .with_outputs(vec![PortDefinition::flow("Next")])
}
