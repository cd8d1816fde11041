//! Local variable nodes
//!
//! SetLocalVariable writes a named value into the execution context on the
//! control path; GetLocalVariable reads it back on the pull path.
//!
//! - mod.rs: metadata
//! - functions.rs: read and write bodies

mod functions;

pub(crate) use functions::*;

use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

pub fn get_metadata() -> NodeMetadata {
    NodeMetadata::new(
        "GetLocalVariable",
        "Get Local Variable",
        NodeCategory::local(),
        "Reads a local variable; empty when it was never set",
    )
    .with_inputs(vec![PortDefinition::new("Key", DataType::Text).with_default("")])
    .with_outputs(vec![PortDefinition::new("Value", DataType::Any)])
}

pub fn set_metadata() -> NodeMetadata {
    NodeMetadata::new(
        "SetLocalVariable",
        "Set Local Variable",
        NodeCategory::local(),
        "Stores a value under a name, then continues",
    )
    .with_inputs(vec![
        PortDefinition::flow("Flow"),
        PortDefinition::new("Key", DataType::Text).with_default(""),
        PortDefinition::new("Value", DataType::Any),
    ])
    .with_outputs(vec![
        PortDefinition::flow("Next"),
        PortDefinition::new("Value", DataType::Any).with_description("The value just stored"),
    ])
}
