//! Entry point marker of a control-flow graph

use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};

pub fn metadata() -> NodeMetadata {
    NodeMetadata::new("Start", "Start", NodeCategory::control(), "Entry point of a control-flow graph")
        .with_outputs(vec![PortDefinition::flow("Next")])
}
