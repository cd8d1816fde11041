//! Conditional loop nodes
//!
//! While checks its condition before every pass, DoWhile after every pass.

mod functions;

pub(crate) use functions::*;

use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

fn ports(metadata: NodeMetadata) -> NodeMetadata {
    metadata
        .with_inputs(vec![
            PortDefinition::flow("Flow"),
            PortDefinition::new("Condition", DataType::Bool)
                .with_default(false)
                .with_description("Re-read before deciding on another pass"),
        ])
        .with_outputs(vec![PortDefinition::flow("Body"), PortDefinition::flow("Done")])
}

pub fn metadata() -> NodeMetadata {
    ports(NodeMetadata::new(
        "While",
        "While",
        NodeCategory::control(),
        "Runs Body while the condition holds, then Done",
    ))
}

pub fn do_while_metadata() -> NodeMetadata {
    ports(NodeMetadata::new(
        "DoWhile",
        "Do While",
        NodeCategory::control(),
        "Runs Body once, then again while the condition holds, then Done",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loops_share_layout() {
        let while_meta = metadata();
        let do_meta = do_while_metadata();
        assert_eq!(while_meta.node_type, "While");
        assert_eq!(do_meta.node_type, "DoWhile");
        assert_eq!(while_meta.inputs.len(), do_meta.inputs.len());
        assert_eq!(while_meta.outputs[1].name, "Done");
    }
}
