//! Two-way branch

use crate::constants::ports::if_else::{CONDITION, FALSE, TRUE};
use crate::nodes::execution_engine::{NodeScope, Step};
use crate::nodes::factory::{NodeCategory, NodeMetadata, PortDefinition};
use crate::nodes::port::DataType;

pub fn metadata() -> NodeMetadata {
    NodeMetadata::new(
        "IfElse",
        "If Else",
        NodeCategory::control(),
        "Continues on True or False depending on the condition",
    )
    .with_inputs(vec![
        PortDefinition::flow("Flow"),
        PortDefinition::new("Condition", DataType::Bool)
            .with_default(false)
            .with_description("Branch selector"),
    ])
    .with_outputs(vec![PortDefinition::flow("True"), PortDefinition::flow("False")])
}

pub(crate) fn execute(scope: &mut NodeScope<'_>) -> Step {
    if scope.input(CONDITION).as_bool() {
        Step::follow(TRUE)
    } else {
        Step::follow(FALSE)
    }
}
