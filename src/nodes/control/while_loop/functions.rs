use crate::constants::ports::while_loop::{BODY, CONDITION, DONE};
use crate::nodes::control::LoopFrame;
use crate::nodes::execution_engine::{NodeScope, Step};

/// While: test first
pub(crate) fn enter(scope: &mut NodeScope<'_>) -> Step {
    resume(scope)
}

/// DoWhile: the body runs once before the first test
pub(crate) fn enter_do(_scope: &mut NodeScope<'_>) -> Step {
    Step::Repeat {
        body: BODY,
        frame: LoopFrame::While,
    }
}

/// Condition is pulled fresh; the epoch advanced since the last pass
pub(crate) fn resume(scope: &mut NodeScope<'_>) -> Step {
    if scope.input(CONDITION).as_bool() {
        Step::Repeat {
            body: BODY,
            frame: LoopFrame::While,
        }
    } else {
        Step::follow(DONE)
    }
}
