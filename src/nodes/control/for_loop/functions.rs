//! Iteration logic for the For node

use crate::constants::ports::for_loop::{BODY, DESCENDING, DONE, END, INDEX, START, STEP};
use crate::nodes::control::{ForFrame, LoopFrame};
use crate::nodes::execution_engine::{NodeScope, Step};
use crate::nodes::value::Value;
use log::warn;

/// Read the bounds and run the first pass.
///
/// Ascending loops visit `start, start + step, ..` while below `end`.
/// Descending loops visit `start - 1, start - 1 - |step|, ..` down to `end`
/// inclusive. A step that cannot make progress skips the body.
pub(crate) fn enter(scope: &mut NodeScope<'_>) -> Step {
    let start = scope.input(START).as_int();
    let end = scope.input(END).as_int();
    let step = scope.input(STEP).as_int();
    let descending = scope.input(DESCENDING).as_bool();

    if step == 0 || (!descending && step < 0) {
        warn!("For node {} has step {}, skipping its body", scope.node_id(), step);
        return Step::follow(DONE);
    }

    let frame = if descending {
        ForFrame {
            next: start.checked_sub(1),
            end,
            step: step.checked_abs().unwrap_or(i64::MAX),
            descending,
        }
    } else {
        ForFrame {
            next: Some(start),
            end,
            step,
            descending,
        }
    };
    resume(frame, scope)
}

/// Publish the next index and run the body again, or finish on Done
pub(crate) fn resume(frame: ForFrame, scope: &mut NodeScope<'_>) -> Step {
    let index = match frame.next {
        Some(index) if in_range(index, &frame) => index,
        _ => return Step::follow(DONE),
    };

    scope.set_output(INDEX, Value::Int(index));
    let next = if frame.descending {
        index.checked_sub(frame.step)
    } else {
        index.checked_add(frame.step)
    };
    Step::Repeat {
        body: BODY,
        frame: LoopFrame::For(ForFrame { next, ..frame }),
    }
}

fn in_range(index: i64, frame: &ForFrame) -> bool {
    if frame.descending {
        index >= frame.end
    } else {
        index < frame.end
    }
}
