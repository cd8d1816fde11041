use crate::constants::ports::variable::{GET_KEY, GET_VALUE, SET_KEY, SET_RESULT, SET_VALUE};
use crate::nodes::execution_engine::NodeScope;

pub(crate) fn get(scope: &mut NodeScope<'_>) {
    let key = scope.input(GET_KEY).to_string();
    let value = scope.context().local_variable(&key).cloned().unwrap_or_default();
    scope.set_output(GET_VALUE, value);
}

pub(crate) fn set(scope: &mut NodeScope<'_>) {
    let key = scope.input(SET_KEY).to_string();
    let value = scope.input(SET_VALUE);
    scope.context().set_local_variable(key, value.clone());
    scope.set_output(SET_RESULT, value);
}
