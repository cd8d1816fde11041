use crate::constants::ports::print::VALUE;
use crate::nodes::execution_engine::NodeScope;
use log::info;

pub(crate) fn execute_action(scope: &mut NodeScope<'_>) {
    let line = scope.input(VALUE).to_string();
    info!("{}", line);
    scope.context().record_print(line);
}
