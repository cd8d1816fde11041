//! Runtime-wide constants and default values
//!
//! Centralized location for the epoch sentinels and the connector layout of
//! the built-in node variants

/// Epoch counter constants
pub mod epoch {
    /// Stamp carried by an input whose cached value must never be trusted
    pub const INVALID_STAMP: i64 = -1;

    /// Value of `validId` for a fresh graph and after wrap-around
    pub const INITIAL_VALID_ID: i64 = 0;
}

/// Configuration defaults
pub mod config {
    /// Debug-log every control step
    pub const DEFAULT_TRACE_EXECUTION: bool = false;

    /// Maintain memoization statistics
    pub const DEFAULT_COLLECT_STATISTICS: bool = true;
}

/// Connector indices shared by the built-in control nodes.
///
/// Every control and action node takes its trigger on input 0 and, unless
/// noted otherwise, continues on output 0.
pub mod ports {
    /// Flow input that triggers a control or action node
    pub const FLOW_IN: usize = 0;

    /// Default flow output of action nodes
    pub const FLOW_OUT: usize = 0;

    /// For loop connectors
    pub mod for_loop {
        pub const START: usize = 1;
        pub const END: usize = 2;
        pub const STEP: usize = 3;
        pub const DESCENDING: usize = 4;

        pub const BODY: usize = 0;
        pub const INDEX: usize = 1;
        pub const DONE: usize = 2;
    }

    /// While / DoWhile connectors
    pub mod while_loop {
        pub const CONDITION: usize = 1;

        pub const BODY: usize = 0;
        pub const DONE: usize = 1;
    }

    /// IfElse connectors
    pub mod if_else {
        pub const CONDITION: usize = 1;

        pub const TRUE: usize = 0;
        pub const FALSE: usize = 1;
    }

    /// Print connectors
    pub mod print {
        pub const VALUE: usize = 1;
    }

    /// Local variable connectors
    pub mod variable {
        /// Key input of GetLocalVariable
        pub const GET_KEY: usize = 0;
        /// Value output of GetLocalVariable
        pub const GET_VALUE: usize = 0;

        /// Key input of SetLocalVariable
        pub const SET_KEY: usize = 1;
        /// Value input of SetLocalVariable
        pub const SET_VALUE: usize = 2;
        /// Pass-through value output of SetLocalVariable
        pub const SET_RESULT: usize = 1;
    }

    /// Two-input pure nodes (Math, Compare)
    pub mod binary {
        pub const LHS: usize = 0;
        pub const RHS: usize = 1;
        pub const RESULT: usize = 0;
    }
}
