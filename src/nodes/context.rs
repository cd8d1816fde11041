//! Mutable state threaded through every node invocation

use super::value::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_context_id() -> u64 {
    NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Scoped state of one logical run.
///
/// Local variables are written by SetLocalVariable on the control path and
/// read by GetLocalVariable on the pull path. Nothing clears them between
/// runs; call [`ExecutionContext::reset_local_variables`] when runs are
/// logically independent.
///
/// Every context, clones included, has its own identity. The graph uses it
/// to keep values memoized under one context from being served to another.
#[derive(Debug)]
pub struct ExecutionContext {
    id: u64,
    local_variables: HashMap<String, Value>,
    printed: Vec<String>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            id: next_context_id(),
            local_variables: HashMap::new(),
            printed: Vec::new(),
        }
    }
}

impl Clone for ExecutionContext {
    fn clone(&self) -> Self {
        Self {
            id: next_context_id(),
            local_variables: self.local_variables.clone(),
            printed: self.printed.clone(),
        }
    }
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub fn local_variable(&self, name: &str) -> Option<&Value> {
        self.local_variables.get(name)
    }

    pub fn set_local_variable(&mut self, name: impl Into<String>, value: Value) {
        self.local_variables.insert(name.into(), value);
    }

    pub fn local_variables(&self) -> &HashMap<String, Value> {
        &self.local_variables
    }

    pub fn reset_local_variables(&mut self) {
        self.local_variables.clear();
    }

    /// Lines emitted by Print actions, oldest first
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    pub(crate) fn record_print(&mut self, line: String) {
        self.printed.push(line);
    }

    /// Hand out and forget the recorded lines
    pub fn take_printed(&mut self) -> Vec<String> {
        std::mem::take(&mut self.printed)
    }
}
