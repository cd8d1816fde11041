//! End-to-end scenarios mixing control flow and pulled data

use flowgraph::constants::ports::{binary, for_loop, if_else, print, variable, while_loop, FLOW_IN, FLOW_OUT};
use flowgraph::nodes::{CompareOp, ControlFlowGraph, DataFlowGraph, MathOp, NodeLibrary};
use flowgraph::{ExecutionContext, FlowGraph, GraphError, InputRef, Node, NodeId, OutputRef, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn printed(graph: &FlowGraph) -> Vec<&str> {
    graph.context().printed().iter().map(String::as_str).collect()
}

/// IfElse with a Print on each arm
fn branch(condition: bool) -> (FlowGraph, NodeId, NodeId, NodeId) {
    let mut graph = FlowGraph::new();
    let choice = graph.add_node(Node::if_else().with_input(if_else::CONDITION, condition));
    let a = graph.add_node(Node::print().with_input(print::VALUE, "A"));
    let b = graph.add_node(Node::print().with_input(print::VALUE, "B"));
    graph.connect(choice, if_else::TRUE, a, 0).unwrap();
    graph.connect(choice, if_else::FALSE, b, 0).unwrap();
    (graph, choice, a, b)
}

/// For over `start..end` printing each index, then "Done"
fn counting_loop(start: i64, end: i64) -> (FlowGraph, NodeId, NodeId) {
    let mut graph = FlowGraph::new();
    let counter = graph.add_node(
        Node::for_loop()
            .with_input(for_loop::START, start)
            .with_input(for_loop::END, end),
    );
    let body = graph.add_node(Node::print());
    let done = graph.add_node(Node::print().with_input(print::VALUE, "Done"));
    graph.connect(counter, for_loop::BODY, body, 0).unwrap();
    graph.connect(counter, for_loop::INDEX, body, print::VALUE).unwrap();
    graph.connect(counter, for_loop::DONE, done, 0).unwrap();
    (graph, counter, done)
}

#[test]
fn test_if_else_returns_taken_arm() {
    init_logging();
    let (mut graph, choice, a, _) = branch(true);
    assert_eq!(graph.execute(choice).unwrap(), a);
    assert_eq!(printed(&graph), vec!["A"]);

    let (mut graph, choice, _, b) = branch(false);
    assert_eq!(graph.execute(choice).unwrap(), b);
    assert_eq!(printed(&graph), vec!["B"]);
}

#[test]
fn test_if_else_condition_pulled_from_compare() {
    let (mut graph, choice, _, b) = branch(true);
    let less = graph.add_node(Node::compare(CompareOp::Less).with_input(0, 5).with_input(1, 2));
    graph.connect(less, binary::RESULT, choice, if_else::CONDITION).unwrap();
    assert_eq!(graph.execute(choice).unwrap(), b);
    assert_eq!(graph.node(less).unwrap().evaluations(), 1);
}

#[test]
fn test_for_loop_prints_each_index_then_done() {
    init_logging();
    let (mut graph, counter, done) = counting_loop(0, 5);
    assert_eq!(graph.execute(counter).unwrap(), done);
    assert_eq!(printed(&graph), vec!["0", "1", "2", "3", "4", "Done"]);
}

#[test]
fn test_for_loop_descending() {
    let (mut graph, counter, _) = counting_loop(3, 0);
    graph
        .set_input_default(InputRef::new(counter, for_loop::DESCENDING), true)
        .unwrap();
    graph.execute(counter).unwrap();
    assert_eq!(printed(&graph), vec!["2", "1", "0", "Done"]);
}

#[test]
fn test_for_loop_with_larger_step() {
    let (mut graph, counter, _) = counting_loop(0, 7);
    graph.set_input_default(InputRef::new(counter, for_loop::STEP), 3).unwrap();
    graph.execute(counter).unwrap();
    assert_eq!(printed(&graph), vec!["0", "3", "6", "Done"]);
}

#[test]
fn test_for_loop_non_positive_step_skips_body() {
    let (mut graph, counter, done) = counting_loop(0, 5);
    graph.set_input_default(InputRef::new(counter, for_loop::STEP), 0).unwrap();
    assert_eq!(graph.execute(counter).unwrap(), done);
    assert_eq!(printed(&graph), vec!["Done"]);
}

#[test]
fn test_empty_range_only_fires_done() {
    let (mut graph, counter, done) = counting_loop(4, 4);
    assert_eq!(graph.execute(counter).unwrap(), done);
    assert_eq!(printed(&graph), vec!["Done"]);
}

#[test]
fn test_nested_loops() {
    let mut graph = FlowGraph::new();
    let outer = graph.add_node(Node::for_loop().with_input(for_loop::END, 2));
    let inner = graph.add_node(Node::for_loop().with_input(for_loop::END, 3));
    let body = graph.add_node(Node::print());
    graph.connect(outer, for_loop::BODY, inner, 0).unwrap();
    graph.connect(inner, for_loop::BODY, body, 0).unwrap();
    graph.connect(inner, for_loop::INDEX, body, print::VALUE).unwrap();

    assert_eq!(graph.execute(outer).unwrap(), outer);
    assert_eq!(printed(&graph), vec!["0", "1", "2", "0", "1", "2"]);
}

#[test]
fn test_local_variable_product() {
    init_logging();
    let mut graph = FlowGraph::new();
    let init = graph.add_node(Node::set_local("var", 1));
    let counter = graph.add_node(
        Node::for_loop()
            .with_input(for_loop::START, 1)
            .with_input(for_loop::END, 5),
    );
    let update = graph.add_node(Node::set_local("var", Value::None));
    let read = graph.add_node(Node::get_local("var"));
    let product = graph.add_node(Node::math(MathOp::Mul));
    graph.connect(init, 0, counter, 0).unwrap();
    graph.connect(counter, for_loop::BODY, update, 0).unwrap();
    graph.connect(read, variable::GET_VALUE, product, binary::LHS).unwrap();
    graph.connect(counter, for_loop::INDEX, product, binary::RHS).unwrap();
    graph.connect(product, binary::RESULT, update, variable::SET_VALUE).unwrap();

    assert_eq!(graph.execute(init).unwrap(), counter);
    assert_eq!(graph.local_variables().get("var"), Some(&Value::Int(24)));

    graph.reset_local_variables();
    assert!(graph.local_variables().is_empty());
}

#[test]
fn test_while_loop_counts_up() {
    let mut graph = ControlFlowGraph::new();
    let init = graph.add_node(Node::set_local("i", 0));
    let repeat = graph.add_node(Node::while_loop());
    let read = graph.add_node(Node::get_local("i"));
    let below = graph.add_node(Node::compare(CompareOp::Less).with_input(binary::RHS, 3));
    let next = graph.add_node(Node::math(MathOp::Add).with_input(binary::RHS, 1));
    let update = graph.add_node(Node::set_local("i", Value::None));
    graph.connect(init, 0, repeat, 0).unwrap();
    graph.connect(read, 0, below, binary::LHS).unwrap();
    graph.connect(below, 0, repeat, while_loop::CONDITION).unwrap();
    graph.connect(read, 0, next, binary::LHS).unwrap();
    graph.connect(next, 0, update, variable::SET_VALUE).unwrap();
    graph.connect(repeat, while_loop::BODY, update, 0).unwrap();
    graph.set_start_node(init).unwrap();

    assert_eq!(graph.run().unwrap(), Some(repeat));
    assert_eq!(graph.local_variable("i"), Some(&Value::Int(3)));
    assert_eq!(graph.node(update).unwrap().evaluations(), 3);
}

#[test]
fn test_do_while_runs_body_once() {
    let mut graph = FlowGraph::new();
    let repeat = graph.add_node(Node::do_while());
    let body = graph.add_node(Node::print().with_input(print::VALUE, "once"));
    let done = graph.add_node(Node::print().with_input(print::VALUE, "after"));
    graph.connect(repeat, while_loop::BODY, body, 0).unwrap();
    graph.connect(repeat, while_loop::DONE, done, 0).unwrap();

    assert_eq!(graph.execute(repeat).unwrap(), done);
    assert_eq!(printed(&graph), vec!["once", "after"]);

    let mut graph = FlowGraph::new();
    let repeat = graph.add_node(Node::while_loop());
    let body = graph.add_node(Node::print().with_input(print::VALUE, "never"));
    graph.connect(repeat, while_loop::BODY, body, 0).unwrap();
    assert_eq!(graph.execute(repeat).unwrap(), repeat);
    assert!(printed(&graph).is_empty());
}

#[test]
fn test_last_branch_wins() {
    let mut graph = FlowGraph::new();
    let start = graph.add_node(Node::start());
    let first = graph.add_node(Node::print().with_input(print::VALUE, "first"));
    let second = graph.add_node(Node::print().with_input(print::VALUE, "second"));
    graph.connect(start, 0, first, 0).unwrap();
    graph.connect(start, 0, second, 0).unwrap();

    assert_eq!(graph.execute(start).unwrap(), second);
    assert_eq!(printed(&graph), vec!["first", "second"]);
}

#[test]
fn test_add_into_div() {
    let mut graph = FlowGraph::new();
    let add = graph.add_node(Node::math(MathOp::Add).with_input(0, 1.0).with_input(1, 2.0));
    let div = graph.add_node(Node::math(MathOp::Div).with_input(1, 2.0));
    graph.connect(add, 0, div, 0).unwrap();

    assert_eq!(graph.execute(div).unwrap(), div);
    assert_eq!(graph.output_value(OutputRef::new(div, 0)).unwrap(), Value::Float(1.5));
}

#[test]
fn test_memoized_reads_within_one_epoch() {
    let mut graph = DataFlowGraph::new();
    let add = graph.add_node(Node::math(MathOp::Add).with_input(0, 1.0).with_input(1, 2.0));
    let div = graph.add_node(Node::math(MathOp::Div).with_input(1, 2.0));
    graph.connect(add, 0, div, 0).unwrap();

    let input = InputRef::new(div, 0);
    graph.request_id();
    let first = graph.get_value(input).unwrap();
    let second = graph.get_value(input).unwrap();
    assert_eq!(first, second);
    assert_eq!(graph.node(add).unwrap().evaluations(), 1);

    let values = graph.compute(&[input, input]).unwrap();
    assert_eq!(values, vec![Value::Float(3.0), Value::Float(3.0)]);
    assert_eq!(graph.node(add).unwrap().evaluations(), 2);
    assert!(graph.statistics().hit_ratio() > 0.0);
}

#[test]
fn test_caller_supplied_context() {
    let (mut graph, counter, _) = counting_loop(0, 2);
    let mut ctx = ExecutionContext::new();
    graph.execute_with(counter, &mut ctx).unwrap();
    assert_eq!(ctx.printed(), &["0".to_string(), "1".to_string(), "Done".to_string()]);
    assert!(graph.context().printed().is_empty());
}

#[test]
fn test_execute_connectors_and_nodes() {
    let (mut graph, choice, a, b) = branch(true);
    graph
        .execute_connectors(&[OutputRef::new(choice, if_else::FALSE), OutputRef::new(choice, if_else::TRUE)])
        .unwrap();
    graph.execute_nodes(&[a, b]).unwrap();
    assert_eq!(printed(&graph), vec!["B", "A", "A", "B"]);
}

#[test]
fn test_library_nodes_run() {
    let library = NodeLibrary::flow_nodes();
    let mut graph = FlowGraph::new();
    let start = graph.add_node(library.create("Start").unwrap());
    let say = graph.add_node(library.create("Print").unwrap().with_input(print::VALUE, 42));
    graph.connect(start, 0, say, 0).unwrap();
    graph.execute(start).unwrap();
    assert_eq!(printed(&graph), vec!["42"]);
}

#[test]
fn test_flow_and_data_connectors_do_not_mix() {
    let mut graph = FlowGraph::new();
    let counter = graph.add_node(Node::for_loop());
    let say = graph.add_node(Node::print());
    let result = graph.connect(counter, for_loop::INDEX, say, 0);
    assert!(matches!(result, Err(GraphError::FlowMismatch { .. })));
}

/// sum of the even indices in 0..6, picked either by an IfElse in the loop
/// body or arithmetically by a straight body: sum += i * (1 - i % 2)
fn even_sum(branching: bool) -> (FlowGraph, NodeId) {
    let mut graph = FlowGraph::new();
    let init = graph.add_node(Node::set_local("sum", 0));
    let counter = graph.add_node(Node::for_loop().with_input(for_loop::END, 6));
    let read = graph.add_node(Node::get_local("sum"));
    let parity = graph.add_node(Node::math(MathOp::Mod).with_input(binary::RHS, 2));
    let total = graph.add_node(Node::math(MathOp::Add));
    let update = graph.add_node(Node::set_local("sum", Value::None));
    graph.connect(init, FLOW_OUT, counter, FLOW_IN).unwrap();
    graph.connect(counter, for_loop::INDEX, parity, binary::LHS).unwrap();
    graph.connect(read, variable::GET_VALUE, total, binary::LHS).unwrap();
    graph.connect(total, binary::RESULT, update, variable::SET_VALUE).unwrap();

    if branching {
        let even = graph.add_node(Node::compare(CompareOp::Equal).with_input(binary::RHS, 0));
        let choice = graph.add_node(Node::if_else());
        graph.connect(parity, binary::RESULT, even, binary::LHS).unwrap();
        graph.connect(even, binary::RESULT, choice, if_else::CONDITION).unwrap();
        graph.connect(counter, for_loop::BODY, choice, FLOW_IN).unwrap();
        graph.connect(choice, if_else::TRUE, update, FLOW_IN).unwrap();
        graph.connect(counter, for_loop::INDEX, total, binary::RHS).unwrap();
    } else {
        let keep = graph.add_node(Node::math(MathOp::Sub).with_input(binary::LHS, 1));
        let term = graph.add_node(Node::math(MathOp::Mul));
        graph.connect(parity, binary::RESULT, keep, binary::RHS).unwrap();
        graph.connect(counter, for_loop::INDEX, term, binary::LHS).unwrap();
        graph.connect(keep, binary::RESULT, term, binary::RHS).unwrap();
        graph.connect(term, binary::RESULT, total, binary::RHS).unwrap();
        graph.connect(counter, for_loop::BODY, update, FLOW_IN).unwrap();
    }
    (graph, init)
}

#[test]
fn test_for_loop_with_branching_body() {
    let (mut branching, start) = even_sum(true);
    let branching_last = branching.execute(start).unwrap();
    let (mut straight, start) = even_sum(false);
    let straight_last = straight.execute(start).unwrap();

    assert_eq!(branching.local_variable("sum"), Some(&Value::Int(6)));
    assert_eq!(branching.local_variables(), straight.local_variables());
    assert_eq!(branching_last, straight_last);
}

#[test]
fn test_for_loop_body_branches_between_prints() {
    let mut graph = FlowGraph::new();
    let counter = graph.add_node(Node::for_loop().with_input(for_loop::END, 4));
    let parity = graph.add_node(Node::math(MathOp::Mod).with_input(binary::RHS, 2));
    let even = graph.add_node(Node::compare(CompareOp::Equal).with_input(binary::RHS, 0));
    let choice = graph.add_node(Node::if_else());
    let index = graph.add_node(Node::print());
    let odd = graph.add_node(Node::print().with_input(print::VALUE, "odd"));
    let done = graph.add_node(Node::print().with_input(print::VALUE, "Done"));
    graph.connect(counter, for_loop::INDEX, parity, binary::LHS).unwrap();
    graph.connect(parity, binary::RESULT, even, binary::LHS).unwrap();
    graph.connect(even, binary::RESULT, choice, if_else::CONDITION).unwrap();
    graph.connect(counter, for_loop::BODY, choice, FLOW_IN).unwrap();
    graph.connect(choice, if_else::TRUE, index, FLOW_IN).unwrap();
    graph.connect(counter, for_loop::INDEX, index, print::VALUE).unwrap();
    graph.connect(choice, if_else::FALSE, odd, FLOW_IN).unwrap();
    graph.connect(counter, for_loop::DONE, done, FLOW_IN).unwrap();

    assert_eq!(graph.execute(counter).unwrap(), done);
    assert_eq!(printed(&graph), vec!["0", "odd", "2", "odd", "Done"]);
}

#[test]
fn test_long_action_chain() {
    const CHAIN: usize = 10_000;
    let mut graph = FlowGraph::new();
    let first = graph.add_node(Node::print().with_input(print::VALUE, 0));
    let mut last = first;
    for i in 1..CHAIN {
        let next = graph.add_node(Node::print().with_input(print::VALUE, i as i64));
        graph.connect(last, FLOW_OUT, next, FLOW_IN).unwrap();
        last = next;
    }

    assert_eq!(graph.execute(first).unwrap(), last);
    let printed = graph.context().printed();
    assert_eq!(printed.len(), CHAIN);
    assert_eq!(printed[CHAIN - 1], (CHAIN - 1).to_string());
}

#[test]
fn test_long_loop() {
    let mut graph = FlowGraph::new();
    let counter = graph.add_node(Node::for_loop().with_input(for_loop::END, 300_000));
    assert_eq!(graph.execute(counter).unwrap(), counter);
    assert_eq!(
        graph.output_value(OutputRef::new(counter, for_loop::INDEX)).unwrap(),
        Value::Int(299_999)
    );
}
