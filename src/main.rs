//! Flowgraph - runs a few demonstration graphs and logs what they produce
//!
//! Usage: `flowgraph [config.json]`. Set `RUST_LOG=info` to see printed values.

use flowgraph::constants::ports::{for_loop, print, variable, FLOW_IN, FLOW_OUT};
use flowgraph::nodes::{ControlFlowGraph, DataFlowGraph, MathOp, OutputRef};
use flowgraph::{FlowGraphConfig, Node, Result, Value};
use log::{error, info};

/// For 0..5 printing every index, then "Done"
fn loop_demo(config: &FlowGraphConfig) -> Result<()> {
    let mut graph = ControlFlowGraph::with_config(config.clone());
    let start = graph.add_node(Node::start());
    let counter = graph.add_node(Node::for_loop().with_input(for_loop::END, 5));
    let body = graph.add_node(Node::print());
    let done = graph.add_node(Node::print().with_input(print::VALUE, "Done"));
    graph.connect(start, FLOW_OUT, counter, FLOW_IN)?;
    graph.connect(counter, for_loop::BODY, body, FLOW_IN)?;
    graph.connect(counter, for_loop::INDEX, body, print::VALUE)?;
    graph.connect(counter, for_loop::DONE, done, FLOW_IN)?;
    graph.set_start_node(start)?;

    graph.run()?;
    info!("Loop printed {:?}", graph.context().printed());
    Ok(())
}

/// var = 1; for i in 1..5 { var = var * i }
fn factorial_demo(config: &FlowGraphConfig) -> Result<()> {
    let mut graph = ControlFlowGraph::with_config(config.clone());
    let init = graph.add_node(Node::set_local("var", 1));
    let counter = graph.add_node(Node::for_loop().with_input(for_loop::START, 1).with_input(for_loop::END, 5));
    let update = graph.add_node(Node::set_local("var", Value::None));
    let read = graph.add_node(Node::get_local("var"));
    let product = graph.add_node(Node::math(MathOp::Mul));
    graph.connect(init, FLOW_OUT, counter, FLOW_IN)?;
    graph.connect(counter, for_loop::BODY, update, FLOW_IN)?;
    graph.connect(read, 0, product, 0)?;
    graph.connect(counter, for_loop::INDEX, product, 1)?;
    graph.connect(product, 0, update, variable::SET_VALUE)?;
    graph.set_start_node(init)?;

    graph.run()?;
    info!("var = {}", graph.local_variable("var").cloned().unwrap_or_default());
    Ok(())
}

/// (1 + 2) / 2
fn arithmetic_demo(config: &FlowGraphConfig) -> Result<()> {
    let mut graph = DataFlowGraph::with_config(config.clone());
    let add = graph.add_node(Node::math(MathOp::Add).with_input(0, 1.0).with_input(1, 2.0));
    let div = graph.add_node(Node::math(MathOp::Div).with_input(1, 2.0));
    graph.connect(add, 0, div, 0)?;

    let values = graph.compute_outputs(&[OutputRef::new(div, 0)])?;
    info!("(1 + 2) / 2 = {}", values[0]);
    info!("Memo statistics: {:?}", graph.statistics());
    Ok(())
}

fn run() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => FlowGraphConfig::from_json_file(path)?,
        None => FlowGraphConfig::default(),
    };
    loop_demo(&config)?;
    factorial_demo(&config)?;
    arithmetic_demo(&config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}
