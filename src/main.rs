//! supplynet-layout CLI entry point.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;

use supplynet_layout::{Dataset, GraphStats, LayoutPolicy, SupplyGraph, layout_dataset};

/// Layered flow layout and network tracing for supply relationship graphs.
#[derive(Parser, Debug)]
#[command(name = "supplynet-layout", version = supplynet_layout::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Dataset JSON file (reads from stdin if not provided)
    #[arg(global = true, short = 'i', long = "input")]
    input: Option<String>,

    /// Layout policy JSON file; missing fields keep their defaults
    #[arg(global = true, short = 'c', long = "config")]
    config: Option<String>,

    /// Select the nodes of one reporting year from `isRE_<year>` flags
    #[arg(global = true, short = 'y', long = "year")]
    year: Option<u16>,

    /// Write output to this file instead of stdout
    #[arg(global = true, short = 'o', long = "output")]
    output: Option<String>,

    /// Pretty-print JSON output
    #[arg(global = true, long = "pretty")]
    pretty: bool,

    /// Log to stderr (-v debug, -vv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out the graph and print the layout report
    Layout {
        /// Leave network traces out of the report
        #[arg(long = "no-traces")]
        no_traces: bool,
    },
    /// Print the network trace of one node
    Trace {
        /// Node id to trace from
        node: String,
    },
    /// Print graph statistics
    Stats,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let text = read_input(cli.input.as_deref());
    let dataset = match Dataset::from_json(&text) {
        Ok(d) => d,
        Err(e) => fail(&format!("invalid dataset: {}", e)),
    };
    let dataset = match cli.year {
        Some(year) => dataset.for_year(year),
        None => dataset,
    };

    let rendered = match cli.command {
        Command::Layout { no_traces } => {
            let policy = load_policy(cli.config.as_deref());
            let result = match layout_dataset(&dataset, None, &policy) {
                Ok(r) => r,
                Err(e) => fail(&e.to_string()),
            };
            to_json(&result.report(!no_traces), cli.pretty)
        }
        Command::Trace { node } => {
            let graph = build_graph(&dataset);
            match supplynet_layout::trace::trace_id(&graph, &node) {
                Ok(t) => to_json(&t.to_report(&graph), cli.pretty),
                Err(e) => fail(&e.to_string()),
            }
        }
        Command::Stats => {
            let graph = build_graph(&dataset);
            to_json(&GraphStats::collect(&graph, &dataset.schema), cli.pretty)
        }
    };

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            fail(&format!("cannot write '{}': {}", path, e));
        }
    } else {
        println!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            fail(&format!("cannot flush stdout: {}", e));
        }
    }
}

fn read_input(path: Option<&str>) -> String {
    match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => fail(&format!("cannot read '{}': {}", path, e)),
        },
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                fail(&format!("cannot read stdin: {}", e));
            }
            buf
        }
    }
}

fn load_policy(path: Option<&str>) -> LayoutPolicy {
    let Some(path) = path else {
        return LayoutPolicy::default();
    };
    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(&format!("cannot read '{}': {}", path, e)),
    };
    match LayoutPolicy::from_json(&text) {
        Ok(p) => p,
        Err(e) => fail(&format!("invalid config '{}': {}", path, e)),
    }
}

fn build_graph(dataset: &Dataset) -> SupplyGraph {
    match SupplyGraph::from_dataset(dataset) {
        Ok(g) => g,
        Err(e) => fail(&e.to_string()),
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> String {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match out {
        Ok(s) => s,
        Err(e) => fail(&format!("cannot serialize output: {}", e)),
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}
