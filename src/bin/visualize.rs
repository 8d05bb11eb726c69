extern crate env_logger;
extern crate online_suffix_tree;
extern crate structopt;

use std::process;

use online_suffix_tree::alphabet::Alphabet;
use online_suffix_tree::{
    ArrayEdgesFactory, EdgeStoreFactory, MapEdgesFactory, Result, StringId, SuffixTreeBuilder,
    TraceEvent,
};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Options {
    /// Store edges in one slot per symbol of this alphabet instead of a map.
    #[structopt(short = "a", long = "alphabet")]
    alphabet: Option<String>,
    /// Print the construction trace.
    #[structopt(short = "t", long = "trace")]
    trace: bool,
    /// Dump nodes and edges.
    #[structopt(short = "d", long = "debug")]
    debug: bool,
    #[structopt(name = "INPUT", required = true)]
    inputs: Vec<String>,
}

fn run<F: EdgeStoreFactory>(factory: F, options: &Options) -> Result<()> {
    let mut builder = SuffixTreeBuilder::with_factory(factory).with_trace(Vec::<TraceEvent>::new());
    for (i, input) in options.inputs.iter().enumerate() {
        builder = builder.add_sequence(StringId(i as u32), input.as_bytes())?;
    }
    let (tree, trace) = builder.into_parts();

    if options.trace {
        for event in &trace {
            println!("{}", event);
        }
        println!("----");
    }

    print!("{}", tree);
    println!("----");
    for path in tree.suffix_paths() {
        println!("{}", path);
    }
    println!("{} nodes, {} edges", tree.node_count(), tree.edge_count());

    if options.debug {
        println!("{:#?}", tree);
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let options = Options::from_args();

    let result = match options.alphabet {
        Some(ref symbols) => Alphabet::new(symbols.as_bytes())
            .and_then(|alphabet| run(ArrayEdgesFactory::new(alphabet), &options)),
        None => run(MapEdgesFactory, &options),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}
