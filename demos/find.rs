extern crate online_suffix_tree;
extern crate structopt;

use online_suffix_tree::SuffixTree;
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(name = "STRING")]
    string: String,
    #[structopt(name = "PATTERN")]
    patterns: Vec<String>,
}

fn main() -> online_suffix_tree::Result<()> {
    let options = Options::from_args();
    let tree = SuffixTree::from_sequence(options.string.as_bytes())?;

    for pattern in &options.patterns {
        println!("{} {}", pattern, tree.contains(pattern.as_bytes()));
    }

    Ok(())
}
