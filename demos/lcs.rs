extern crate online_suffix_tree;
extern crate structopt;

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::str;

use online_suffix_tree::alphabet::Alphabet;
use online_suffix_tree::{
    ArrayEdgesFactory, EdgeStoreFactory, MapEdgesFactory, StringId, SuffixTreeBuilder,
};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Options {
    #[structopt(short = "f", long = "file", parse(from_os_str))]
    file_path: Option<PathBuf>,
    #[structopt(short = "a", long = "alphabet")]
    alphabet: Option<String>,
    #[structopt(name = "INPUT")]
    input: Vec<String>,
}

/// Terminators are taken from the control characters, so inputs must not contain those.
fn terminator(i: usize) -> u8 {
    1 + (i % 31) as u8
}

fn longest_common_substring<F: EdgeStoreFactory>(
    factory: F,
    sequences: &[Vec<u8>],
) -> online_suffix_tree::Result<Option<Vec<u8>>> {
    let mut builder = SuffixTreeBuilder::with_factory(factory);
    for (i, sequence) in sequences.iter().enumerate() {
        let mut terminated = sequence.clone();
        terminated.push(terminator(i));
        builder = builder.add_sequence(StringId(i as u32), &terminated)?;
    }

    Ok(builder.build().longest_common_substring())
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::from_args();

    let sequences: Vec<Vec<u8>> = match options.file_path {
        Some(file_path) => {
            let reader = BufReader::new(File::open(file_path)?);
            let mut sequences = Vec::new();
            for line in reader.lines() {
                sequences.push(line?.into_bytes());
            }
            sequences
        }
        None => options.input.into_iter().map(|s| s.into_bytes()).collect(),
    };

    if sequences.len() > 31 {
        return Err("at most 31 sequences are supported".into());
    }

    let result = match options.alphabet {
        Some(symbols) => {
            let mut symbols = symbols.into_bytes();
            symbols.extend((0..sequences.len()).map(terminator));
            longest_common_substring(ArrayEdgesFactory::new(Alphabet::new(&symbols)?), &sequences)?
        }
        None => longest_common_substring(MapEdgesFactory, &sequences)?,
    };

    match result {
        Some(sequence) => {
            let text = str::from_utf8(&sequence).unwrap_or("<invalid_string>");
            println!("{}", text);
        }
        None => println!("No common substring."),
    };

    Ok(())
}
