//! Cross-checks trees against suffix sets computed the slow way: every short string over a small
//! alphabet, then arbitrary longer ones.

extern crate online_suffix_tree;
extern crate quickcheck;

use std::collections::{BTreeMap, BTreeSet};

use online_suffix_tree::alphabet::Alphabet;
use online_suffix_tree::{
    ArrayEdgesFactory, EdgeStoreFactory, MapEdgesFactory, StringId, SuffixTree, SuffixTreeBuilder,
};
use quickcheck::{quickcheck, TestResult};

fn all_strings(alphabet: &[u8], max_len: usize) -> Vec<Vec<u8>> {
    let mut strings = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|prefix: &Vec<u8>| {
                alphabet.iter().map(move |&symbol| {
                    let mut string = prefix.clone();
                    string.push(symbol);
                    string
                })
            })
            .collect();
        strings.extend(frontier.iter().cloned());
    }
    strings
}

/// Suffixes that are not a proper prefix of another suffix; exactly these end in a leaf.
fn leaf_suffixes(sequences: &[&[u8]]) -> BTreeSet<Vec<u8>> {
    let suffixes: BTreeSet<Vec<u8>> = sequences
        .iter()
        .flat_map(|sequence| (0..sequence.len()).map(move |i| sequence[i..].to_vec()))
        .collect();

    suffixes
        .iter()
        .filter(|suffix| {
            !suffixes
                .iter()
                .any(|other| other != *suffix && other.starts_with(suffix))
        })
        .cloned()
        .collect()
}

/// Substrings followed by at least two different symbols; exactly these become internal nodes.
fn branching_substrings(sequence: &[u8]) -> usize {
    let mut followers: BTreeMap<&[u8], BTreeSet<u8>> = BTreeMap::new();
    for i in 0..sequence.len() {
        for j in i + 1..sequence.len() {
            followers.entry(&sequence[i..j]).or_default().insert(sequence[j]);
        }
    }
    followers.values().filter(|symbols| symbols.len() > 1).count()
}

fn occurs_in(sequence: &[u8], query: &[u8]) -> bool {
    query.is_empty() || sequence.windows(query.len()).any(|window| window == query)
}

fn build<F: EdgeStoreFactory>(factory: F, sequences: &[&[u8]]) -> SuffixTree<F> {
    let mut builder = SuffixTreeBuilder::with_factory(factory);
    for (i, sequence) in sequences.iter().enumerate() {
        builder = builder.add_sequence(StringId(i as u32), sequence).unwrap();
    }
    builder.build()
}

fn check_single<F: EdgeStoreFactory>(factory: F, sequence: &[u8]) {
    let tree = build(factory, &[sequence]);

    let suffixes: Vec<Vec<u8>> = tree.suffixes().collect();
    let unique: BTreeSet<Vec<u8>> = suffixes.iter().cloned().collect();
    assert_eq!(suffixes.len(), unique.len(), "{:?}", sequence);
    assert_eq!(unique, leaf_suffixes(&[sequence]), "{:?}", sequence);

    assert_eq!(tree.node_count(), 1 + branching_substrings(sequence), "{:?}", sequence);

    for i in 0..sequence.len() {
        for j in i + 1..=sequence.len() {
            assert!(tree.contains(&sequence[i..j]), "{:?} in {:?}", &sequence[i..j], sequence);
        }
    }
}

#[test]
fn every_binary_string() {
    for sequence in all_strings(b"ab", 10) {
        check_single(MapEdgesFactory, &sequence);
    }
}

#[test]
fn every_ternary_string() {
    let alphabet = Alphabet::new(b"abc").unwrap();
    for sequence in all_strings(b"abc", 7) {
        check_single(ArrayEdgesFactory::new(alphabet.clone()), &sequence);
    }
}

#[test]
fn no_false_positives() {
    let queries = all_strings(b"abc", 4);
    for sequence in all_strings(b"abc", 5) {
        let tree = SuffixTree::from_sequence(&sequence).unwrap();
        for query in &queries {
            let expected = occurs_in(&sequence, query);
            assert_eq!(tree.contains(query), expected, "{:?} in {:?}", query, sequence);
        }
    }
}

#[test]
fn every_pair_of_binary_strings() {
    let strings = all_strings(b"ab", 5);
    for first in &strings {
        for second in &strings {
            let sequences: &[&[u8]] = &[first, second];
            let tree = build(MapEdgesFactory, sequences);

            let suffixes: BTreeSet<Vec<u8>> = tree.suffixes().collect();
            assert_eq!(suffixes, leaf_suffixes(sequences), "{:?}", sequences);

            for sequence in sequences {
                for i in 0..sequence.len() {
                    for j in i + 1..=sequence.len() {
                        let query = &sequence[i..j];
                        assert!(tree.contains(query), "{:?} in {:?}", query, sequences);
                    }
                }
            }
        }
    }
}

#[test]
fn every_triple_of_short_binary_strings() {
    let strings = all_strings(b"ab", 3);
    for first in &strings {
        for second in &strings {
            for third in &strings {
                let sequences: &[&[u8]] = &[first, second, third];
                let tree = build(MapEdgesFactory, sequences);

                let suffixes: BTreeSet<Vec<u8>> = tree.suffixes().collect();
                assert_eq!(suffixes, leaf_suffixes(sequences), "{:?}", sequences);
            }
        }
    }
}

// Folds arbitrary bytes onto 2 to 4 letters so that repeats are common.
fn over_alphabet(raw: &[u8], size: u8) -> Vec<u8> {
    let size = 2 + size % 3;
    raw.iter().map(|&byte| b'a' + byte % size).collect()
}

fn contains_all_substrings<F: EdgeStoreFactory>(tree: &SuffixTree<F>, sequence: &[u8]) -> bool {
    (0..sequence.len()).all(|i| (i + 1..=sequence.len()).all(|j| tree.contains(&sequence[i..j])))
}

#[test]
fn qc_leaves_are_the_naive_suffixes() {
    fn prop(raw: Vec<u8>, size: u8) -> bool {
        let sequence = over_alphabet(&raw, size);
        let tree = build(MapEdgesFactory, &[&sequence[..]]);

        let suffixes: Vec<Vec<u8>> = tree.suffixes().collect();
        let unique: BTreeSet<Vec<u8>> = suffixes.iter().cloned().collect();
        suffixes.len() == unique.len()
            && unique == leaf_suffixes(&[&sequence[..]])
            && tree.node_count() == 1 + branching_substrings(&sequence)
    }
    quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn qc_contains_matches_naive_search() {
    fn prop(raw: Vec<u8>, query: Vec<u8>, size: u8) -> bool {
        let sequence = over_alphabet(&raw, size);
        let query: Vec<u8> = over_alphabet(&query, size).into_iter().take(6).collect();

        let alphabet = Alphabet::new(b"abcd").unwrap();
        let tree = build(ArrayEdgesFactory::new(alphabet), &[&sequence[..]]);

        let expected = occurs_in(&sequence, &query);
        contains_all_substrings(&tree, &sequence) && tree.contains(&query) == expected
    }
    quickcheck(prop as fn(Vec<u8>, Vec<u8>, u8) -> bool);
}

#[test]
fn qc_generalized_leaves_are_the_naive_suffixes() {
    fn prop(raw: Vec<Vec<u8>>, size: u8) -> TestResult {
        if raw.len() < 2 {
            return TestResult::discard();
        }

        let sequences: Vec<Vec<u8>> = raw
            .iter()
            .take(4)
            .map(|sequence| over_alphabet(sequence, size))
            .collect();
        let sequences: Vec<&[u8]> = sequences.iter().map(|sequence| &sequence[..]).collect();
        let tree = build(MapEdgesFactory, &sequences);

        let suffixes: BTreeSet<Vec<u8>> = tree.suffixes().collect();
        TestResult::from_bool(
            suffixes == leaf_suffixes(&sequences)
                && sequences.iter().all(|sequence| contains_all_substrings(&tree, sequence)),
        )
    }
    quickcheck(prop as fn(Vec<Vec<u8>>, u8) -> TestResult);
}
