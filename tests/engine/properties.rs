// Property tests over generated argument vectors.

use optparse::{Action, Dest, Opt, Parser};
use proptest::prelude::*;

use crate::common::parser;

fn flags_parser() -> (Dest<u32>, Parser) {
    let hits = Dest::new(0u32);
    let p = parser(vec![
        Opt::new(Action::increment(&hits)).short('a').long("all"),
        Opt::new(Action::increment(&hits)).short('b'),
    ]);
    (hits, p)
}

/// Tokens that never look like options.
fn operand() -> impl Strategy<Value = String> {
    "[a-z0-9./_]{0,8}"
}

#[derive(Debug, Clone)]
enum Piece {
    Flag(&'static str),
    Operand(String),
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        prop_oneof![Just("-a"), Just("-b"), Just("-ab"), Just("--all")].prop_map(Piece::Flag),
        operand().prop_map(Piece::Operand),
    ]
}

proptest! {
    #[test]
    fn operands_survive_in_order(pieces in prop::collection::vec(piece(), 0..24)) {
        let (hits, p) = flags_parser();
        let mut args = vec!["prog".to_string()];
        let mut expected = vec!["prog".to_string()];
        let mut flag_count = 0u32;
        for piece in &pieces {
            match piece {
                Piece::Flag(f) => {
                    args.push(f.to_string());
                    flag_count += if *f == "-ab" { 2 } else { 1 };
                }
                Piece::Operand(o) => {
                    args.push(o.clone());
                    expected.push(o.clone());
                }
            }
        }
        let out = p.parse(&mut args);
        prop_assert!(out.is_ok());
        prop_assert_eq!(out.argc, expected.len());
        prop_assert_eq!(&args, &expected);
        prop_assert_eq!(hits.get(), flag_count);
    }

    #[test]
    fn operand_only_vectors_are_unchanged(ops in prop::collection::vec(operand(), 0..16)) {
        let (_, p) = flags_parser();
        let mut args: Vec<String> = std::iter::once("prog".to_string()).chain(ops).collect();
        let before = args.clone();
        let out = p.parse(&mut args);
        prop_assert_eq!(out.argc, before.len());
        prop_assert_eq!(&args, &before);

        let again = p.parse(&mut args);
        prop_assert_eq!(again.argc, before.len());
        prop_assert_eq!(&args, &before);
    }

    #[test]
    fn tail_after_double_dash_is_kept_verbatim(tail in prop::collection::vec(".{0,6}", 0..12)) {
        let (hits, p) = flags_parser();
        let mut args = vec!["prog".to_string(), "-a".to_string(), "--".to_string()];
        args.extend(tail.iter().cloned());
        let out = p.parse(&mut args);
        prop_assert!(out.is_ok());
        prop_assert_eq!(&args[1..], &tail[..]);
        prop_assert_eq!(hits.get(), 1);
    }

    #[test]
    fn arbitrary_vectors_keep_argv0_and_match_argc(
        tokens in prop::collection::vec("-{0,2}[a-z=]{0,4}", 1..16)
    ) {
        let (_, p) = flags_parser();
        let mut args = tokens.clone();
        let out = p.parse(&mut args);
        prop_assert_eq!(&args[0], &tokens[0]);
        prop_assert_eq!(out.argc, args.len());
        prop_assert!(out.argc >= 1);
    }
}
