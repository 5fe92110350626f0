// Subcommand entries: recognition, hand-off, and unknown names.

use optparse::{Action, Dest, Opt, ParseErrorKind, Settings};

use crate::common::{argv, parser, parser_with};

fn git_like(verbose: &Dest<u32>) -> optparse::Parser {
    parser(vec![
        Opt::new(Action::increment(verbose)).short('v'),
        Opt::subcommand("commit").arg("[FILE]..."),
        Opt::subcommand("push"),
    ])
}

#[test]
fn options_before_the_subcommand_are_parsed() {
    let verbose = Dest::new(0u32);
    let p = git_like(&verbose);
    let mut args = argv(&["prog", "-vv", "commit", "-v", "a.txt"]);
    let out = p.parse(&mut args);
    assert!(out.is_ok());
    assert_eq!(verbose.get(), 2);
    assert_eq!(out.argc, 1);
    assert_eq!(args, ["prog"]);

    let sub = out.subcommand.expect("subcommand recognised");
    assert_eq!(sub.name, "commit");
    assert_eq!(sub.index, 2);
    assert_eq!(sub.args, ["commit", "-v", "a.txt"]);
}

#[test]
fn nested_parser_takes_over_the_rest() {
    let verbose = Dest::new(0u32);
    let amend = Dest::new(false);
    let top = git_like(&verbose);
    let commit = parser(vec![Opt::new(Action::set_true(&amend)).long("amend")]);

    let mut args = argv(&["prog", "-v", "commit", "--amend", "a.txt", "-v"]);
    let out = top.parse(&mut args);
    let mut rest = out.subcommand.expect("subcommand recognised").args;
    let inner = commit.parse(&mut rest);
    assert_eq!(inner.errors.len(), 1);
    assert_eq!(inner.errors[0].option, "-v");
    assert!(amend.get());
    assert_eq!(verbose.get(), 1);
    assert_eq!(rest, ["commit", "a.txt"]);
}

#[test]
fn unknown_name_is_reported_and_skipped() {
    let verbose = Dest::new(0u32);
    let p = git_like(&verbose);
    let mut args = argv(&["prog", "comit", "-v", "push"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    let err = &out.errors[0];
    assert_eq!(err.kind, ParseErrorKind::UnknownSubcommand);
    assert_eq!(err.index, 1);
    assert_eq!(err.to_string(), "unknown subcommand: comit");
    assert_eq!(verbose.get(), 1);
    assert_eq!(out.subcommand.map(|s| s.name).as_deref(), Some("push"));
    assert_eq!(args, ["prog"]);
}

#[test]
fn halting_on_an_unknown_name() {
    let verbose = Dest::new(0u32);
    let p = parser_with(
        vec![
            Opt::new(Action::increment(&verbose)).short('v'),
            Opt::subcommand("push"),
        ],
        Settings::new().halt_on_error(true),
    );
    let mut args = argv(&["prog", "pull", "push"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.subcommand, None);
}

#[test]
fn operands_after_double_dash_are_not_subcommands() {
    let verbose = Dest::new(0u32);
    let p = git_like(&verbose);
    let mut args = argv(&["prog", "--", "push", "x"]);
    let out = p.parse(&mut args);
    assert!(out.is_ok());
    assert_eq!(out.subcommand, None);
    assert_eq!(args, ["prog", "push", "x"]);
}

#[test]
fn subcommand_name_can_still_be_an_option_argument() {
    let target: Dest<Option<String>> = Dest::default();
    let p = parser(vec![
        Opt::new(Action::store(&target)).short('t'),
        Opt::subcommand("push"),
    ]);
    let mut args = argv(&["prog", "-t", "push"]);
    let out = p.parse(&mut args);
    assert!(out.is_ok());
    assert_eq!(target.get().as_deref(), Some("push"));
    assert_eq!(out.subcommand, None);
}
