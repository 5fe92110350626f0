// Parse errors: kinds, positions, recovery, and halt-on-error.

use optparse::{
    Action, ConfigError, ConvertError, Dest, Opt, OptionTable, Parser, ParseErrorKind, RangeError,
    Settings, ValueType,
};

use crate::common::{argv, parser, parser_with};

#[test]
fn unknown_long_option() {
    let p = parser(vec![]);
    let mut args = argv(&["prog", "--nope=3", "x"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    let err = &out.errors[0];
    assert_eq!(err.kind, ParseErrorKind::UnknownOption);
    assert_eq!(err.option, "--nope");
    assert_eq!(err.token, "--nope=3");
    assert_eq!(err.index, 1);
    assert_eq!(err.to_string(), "unknown option: --nope");
    assert_eq!(args, ["prog", "x"]);
}

#[test]
fn unknown_character_in_a_cluster_does_not_stop_the_rest() {
    let a = Dest::new(false);
    let b = Dest::new(false);
    let p = parser(vec![
        Opt::new(Action::set_true(&a)).short('a'),
        Opt::new(Action::set_true(&b)).short('b'),
    ]);
    let mut args = argv(&["prog", "-azb"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].option, "-z");
    assert_eq!(out.errors[0].token, "-azb");
    assert!(a.get());
    assert!(b.get());
}

#[test]
fn zero_arity_option_rejects_an_inline_value() {
    let flag = Dest::new(false);
    let p = parser(vec![Opt::new(Action::set_true(&flag)).long("flag")]);
    let mut args = argv(&["prog", "--flag=1"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors[0].kind, ParseErrorKind::UnexpectedArgument);
    assert_eq!(out.errors[0].to_string(), "option --flag doesn't allow an argument");
    assert!(!flag.get());
}

#[test]
fn missing_argument_at_the_end() {
    let n = Dest::new(7i32);
    let p = parser(vec![Opt::new(Action::store(&n)).short('n')]);
    let mut args = argv(&["prog", "-n"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors[0].kind, ParseErrorKind::MissingArgument);
    assert_eq!(out.errors[0].to_string(), "option -n requires an argument");
    assert_eq!(n.get(), 7);
}

#[test]
fn malformed_argument_is_consumed_not_kept() {
    let n = Dest::new(7i32);
    let p = parser(vec![Opt::new(Action::store(&n)).short('n')]);
    let mut args = argv(&["prog", "-n", "abc", "file"]);
    let out = p.parse(&mut args);
    assert_eq!(
        out.errors[0].kind,
        ParseErrorKind::Conversion(ConvertError::Invalid {
            text: "abc".into(),
            ty: ValueType::I32,
        })
    );
    assert_eq!(out.argc, 2);
    assert_eq!(args, ["prog", "file"]);
    assert_eq!(n.get(), 7);
}

#[test]
fn empty_numeric_argument() {
    let n = Dest::new(0u32);
    let p = parser(vec![Opt::new(Action::store(&n)).long("n")]);
    let mut args = argv(&["prog", "--n="]);
    let out = p.parse(&mut args);
    assert_eq!(
        out.errors[0].kind,
        ParseErrorKind::Conversion(ConvertError::Empty { ty: ValueType::U32 })
    );
}

#[test]
fn domain_overflow_is_a_range_error() {
    let n = Dest::new(0u8);
    let p = parser(vec![Opt::new(Action::store(&n)).short('n')]);
    let mut args = argv(&["prog", "-n", "300"]);
    let out = p.parse(&mut args);
    assert!(matches!(
        out.errors[0].kind,
        ParseErrorKind::Range(RangeError::Domain { ty: ValueType::U8, .. })
    ));
    assert_eq!(n.get(), 0);
}

#[test]
fn value_outside_bounds() {
    let n = Dest::new(5i32);
    let p = parser(vec![Opt::new(Action::store(&n)).short('n').range(0.0, 100.0)]);
    let mut args = argv(&["prog", "-n", "200"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors[0].to_string(), "option -n: 200 is out of range (expected 0 to 100)");
    assert_eq!(n.get(), 5);
}

#[test]
fn list_item_count_is_checked() {
    let tags: Dest<Vec<String>> = Dest::default();
    let p = parser(vec![Opt::new(Action::append(&tags))
        .short('t')
        .list(",")
        .list_len(1, Some(2))]);
    let mut args = argv(&["prog", "-t", "a,b,c"]);
    let out = p.parse(&mut args);
    assert_eq!(
        out.errors[0].kind,
        ParseErrorKind::ListLength {
            count: 3,
            min: 1,
            max: Some(2),
        }
    );
    assert!(tags.get().is_empty());
}

#[test]
fn list_items_are_bounds_checked() {
    let nums: Dest<Vec<i32>> = Dest::default();
    let p = parser(vec![Opt::new(Action::store(&nums)).short('n').list(",").max(9.0)]);
    let mut args = argv(&["prog", "-n", "1,10"]);
    assert!(!p.parse(&mut args).is_ok());
    assert!(nums.get().is_empty());
}

#[test]
fn all_errors_are_collected_by_default() {
    let p = parser(vec![]);
    let mut args = argv(&["prog", "-a", "x", "--b", "y"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 2);
    assert_eq!(out.errors[0].index, 1);
    assert_eq!(out.errors[1].index, 3);
    assert_eq!(args, ["prog", "x", "y"]);
    let errs = out.into_result().unwrap_err();
    assert_eq!(errs.to_string(), "unknown option: -a\nunknown option: --b");
}

#[test]
fn halt_on_error_stops_at_the_first() {
    let flag = Dest::new(false);
    let p = parser_with(
        vec![Opt::new(Action::set_true(&flag)).short('f')],
        Settings::new().halt_on_error(true),
    );
    let mut args = argv(&["prog", "x", "-a", "-f", "y"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    assert!(!flag.get());
    assert_eq!(out.argc, 2);
    assert_eq!(args, ["prog", "x"]);
}

#[test]
fn duplicate_registration_leaves_parsing_unchanged() {
    let flag = Dest::new(false);
    let mut table = OptionTable::new().validation(true);
    table
        .register(vec![Opt::new(Action::set_true(&flag)).short('f').long("flag")])
        .unwrap();
    let again = table.register(vec![Opt::new(Action::set_true(&flag)).short('f').long("flag")]);
    assert_eq!(again, Err(ConfigError::DuplicateShort { name: 'f' }));
    assert_eq!(table.len(), 1);

    let p = Parser::with_settings(table, Settings::new().program_name("test"));
    let mut args = argv(&["prog", "--flag", "-f", "op"]);
    let out = p.parse(&mut args);
    assert!(out.is_ok());
    assert!(flag.get());
    assert_eq!(args, ["prog", "op"]);
}

#[test]
fn init_rejects_a_bad_table() {
    let flag = Dest::new(false);
    let err = optparse::init(vec![
        Opt::new(Action::set_true(&flag)).long("same"),
        Opt::new(Action::set_true(&flag)).long("same"),
    ]);
    if optparse::config::VALIDATE_TABLE {
        assert_eq!(
            err.err(),
            Some(ConfigError::DuplicateLong { name: "same".into() })
        );
    }
}
