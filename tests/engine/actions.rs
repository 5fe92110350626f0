// Every action kind, driven through Parser::parse.

use std::cell::RefCell;
use std::rc::Rc;

use optparse::{Action, Arg, Control, Dest, Opt, Value, ValueType};

use crate::common::{argv, parser};

#[test]
fn set_true_and_set_false() {
    let on = Dest::new(false);
    let off = Dest::new(true);
    let p = parser(vec![
        Opt::new(Action::set_true(&on)).short('a'),
        Opt::new(Action::set_false(&off)).long("no-b"),
    ]);
    let mut args = argv(&["prog", "-a", "--no-b"]);
    assert!(p.parse(&mut args).is_ok());
    assert!(on.get());
    assert!(!off.get());
}

#[test]
fn toggle_flips_on_every_match() {
    let t = Dest::new(false);
    let p = parser(vec![Opt::new(Action::toggle(&t)).short('t')]);
    let mut args = argv(&["prog", "-t"]);
    let _ = p.parse(&mut args);
    assert!(t.get());
    let mut args = argv(&["prog", "-tt", "-t"]);
    let _ = p.parse(&mut args);
    assert!(!t.get());
}

#[test]
fn increment_and_decrement_share_a_counter() {
    let level = Dest::new(0i32);
    let p = parser(vec![
        Opt::new(Action::increment(&level)).short('v').long("verbose"),
        Opt::new(Action::decrement(&level)).short('q'),
    ]);
    let mut args = argv(&["prog", "-vvv", "--verbose", "-q"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(level.get(), 3);
}

#[test]
fn store_keeps_the_last_value() {
    let n = Dest::new(0i32);
    let p = parser(vec![Opt::new(Action::store(&n)).short('n')]);
    let mut args = argv(&["prog", "-n", "1", "-n2"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(n.get(), 2);
}

#[test]
fn store_into_option_and_char() {
    let name: Dest<Option<String>> = Dest::default();
    let sep = Dest::new(',');
    let p = parser(vec![
        Opt::new(Action::store(&name)).long("name"),
        Opt::new(Action::store(&sep)).short('s'),
    ]);
    let mut args = argv(&["prog", "--name", "ferris", "-s;"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(name.get().as_deref(), Some("ferris"));
    assert_eq!(sep.get(), ';');
}

#[test]
fn store_list_replaces_and_counts() {
    let nums: Dest<Vec<u16>> = Dest::default();
    let count = Dest::new(0usize);
    let p = parser(vec![Opt::new(Action::store(&nums))
        .long("nums")
        .list(",")
        .dest_len(&count)]);
    let mut args = argv(&["prog", "--nums=1,2,3"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(nums.get(), vec![1, 2, 3]);
    assert_eq!(count.get(), 3);

    let mut args = argv(&["prog", "--nums=1,2,3", "--nums", "9"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(nums.get(), vec![9]);
    assert_eq!(count.get(), 1);
}

#[test]
fn append_accumulates_across_matches() {
    let dirs: Dest<Vec<String>> = Dest::default();
    let tags: Dest<Vec<String>> = Dest::default();
    let count = Dest::new(0usize);
    let p = parser(vec![
        Opt::new(Action::append(&dirs)).short('I'),
        Opt::new(Action::append(&tags))
            .short('t')
            .list(",:")
            .dest_len(&count),
    ]);
    let mut args = argv(&["prog", "-I", "a", "-Ib", "-t", "x,y", "-tz"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(dirs.get(), ["a", "b"]);
    assert_eq!(tags.get(), ["x", "y", "z"]);
    assert_eq!(count.get(), 3);
}

#[test]
fn call_receives_the_converted_value() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let p = parser(vec![Opt::new(Action::call(move |arg| {
        sink.borrow_mut().push(arg);
        Control::Continue
    }))
    .short('k')
    .value_type(ValueType::I64)]);
    let mut args = argv(&["prog", "-k", "-12", "-k0x10"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(
        *seen.borrow(),
        vec![Arg::Value(Value::I64(-12)), Arg::Value(Value::I64(16))]
    );
}

#[test]
fn call_with_list_receives_all_items() {
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    let p = parser(vec![Opt::new(Action::call(move |arg| {
        *sink.borrow_mut() = Some(arg);
        Control::Continue
    }))
    .long("pair")
    .value_type(ValueType::F64)
    .list(":")
    .list_len(2, Some(2))]);
    let mut args = argv(&["prog", "--pair=0.5:2"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(
        *seen.borrow(),
        Some(Arg::List(vec![Value::F64(0.5), Value::F64(2.0)]))
    );
}

#[test]
fn optional_argument_may_be_missing() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let flag = Dest::new(false);
    let p = parser(vec![
        Opt::new(Action::call(move |arg| {
            sink.borrow_mut().push(arg.as_str().map(str::to_owned));
            Control::Continue
        }))
        .short('c')
        .long("color")
        .optional(),
        Opt::new(Action::set_true(&flag)).short('f'),
    ]);
    let mut args = argv(&["prog", "--color=never", "-c", "-f", "--color"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(*seen.borrow(), vec![Some("never".to_owned()), None, None]);
    assert!(flag.get());
}

#[test]
fn optional_argument_takes_a_free_next_token() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let p = parser(vec![Opt::new(Action::call(move |arg| {
        sink.borrow_mut().push(arg.as_str().map(str::to_owned));
        Control::Continue
    }))
    .short('c')
    .long("color")
    .optional()]);
    let mut args = argv(&["prog", "--color", "never", "-c", "auto", "op"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(
        *seen.borrow(),
        vec![Some("never".to_owned()), Some("auto".to_owned())]
    );
    assert_eq!(args, ["prog", "op"]);
}

#[test]
fn call_raw_sees_the_text_as_typed() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let p = parser(vec![Opt::new(Action::call_raw(move |text| {
        sink.borrow_mut().push(text.map(str::to_owned));
        Control::Continue
    }))
    .short('k')
    .value_type(ValueType::I32)
    .range(0.0, 100.0)
    .optional()]);
    let mut args = argv(&["prog", "-k", "0x10", "-k", "+7", "-k", "200", "-k"]);
    let out = p.parse(&mut args);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].index, 5);
    assert_eq!(
        *seen.borrow(),
        vec![Some("0x10".to_owned()), Some("+7".to_owned()), None]
    );
}

#[test]
fn call_void_runs_once_per_match() {
    let hits = Dest::new(0u32);
    let counter = hits.clone();
    let p = parser(vec![Opt::new(Action::call_void(move || {
        counter.update(|n| *n += 1);
        Control::Continue
    }))
    .short('p')
    .long("ping")]);
    let mut args = argv(&["prog", "-pp", "--ping"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(hits.get(), 3);
}

#[test]
fn call_parse_consumes_a_variable_number_of_tokens() {
    let words: Dest<Vec<String>> = Dest::default();
    let sink = words.clone();
    let p = parser(vec![Opt::new(Action::call_parse(move |args, index| {
        let mut i = *index + 1;
        while i < args.len() && args[i] != ";" {
            i += 1;
        }
        sink.set(args[*index + 1..i].to_vec());
        *index = i.min(args.len() - 1);
        Control::Continue
    }))
    .long("exec")]);

    let mut args = argv(&["prog", "a", "--exec", "ls", "-l", "--all", ";", "b"]);
    let out = p.parse(&mut args);
    assert!(out.is_ok());
    assert_eq!(words.get(), ["ls", "-l", "--all"]);
    assert_eq!(args, ["prog", "a", "b"]);

    let mut args = argv(&["prog", "--exec", "echo", "hi"]);
    assert!(p.parse(&mut args).is_ok());
    assert_eq!(words.get(), ["echo", "hi"]);
    assert_eq!(args, ["prog"]);
}

#[test]
fn call_parse_that_consumes_nothing_resumes_after_its_token() {
    let flag = Dest::new(false);
    let p = parser(vec![
        Opt::new(Action::call_parse(|_, _| Control::Continue)).long("noop"),
        Opt::new(Action::set_true(&flag)).short('f'),
    ]);
    let mut args = argv(&["prog", "--noop", "-f", "x"]);
    assert!(p.parse(&mut args).is_ok());
    assert!(flag.get());
    assert_eq!(args, ["prog", "x"]);
}

#[test]
fn exit_stops_parsing() {
    let flag = Dest::new(false);
    let p = parser(vec![
        Opt::new(Action::call_void(|| Control::Exit(3))).short('V'),
        Opt::new(Action::set_true(&flag)).short('f'),
    ]);
    let mut args = argv(&["prog", "a", "-V", "-f", "b"]);
    let out = p.parse(&mut args);
    assert_eq!(out.exit, Some(3));
    assert!(out.is_ok());
    assert!(!flag.get());
    assert_eq!(out.argc, 2);
    assert_eq!(args, ["prog", "a"]);
}

#[test]
fn exit_inside_a_cluster_skips_the_rest_of_it() {
    let flag = Dest::new(false);
    let p = parser(vec![
        Opt::new(Action::call_void(|| Control::Exit(0))).short('h'),
        Opt::new(Action::set_true(&flag)).short('f'),
    ]);
    let mut args = argv(&["prog", "-hf"]);
    assert_eq!(p.parse(&mut args).exit, Some(0));
    assert!(!flag.get());
}
