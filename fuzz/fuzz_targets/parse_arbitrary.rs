#![no_main]
use libfuzzer_sys::fuzz_target;

use optparse::{Action, Control, Dest, Opt};

fuzz_target!(|data: &[u8]| {
    // Split the input into an argument vector on NUL bytes and parse it.
    // Errors are expected and fine; what we verify is no panics and that the
    // compacted vector is consistent with the reported count.
    optparse::display::set_display_level(0);

    let flag = Dest::new(false);
    let level = Dest::new(0u8);
    let number = Dest::new(0i16);
    let name: Dest<Option<String>> = Dest::default();
    let items: Dest<Vec<u32>> = Dest::default();
    let count = Dest::new(0usize);
    let parser = match optparse::init(vec![
        Opt::new(Action::toggle(&flag)).short('f').long("flag"),
        Opt::new(Action::increment(&level)).short('v'),
        Opt::new(Action::store(&number)).short('n').long("number").range(-100.0, 100.0),
        Opt::new(Action::store(&name)).short('o').long("output").max(8.0),
        Opt::new(Action::append(&items))
            .short('l')
            .long("list")
            .list(",")
            .list_len(1, Some(4))
            .dest_len(&count),
        Opt::new(Action::call(|_| Control::Continue)).short('c').long("color").optional(),
        Opt::new(Action::call_parse(|args, index| {
            *index = (*index + 2).min(args.len() - 1);
            Control::Continue
        }))
        .long("skip"),
    ]) {
        Ok(p) => p,
        Err(_) => return,
    };

    let mut args: Vec<String> = data
        .split(|&b| b == 0)
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .collect();
    let first = args.first().cloned();
    let outcome = parser.parse(&mut args);

    assert_eq!(outcome.argc, args.len());
    assert_eq!(args.first().cloned(), first);
    assert!(outcome.exit.is_none());
    assert_eq!(count.get(), items.with(Vec::len));
});
