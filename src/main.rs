//! Binary entry point for `optdemo`, a small program that registers one option
//! of every action kind and prints what the command line produced.
//!
//! Output is one `key=value` line per destination, followed by `argc=` and one
//! `operand=` line per surviving operand. Exit status is 0 on success, 1 when
//! the command line had errors, or the code a callback asked for.
//!
//! Developer tracing goes to stderr and is controlled by `RUST_LOG`.

use std::io::{self, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use optparse::{display, Action, Arg, Control, Dest, Opt, Parser, Settings, OptionTable};

const PROGRAM_NAME: &str = "optdemo";
const COLOR_CHOICES: [&str; 3] = ["always", "never", "auto"];

/// Everything the options write to.
#[derive(Default)]
struct State {
    verbosity: Dest<i32>,
    number: Dest<Option<i32>>,
    output: Dest<Option<String>>,
    include: Dest<Vec<String>>,
    tags: Dest<Vec<String>>,
    tag_count: Dest<usize>,
    ratio: Dest<Option<f64>>,
    color: Dest<Option<String>>,
    toggle: Dest<bool>,
    x: Dest<bool>,
    exec: Dest<Vec<String>>,
    show_help: Dest<bool>,
}

impl State {
    fn new() -> Self {
        let state = State::default();
        state.x.set(true);
        state
    }

    fn options(&self) -> Vec<Opt> {
        let color = self.color.clone();
        let exec = self.exec.clone();
        let show_help = self.show_help.clone();
        vec![
            Opt::new(Action::increment(&self.verbosity))
                .short('v')
                .long("verbose")
                .help("Increase verbosity. Can be given several times."),
            Opt::new(Action::decrement(&self.verbosity))
                .short('q')
                .long("quiet")
                .help("Decrease verbosity."),
            Opt::new(Action::store(&self.number))
                .short('n')
                .long("number")
                .range(0.0, 100.0)
                .arg("INT")
                .help("An integer from 0 to 100."),
            Opt::new(Action::store(&self.output))
                .short('o')
                .long("output")
                .range(1.0, 255.0)
                .arg("FILE")
                .help("Output file name."),
            Opt::new(Action::append(&self.include))
                .short('I')
                .long("include")
                .arg("DIR")
                .help("Add DIR to the include list. Can be given several times."),
            Opt::new(Action::append(&self.tags))
                .short('t')
                .long("tags")
                .list(",:")
                .list_len(1, Some(3))
                .dest_len(&self.tag_count)
                .arg("LIST")
                .help("One to three tags, separated by ',' or ':'."),
            Opt::new(Action::store(&self.ratio))
                .short('r')
                .long("ratio")
                .arg("FLOAT")
                .help("A floating-point ratio."),
            Opt::new(Action::call(move |arg| set_color(&color, arg)))
                .short('c')
                .long("color")
                .optional()
                .arg("[WHEN]")
                .help("Colorize output: always, never, or auto (default: always)."),
            Opt::new(Action::toggle(&self.toggle))
                .short('x')
                .long("toggle")
                .help("Flip the toggle."),
            Opt::new(Action::set_false(&self.x))
                .short('X')
                .long("no-x")
                .help("Turn x off."),
            Opt::new(Action::call_parse(move |args, index| collect_exec(&exec, args, index)))
                .long("exec")
                .arg("CMD...")
                .help("Collect every following argument up to a lone ';'."),
            Opt::new(Action::call_void(print_version))
                .short('V')
                .long("version")
                .help("Print the version and exit."),
            Opt::new(Action::call_void(move || {
                show_help.set(true);
                Control::Exit(0)
            }))
            .short('h')
            .long("help")
            .help("Print this help and exit."),
        ]
    }

    fn report(&self, out: &mut impl Write, operands: &[String]) -> io::Result<()> {
        writeln!(out, "verbose={}", self.verbosity.get())?;
        writeln!(out, "number={}", show(self.number.get()))?;
        writeln!(out, "output={}", show(self.output.get()))?;
        writeln!(out, "include={}", self.include.get().join(","))?;
        writeln!(out, "tags={}", self.tags.get().join(","))?;
        writeln!(out, "tag_count={}", self.tag_count.get())?;
        writeln!(out, "ratio={}", show(self.ratio.get()))?;
        writeln!(out, "color={}", show(self.color.get()))?;
        writeln!(out, "toggle={}", self.toggle.get())?;
        writeln!(out, "x={}", self.x.get())?;
        writeln!(out, "exec={}", self.exec.get().join(" "))?;
        writeln!(out, "argc={}", operands.len() + 1)?;
        for operand in operands {
            writeln!(out, "operand={operand}")?;
        }
        Ok(())
    }
}

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn set_color(color: &Dest<Option<String>>, arg: Arg) -> Control {
    let when = arg.as_str().unwrap_or("always");
    if !COLOR_CHOICES.contains(&when) {
        optparse::displaylevel!(
            display::LEVEL_ERRORS,
            "{PROGRAM_NAME}: invalid color choice '{when}' (expected always, never, or auto)\n"
        );
        return Control::Exit(1);
    }
    color.set(Some(when.to_owned()));
    Control::Continue
}

/// Takes every token after `--exec` up to (and including) a lone `;`.
fn collect_exec(exec: &Dest<Vec<String>>, args: &[String], index: &mut usize) -> Control {
    let mut i = *index + 1;
    let mut words = Vec::new();
    while i < args.len() && args[i] != ";" {
        words.push(args[i].clone());
        i += 1;
    }
    *index = i.min(args.len().saturating_sub(1));
    exec.set(words);
    Control::Continue
}

fn print_version() -> Control {
    optparse::displayout!("{PROGRAM_NAME} {}\n", optparse::version_string());
    Control::Exit(0)
}

fn run() -> anyhow::Result<i32> {
    let state = State::new();
    let table = OptionTable::from_opts(state.options()).context("invalid option table")?;
    let parser = Parser::with_settings(table, Settings::new().program_name(PROGRAM_NAME));

    let (args, outcome) = parser.parse_env();
    tracing::debug!(argc = outcome.argc, errors = outcome.errors.len(), "command line parsed");

    if let Some(code) = outcome.exit {
        if state.show_help.get() {
            let mut stdout = io::stdout().lock();
            parser
                .help()
                .header(format!("Usage: {PROGRAM_NAME} [OPTION]... [OPERAND]...\n"))
                .footer("\nOperands are printed back one per line.")
                .print(&mut stdout)
                .context("failed to write help")?;
        }
        return Ok(code);
    }
    if !outcome.is_ok() {
        return Ok(1);
    }

    let mut stdout = io::stdout().lock();
    state
        .report(&mut stdout, args.get(1..).unwrap_or_default())
        .context("failed to write report")?;
    Ok(0)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            optparse::display!("{PROGRAM_NAME}: {e:#}\n");
            1
        }
    };
    // process::exit skips destructors; push out anything still buffered.
    let _ = io::stdout().flush();
    std::process::exit(code);
}
