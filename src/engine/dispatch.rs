// dispatch.rs — The argument-vector walk: classify, resolve, acquire, validate, act.
//
// The vector is processed left to right. Operands are swapped down to the
// write index as they are found, so after the walk the front of the vector
// holds argv[0] followed by the operands in encounter order, and the tail is
// cut off. Tokens to the left of the current index may therefore already be
// reordered when a parse callback sees the vector.
//
// With subcommands registered, an operand before `--` is looked up as a
// subcommand name instead of being kept. A match splits off the rest of the
// vector and ends the walk.

use crate::config::Settings;
use crate::convert::{check_bounds, convert};
use crate::display::LEVEL_ERRORS;
use crate::displaylevel;
use crate::engine::classify::{classify, Token};
use crate::engine::{Outcome, Subcommand};
use crate::error::{ParseError, ParseErrorKind};
use crate::list::split_convert;
use crate::table::{Action, Arg, Arity, Control, Opt, OptionTable};

/// Position of the walk over the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor {
    /// Next token to look at.
    pub index: usize,
    /// Where the next operand goes.
    pub write: usize,
    /// Set once `--` has been seen.
    pub operands_only: bool,
}

impl Cursor {
    fn start() -> Self {
        Cursor {
            index: 1,
            write: 1,
            operands_only: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Go,
    Stop,
}

/// Where a matched option came from, for error reports and parse callbacks.
struct Site {
    option: String,
    token: String,
    index: usize,
}

struct Run<'t> {
    table: &'t OptionTable,
    has_subcommands: bool,
    halt: bool,
    prog: String,
    errors: Vec<ParseError>,
    exit: Option<i32>,
    subcommand: Option<Subcommand>,
}

pub(crate) fn run(table: &OptionTable, settings: &Settings, args: &mut Vec<String>) -> Outcome {
    if args.is_empty() {
        return Outcome {
            argc: 0,
            errors: Vec::new(),
            exit: None,
            subcommand: None,
        };
    }

    let prog = settings
        .resolve_program_name(args.first().map(String::as_str))
        .to_owned();
    let mut run = Run {
        table,
        has_subcommands: table.has_subcommands(),
        halt: settings.halt_on_error,
        prog,
        errors: Vec::new(),
        exit: None,
        subcommand: None,
    };

    let mut cur = Cursor::start();
    while cur.index < args.len() {
        let step = if cur.operands_only {
            keep_operand(args, &mut cur);
            Step::Go
        } else {
            let token = args[cur.index].clone();
            let kind = classify(&token);
            tracing::trace!(index = cur.index, token = %token, kind = ?kind, "classified");
            match kind {
                Token::DoubleDash => {
                    cur.operands_only = true;
                    cur.index += 1;
                    Step::Go
                }
                Token::Positional if run.has_subcommands => run.subcommand(args, &mut cur),
                Token::Positional => {
                    keep_operand(args, &mut cur);
                    Step::Go
                }
                Token::Long { name, value } => run.long(args, &mut cur, name, value),
                Token::Cluster(body) => run.cluster(args, &mut cur, body),
            }
        };
        if step == Step::Stop {
            break;
        }
    }

    args.truncate(cur.write);
    tracing::debug!(
        argc = cur.write,
        errors = run.errors.len(),
        exit = ?run.exit,
        subcommand = ?run.subcommand.as_ref().map(|s| s.name.as_str()),
        "parse finished"
    );
    Outcome {
        argc: cur.write,
        errors: run.errors,
        exit: run.exit,
        subcommand: run.subcommand,
    }
}

fn keep_operand(args: &mut [String], cur: &mut Cursor) {
    args.swap(cur.write, cur.index);
    cur.write += 1;
    cur.index += 1;
}

impl<'t> Run<'t> {
    fn fail(&mut self, kind: impl Into<ParseErrorKind>, site: &Site) -> Step {
        let err = ParseError::new(kind, site.option.as_str(), site.token.as_str(), site.index);
        displaylevel!(LEVEL_ERRORS, "{}: {}\n", self.prog, err);
        tracing::debug!(index = err.index, token = %err.token, "parse error: {err}");
        self.errors.push(err);
        if self.halt {
            Step::Stop
        } else {
            Step::Go
        }
    }

    // ── Subcommands ───────────────────────────────────────────────────────────

    fn subcommand(&mut self, args: &mut Vec<String>, cur: &mut Cursor) -> Step {
        let index = cur.index;
        if self.table.find_subcommand(&args[index]).is_some() {
            let rest = args.split_off(index);
            tracing::debug!(index, name = %rest[0], "subcommand");
            self.subcommand = Some(Subcommand {
                name: rest[0].clone(),
                index,
                args: rest,
            });
            return Step::Stop;
        }
        let site = Site {
            option: args[index].clone(),
            token: args[index].clone(),
            index,
        };
        cur.index += 1;
        self.fail(ParseErrorKind::UnknownSubcommand, &site)
    }

    // ── Long options ──────────────────────────────────────────────────────────

    fn long(&mut self, args: &mut Vec<String>, cur: &mut Cursor, name: &str, inline: Option<&str>) -> Step {
        let table = self.table;
        let site = Site {
            option: format!("--{name}"),
            token: args[cur.index].clone(),
            index: cur.index,
        };
        cur.index += 1;
        match table.find_long(name) {
            Some(opt) => self.apply(opt, args, cur, &site, inline.map(str::to_owned)),
            None => self.fail(ParseErrorKind::UnknownOption, &site),
        }
    }

    // ── Short-option clusters ─────────────────────────────────────────────────

    fn cluster(&mut self, args: &mut Vec<String>, cur: &mut Cursor, body: &str) -> Step {
        let table = self.table;
        let index = cur.index;
        let token = args[index].clone();
        cur.index += 1;

        let mut char_pos = 0usize;
        while let Some(c) = body[char_pos..].chars().next() {
            let next = char_pos + c.len_utf8();
            let site = Site {
                option: format!("-{c}"),
                token: token.clone(),
                index,
            };
            let step = match table.find_short(c) {
                None => self.fail(ParseErrorKind::UnknownOption, &site),
                Some(opt) if opt.get_arity() == Arity::Zero => {
                    self.execute(opt, Arg::Missing, None, args, cur, &site)
                }
                Some(opt) => {
                    // The rest of the cluster is this option's argument.
                    let rest = &body[next..];
                    let inline = (!rest.is_empty()).then(|| rest.to_owned());
                    return self.apply(opt, args, cur, &site, inline);
                }
            };
            if step == Step::Stop {
                return Step::Stop;
            }
            char_pos = next;
        }
        Step::Go
    }

    // ── Argument acquisition ──────────────────────────────────────────────────

    fn apply(
        &mut self,
        opt: &Opt,
        args: &mut Vec<String>,
        cur: &mut Cursor,
        site: &Site,
        inline: Option<String>,
    ) -> Step {
        let arity = opt.get_arity();
        if arity == Arity::Zero {
            if inline.is_some() {
                return self.fail(ParseErrorKind::UnexpectedArgument, site);
            }
            return self.execute(opt, Arg::Missing, None, args, cur, site);
        }

        let text = match inline {
            Some(text) => Some(text),
            None => self.take_next(args, cur),
        };
        tracing::trace!(option = %site.option, argument = ?text, "acquired");
        let arg = match text.as_deref() {
            Some(text) => match convert_arg(opt, text) {
                Ok(arg) => arg,
                Err(kind) => return self.fail(kind, site),
            },
            None if arity == Arity::Optional => Arg::Missing,
            None => return self.fail(ParseErrorKind::MissingArgument, site),
        };
        self.execute(opt, arg, text.as_deref(), args, cur, site)
    }

    /// Takes the token at the cursor as an option-argument, unless it is `--`
    /// or itself names a registered option.
    fn take_next(&self, args: &[String], cur: &mut Cursor) -> Option<String> {
        let candidate = args.get(cur.index)?;
        if !self.accepts_as_argument(candidate) {
            return None;
        }
        cur.index += 1;
        Some(candidate.clone())
    }

    fn accepts_as_argument(&self, token: &str) -> bool {
        match classify(token) {
            Token::DoubleDash => false,
            Token::Positional => true,
            Token::Long { name, .. } => self.table.find_long(name).is_none(),
            Token::Cluster(body) => body
                .chars()
                .next()
                .map_or(true, |c| self.table.find_short(c).is_none()),
        }
    }

    // ── Actions ───────────────────────────────────────────────────────────────

    fn execute(
        &mut self,
        opt: &Opt,
        arg: Arg,
        raw: Option<&str>,
        args: &mut Vec<String>,
        cur: &mut Cursor,
        site: &Site,
    ) -> Step {
        tracing::trace!(option = %site.option, action = opt.get_action().name(), "executing");
        let control = match opt.get_action() {
            Action::SetTrue(dest) => {
                dest.set(true);
                Control::Continue
            }
            Action::SetFalse(dest) => {
                dest.set(false);
                Control::Continue
            }
            Action::Toggle(dest) => {
                dest.update(|b| *b = !*b);
                Control::Continue
            }
            Action::Increment(counter) => {
                counter.step(true);
                Control::Continue
            }
            Action::Decrement(counter) => {
                counter.step(false);
                Control::Continue
            }
            Action::Store(slot) => {
                let held = slot.put(arg.into_values(), false);
                record_len(opt, held);
                Control::Continue
            }
            Action::Append(slot) => {
                let held = slot.put(arg.into_values(), true);
                record_len(opt, held);
                Control::Continue
            }
            Action::Call(f) => f(arg),
            Action::CallRaw(f) => f(raw),
            Action::CallVoid(f) => f(),
            Action::CallParse(f) => {
                let mut index = site.index;
                let control = f(args.as_slice(), &mut index);
                cur.index = cur.index.max(index.saturating_add(1)).min(args.len());
                control
            }
            Action::Subcommand => Control::Continue,
        };
        match control {
            Control::Continue => Step::Go,
            Control::Exit(code) => {
                tracing::debug!(option = %site.option, code, "exit requested");
                self.exit = Some(code);
                Step::Stop
            }
        }
    }
}

fn record_len(opt: &Opt, held: usize) {
    if let Some(counter) = &opt.dest_len {
        counter.set(held);
    }
}

/// Converts option-argument text into what the action receives, checking
/// list length and bounds on the way.
fn convert_arg(opt: &Opt, text: &str) -> Result<Arg, ParseErrorKind> {
    let ty = opt.get_value_type();
    let bounds = opt.get_bounds();
    match opt.get_delimiters() {
        Some(delimiters) => {
            let items = split_convert(text, delimiters, ty, opt.get_list_len())?;
            for item in &items {
                check_bounds(item, bounds)?;
            }
            Ok(Arg::List(items))
        }
        None => {
            let value = convert(text, ty)?;
            check_bounds(&value, bounds)?;
            Ok(Arg::Value(value))
        }
    }
}
