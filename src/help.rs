// help.rs — Usage text rendered from an option table.
//
// Layout, one entry per visible option:
//
//   -x, --long ARG      description, word-wrapped at the line width
//       --only-long     options without a short name line up with the rest
//   -c, --color[=WHEN]  an argument name in brackets is optional
//   --                  Arguments following this are not treated as options.
//
// Subcommands follow in a block of their own, under a heading:
//
//   build [TARGET]  description
//
// In each block the description column is the widest entry that still leaves
// MIN_DESCRIPTION_WIDTH columns; entries wider than that put their description
// on the next line.

use std::io::{self, Write};

use crate::config::{DOUBLE_DASH_DESCRIPTION, HELP_LINE_WIDTH, MIN_DESCRIPTION_WIDTH};
use crate::engine::Parser;
use crate::table::{Arity, Opt, OptionTable};

/// Width of `"  -x  "`, the narrowest possible entry.
const MIN_INDENT: usize = 6;

/// Gap between an entry's names and its description.
const GAP: usize = 2;

const SUBCOMMAND_HEADING: &str = "Subcommands:";

/// Help-text builder over a table.
#[derive(Debug, Clone)]
pub struct Help<'a> {
    table: &'a OptionTable,
    header: Option<String>,
    footer: Option<String>,
    subcommand_heading: String,
    width: usize,
}

struct Entry {
    head: String,
    description: Option<String>,
}

impl<'a> Help<'a> {
    pub fn new(table: &'a OptionTable) -> Self {
        Help {
            table,
            header: None,
            footer: None,
            subcommand_heading: SUBCOMMAND_HEADING.to_owned(),
            width: HELP_LINE_WIDTH,
        }
    }

    /// Text printed before the option list, e.g. a usage line.
    pub fn header(mut self, text: impl Into<String>) -> Self {
        self.header = Some(text.into());
        self
    }

    /// Text printed after the option list.
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    /// Line printed above the subcommand block.
    pub fn subcommand_heading(mut self, text: impl Into<String>) -> Self {
        self.subcommand_heading = text.into();
        self
    }

    /// Line width to wrap at (default [`HELP_LINE_WIDTH`]).
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Header, options, the subcommand block when there is one, footer.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(header) = &self.header {
            push_block(&mut out, header);
        }
        layout(&mut out, &self.option_entries(), self.width);
        let subcommands = self.subcommand_entries();
        if !subcommands.is_empty() {
            out.push('\n');
            push_block(&mut out, &self.subcommand_heading);
            layout(&mut out, &subcommands, self.width);
        }
        if let Some(footer) = &self.footer {
            push_block(&mut out, footer);
        }
        out
    }

    /// The subcommand entries alone, without heading; empty when the table
    /// has none.
    pub fn render_subcommands(&self) -> String {
        let mut out = String::new();
        layout(&mut out, &self.subcommand_entries(), self.width);
        out
    }

    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render().as_bytes())
    }

    pub fn print_subcommands(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.render_subcommands().as_bytes())
    }

    fn option_entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .table
            .iter()
            .filter(|opt| !opt.is_hidden() && !opt.is_subcommand())
            .map(|opt| Entry {
                head: head(opt),
                description: description(opt),
            })
            .collect();
        entries.push(Entry {
            head: "  --".to_owned(),
            description: Some(DOUBLE_DASH_DESCRIPTION.to_owned()),
        });
        entries
    }

    fn subcommand_entries(&self) -> Vec<Entry> {
        self.table
            .subcommands()
            .filter(|opt| !opt.is_hidden())
            .map(|opt| Entry {
                head: subcommand_head(opt),
                description: description(opt),
            })
            .collect()
    }
}

impl Parser {
    /// Help text for this parser's table.
    pub fn help(&self) -> Help<'_> {
        Help::new(self.table())
    }
}

/// Lays out one block of entries at a shared description column.
fn layout(out: &mut String, entries: &[Entry], width: usize) {
    let limit = width.saturating_sub(MIN_DESCRIPTION_WIDTH);
    let indent = entries
        .iter()
        .map(|e| text_width(&e.head) + GAP)
        .filter(|&w| w <= limit)
        .max()
        .unwrap_or(MIN_INDENT);
    let wrap_at = width.saturating_sub(indent).max(1);

    for entry in entries {
        out.push_str(&entry.head);
        let Some(description) = entry.description.as_deref() else {
            out.push('\n');
            continue;
        };
        let head_width = text_width(&entry.head);
        if head_width + GAP > indent {
            out.push('\n');
            pad(out, indent);
        } else {
            pad(out, indent - head_width);
        }
        for (i, line) in wrap(description, wrap_at).iter().enumerate() {
            if i > 0 {
                out.push('\n');
                if !line.is_empty() {
                    pad(out, indent);
                }
            }
            out.push_str(line);
        }
        out.push('\n');
    }
}

fn description(opt: &Opt) -> Option<String> {
    opt.get_help().filter(|d| !d.is_empty()).map(str::to_owned)
}

/// `  name OPERANDS`
fn subcommand_head(opt: &Opt) -> String {
    let mut head = String::from("  ");
    head.push_str(opt.get_command().unwrap_or_default());
    if let Some(arg) = opt.get_arg_name() {
        head.push(' ');
        head.push_str(arg);
    }
    head
}

/// The names-and-argument part of an entry.
fn head(opt: &Opt) -> String {
    let arg = opt.get_arg_name().map(str::to_owned).or_else(|| match opt.get_arity() {
        Arity::Zero => None,
        Arity::One => Some("ARG".to_owned()),
        Arity::Optional => Some("[ARG]".to_owned()),
    });
    let optional = arg.as_deref().is_some_and(|a| a.starts_with('['));

    let mut head = String::from("  ");
    match opt.get_short() {
        Some(c) => {
            head.push('-');
            head.push(c);
        }
        None => head.push_str("  "),
    }
    match (opt.get_short(), opt.get_long()) {
        (short, Some(long)) => {
            head.push_str(if short.is_some() { ", --" } else { "  --" });
            head.push_str(long);
            match arg.as_deref() {
                // `[WHEN]` renders as `--color[=WHEN]`.
                Some(a) if optional => {
                    head.push_str("[=");
                    head.push_str(&a[1..]);
                }
                Some(a) => {
                    head.push(' ');
                    head.push_str(a);
                }
                None => {}
            }
        }
        (_, None) => match arg.as_deref() {
            Some(a) if optional => head.push_str(a),
            Some(a) => {
                head.push(' ');
                head.push_str(a);
            }
            None => {}
        },
    }
    head
}

/// Word-wraps `text` at `width` columns. Embedded newlines start a new line;
/// a word longer than `width` gets a line of its own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0usize;
        for word in paragraph.split_whitespace() {
            let word_width = text_width(word);
            if line_width > 0 && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        lines.push(line);
    }
    lines
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(out: &mut String, n: usize) {
    out.extend(std::iter::repeat(' ').take(n));
}

fn push_block(out: &mut String, text: &str) {
    out.push_str(text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
}
