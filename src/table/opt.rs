//! Option definitions and the actions they trigger.

use std::fmt;

use crate::convert::Bounds;
use crate::list::ListLen;
use crate::table::dest::{Counter, Dest, Slot};
use crate::value::{Value, ValueType};

/// Number of option-arguments an option takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Zero,
    One,
    /// Zero or one; the option still fires when no argument is available.
    Optional,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Zero => f.write_str("0"),
            Arity::One => f.write_str("1"),
            Arity::Optional => f.write_str("optional"),
        }
    }
}

/// What a callback asks the parser to do next.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    /// Stop parsing; the caller should exit the process with this code.
    Exit(i32),
}

/// The argument handed to a [`Action::Call`] callback.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// An optional argument that was not given.
    Missing,
    Value(Value),
    /// The converted items of a list-mode argument.
    List(Vec<Value>),
}

impl Arg {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }

    /// List items, or the single value as a one-item slice.
    pub fn items(&self) -> &[Value] {
        match self {
            Arg::Missing => &[],
            Arg::Value(v) => std::slice::from_ref(v),
            Arg::List(items) => items,
        }
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        match self {
            Arg::Missing => Vec::new(),
            Arg::Value(v) => vec![v],
            Arg::List(items) => items,
        }
    }
}

pub type Callback = Box<dyn Fn(Arg) -> Control>;
pub type VoidCallback = Box<dyn Fn() -> Control>;
/// Receives the option-argument exactly as the user typed it, or `None` for a
/// missing optional argument.
pub type RawCallback = Box<dyn Fn(Option<&str>) -> Control>;
/// Receives the whole argument vector and, in the `usize`, the index of the
/// option's own token. Advancing the index past further tokens consumes them.
pub type ParseCallback = Box<dyn Fn(&[String], &mut usize) -> Control>;

/// What happens when an option matches. Each variant carries the destination
/// shape it writes to.
pub enum Action {
    SetTrue(Dest<bool>),
    SetFalse(Dest<bool>),
    Toggle(Dest<bool>),
    Increment(Box<dyn Counter>),
    Decrement(Box<dyn Counter>),
    Store(Box<dyn Slot>),
    Append(Box<dyn Slot>),
    Call(Callback),
    /// Like `Call`, but hands over the unconverted text. A declared type and
    /// bounds are still checked first.
    CallRaw(RawCallback),
    CallVoid(VoidCallback),
    CallParse(ParseCallback),
    /// Marks a subcommand entry; see [`Opt::subcommand`].
    Subcommand,
}

impl Action {
    pub fn set_true(dest: &Dest<bool>) -> Self {
        Action::SetTrue(dest.clone())
    }

    pub fn set_false(dest: &Dest<bool>) -> Self {
        Action::SetFalse(dest.clone())
    }

    pub fn toggle(dest: &Dest<bool>) -> Self {
        Action::Toggle(dest.clone())
    }

    pub fn increment<D: Counter + Clone + 'static>(dest: &D) -> Self {
        Action::Increment(Box::new(dest.clone()))
    }

    pub fn decrement<D: Counter + Clone + 'static>(dest: &D) -> Self {
        Action::Decrement(Box::new(dest.clone()))
    }

    pub fn store<D: Slot + Clone + 'static>(dest: &D) -> Self {
        Action::Store(Box::new(dest.clone()))
    }

    pub fn append<D: Slot + Clone + 'static>(dest: &D) -> Self {
        Action::Append(Box::new(dest.clone()))
    }

    pub fn call(f: impl Fn(Arg) -> Control + 'static) -> Self {
        Action::Call(Box::new(f))
    }

    pub fn call_raw(f: impl Fn(Option<&str>) -> Control + 'static) -> Self {
        Action::CallRaw(Box::new(f))
    }

    pub fn call_void(f: impl Fn() -> Control + 'static) -> Self {
        Action::CallVoid(Box::new(f))
    }

    pub fn call_parse(f: impl Fn(&[String], &mut usize) -> Control + 'static) -> Self {
        Action::CallParse(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::SetTrue(_) => "SetTrue",
            Action::SetFalse(_) => "SetFalse",
            Action::Toggle(_) => "Toggle",
            Action::Increment(_) => "Increment",
            Action::Decrement(_) => "Decrement",
            Action::Store(_) => "Store",
            Action::Append(_) => "Append",
            Action::Call(_) => "Call",
            Action::CallRaw(_) => "CallRaw",
            Action::CallVoid(_) => "CallVoid",
            Action::CallParse(_) => "CallParse",
            Action::Subcommand => "Subcommand",
        }
    }

    /// Arity used when the definition does not set one.
    pub fn default_arity(&self) -> Arity {
        match self {
            Action::Store(_) | Action::Append(_) | Action::Call(_) | Action::CallRaw(_) => {
                Arity::One
            }
            _ => Arity::Zero,
        }
    }

    /// Arities this action can work with.
    pub fn accepts_arity(&self, arity: Arity) -> bool {
        match self {
            Action::Store(_) | Action::Append(_) => arity == Arity::One,
            Action::Call(_) | Action::CallRaw(_) => arity != Arity::Zero,
            _ => arity == Arity::Zero,
        }
    }

    pub(crate) fn slot(&self) -> Option<&dyn Slot> {
        match self {
            Action::Store(slot) | Action::Append(slot) => Some(slot.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One option definition.
///
/// Built with a fluent interface:
///
/// ```
/// use optparse::{Action, Dest, Opt};
///
/// let level = Dest::new(1u8);
/// let opt = Opt::new(Action::store(&level))
///     .short('l')
///     .long("level")
///     .range(0.0, 9.0)
///     .arg("N")
///     .help("Compression level.");
/// assert_eq!(opt.get_long(), Some("level"));
/// ```
#[derive(Debug)]
pub struct Opt {
    pub(crate) short: Option<char>,
    pub(crate) long: Option<String>,
    pub(crate) command: Option<String>,
    pub(crate) action: Action,
    pub(crate) arity: Option<Arity>,
    pub(crate) value_type: Option<ValueType>,
    pub(crate) bounds: Bounds,
    pub(crate) delimiters: Option<String>,
    pub(crate) list_len: Option<ListLen>,
    pub(crate) dest_len: Option<Dest<usize>>,
    pub(crate) arg_name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) hidden: bool,
}

impl Opt {
    pub fn new(action: Action) -> Self {
        Opt {
            short: None,
            long: None,
            command: None,
            action,
            arity: None,
            value_type: None,
            bounds: Bounds::UNBOUNDED,
            delimiters: None,
            list_len: None,
            dest_len: None,
            arg_name: None,
            description: None,
            hidden: false,
        }
    }

    /// A subcommand entry. A table holding one or more of these treats every
    /// operand as a subcommand name: a match stops option parsing, anything
    /// else is reported. Use [`arg`](Self::arg) for the operands shown in help.
    ///
    /// ```
    /// use optparse::Opt;
    ///
    /// let build = Opt::subcommand("build").arg("[TARGET]").help("Compile the project.");
    /// assert_eq!(build.get_command(), Some("build"));
    /// ```
    pub fn subcommand(name: impl Into<String>) -> Self {
        Opt {
            command: Some(name.into()),
            ..Opt::new(Action::Subcommand)
        }
    }

    // ── Builder ───────────────────────────────────────────────────────────────

    pub fn short(mut self, name: char) -> Self {
        self.short = Some(name);
        self
    }

    /// Long name, without the leading `--`.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long = Some(name.into());
        self
    }

    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Shorthand for `.arity(Arity::Optional)`.
    pub fn optional(self) -> Self {
        self.arity(Arity::Optional)
    }

    /// Conversion type for [`Action::Call`] arguments. Store and append
    /// actions take their type from the destination.
    pub fn value_type(mut self, ty: ValueType) -> Self {
        self.value_type = Some(ty);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.bounds.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.bounds.max = Some(max);
        self
    }

    /// Inclusive bounds: numeric for converted values, length for text.
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Switches the option into list mode, splitting on any of `delimiters`.
    pub fn list(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = Some(delimiters.into());
        self
    }

    /// Allowed number of list items.
    pub fn list_len(mut self, min: usize, max: Option<usize>) -> Self {
        self.list_len = Some(ListLen::new(min, max));
        self
    }

    /// Counter updated with the number of items the destination holds.
    pub fn dest_len(mut self, counter: &Dest<usize>) -> Self {
        self.dest_len = Some(counter.clone());
        self
    }

    /// Argument name shown in help, e.g. `FILE`; `[LEVEL]` marks it optional.
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.arg_name = Some(name.into());
        self
    }

    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Keeps the option out of help output.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn get_short(&self) -> Option<char> {
        self.short
    }

    pub fn get_long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn get_command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_subcommand(&self) -> bool {
        matches!(self.action, Action::Subcommand)
    }

    pub fn get_action(&self) -> &Action {
        &self.action
    }

    pub fn get_arity(&self) -> Arity {
        self.arity.unwrap_or_else(|| self.action.default_arity())
    }

    /// The conversion type actually applied: the destination's for store and
    /// append actions, otherwise the declared one (default: text).
    pub fn get_value_type(&self) -> ValueType {
        match self.action.slot() {
            Some(slot) => slot.value_type(),
            None => self.value_type.unwrap_or_default(),
        }
    }

    pub fn get_bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn get_delimiters(&self) -> Option<&str> {
        self.delimiters.as_deref()
    }

    pub fn get_list_len(&self) -> ListLen {
        self.list_len.unwrap_or_default()
    }

    pub fn get_arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    pub fn get_help(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_list(&self) -> bool {
        self.delimiters.is_some()
    }

    /// Both names for messages, e.g. `-v/--verbose`.
    pub fn display_name(&self) -> String {
        if let Some(command) = self.command.as_deref() {
            return command.to_owned();
        }
        match (self.short, self.long.as_deref()) {
            (Some(s), Some(l)) => format!("-{s}/--{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, Some(l)) => format!("--{l}"),
            (None, None) => "<unnamed>".to_owned(),
        }
    }
}
