//! Typed destinations written by option actions.
//!
//! A [`Dest<T>`] is a shared handle: the program keeps one clone to read the
//! result after parsing, and the option table holds another. [`Slot`] and
//! [`Counter`] are the shapes the store/append and increment/decrement actions
//! write through.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::value::{Scalar, Value, ValueType};

/// Shared, single-threaded destination for an option's result.
pub struct Dest<T>(Rc<RefCell<T>>);

impl<T> Dest<T> {
    pub fn new(value: T) -> Self {
        Dest(Rc::new(RefCell::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn replace(&self, value: T) -> T {
        self.0.replace(value)
    }

    /// Runs `f` with a shared reference to the held value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    /// Runs `f` with a mutable reference to the held value.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl<T: Clone> Dest<T> {
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T: Default> Dest<T> {
    pub fn take(&self) -> T {
        self.0.take()
    }
}

impl<T> Clone for Dest<T> {
    fn clone(&self) -> Self {
        Dest(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Dest<T> {
    fn default() -> Self {
        Dest::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Dest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dest").field(&*self.0.borrow()).finish()
    }
}

// ── Store / append targets ────────────────────────────────────────────────────

/// A destination that converted option-arguments are written into.
pub trait Slot {
    /// The conversion type this destination accepts.
    fn value_type(&self) -> ValueType;

    /// `true` when the destination can hold several values.
    fn is_sequence(&self) -> bool;

    /// Writes `values`, replacing the held data or (`append`) extending it.
    /// Returns the number of items held afterwards.
    fn put(&self, values: Vec<Value>, append: bool) -> usize;
}

macro_rules! impl_slot {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Slot for Dest<$ty> {
                fn value_type(&self) -> ValueType {
                    <$ty as Scalar>::TYPE
                }

                fn is_sequence(&self) -> bool {
                    false
                }

                fn put(&self, values: Vec<Value>, _append: bool) -> usize {
                    if let Some(v) = values.into_iter().filter_map(<$ty>::from_value).last() {
                        self.set(v);
                    }
                    1
                }
            }

            impl Slot for Dest<Option<$ty>> {
                fn value_type(&self) -> ValueType {
                    <$ty as Scalar>::TYPE
                }

                fn is_sequence(&self) -> bool {
                    false
                }

                fn put(&self, values: Vec<Value>, _append: bool) -> usize {
                    if let Some(v) = values.into_iter().filter_map(<$ty>::from_value).last() {
                        self.set(Some(v));
                    }
                    self.with(|held| usize::from(held.is_some()))
                }
            }

            impl Slot for Dest<Vec<$ty>> {
                fn value_type(&self) -> ValueType {
                    <$ty as Scalar>::TYPE
                }

                fn is_sequence(&self) -> bool {
                    true
                }

                fn put(&self, values: Vec<Value>, append: bool) -> usize {
                    self.update(|held| {
                        if !append {
                            held.clear();
                        }
                        held.extend(values.into_iter().filter_map(<$ty>::from_value));
                        held.len()
                    })
                }
            }
        )*
    };
}

impl_slot!(String, char, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64);

// ── Counters ──────────────────────────────────────────────────────────────────

/// An integer destination for increment/decrement actions. Saturates at the
/// type's limits.
pub trait Counter {
    fn step(&self, up: bool);
}

macro_rules! impl_counter {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Counter for Dest<$ty> {
                fn step(&self, up: bool) {
                    self.update(|n| {
                        *n = if up { n.saturating_add(1) } else { n.saturating_sub(1) };
                    });
                }
            }
        )*
    };
}

impl_counter!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);
