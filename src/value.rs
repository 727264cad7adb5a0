//! Values that can be substituted into a template
//!
//! Resolvers hand out borrowed [`Value`]s and turn them into text with
//! [`to_text`]. The conversion is the single place where dates, lists and
//! objects get their canonical string form.

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::resolver::Navigable;

/// Format used for date-time values: `yyyy-MM-dd HH:mm:ss.SSS`
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A value that a placeholder can resolve to
#[derive(Debug, Clone)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Cow<'a, str>),
    DateTime(NaiveDateTime),
    Path(Cow<'a, Path>),
    List(Vec<Value<'a>>),
    /// A navigable object, reachable through dotted placeholder paths
    Object(&'a dyn Navigable),
}

/// Separator placed between list items when a list becomes text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `","`, the form lists take when stored in a configuration
    Comma,
    /// `", "`, the form lists take when substituted into a template
    CommaSpace,
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Comma => ",",
            Separator::CommaSpace => ", ",
        }
    }
}

/// Convert a value into its canonical string form
pub fn to_text(value: &Value<'_>, separator: Separator) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Text(s) => s.to_string(),
        Value::DateTime(dt) => dt.format(DATE_TIME_FORMAT).to_string(),
        Value::Path(p) => p.display().to_string(),
        Value::List(items) => items
            .iter()
            .map(|item| to_text(item, separator))
            .collect::<Vec<_>>()
            .join(separator.as_str()),
        Value::Object(object) => format!("{:?}", object),
    }
}

impl Value<'_> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_text(self, Separator::CommaSpace))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value<'_> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value<'_> {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<NaiveDateTime> for Value<'_> {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<'a> From<&'a Path> for Value<'a> {
    fn from(p: &'a Path) -> Self {
        Value::Path(Cow::Borrowed(p))
    }
}

impl From<PathBuf> for Value<'_> {
    fn from(p: PathBuf) -> Self {
        Value::Path(Cow::Owned(p))
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(items: Vec<Value<'a>>) -> Self {
        Value::List(items)
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Borrow a Rust value as a [`Value`]
///
/// Implemented for the common scalar types, strings, dates, paths, options
/// and sequences. Structs become navigable objects through the
/// [`navigable!`](crate::navigable) macro.
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

macro_rules! int_values {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(i: $t) -> Self {
                    match i64::try_from(i) {
                        Ok(i) => Value::Int(i),
                        Err(_) => Value::Text(Cow::Owned(i.to_string())),
                    }
                }
            }

            impl ToValue for $t {
                fn to_value(&self) -> Value<'_> {
                    Value::from(*self)
                }
            }
        )*
    };
}

int_values!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Text(Cow::Borrowed(self.as_str()))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value<'_> {
        Value::Float(*self as f64)
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value<'_> {
        Value::DateTime(*self)
    }
}

impl ToValue for Path {
    fn to_value(&self) -> Value<'_> {
        Value::Path(Cow::Borrowed(self))
    }
}

impl ToValue for PathBuf {
    fn to_value(&self) -> Value<'_> {
        Value::Path(Cow::Borrowed(self.as_path()))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl ToValue for Value<'_> {
    fn to_value(&self) -> Value<'_> {
        self.clone()
    }
}
