//! Per-state metadata.
//!
//! Every state owns a free-form key/value bag the host can use to attach
//! whatever it likes: labels, counters, flags, arbitrary objects. Typed
//! accessors never fail; a missing key or a value of another type reads as
//! the type's zero value.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A value stored in a [`DataBag`].
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Ints(Vec<i64>),
    Float(f64),
    Str(String),
    Strings(Vec<String>),
    /// Any other host value. Read back with [`DataBag::downcast`].
    Any(Arc<dyn Any + Send + Sync>),
}

impl Value {
    /// Wrap an arbitrary host value.
    pub fn any<T: Any + Send + Sync>(value: T) -> Self {
        Value::Any(Arc::new(value))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Value::Ints(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Strings(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Ints(v) => f.debug_tuple("Ints").field(v).finish(),
            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Strings(v) => f.debug_tuple("Strings").field(v).finish(),
            Value::Any(_) => f.write_str("Any(..)"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<i64>> for Value {
    fn from(value: Vec<i64>) -> Self {
        Value::Ints(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Value::Strings(value)
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::Strings(value.into_iter().map(str::to_string).collect())
    }
}

/// Free-form key/value store attached to one state.
#[derive(Clone, Debug, Default)]
pub struct DataBag {
    entries: BTreeMap<String, Value>,
}

impl DataBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// The string at `key`, or `""`.
    pub fn string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// The string list at `key`, or an empty list.
    pub fn strings(&self, key: &str) -> Vec<String> {
        self.get(key)
            .and_then(Value::as_strings)
            .map(<[String]>::to_vec)
            .unwrap_or_default()
    }

    /// The integer at `key`, or `0`.
    pub fn int(&self, key: &str) -> i64 {
        self.get(key).and_then(Value::as_int).unwrap_or_default()
    }

    /// The integer list at `key`, or an empty list.
    pub fn ints(&self, key: &str) -> Vec<i64> {
        self.get(key)
            .and_then(Value::as_ints)
            .map(<[i64]>::to_vec)
            .unwrap_or_default()
    }

    /// The flag at `key`, or `false`.
    pub fn bool(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or_default()
    }

    /// The float at `key`, or `0.0`.
    pub fn float(&self, key: &str) -> f64 {
        self.get(key).and_then(Value::as_float).unwrap_or_default()
    }

    /// The host value at `key` if it was stored as a `T`.
    pub fn downcast<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        match self.get(key)? {
            Value::Any(value) => Arc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }
}

/// Shared handle to a state's live [`DataBag`].
///
/// Every handle obtained for the same state points at the same bag, so a
/// write through one is visible through all the others. The bag has its own
/// lock, separate from the machine's, which makes handles safe to use from
/// inside entry and exit hooks.
///
/// Do not hold a `read()` or `write()` guard across `process` or
/// `set_state`: a hook that touches the same bag will then deadlock.
///
/// # Example
///
/// ```rust
/// use turnstile::StateMachine;
///
/// let machine = StateMachine::new();
/// machine.data("a").insert("foo", "bar");
///
/// assert_eq!(machine.data("a").string("foo"), "bar");
/// assert_eq!(machine.data("a").string("missing"), "");
/// ```
#[derive(Clone, Debug, Default)]
pub struct DataHandle {
    bag: Arc<RwLock<DataBag>>,
}

impl DataHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Shared access for reading several keys consistently.
    pub fn read(&self) -> RwLockReadGuard<'_, DataBag> {
        self.bag.read()
    }

    /// Exclusive access for compound updates.
    pub fn write(&self) -> RwLockWriteGuard<'_, DataBag> {
        self.bag.write()
    }

    /// Whether two handles refer to the same bag.
    pub fn ptr_eq(&self, other: &DataHandle) -> bool {
        Arc::ptr_eq(&self.bag, &other.bag)
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.bag.write().insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.bag.read().get(key).cloned()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.bag.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.bag.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bag.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bag.read().is_empty()
    }

    pub fn string(&self, key: &str) -> String {
        self.bag.read().string(key)
    }

    pub fn strings(&self, key: &str) -> Vec<String> {
        self.bag.read().strings(key)
    }

    pub fn int(&self, key: &str) -> i64 {
        self.bag.read().int(key)
    }

    pub fn ints(&self, key: &str) -> Vec<i64> {
        self.bag.read().ints(key)
    }

    pub fn bool(&self, key: &str) -> bool {
        self.bag.read().bool(key)
    }

    pub fn float(&self, key: &str) -> f64 {
        self.bag.read().float(key)
    }

    pub fn downcast<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.bag.read().downcast(key)
    }
}
