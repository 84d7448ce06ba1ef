//! Attribute values as seen by the validator.
//!
//! Most attributes are plain JSON data. Values of Rust types that carry their
//! own identity (dates, domain newtypes) are wrapped in an [`Instance`] so a
//! schema can demand that exact type, and callables are wrapped in a
//! [`Callable`] so the `function` primitive category has something to match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// Primitive value categories a field can be declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    String,
    Number,
    Boolean,
    /// JSON arrays and objects, and any nominal-type instance
    Object,
    Function,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Function => "function",
        }
    }

    /// Look up a primitive category by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "function" => Some(Self::Function),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type AnyValue = dyn Any + Send + Sync;

/// A value of a concrete Rust type, remembered by its [`TypeId`].
#[derive(Clone)]
pub struct Instance {
    type_id: TypeId,
    type_name: &'static str,
    value: Arc<AnyValue>,
    eq: fn(&AnyValue, &AnyValue) -> bool,
    display: fn(&AnyValue, &mut fmt::Formatter<'_>) -> fmt::Result,
}

impl Instance {
    pub fn new<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Display + Send + Sync,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: short_type_name::<T>(),
            value: Arc::new(value),
            eq: eq_as::<T>,
            display: display_as::<T>,
        }
    }

    /// Identity of the type this value was constructed as.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Unqualified name of the constructing type, e.g. `DateTime`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

fn eq_as<T: Any + PartialEq>(a: &AnyValue, b: &AnyValue) -> bool {
    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn display_as<T: Any + fmt::Display>(value: &AnyValue, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Display::fmt(value, f),
        None => Ok(()),
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && (self.eq)(self.value.as_ref(), other.value.as_ref())
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.display)(self.value.as_ref(), f)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type", &self.type_name)
            .field("value", &format_args!("{}", self))
            .finish()
    }
}

/// A named callable stored as an attribute.
#[derive(Clone)]
pub struct Callable {
    name: String,
    func: Arc<dyn Fn(&AttributeValue) -> AttributeValue + Send + Sync>,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&AttributeValue) -> AttributeValue + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, argument: &AttributeValue) -> AttributeValue {
        (self.func)(argument)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function {}", self.name)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

/// Current value of one attribute.
///
/// `Json(Value::Null)` is the "absent" value: a null attribute is treated
/// exactly like a missing one.
#[derive(Debug, Clone)]
pub enum AttributeValue {
    Json(Value),
    Instance(Instance),
    Function(Callable),
}

impl AttributeValue {
    /// Wrap a value of a nominal Rust type.
    pub fn instance<T>(value: T) -> Self
    where
        T: Any + PartialEq + fmt::Display + Send + Sync,
    {
        Self::Instance(Instance::new(value))
    }

    /// Whether this value counts as "no value" (null).
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    /// The primitive category of this value; `None` for null.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Self::Json(Value::Null) => None,
            Self::Json(Value::Bool(_)) => Some(PrimitiveType::Boolean),
            Self::Json(Value::Number(_)) => Some(PrimitiveType::Number),
            Self::Json(Value::String(_)) => Some(PrimitiveType::String),
            Self::Json(Value::Array(_) | Value::Object(_)) => Some(PrimitiveType::Object),
            Self::Instance(_) => Some(PrimitiveType::Object),
            Self::Function(_) => Some(PrimitiveType::Function),
        }
    }

    /// Identity of the constructing type for nominal instances.
    pub fn instance_type_id(&self) -> Option<TypeId> {
        match self {
            Self::Instance(instance) => Some(instance.type_id()),
            _ => None,
        }
    }

    /// Whether this value was constructed as the type identified by `type_id`.
    ///
    /// Instances answer with their own type. Plain JSON values count as built
    /// by the Rust type they map onto: strings by `String`, booleans by
    /// `bool`, arrays by `Vec<Value>`, objects by `Map<String, Value>`. Any
    /// number is an `f64`; `i64` and `u64` only claim numbers they can hold.
    pub fn is_constructed_as(&self, type_id: TypeId) -> bool {
        match self {
            Self::Instance(instance) => instance.type_id() == type_id,
            Self::Json(Value::String(_)) => type_id == TypeId::of::<String>(),
            Self::Json(Value::Bool(_)) => type_id == TypeId::of::<bool>(),
            Self::Json(Value::Number(n)) => {
                type_id == TypeId::of::<f64>()
                    || type_id == TypeId::of::<Number>()
                    || (type_id == TypeId::of::<i64>() && n.is_i64())
                    || (type_id == TypeId::of::<u64>() && n.is_u64())
            }
            Self::Json(Value::Array(_)) => type_id == TypeId::of::<Vec<Value>>(),
            Self::Json(Value::Object(_)) => type_id == TypeId::of::<Map<String, Value>>(),
            Self::Json(Value::Null) | Self::Function(_) => false,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_json().and_then(Value::as_str)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_json().and_then(Value::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_json().and_then(Value::as_bool)
    }

    /// Borrow the inner value of a nominal instance as `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Instance(instance) => instance.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // 1 and 1.0 are the same number
            (Self::Json(Value::Number(a)), Self::Json(Value::Number(b))) => {
                if a.is_f64() || b.is_f64() {
                    a.as_f64() == b.as_f64()
                } else {
                    a == b
                }
            }
            (Self::Json(a), Self::Json(b)) => a == b,
            (Self::Instance(a), Self::Instance(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(Value::String(s)) => f.write_str(s),
            Self::Json(Value::Null) => Ok(()),
            // Whole floats render without a trailing `.0`
            Self::Json(Value::Number(n)) if n.is_f64() => match n.as_f64() {
                Some(float) => write!(f, "{}", float),
                None => write!(f, "{}", n),
            },
            Self::Json(value) => write!(f, "{}", value),
            Self::Instance(instance) => fmt::Display::fmt(instance, f),
            Self::Function(callable) => fmt::Display::fmt(callable, f),
        }
    }
}

impl Default for AttributeValue {
    fn default() -> Self {
        Self::Json(Value::Null)
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<Instance> for AttributeValue {
    fn from(value: Instance) -> Self {
        Self::Instance(value)
    }
}

impl From<Callable> for AttributeValue {
    fn from(value: Callable) -> Self {
        Self::Function(value)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::instance(value)
    }
}

/// Last path segment of a type name without generic arguments.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Get the type name of a JSON value for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
