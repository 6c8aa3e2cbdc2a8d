//! Property values carried by nodes and edges.

use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Property map for storing node and edge properties.
pub type PropertyMap = HashMap<String, PropertyValue>;

/// User-defined property payload the engine treats as opaque.
///
/// The engine only ever needs two things from a value: equality against
/// another value of the caller's choosing, and a total stringification
/// used as the index key. `eq_property` may panic on incomparable types;
/// the query planner catches such panics and treats them as "not equal".
pub trait OpaqueProperty: fmt::Debug + Send + Sync {
    /// Total stringification used as the index key for this value.
    fn index_key(&self) -> String;

    /// Equality against another opaque value.
    fn eq_property(&self, other: &dyn OpaqueProperty) -> bool;

    /// Downcasting hook for `eq_property` implementations.
    fn as_any(&self) -> &dyn Any;
}

/// A property value: one of the comparable scalars, null, or an opaque
/// user payload.
///
/// Values are compared per variant; `Opaque` delegates to
/// [`OpaqueProperty::eq_property`]. Index buckets are keyed on
/// [`PropertyValue::index_key`], so two values that stringify identically
/// share a bucket.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
    Opaque(Arc<dyn OpaqueProperty>),
}

impl PropertyValue {
    /// Wraps a user payload.
    pub fn opaque(value: impl OpaqueProperty + 'static) -> Self {
        PropertyValue::Opaque(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::Bool(_) => "Bool",
            PropertyValue::Null => "Null",
            PropertyValue::Opaque(_) => "Opaque",
        }
    }

    /// The string this value is indexed under. Total over all variants.
    pub fn index_key(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::Integer(i) => i.to_string(),
            PropertyValue::Float(f) => f.to_string(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Null => "null".to_string(),
            PropertyValue::Opaque(o) => o.index_key(),
        }
    }
}

impl PartialEq for PropertyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::String(a), PropertyValue::String(b)) => a == b,
            (PropertyValue::Integer(a), PropertyValue::Integer(b)) => a == b,
            (PropertyValue::Float(a), PropertyValue::Float(b)) => a == b,
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Null, PropertyValue::Null) => true,
            (PropertyValue::Opaque(a), PropertyValue::Opaque(b)) => a.eq_property(b.as_ref()),
            _ => false,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Opaque(o) => write!(f, "{}", o.index_key()),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::String(s) => serializer.serialize_str(s),
            PropertyValue::Integer(i) => serializer.serialize_i64(*i),
            PropertyValue::Float(f) => serializer.serialize_f64(*f),
            PropertyValue::Bool(b) => serializer.serialize_bool(*b),
            PropertyValue::Null => serializer.serialize_unit(),
            // Opaque payloads serialize as their index key; they never
            // deserialize back into the opaque variant.
            PropertyValue::Opaque(o) => serializer.serialize_str(&o.index_key()),
        }
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = PropertyValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scalar property value or null")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<PropertyValue, E> {
                Ok(PropertyValue::String(v.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, v: String) -> Result<PropertyValue, E> {
                Ok(PropertyValue::String(v))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Integer(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Integer(v as i64))
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Float(v))
            }

            fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Bool(v))
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Null)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<PropertyValue, E> {
                Ok(PropertyValue::Null)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
