use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::NaiveDate;

/// A parsed native value for one field of an XML record.
///
/// `Enum` holds the native variant name (the right-hand side of the field's
/// `EnumStringMapping`), not the dialect's XML string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Double(f64),
    String(String),
    Date(NaiveDate),
    Enum(String),
}

/// Transient name-to-value storage bridging XML text and domain-object
/// construction.
///
/// One bundle is produced per record `load` and consumed when the record's
/// entity is constructed. Keys are field property names and are unique.
#[derive(Debug, Default, Clone)]
pub struct FieldValueBundle {
    values: HashMap<&'static str, Value>,
}

impl FieldValueBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Inserts a parsed value. Duplicate keys are a schema-table bug, so the
    /// first value wins and the collision is reported to the caller.
    pub fn insert(&mut self, property: &'static str, value: Value) -> Result<()> {
        if self.values.contains_key(property) {
            return Err(anyhow!("duplicate property \"{}\" in field value bundle", property));
        }
        self.values.insert(property, value);
        Ok(())
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.values.get(property)
    }

    pub fn required_str(&self, property: &str) -> Result<&str> {
        match self.values.get(property) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(anyhow!("property \"{}\" is not a string: {:?}", property, other)),
            None => Err(anyhow!("missing required property \"{}\"", property)),
        }
    }

    pub fn opt_str(&self, property: &str) -> Option<String> {
        match self.values.get(property) {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Fetches the native variant name recorded for an enumerated field.
    pub fn required_enum(&self, property: &str) -> Result<&str> {
        match self.values.get(property) {
            Some(Value::Enum(s)) => Ok(s),
            Some(other) => Err(anyhow!("property \"{}\" is not an enum: {:?}", property, other)),
            None => Err(anyhow!("missing required property \"{}\"", property)),
        }
    }

    /// Fetches a required floating-point value. Integer values coerce, since
    /// "60" is a legitimate spelling of a BeerXML decimal.
    pub fn required_f64(&self, property: &str) -> Result<f64> {
        self.opt_f64(property)
            .ok_or_else(|| anyhow!("missing required property \"{}\"", property))
    }

    pub fn opt_f64(&self, property: &str) -> Option<f64> {
        match self.values.get(property) {
            Some(Value::Double(v)) => Some(*v),
            Some(Value::Int(v)) => Some(*v as f64),
            Some(Value::UInt(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn opt_i64(&self, property: &str) -> Option<i64> {
        match self.values.get(property) {
            Some(Value::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn opt_u64(&self, property: &str) -> Option<u64> {
        match self.values.get(property) {
            Some(Value::UInt(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn opt_bool(&self, property: &str) -> Option<bool> {
        match self.values.get(property) {
            Some(Value::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn opt_date(&self, property: &str) -> Option<NaiveDate> {
        match self.values.get(property) {
            Some(Value::Date(v)) => Some(*v),
            _ => None,
        }
    }
}
