use anyhow::Result;
use serde::Serialize;

use crate::model::parse_variant;
use crate::store::EntityId;
use crate::xml::value::{FieldValueBundle, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HopUse {
    Boil,
    DryHop,
    Mash,
    FirstWort,
    Aroma,
}

impl HopUse {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Boil" => Some(HopUse::Boil),
            "DryHop" => Some(HopUse::DryHop),
            "Mash" => Some(HopUse::Mash),
            "FirstWort" => Some(HopUse::FirstWort),
            "Aroma" => Some(HopUse::Aroma),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HopUse::Boil => "Boil",
            HopUse::DryHop => "DryHop",
            HopUse::Mash => "Mash",
            HopUse::FirstWort => "FirstWort",
            HopUse::Aroma => "Aroma",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HopForm {
    Pellet,
    Plug,
    Leaf,
}

impl HopForm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Pellet" => Some(HopForm::Pellet),
            "Plug" => Some(HopForm::Plug),
            "Leaf" => Some(HopForm::Leaf),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HopForm::Pellet => "Pellet",
            HopForm::Plug => "Plug",
            HopForm::Leaf => "Leaf",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hop {
    pub id: Option<EntityId>,
    pub name: String,
    /// Alpha acid percentage.
    pub alpha: f64,
    /// Amount in kilograms.
    pub amount: f64,
    pub use_in: HopUse,
    /// Time in minutes (meaning depends on use, e.g. boil time or dry-hop days).
    pub time: f64,
    pub beta: Option<f64>,
    pub origin: Option<String>,
    pub notes: Option<String>,
}

impl Hop {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(Hop {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            alpha: bundle.required_f64("alpha")?,
            amount: bundle.required_f64("amount")?,
            use_in: parse_variant(bundle.required_enum("use")?, HopUse::from_name, "hop use")?,
            time: bundle.required_f64("time")?,
            beta: bundle.opt_f64("beta"),
            origin: bundle.opt_str("origin"),
            notes: bundle.opt_str("notes"),
        })
    }

    pub fn is_duplicate_of(&self, other: &Hop) -> bool {
        self.name == other.name && self.alpha == other.alpha && self.use_in == other.use_in
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "alpha" => Some(Value::Double(self.alpha)),
            "amount" => Some(Value::Double(self.amount)),
            "use" => Some(Value::Enum(self.use_in.name().to_string())),
            "time" => Some(Value::Double(self.time)),
            "beta" => self.beta.map(Value::Double),
            "origin" => self.origin.clone().map(Value::String),
            "notes" => self.notes.clone().map(Value::String),
            _ => None,
        }
    }
}
