use anyhow::Result;
use serde::Serialize;

use crate::model::parse_variant;
use crate::store::EntityId;
use crate::xml::value::{FieldValueBundle, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StyleType {
    Lager,
    Ale,
    Mead,
    Wheat,
    Mixed,
    Cider,
}

impl StyleType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Lager" => Some(StyleType::Lager),
            "Ale" => Some(StyleType::Ale),
            "Mead" => Some(StyleType::Mead),
            "Wheat" => Some(StyleType::Wheat),
            "Mixed" => Some(StyleType::Mixed),
            "Cider" => Some(StyleType::Cider),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StyleType::Lager => "Lager",
            StyleType::Ale => "Ale",
            StyleType::Mead => "Mead",
            StyleType::Wheat => "Wheat",
            StyleType::Mixed => "Mixed",
            StyleType::Cider => "Cider",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub id: Option<EntityId>,
    pub name: String,
    pub category: String,
    pub category_number: Option<String>,
    pub style_letter: Option<String>,
    pub style_guide: Option<String>,
    pub style_type: StyleType,
    pub og_min: Option<f64>,
    pub og_max: Option<f64>,
    pub notes: Option<String>,
}

impl Style {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(Style {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            category: bundle.required_str("category")?.to_string(),
            category_number: bundle.opt_str("category_number"),
            style_letter: bundle.opt_str("style_letter"),
            style_guide: bundle.opt_str("style_guide"),
            style_type: parse_variant(
                bundle.required_enum("type")?,
                StyleType::from_name,
                "style type",
            )?,
            og_min: bundle.opt_f64("og_min"),
            og_max: bundle.opt_f64("og_max"),
            notes: bundle.opt_str("notes"),
        })
    }

    pub fn is_duplicate_of(&self, other: &Style) -> bool {
        self.name == other.name
            && self.category == other.category
            && self.style_type == other.style_type
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "category" => Some(Value::String(self.category.clone())),
            "category_number" => self.category_number.clone().map(Value::String),
            "style_letter" => self.style_letter.clone().map(Value::String),
            "style_guide" => self.style_guide.clone().map(Value::String),
            "type" => Some(Value::Enum(self.style_type.name().to_string())),
            "og_min" => self.og_min.map(Value::Double),
            "og_max" => self.og_max.map(Value::Double),
            "notes" => self.notes.clone().map(Value::String),
            _ => None,
        }
    }
}
