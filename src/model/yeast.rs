use anyhow::Result;
use serde::Serialize;

use crate::model::parse_variant;
use crate::store::EntityId;
use crate::xml::value::{FieldValueBundle, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YeastType {
    Ale,
    Lager,
    Wheat,
    Wine,
    Champagne,
}

impl YeastType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Ale" => Some(YeastType::Ale),
            "Lager" => Some(YeastType::Lager),
            "Wheat" => Some(YeastType::Wheat),
            "Wine" => Some(YeastType::Wine),
            "Champagne" => Some(YeastType::Champagne),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            YeastType::Ale => "Ale",
            YeastType::Lager => "Lager",
            YeastType::Wheat => "Wheat",
            YeastType::Wine => "Wine",
            YeastType::Champagne => "Champagne",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum YeastForm {
    Liquid,
    Dry,
    Slant,
    Culture,
}

impl YeastForm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Liquid" => Some(YeastForm::Liquid),
            "Dry" => Some(YeastForm::Dry),
            "Slant" => Some(YeastForm::Slant),
            "Culture" => Some(YeastForm::Culture),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            YeastForm::Liquid => "Liquid",
            YeastForm::Dry => "Dry",
            YeastForm::Slant => "Slant",
            YeastForm::Culture => "Culture",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Yeast {
    pub id: Option<EntityId>,
    pub name: String,
    pub yeast_type: YeastType,
    pub form: YeastForm,
    /// Amount in litres (or kilograms when `amount_is_weight` is set).
    pub amount: Option<f64>,
    pub amount_is_weight: Option<bool>,
    pub times_cultured: Option<u64>,
    /// Apparent attenuation percentage.
    pub attenuation: Option<f64>,
    pub laboratory: Option<String>,
    pub product_id: Option<String>,
    pub notes: Option<String>,
}

impl Yeast {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(Yeast {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            yeast_type: parse_variant(
                bundle.required_enum("type")?,
                YeastType::from_name,
                "yeast type",
            )?,
            form: parse_variant(bundle.required_enum("form")?, YeastForm::from_name, "yeast form")?,
            amount: bundle.opt_f64("amount"),
            amount_is_weight: bundle.opt_bool("amount_is_weight"),
            times_cultured: bundle.opt_u64("times_cultured"),
            attenuation: bundle.opt_f64("attenuation"),
            laboratory: bundle.opt_str("laboratory"),
            product_id: bundle.opt_str("product_id"),
            notes: bundle.opt_str("notes"),
        })
    }

    pub fn is_duplicate_of(&self, other: &Yeast) -> bool {
        self.name == other.name
            && self.yeast_type == other.yeast_type
            && self.form == other.form
            && self.laboratory == other.laboratory
            && self.product_id == other.product_id
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "type" => Some(Value::Enum(self.yeast_type.name().to_string())),
            "form" => Some(Value::Enum(self.form.name().to_string())),
            "amount" => self.amount.map(Value::Double),
            "amount_is_weight" => self.amount_is_weight.map(Value::Bool),
            "times_cultured" => self.times_cultured.map(Value::UInt),
            "attenuation" => self.attenuation.map(Value::Double),
            "laboratory" => self.laboratory.clone().map(Value::String),
            "product_id" => self.product_id.clone().map(Value::String),
            "notes" => self.notes.clone().map(Value::String),
            _ => None,
        }
    }
}
