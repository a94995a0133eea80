use anyhow::Result;
use serde::Serialize;

use crate::model::parse_variant;
use crate::store::EntityId;
use crate::xml::value::{FieldValueBundle, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MashStepType {
    Infusion,
    Temperature,
    Decoction,
}

impl MashStepType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Infusion" => Some(MashStepType::Infusion),
            "Temperature" => Some(MashStepType::Temperature),
            "Decoction" => Some(MashStepType::Decoction),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MashStepType::Infusion => "Infusion",
            MashStepType::Temperature => "Temperature",
            MashStepType::Decoction => "Decoction",
        }
    }
}

/// One step of a mash profile. Always owned by a containing `Mash`, which is
/// recorded as a back-reference when the step is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MashStep {
    pub id: Option<EntityId>,
    pub name: String,
    pub step_type: MashStepType,
    /// Infusion water volume in litres, only meaningful for infusion steps.
    pub infuse_amount: Option<f64>,
    /// Target temperature in degrees Celsius.
    pub step_temp: f64,
    /// Step duration in minutes.
    pub step_time: f64,
    pub mash_id: Option<EntityId>,
}

impl MashStep {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(MashStep {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            step_type: parse_variant(
                bundle.required_enum("type")?,
                MashStepType::from_name,
                "mash step type",
            )?,
            infuse_amount: bundle.opt_f64("infuse_amount"),
            step_temp: bundle.required_f64("step_temp")?,
            step_time: bundle.required_f64("step_time")?,
            mash_id: None,
        })
    }

    pub fn is_duplicate_of(&self, other: &MashStep) -> bool {
        self.name == other.name
            && self.step_type == other.step_type
            && self.step_temp == other.step_temp
            && self.step_time == other.step_time
            && self.mash_id == other.mash_id
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "type" => Some(Value::Enum(self.step_type.name().to_string())),
            "infuse_amount" => self.infuse_amount.map(Value::Double),
            "step_temp" => Some(Value::Double(self.step_temp)),
            "step_time" => Some(Value::Double(self.step_time)),
            _ => None,
        }
    }
}
