use anyhow::Result;
use serde::Serialize;

use crate::model::{EntityKind, NamedEntity};
use crate::store::{EntityId, ObjectStore};
use crate::xml::value::{FieldValueBundle, Value};

/// A mash profile. Its steps are stored as separate `MashStep` entities that
/// point back at the mash, so the contained collection is resolved by
/// querying the store rather than held inline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mash {
    pub id: Option<EntityId>,
    pub name: String,
    /// Grain temperature before mashing in, degrees Celsius.
    pub grain_temp: f64,
    pub tun_temp: Option<f64>,
    pub notes: Option<String>,
}

impl Mash {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(Mash {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            grain_temp: bundle.required_f64("grain_temp")?,
            tun_temp: bundle.opt_f64("tun_temp"),
            notes: bundle.opt_str("notes"),
        })
    }

    pub fn is_duplicate_of(&self, other: &Mash) -> bool {
        self.name == other.name && self.grain_temp == other.grain_temp
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "grain_temp" => Some(Value::Double(self.grain_temp)),
            "tun_temp" => self.tun_temp.map(Value::Double),
            "notes" => self.notes.clone().map(Value::String),
            _ => None,
        }
    }

    pub fn contained(&self, property: &str, store: &dyn ObjectStore) -> Vec<NamedEntity> {
        if property != "mash_steps" {
            return Vec::new();
        }
        let Some(my_id) = self.id else {
            return Vec::new();
        };
        store
            .find_all(EntityKind::MashStep)
            .into_iter()
            .filter_map(|(_, entity)| match &entity {
                NamedEntity::MashStep(step) if step.mash_id == Some(my_id) => Some(entity),
                _ => None,
            })
            .collect()
    }
}
