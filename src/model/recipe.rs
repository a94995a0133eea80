use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{NamedEntity, parse_variant};
use crate::store::{EntityId, ObjectStore};
use crate::xml::value::{FieldValueBundle, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecipeType {
    Extract,
    PartialMash,
    AllGrain,
}

impl RecipeType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Extract" => Some(RecipeType::Extract),
            "PartialMash" => Some(RecipeType::PartialMash),
            "AllGrain" => Some(RecipeType::AllGrain),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecipeType::Extract => "Extract",
            RecipeType::PartialMash => "PartialMash",
            RecipeType::AllGrain => "AllGrain",
        }
    }
}

/// A recipe references its contained entities by id. The ids are attached
/// after the children have been stored (or resolved as duplicates), so a
/// recipe read back from the store always points at real stored entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub id: Option<EntityId>,
    pub name: String,
    pub recipe_type: RecipeType,
    pub brewer: String,
    /// Target volume into the fermenter, litres.
    pub batch_size: f64,
    /// Pre-boil volume, litres.
    pub boil_size: f64,
    /// Boil length in minutes.
    pub boil_time: f64,
    pub fermentation_stages: Option<i64>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub style_id: Option<EntityId>,
    pub mash_id: Option<EntityId>,
    pub hop_ids: Vec<EntityId>,
    pub yeast_ids: Vec<EntityId>,
}

impl Recipe {
    pub fn from_bundle(bundle: &FieldValueBundle) -> Result<Self> {
        Ok(Recipe {
            id: None,
            name: bundle.required_str("name")?.to_string(),
            recipe_type: parse_variant(
                bundle.required_enum("type")?,
                RecipeType::from_name,
                "recipe type",
            )?,
            brewer: bundle.required_str("brewer")?.to_string(),
            batch_size: bundle.required_f64("batch_size")?,
            boil_size: bundle.required_f64("boil_size")?,
            boil_time: bundle.required_f64("boil_time")?,
            fermentation_stages: bundle.opt_i64("fermentation_stages"),
            date: bundle.opt_date("date"),
            notes: bundle.opt_str("notes"),
            style_id: None,
            mash_id: None,
            hop_ids: Vec::new(),
            yeast_ids: Vec::new(),
        })
    }

    pub fn is_duplicate_of(&self, other: &Recipe) -> bool {
        self.name == other.name
            && self.brewer == other.brewer
            && self.recipe_type == other.recipe_type
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "type" => Some(Value::Enum(self.recipe_type.name().to_string())),
            "brewer" => Some(Value::String(self.brewer.clone())),
            "batch_size" => Some(Value::Double(self.batch_size)),
            "boil_size" => Some(Value::Double(self.boil_size)),
            "boil_time" => Some(Value::Double(self.boil_time)),
            "fermentation_stages" => self.fermentation_stages.map(Value::Int),
            "date" => self.date.map(Value::Date),
            "notes" => self.notes.clone().map(Value::String),
            _ => None,
        }
    }

    /// Adds a stored child to the collection named by `property`. Ids that
    /// are already attached (e.g. on re-import of a duplicate recipe) are
    /// left alone.
    pub fn attach_child(&mut self, property: &str, child: EntityId) -> bool {
        match property {
            "style" => {
                if self.style_id.is_none() {
                    self.style_id = Some(child);
                    return true;
                }
                false
            }
            "mash" => {
                if self.mash_id.is_none() {
                    self.mash_id = Some(child);
                    return true;
                }
                false
            }
            "hops" => {
                if !self.hop_ids.contains(&child) {
                    self.hop_ids.push(child);
                    return true;
                }
                false
            }
            "yeasts" => {
                if !self.yeast_ids.contains(&child) {
                    self.yeast_ids.push(child);
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    pub fn contained(&self, property: &str, store: &dyn ObjectStore) -> Vec<NamedEntity> {
        let ids: Vec<EntityId> = match property {
            "style" => self.style_id.into_iter().collect(),
            "mash" => self.mash_id.into_iter().collect(),
            "hops" => self.hop_ids.clone(),
            "yeasts" => self.yeast_ids.clone(),
            _ => Vec::new(),
        };
        ids.into_iter().filter_map(|id| store.find_by_id(id)).collect()
    }
}
