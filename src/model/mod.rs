pub mod hop;
pub mod mash;
pub mod mash_step;
pub mod recipe;
pub mod style;
pub mod yeast;

pub use hop::{Hop, HopForm, HopUse};
pub use mash::Mash;
pub use mash_step::{MashStep, MashStepType};
pub use recipe::{Recipe, RecipeType};
pub use style::{Style, StyleType};
pub use yeast::{Yeast, YeastForm, YeastType};

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::store::{EntityId, ObjectStore};
use crate::xml::value::{FieldValueBundle, Value};

/// The entity types the engine knows how to construct and store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Hop,
    Yeast,
    Style,
    MashStep,
    Mash,
    Recipe,
}

/// A domain object read from (or written to) an XML record.
///
/// Each variant carries its own id once the store has assigned one, its
/// construction logic, its duplicate-equivalence rules, and its property
/// accessors for export. Keeping these per-type specialisations behind one
/// enum lets the record-mapping algorithm stay completely generic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NamedEntity {
    Hop(Hop),
    Yeast(Yeast),
    Style(Style),
    MashStep(MashStep),
    Mash(Mash),
    Recipe(Recipe),
}

impl NamedEntity {
    /// Builds an entity of the given kind from the parsed field values.
    pub fn from_bundle(kind: EntityKind, bundle: &FieldValueBundle) -> Result<NamedEntity> {
        Ok(match kind {
            EntityKind::Hop => NamedEntity::Hop(Hop::from_bundle(bundle)?),
            EntityKind::Yeast => NamedEntity::Yeast(Yeast::from_bundle(bundle)?),
            EntityKind::Style => NamedEntity::Style(Style::from_bundle(bundle)?),
            EntityKind::MashStep => NamedEntity::MashStep(MashStep::from_bundle(bundle)?),
            EntityKind::Mash => NamedEntity::Mash(Mash::from_bundle(bundle)?),
            EntityKind::Recipe => NamedEntity::Recipe(Recipe::from_bundle(bundle)?),
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            NamedEntity::Hop(_) => EntityKind::Hop,
            NamedEntity::Yeast(_) => EntityKind::Yeast,
            NamedEntity::Style(_) => EntityKind::Style,
            NamedEntity::MashStep(_) => EntityKind::MashStep,
            NamedEntity::Mash(_) => EntityKind::Mash,
            NamedEntity::Recipe(_) => EntityKind::Recipe,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        match self {
            NamedEntity::Hop(e) => e.id,
            NamedEntity::Yeast(e) => e.id,
            NamedEntity::Style(e) => e.id,
            NamedEntity::MashStep(e) => e.id,
            NamedEntity::Mash(e) => e.id,
            NamedEntity::Recipe(e) => e.id,
        }
    }

    pub fn set_id(&mut self, id: EntityId) {
        match self {
            NamedEntity::Hop(e) => e.id = Some(id),
            NamedEntity::Yeast(e) => e.id = Some(id),
            NamedEntity::Style(e) => e.id = Some(id),
            NamedEntity::MashStep(e) => e.id = Some(id),
            NamedEntity::Mash(e) => e.id = Some(id),
            NamedEntity::Recipe(e) => e.id = Some(id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NamedEntity::Hop(e) => &e.name,
            NamedEntity::Yeast(e) => &e.name,
            NamedEntity::Style(e) => &e.name,
            NamedEntity::MashStep(e) => &e.name,
            NamedEntity::Mash(e) => &e.name,
            NamedEntity::Recipe(e) => &e.name,
        }
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            NamedEntity::Hop(e) => e.name = name,
            NamedEntity::Yeast(e) => e.name = name,
            NamedEntity::Style(e) => e.name = name,
            NamedEntity::MashStep(e) => e.name = name,
            NamedEntity::Mash(e) => e.name = name,
            NamedEntity::Recipe(e) => e.name = name,
        }
    }

    /// Whether this entity is, in all the ways that count, the same as an
    /// already-stored one. This is defining-field equivalence, not full
    /// equality: two hops with the same name, alpha acid and use are the same
    /// hop even if their notes differ.
    pub fn is_duplicate_of(&self, other: &NamedEntity) -> bool {
        match (self, other) {
            (NamedEntity::Hop(a), NamedEntity::Hop(b)) => a.is_duplicate_of(b),
            (NamedEntity::Yeast(a), NamedEntity::Yeast(b)) => a.is_duplicate_of(b),
            (NamedEntity::Style(a), NamedEntity::Style(b)) => a.is_duplicate_of(b),
            (NamedEntity::MashStep(a), NamedEntity::MashStep(b)) => a.is_duplicate_of(b),
            (NamedEntity::Mash(a), NamedEntity::Mash(b)) => a.is_duplicate_of(b),
            (NamedEntity::Recipe(a), NamedEntity::Recipe(b)) => a.is_duplicate_of(b),
            _ => false,
        }
    }

    /// Records a back-reference to the entity that owns this one. Only mash
    /// steps need to know their containing mash; for every other type this is
    /// a no-op.
    pub fn set_containing_entity(&mut self, parent: EntityId) {
        if let NamedEntity::MashStep(step) = self {
            step.mash_id = Some(parent);
        }
    }

    /// Attaches a stored child entity to the collection named by `property`.
    /// Returns true if the entity changed; attaching an id that is already
    /// present is a no-op so re-imports of existing data stay idempotent.
    pub fn attach_child(&mut self, property: &str, child: EntityId) -> bool {
        match self {
            NamedEntity::Recipe(recipe) => recipe.attach_child(property, child),
            _ => false,
        }
    }

    /// Value of a scalar/enum property for export, or None if absent.
    pub fn property(&self, name: &str) -> Option<Value> {
        match self {
            NamedEntity::Hop(e) => e.property(name),
            NamedEntity::Yeast(e) => e.property(name),
            NamedEntity::Style(e) => e.property(name),
            NamedEntity::MashStep(e) => e.property(name),
            NamedEntity::Mash(e) => e.property(name),
            NamedEntity::Recipe(e) => e.property(name),
        }
    }

    /// The entities contained in the collection named by `property`,
    /// resolved through the store, in stored order.
    pub fn contained(&self, property: &str, store: &dyn ObjectStore) -> Vec<NamedEntity> {
        match self {
            NamedEntity::Recipe(recipe) => recipe.contained(property, store),
            NamedEntity::Mash(mash) => mash.contained(property, store),
            _ => Vec::new(),
        }
    }
}

/// Shared helper for parsing a native enum variant name out of a bundle.
pub(crate) fn parse_variant<T>(
    bundle_value: &str,
    from_name: impl Fn(&str) -> Option<T>,
    what: &str,
) -> Result<T> {
    from_name(bundle_value)
        .ok_or_else(|| anyhow!("unrecognised {} variant \"{}\"", what, bundle_value))
}
