use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::error::RecordError;
use crate::model::EntityKind;
use crate::xml::beerxml;
use crate::xml::schema::RecordDefinition;

/// One XML coding (dialect/version): the set of tags we know how to map and
/// the record definition responsible for each.
///
/// Codings are immutable once built. Several can coexist (e.g. two versions
/// of the same format) without cross-contamination because every lookup goes
/// through one coding's own tag table.
#[derive(Debug)]
pub struct XmlCoding {
    name: &'static str,
    version: &'static str,
    records: HashMap<&'static str, &'static RecordDefinition>,
}

impl XmlCoding {
    pub fn new(
        name: &'static str,
        version: &'static str,
        definitions: &[&'static RecordDefinition],
    ) -> Self {
        let mut records = HashMap::new();
        for def in definitions {
            records.insert(def.tag, *def);
        }
        Self { name, version, records }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    /// Looks up the record definition responsible for a tag in this coding.
    pub fn resolve(&self, tag: &str) -> Result<&'static RecordDefinition, RecordError> {
        self.records.get(tag).copied().ok_or_else(|| RecordError::UnknownTag {
            coding: self.name.to_string(),
            tag: tag.to_string(),
        })
    }

    /// The record definition that maps entities of the given kind, used on
    /// export where we start from a stored entity rather than a tag.
    pub fn record_for_kind(&self, kind: EntityKind) -> Option<&'static RecordDefinition> {
        self.records.values().copied().find(|def| def.kind == Some(kind))
    }
}

/// Process-wide registry of the codings we ship, initialised once.
static CODINGS: Lazy<HashMap<&'static str, &'static XmlCoding>> = Lazy::new(|| {
    let mut registry: HashMap<&'static str, &'static XmlCoding> = HashMap::new();
    registry.insert(beerxml::BEER_XML_1_0.name(), &*beerxml::BEER_XML_1_0);
    registry
});

/// Looks up a shipped coding by name, e.g. "BeerXML 1.0".
pub fn coding_named(name: &str) -> Option<&'static XmlCoding> {
    CODINGS.get(name).copied()
}
