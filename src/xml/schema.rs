use crate::model::EntityKind;

/// The kinds of fields the record mapper knows how to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    UInt,
    Double,
    String,
    Date,
    /// A string mapped to/from a native enum via an `EnumStringMapping`.
    Enum,
    /// A fixed value we have to write out and validate on read (used for the
    /// BeerXML VERSION tag).
    RequiredConstant,
    /// A single contained record, e.g. the STYLE inside a RECIPE.
    RecordSimple,
    /// Zero, one or more contained records, e.g. HOPS/HOP inside a RECIPE.
    RecordComplex,
}

/// Bidirectional mapping between the dialect's XML strings and native enum
/// variant names.
#[derive(Debug)]
pub struct EnumStringMapping {
    pairs: &'static [(&'static str, &'static str)],
}

impl EnumStringMapping {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self { pairs }
    }

    /// Native variant name for an XML string, e.g. "Dry Hop" -> "DryHop".
    pub fn native_for(&self, xml: &str) -> Option<&'static str> {
        self.pairs.iter().find(|(x, _)| *x == xml).map(|(_, n)| *n)
    }

    /// XML string for a native variant name, e.g. "DryHop" -> "Dry Hop".
    pub fn xml_for(&self, native: &str) -> Option<&'static str> {
        self.pairs.iter().find(|(_, n)| *n == native).map(|(x, _)| *x)
    }
}

/// How to parse one field of a record.
///
/// For `RequiredConstant` fields, `property` holds the literal value rather
/// than a property name. For `RecordSimple`/`RecordComplex` fields it names
/// the contained collection and is only used on export.
#[derive(Debug)]
pub struct FieldDefinition {
    pub kind: FieldKind,
    pub xpath: &'static str,
    pub property: &'static str,
    pub enum_mapping: Option<&'static EnumStringMapping>,
}

impl FieldDefinition {
    pub const fn new(kind: FieldKind, xpath: &'static str, property: &'static str) -> Self {
        Self { kind, xpath, property, enum_mapping: None }
    }

    pub const fn enumerated(
        xpath: &'static str,
        property: &'static str,
        enum_mapping: &'static EnumStringMapping,
    ) -> Self {
        Self { kind: FieldKind::Enum, xpath, property, enum_mapping: Some(enum_mapping) }
    }
}

/// Per-entity-type metadata: display name, whether names must be globally
/// unique, and which properties may legitimately be absent from a document.
#[derive(Debug)]
pub struct EntityTypeInfo {
    pub class_name: &'static str,
    pub unique_names: bool,
    pub optional: &'static [&'static str],
}

impl EntityTypeInfo {
    pub fn is_optional(&self, property: &str) -> bool {
        self.optional.contains(&property)
    }
}

/// Everything the engine needs to map one XML tag: the tag name, the entity
/// kind it produces (None for pure container records), its type metadata,
/// its field table, and whether it participates in the import statistics.
///
/// Records that are entirely owned by another record (e.g. mash steps inside
/// a mash) set `include_in_stats` to false so users are told about the mash,
/// not its steps.
#[derive(Debug)]
pub struct RecordDefinition {
    pub tag: &'static str,
    pub kind: Option<EntityKind>,
    pub type_info: Option<&'static EntityTypeInfo>,
    pub fields: &'static [FieldDefinition],
    pub include_in_stats: bool,
}

impl RecordDefinition {
    /// Display name used in messages and statistics, e.g. "Hop".
    pub fn class_name(&self) -> &'static str {
        self.type_info.map(|info| info.class_name).unwrap_or(self.tag)
    }
}
