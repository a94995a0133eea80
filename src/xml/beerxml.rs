//! The BeerXML 1.0 coding: enum string mappings, entity type metadata and
//! field tables for every record type we map, plus the coding itself.
//!
//! Tag and value spellings follow the BeerXML 1.0 standard; `property`
//! values name the corresponding fields on the domain entities.

use once_cell::sync::Lazy;

use crate::model::EntityKind;
use crate::xml::coding::XmlCoding;
use crate::xml::schema::{EntityTypeInfo, EnumStringMapping, FieldDefinition, FieldKind};
use crate::xml::schema::RecordDefinition;

const VERSION: &str = "1";

// Enum spellings: BeerXML string on the left, native variant name on the
// right.

pub static HOP_USE_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Boil", "Boil"),
    ("Dry Hop", "DryHop"),
    ("Mash", "Mash"),
    ("First Wort", "FirstWort"),
    ("Aroma", "Aroma"),
]);

pub static HOP_FORM_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Pellet", "Pellet"),
    ("Plug", "Plug"),
    ("Leaf", "Leaf"),
]);

pub static YEAST_TYPE_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Ale", "Ale"),
    ("Lager", "Lager"),
    ("Wheat", "Wheat"),
    ("Wine", "Wine"),
    ("Champagne", "Champagne"),
]);

pub static YEAST_FORM_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Liquid", "Liquid"),
    ("Dry", "Dry"),
    ("Slant", "Slant"),
    ("Culture", "Culture"),
]);

pub static STYLE_TYPE_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Lager", "Lager"),
    ("Ale", "Ale"),
    ("Mead", "Mead"),
    ("Wheat", "Wheat"),
    ("Mixed", "Mixed"),
    ("Cider", "Cider"),
]);

pub static MASH_STEP_TYPE_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Infusion", "Infusion"),
    ("Temperature", "Temperature"),
    ("Decoction", "Decoction"),
]);

pub static RECIPE_TYPE_MAPPING: EnumStringMapping = EnumStringMapping::new(&[
    ("Extract", "Extract"),
    ("Partial Mash", "PartialMash"),
    ("All Grain", "AllGrain"),
]);

// Entity type metadata.

pub static HOP_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "Hop",
    unique_names: false,
    optional: &["beta", "origin", "notes"],
};

pub static YEAST_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "Yeast",
    unique_names: false,
    optional: &[
        "amount",
        "amount_is_weight",
        "times_cultured",
        "attenuation",
        "laboratory",
        "product_id",
        "notes",
    ],
};

pub static STYLE_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "Style",
    unique_names: true,
    optional: &["category_number", "style_letter", "style_guide", "og_min", "og_max", "notes"],
};

pub static MASH_STEP_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "MashStep",
    unique_names: false,
    optional: &["infuse_amount"],
};

pub static MASH_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "Mash",
    unique_names: false,
    optional: &["tun_temp", "notes"],
};

pub static RECIPE_TYPE_INFO: EntityTypeInfo = EntityTypeInfo {
    class_name: "Recipe",
    unique_names: true,
    optional: &["fermentation_stages", "date", "notes"],
};

// Field tables. Declaration order is export order.

pub static HOP_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::new(FieldKind::Double, "ALPHA", "alpha"),
    FieldDefinition::new(FieldKind::Double, "AMOUNT", "amount"),
    FieldDefinition::enumerated("USE", "use", &HOP_USE_MAPPING),
    FieldDefinition::new(FieldKind::Double, "TIME", "time"),
    FieldDefinition::new(FieldKind::Double, "BETA", "beta"),
    FieldDefinition::new(FieldKind::String, "ORIGIN", "origin"),
    FieldDefinition::new(FieldKind::String, "NOTES", "notes"),
];

pub static YEAST_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::enumerated("TYPE", "type", &YEAST_TYPE_MAPPING),
    FieldDefinition::enumerated("FORM", "form", &YEAST_FORM_MAPPING),
    FieldDefinition::new(FieldKind::Double, "AMOUNT", "amount"),
    FieldDefinition::new(FieldKind::Bool, "AMOUNT_IS_WEIGHT", "amount_is_weight"),
    FieldDefinition::new(FieldKind::UInt, "TIMES_CULTURED", "times_cultured"),
    FieldDefinition::new(FieldKind::Double, "ATTENUATION", "attenuation"),
    FieldDefinition::new(FieldKind::String, "LABORATORY", "laboratory"),
    FieldDefinition::new(FieldKind::String, "PRODUCT_ID", "product_id"),
    FieldDefinition::new(FieldKind::String, "NOTES", "notes"),
];

pub static STYLE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::new(FieldKind::String, "CATEGORY", "category"),
    FieldDefinition::new(FieldKind::String, "CATEGORY_NUMBER", "category_number"),
    FieldDefinition::new(FieldKind::String, "STYLE_LETTER", "style_letter"),
    FieldDefinition::new(FieldKind::String, "STYLE_GUIDE", "style_guide"),
    FieldDefinition::enumerated("TYPE", "type", &STYLE_TYPE_MAPPING),
    FieldDefinition::new(FieldKind::Double, "OG_MIN", "og_min"),
    FieldDefinition::new(FieldKind::Double, "OG_MAX", "og_max"),
    FieldDefinition::new(FieldKind::String, "NOTES", "notes"),
];

pub static MASH_STEP_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::enumerated("TYPE", "type", &MASH_STEP_TYPE_MAPPING),
    FieldDefinition::new(FieldKind::Double, "INFUSE_AMOUNT", "infuse_amount"),
    FieldDefinition::new(FieldKind::Double, "STEP_TEMP", "step_temp"),
    FieldDefinition::new(FieldKind::Double, "STEP_TIME", "step_time"),
];

pub static MASH_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::new(FieldKind::Double, "GRAIN_TEMP", "grain_temp"),
    FieldDefinition::new(FieldKind::RecordComplex, "MASH_STEPS/MASH_STEP", "mash_steps"),
    FieldDefinition::new(FieldKind::Double, "TUN_TEMP", "tun_temp"),
    FieldDefinition::new(FieldKind::String, "NOTES", "notes"),
];

pub static RECIPE_FIELDS: &[FieldDefinition] = &[
    FieldDefinition::new(FieldKind::RequiredConstant, "VERSION", VERSION),
    FieldDefinition::new(FieldKind::String, "NAME", "name"),
    FieldDefinition::enumerated("TYPE", "type", &RECIPE_TYPE_MAPPING),
    FieldDefinition::new(FieldKind::RecordSimple, "STYLE", "style"),
    FieldDefinition::new(FieldKind::String, "BREWER", "brewer"),
    FieldDefinition::new(FieldKind::Double, "BATCH_SIZE", "batch_size"),
    FieldDefinition::new(FieldKind::Double, "BOIL_SIZE", "boil_size"),
    FieldDefinition::new(FieldKind::Double, "BOIL_TIME", "boil_time"),
    FieldDefinition::new(FieldKind::Int, "FERMENTATION_STAGES", "fermentation_stages"),
    FieldDefinition::new(FieldKind::Date, "DATE", "date"),
    FieldDefinition::new(FieldKind::RecordComplex, "HOPS/HOP", "hops"),
    FieldDefinition::new(FieldKind::RecordComplex, "YEASTS/YEAST", "yeasts"),
    FieldDefinition::new(FieldKind::RecordSimple, "MASH", "mash"),
    FieldDefinition::new(FieldKind::String, "NOTES", "notes"),
];

// Record definitions. Mash steps are owned by their mash, so they stay out
// of the user-facing statistics.

pub static HOP_RECORD: RecordDefinition = RecordDefinition {
    tag: "HOP",
    kind: Some(EntityKind::Hop),
    type_info: Some(&HOP_TYPE_INFO),
    fields: HOP_FIELDS,
    include_in_stats: true,
};

pub static YEAST_RECORD: RecordDefinition = RecordDefinition {
    tag: "YEAST",
    kind: Some(EntityKind::Yeast),
    type_info: Some(&YEAST_TYPE_INFO),
    fields: YEAST_FIELDS,
    include_in_stats: true,
};

pub static STYLE_RECORD: RecordDefinition = RecordDefinition {
    tag: "STYLE",
    kind: Some(EntityKind::Style),
    type_info: Some(&STYLE_TYPE_INFO),
    fields: STYLE_FIELDS,
    include_in_stats: true,
};

pub static MASH_STEP_RECORD: RecordDefinition = RecordDefinition {
    tag: "MASH_STEP",
    kind: Some(EntityKind::MashStep),
    type_info: Some(&MASH_STEP_TYPE_INFO),
    fields: MASH_STEP_FIELDS,
    include_in_stats: false,
};

pub static MASH_RECORD: RecordDefinition = RecordDefinition {
    tag: "MASH",
    kind: Some(EntityKind::Mash),
    type_info: Some(&MASH_TYPE_INFO),
    fields: MASH_FIELDS,
    include_in_stats: true,
};

pub static RECIPE_RECORD: RecordDefinition = RecordDefinition {
    tag: "RECIPE",
    kind: Some(EntityKind::Recipe),
    type_info: Some(&RECIPE_TYPE_INFO),
    fields: RECIPE_FIELDS,
    include_in_stats: true,
};

/// The BeerXML 1.0 coding.
pub static BEER_XML_1_0: Lazy<XmlCoding> = Lazy::new(|| {
    XmlCoding::new(
        "BeerXML 1.0",
        VERSION,
        &[
            &HOP_RECORD,
            &YEAST_RECORD,
            &STYLE_RECORD,
            &MASH_STEP_RECORD,
            &MASH_RECORD,
            &RECIPE_RECORD,
        ],
    )
});
