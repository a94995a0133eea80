use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;

use crate::error::RecordError;
use crate::model::NamedEntity;
use crate::store::{EntityId, ObjectStore};
use crate::xml::coding::XmlCoding;
use crate::xml::report::Messages;
use crate::xml::schema::{FieldDefinition, FieldKind, RecordDefinition};
use crate::xml::stats::ImportStats;
use crate::xml::value::{FieldValueBundle, Value};
use crate::xml::xpath;

/// At various stages of reading in an XML file we need to distinguish three
/// cases: everything went fine, something went wrong and this record cannot
/// be kept, or the record turned out to be a duplicate of one already in the
/// store (which is not an error - we skip it and carry on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingResult {
    Succeeded,
    Failed,
    FoundDuplicate,
}

/// What to do when a nested record fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedFailurePolicy {
    /// The parent record fails too (but not the rest of the document).
    AbortRecord,
    /// Log it, report it, and keep the parent without that child.
    SkipAndLog,
}

/// What to do when a RequiredConstant field (e.g. the dialect VERSION tag)
/// does not hold the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantMismatchPolicy {
    /// Report it and carry on reading best-effort.
    Warn,
    /// Fail the record.
    Fail,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    pub nested_failure: NestedFailurePolicy,
    pub constant_mismatch: ConstantMismatchPolicy,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            nested_failure: NestedFailurePolicy::AbortRecord,
            constant_mismatch: ConstantMismatchPolicy::Warn,
        }
    }
}

/// Ownership state of the domain object behind a record.
///
/// The record owns the object it constructed until the store accepts it;
/// after that it only keeps the id. A duplicate redirect drops the freshly
/// built object entirely and borrows the existing stored one, which rollback
/// must never delete.
#[derive(Debug)]
enum EntityHandle {
    Owned(NamedEntity),
    Inserted(EntityId),
    Existing(EntityId),
}

/// A nested record together with the field definition it was parsed from.
#[derive(Debug)]
struct ChildRecord<'c> {
    field: &'static FieldDefinition,
    record: XmlRecord<'c>,
}

/// One record in an XML document: knows how to parse, validate, store and
/// export exactly one tag's data, including any records nested inside it.
#[derive(Debug)]
pub struct XmlRecord<'c> {
    coding: &'c XmlCoding,
    def: &'static RecordDefinition,
    options: ImportOptions,
    bundle: FieldValueBundle,
    entity: Option<EntityHandle>,
    child_records: Vec<ChildRecord<'c>>,
}

const MAX_NAME_RETRIES: u32 = 1000;

impl<'c> XmlRecord<'c> {
    pub fn new(coding: &'c XmlCoding, def: &'static RecordDefinition, options: ImportOptions) -> Self {
        Self {
            coding,
            def,
            options,
            bundle: FieldValueBundle::new(),
            entity: None,
            child_records: Vec::new(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.def.tag
    }

    /// The record's parsed NAME, if it had one. Available once `load` has
    /// run, whether or not the entity was constructed.
    pub fn parsed_name(&self) -> Option<String> {
        self.bundle.opt_str("name")
    }

    /// The stored id this record's entity ended up with: either the id the
    /// store assigned on insert, or the id of the existing entity a
    /// duplicate was redirected to.
    pub fn entity_id(&self) -> Option<EntityId> {
        match self.entity {
            Some(EntityHandle::Inserted(id)) | Some(EntityHandle::Existing(id)) => Some(id),
            _ => None,
        }
    }

    /// Reads this record's data (including nested records) out of the given
    /// DOM node. Returns false if anything failed; messages for the user are
    /// appended either way. Nothing is committed by this step.
    pub fn load(&mut self, node: Node<'_, '_>, messages: &mut Messages) -> bool {
        debug!("Loading {} record", self.def.tag);
        let mut ok = true;

        for field in self.def.fields {
            let matches = xpath::evaluate(node, field.xpath);
            match field.kind {
                FieldKind::RecordSimple | FieldKind::RecordComplex => {
                    if field.kind == FieldKind::RecordSimple && matches.len() > 1 {
                        messages.push(
                            RecordError::SchemaViolation {
                                record: self.def.tag,
                                detail: format!(
                                    "expected at most one <{}> but found {}",
                                    field.xpath,
                                    matches.len()
                                ),
                            }
                            .to_string(),
                        );
                        ok = false;
                        continue;
                    }
                    if !self.load_child_records(field, &matches, messages) {
                        ok = false;
                    }
                }
                FieldKind::RequiredConstant => {
                    if !self.check_required_constant(field, &matches, messages) {
                        ok = false;
                    }
                }
                _ => match matches.len() {
                    // Absent is fine here; optionality is enforced against
                    // EntityTypeInfo when the entity is constructed.
                    0 => {}
                    1 => {
                        let text = xpath::text_of(matches[0]);
                        match parse_scalar(self.def.tag, field, &text) {
                            Ok(value) => {
                                if let Err(e) = self.bundle.insert(field.property, value) {
                                    messages.push(format!(
                                        "Internal schema error in {} record: {}",
                                        self.def.tag, e
                                    ));
                                    ok = false;
                                }
                            }
                            Err(e) => {
                                messages.push(e.to_string());
                                ok = false;
                            }
                        }
                    }
                    n => {
                        messages.push(
                            RecordError::SchemaViolation {
                                record: self.def.tag,
                                detail: format!("expected one <{}> but found {}", field.xpath, n),
                            }
                            .to_string(),
                        );
                        ok = false;
                    }
                },
            }
        }
        ok
    }

    fn load_child_records(
        &mut self,
        field: &'static FieldDefinition,
        nodes: &[Node<'_, '_>],
        messages: &mut Messages,
    ) -> bool {
        let coding = self.coding;
        for node in nodes {
            let tag = node.tag_name().name();
            let child_def = match coding.resolve(tag) {
                Ok(def) => def,
                Err(e) => {
                    messages.push(e.to_string());
                    match self.options.nested_failure {
                        NestedFailurePolicy::AbortRecord => return false,
                        NestedFailurePolicy::SkipAndLog => {
                            warn!("Skipping unknown <{}> inside {} record", tag, self.def.tag);
                            continue;
                        }
                    }
                }
            };
            let mut child = XmlRecord::new(coding, child_def, self.options);
            if !child.load(*node, messages) {
                match self.options.nested_failure {
                    NestedFailurePolicy::AbortRecord => return false,
                    NestedFailurePolicy::SkipAndLog => {
                        warn!("Skipping failed {} record inside {} record", tag, self.def.tag);
                        messages.push(format!(
                            "Skipped unreadable {} record inside {} record",
                            tag, self.def.tag
                        ));
                        continue;
                    }
                }
            }
            self.child_records.push(ChildRecord { field, record: child });
        }
        true
    }

    fn check_required_constant(
        &self,
        field: &'static FieldDefinition,
        matches: &[Node<'_, '_>],
        messages: &mut Messages,
    ) -> bool {
        let observed = match matches.len() {
            0 => None,
            1 => Some(xpath::text_of(matches[0])),
            n => {
                messages.push(
                    RecordError::SchemaViolation {
                        record: self.def.tag,
                        detail: format!("expected one <{}> but found {}", field.xpath, n),
                    }
                    .to_string(),
                );
                return false;
            }
        };

        if observed.as_deref() == Some(field.property) {
            return true;
        }

        let detail = match observed {
            Some(text) => format!("expected \"{}\" but found \"{}\"", field.property, text),
            None => format!("expected \"{}\" but the tag is missing", field.property),
        };
        let message = format!(
            "Format mismatch in {} record: <{}> {}",
            self.def.tag, field.xpath, detail
        );
        match self.options.constant_mismatch {
            ConstantMismatchPolicy::Warn => {
                warn!("{}", message);
                messages.push(message);
                true
            }
            ConstantMismatchPolicy::Fail => {
                messages.push(message);
                false
            }
        }
    }

    /// Final validation and storage, once the record (and everything nested
    /// inside it) has been loaded: construct the entity, check for
    /// duplicates and name clashes, store it, then store the child records
    /// with this entity as their containing entity.
    pub fn normalise_and_store_in_db(
        &mut self,
        containing_entity: Option<EntityId>,
        messages: &mut Messages,
        stats: &mut ImportStats,
        store: &mut dyn ObjectStore,
    ) -> ProcessingResult {
        // Pure container records just pass through to their children.
        if self.def.kind.is_none() {
            return self.normalise_and_store_child_records(containing_entity, messages, stats, store);
        }

        if self.entity.is_none() {
            if let Err(e) = self.construct_named_entity() {
                messages.push(format!("Could not read {} record: {:#}", self.def.tag, e));
                return ProcessingResult::Failed;
            }
        }

        // The back-reference has to be in place before duplicate detection:
        // a mash step only duplicates a stored step of the same mash.
        if let (Some(EntityHandle::Owned(entity)), Some(parent)) =
            (&mut self.entity, containing_entity)
        {
            entity.set_containing_entity(parent);
        }

        let class_name = self.def.class_name();
        let mut result = ProcessingResult::Succeeded;

        if let Some(existing) = self.find_duplicate(store) {
            debug!(
                "{} \"{}\" is a duplicate of stored id {}, skipping",
                class_name,
                self.parsed_name().unwrap_or_default(),
                existing
            );
            self.entity = Some(EntityHandle::Existing(existing));
            if self.def.include_in_stats {
                stats.duplicate(class_name);
            }
            result = ProcessingResult::FoundDuplicate;
        } else {
            if let Err(e) = self.normalise_name(store) {
                messages.push(e.to_string());
                return ProcessingResult::Failed;
            }

            let Some(EntityHandle::Owned(entity)) = self.entity.take() else {
                messages.push(format!("Internal error: no {} entity to store", self.def.tag));
                return ProcessingResult::Failed;
            };
            let name = entity.name().to_string();
            match store.insert(entity) {
                Ok(id) => {
                    self.entity = Some(EntityHandle::Inserted(id));
                    if self.def.include_in_stats {
                        stats.stored(class_name);
                    }
                }
                Err(e) => {
                    messages.push(
                        RecordError::Storage { record: self.def.tag, name, source: e }.to_string(),
                    );
                    return ProcessingResult::Failed;
                }
            }
        }

        // Children are stored against this record's entity - which is the
        // existing stored one if we just found a duplicate, so contained
        // data already in the store is not re-created.
        let own_id = self.entity_id();
        if self.normalise_and_store_child_records(own_id, messages, stats, store)
            == ProcessingResult::Failed
        {
            return ProcessingResult::Failed;
        }

        if !self.link_child_entities(store, messages) {
            return ProcessingResult::Failed;
        }

        result
    }

    /// Stores every child record in order. Any failed child fails the lot;
    /// duplicate children are fine and only soften the aggregate result.
    fn normalise_and_store_child_records(
        &mut self,
        containing_entity: Option<EntityId>,
        messages: &mut Messages,
        stats: &mut ImportStats,
        store: &mut dyn ObjectStore,
    ) -> ProcessingResult {
        let mut aggregate = ProcessingResult::Succeeded;
        for child in &mut self.child_records {
            match child
                .record
                .normalise_and_store_in_db(containing_entity, messages, stats, store)
            {
                ProcessingResult::Failed => return ProcessingResult::Failed,
                ProcessingResult::FoundDuplicate => aggregate = ProcessingResult::FoundDuplicate,
                ProcessingResult::Succeeded => {}
            }
        }
        aggregate
    }

    fn construct_named_entity(&mut self) -> Result<()> {
        let kind = self
            .def
            .kind
            .ok_or_else(|| anyhow!("container record {} has no entity type", self.def.tag))?;
        let info = self
            .def
            .type_info
            .ok_or_else(|| anyhow!("record definition for {} has no type info", self.def.tag))?;

        for field in self.def.fields {
            let is_scalar = matches!(
                field.kind,
                FieldKind::Bool
                    | FieldKind::Int
                    | FieldKind::UInt
                    | FieldKind::Double
                    | FieldKind::String
                    | FieldKind::Date
                    | FieldKind::Enum
            );
            if is_scalar
                && !self.bundle.contains(field.property)
                && !info.is_optional(field.property)
            {
                return Err(RecordError::MissingField {
                    record: self.def.tag,
                    field: field.property,
                }
                .into());
            }
        }

        let entity = NamedEntity::from_bundle(kind, &self.bundle)?;
        self.entity = Some(EntityHandle::Owned(entity));
        Ok(())
    }

    /// Looks for an already-stored entity that this record's entity is, in
    /// all the ways that count, a duplicate of.
    fn find_duplicate(&self, store: &dyn ObjectStore) -> Option<EntityId> {
        let Some(EntityHandle::Owned(candidate)) = &self.entity else {
            return None;
        };
        store
            .find_by_name(candidate.kind(), candidate.name())
            .into_iter()
            .find(|(_, existing)| candidate.is_duplicate_of(existing))
            .map(|(id, _)| id)
    }

    /// For entity types with globally-unique names, keeps amending the name
    /// with a bracketed duplicate number until it no longer clashes with a
    /// stored entity. Must run after duplicate detection.
    fn normalise_name(&mut self, store: &dyn ObjectStore) -> Result<(), RecordError> {
        let Some(info) = self.def.type_info else {
            return Ok(());
        };
        if !info.unique_names {
            return Ok(());
        }
        let Some(EntityHandle::Owned(entity)) = &mut self.entity else {
            return Ok(());
        };

        let original = entity.name().to_string();
        let mut name = original.clone();
        let mut attempts = 0;
        while !store.find_by_name(entity.kind(), &name).is_empty() {
            attempts += 1;
            if attempts > MAX_NAME_RETRIES {
                return Err(RecordError::NameClash { name: original, attempts: MAX_NAME_RETRIES });
            }
            modify_clashing_name(&mut name);
        }
        if name != original {
            debug!("Renaming clashing {} \"{}\" to \"{}\"", info.class_name, original, name);
            entity.set_name(name);
        }
        Ok(())
    }

    /// After the children have been stored, tells the parent entity about
    /// them (e.g. a recipe collecting its hop ids). Idempotent, so a
    /// duplicate parent that already references its children is untouched.
    fn link_child_entities(&self, store: &mut dyn ObjectStore, messages: &mut Messages) -> bool {
        let Some(parent_id) = self.entity_id() else {
            return true;
        };
        if self.child_records.is_empty() {
            return true;
        }
        let Some(mut parent) = store.find_by_id(parent_id) else {
            messages.push(format!(
                "Internal error: stored {} record (id {}) has gone missing",
                self.def.tag, parent_id
            ));
            return false;
        };

        let mut changed = false;
        for child in &self.child_records {
            if let Some(child_id) = child.record.entity_id() {
                if parent.attach_child(child.field.property, child_id) {
                    changed = true;
                }
            }
        }
        if changed {
            if let Err(e) = store.update(parent_id, parent) {
                messages.push(format!(
                    "Could not link child records to {} record (id {}): {}",
                    self.def.tag, parent_id, e
                ));
                return false;
            }
        }
        true
    }

    /// Best-effort compensating rollback: deletes everything this record
    /// (and its children) inserted into the store. Entities that were
    /// already in the store before this import are never touched.
    pub fn delete_from_db(&mut self, store: &mut dyn ObjectStore, messages: &mut Messages) {
        for child in &mut self.child_records {
            child.record.delete_from_db(store, messages);
        }
        if let Some(EntityHandle::Inserted(id)) = self.entity {
            if let Err(e) = store.delete(id) {
                warn!("Rollback of {} record id {} failed: {}", self.def.tag, id, e);
                messages.push(format!(
                    "Could not roll back {} record (id {}): {}",
                    self.def.tag, id, e
                ));
            }
            self.entity = None;
        }
    }

    /// Exports an entity to XML in this record's schema. Fields are written
    /// in declaration order; absent optional fields are omitted; nested
    /// records recurse through the store.
    pub fn to_xml(
        &self,
        entity: &NamedEntity,
        store: &dyn ObjectStore,
        out: &mut String,
        indent_level: usize,
        indent_string: &str,
    ) -> Result<()> {
        let pad = indent_string.repeat(indent_level);
        out.push_str(&format!("{}<{}>\n", pad, self.def.tag));
        for field in self.def.fields {
            match field.kind {
                FieldKind::RecordSimple | FieldKind::RecordComplex => {
                    self.sub_record_to_xml(field, entity, store, out, indent_level + 1, indent_string)?;
                }
                FieldKind::RequiredConstant => {
                    out.push_str(&format!(
                        "{}{}<{}>{}</{}>\n",
                        pad, indent_string, field.xpath, field.property, field.xpath
                    ));
                }
                _ => {
                    if let Some(value) = entity.property(field.property) {
                        let text = field_text(field, &value)?;
                        out.push_str(&format!(
                            "{}{}<{}>{}</{}>\n",
                            pad, indent_string, field.xpath, text, field.xpath
                        ));
                    }
                }
            }
        }
        out.push_str(&format!("{}</{}>\n", pad, self.def.tag));
        Ok(())
    }

    fn sub_record_to_xml(
        &self,
        field: &'static FieldDefinition,
        entity: &NamedEntity,
        store: &dyn ObjectStore,
        out: &mut String,
        indent_level: usize,
        indent_string: &str,
    ) -> Result<()> {
        let segments: Vec<&str> = field.xpath.split('/').collect();
        let child_tag = segments[segments.len() - 1];
        let child_def = self.coding.resolve(child_tag)?;

        let children = entity.contained(field.property, store);
        if children.is_empty() {
            // Make it explicit that the omission was not an accident.
            out.push_str(&format!(
                "{}<!-- No {} records in this {} -->\n",
                indent_string.repeat(indent_level),
                child_tag,
                self.def.tag
            ));
            return Ok(());
        }

        let mut level = indent_level;
        for wrapper in &segments[..segments.len() - 1] {
            out.push_str(&format!("{}<{}>\n", indent_string.repeat(level), wrapper));
            level += 1;
        }
        let sub_record = XmlRecord::new(self.coding, child_def, self.options);
        for child in &children {
            sub_record.to_xml(child, store, out, level, indent_string)?;
        }
        for wrapper in segments[..segments.len() - 1].iter().rev() {
            level -= 1;
            out.push_str(&format!("{}</{}>\n", indent_string.repeat(level), wrapper));
        }
        Ok(())
    }
}

/// Parses one scalar field value per its declared kind.
fn parse_scalar(
    record: &'static str,
    field: &'static FieldDefinition,
    text: &str,
) -> Result<Value, RecordError> {
    let parse_err = |detail: String| RecordError::Parse {
        record,
        field: field.xpath,
        text: text.to_string(),
        detail,
    };
    match field.kind {
        FieldKind::Bool => {
            if text.eq_ignore_ascii_case("TRUE") {
                Ok(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("FALSE") {
                Ok(Value::Bool(false))
            } else {
                Err(parse_err("not a boolean".to_string()))
            }
        }
        FieldKind::Int => text
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| parse_err(e.to_string())),
        FieldKind::UInt => text
            .parse::<u64>()
            .map(Value::UInt)
            .map_err(|e| parse_err(e.to_string())),
        FieldKind::Double => text
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|e| parse_err(e.to_string())),
        FieldKind::String => Ok(Value::String(text.to_string())),
        FieldKind::Date => parse_date(text)
            .map(Value::Date)
            .ok_or_else(|| parse_err("not a recognised date".to_string())),
        FieldKind::Enum => {
            let mapping = field.enum_mapping.ok_or_else(|| RecordError::SchemaViolation {
                record,
                detail: format!("field <{}> has no enum mapping", field.xpath),
            })?;
            mapping
                .native_for(text)
                .map(|native| Value::Enum(native.to_string()))
                .ok_or_else(|| parse_err("not a recognised value for this field".to_string()))
        }
        _ => Err(RecordError::SchemaViolation {
            record,
            detail: format!("field <{}> is not a scalar", field.xpath),
        }),
    }
}

/// BeerXML in the wild spells dates a few different ways.
fn parse_date(text: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

/// Renders a native value back into the dialect's XML spelling.
fn field_text(field: &'static FieldDefinition, value: &Value) -> Result<String> {
    Ok(match value {
        Value::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Double(v) => v.to_string(),
        Value::String(s) => quick_xml::escape::escape(s.as_str()).into_owned(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::Enum(native) => {
            let mapping = field
                .enum_mapping
                .ok_or_else(|| anyhow!("field <{}> has no enum mapping", field.xpath))?;
            mapping
                .xml_for(native)
                .ok_or_else(|| {
                    anyhow!("no XML spelling for {} value \"{}\"", field.property, native)
                })?
                .to_string()
        }
    })
}

static CLASH_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*) \((\d+)\)$").expect("clash suffix regex is valid"));

/// Given a name that clashes with an existing one, amends it to the next
/// candidate: "Oatmeal Stout" becomes "Oatmeal Stout (1)", and a name that
/// already carries a duplicate number has it bumped, so "Oatmeal Stout (1)"
/// becomes "Oatmeal Stout (2)" rather than "Oatmeal Stout (1) (1)".
pub fn modify_clashing_name(candidate_name: &mut String) {
    if let Some(caps) = CLASH_SUFFIX.captures(candidate_name) {
        if let Ok(n) = caps[2].parse::<u32>() {
            *candidate_name = format!("{} ({})", &caps[1], n + 1);
            return;
        }
    }
    candidate_name.push_str(" (1)");
}
