use anyhow::{Context, Result, anyhow};
use log::{debug, info};

use crate::store::{EntityId, ObjectStore};
use crate::xml::coding::XmlCoding;
use crate::xml::record::{ImportOptions, ProcessingResult, XmlRecord};
use crate::xml::report::{ImportReport, Messages, TopLevelResult};
use crate::xml::stats::ImportStats;

/// Reads a whole XML document into the store.
///
/// The document is expected to be one root container tag wrapping zero or
/// more top-level entity tags. Top-level records are processed in isolation:
/// a record that fails has its own inserts rolled back and is counted as
/// skipped, and processing carries on with the next record. Only a document
/// that cannot be parsed at all is a hard error.
///
/// Messages for the user accumulate in `messages`; the returned report
/// carries one result per top-level record plus the merged statistics.
pub fn import_document(
    coding: &XmlCoding,
    text: &str,
    store: &mut dyn ObjectStore,
    options: ImportOptions,
    messages: &mut Messages,
) -> Result<ImportReport> {
    let doc = roxmltree::Document::parse(text).context("could not parse XML document")?;
    let root = doc.root_element();
    debug!(
        "Importing <{}> document using coding {} (version {})",
        root.tag_name().name(),
        coding.name(),
        coding.version()
    );

    let mut report = ImportReport::default();
    for node in root.children().filter(|n| n.is_element()) {
        let tag = node.tag_name().name();
        let def = match coding.resolve(tag) {
            Err(e) => {
                messages.push(e.to_string());
                report.stats.skipped(tag);
                report.results.push(TopLevelResult {
                    tag: tag.to_string(),
                    name: None,
                    result: ProcessingResult::Failed,
                });
                continue;
            }
            Ok(def) => def,
        };

        let mut record = XmlRecord::new(coding, def, options);
        if !record.load(node, messages) {
            report.stats.skipped(def.class_name());
            report.results.push(TopLevelResult {
                tag: tag.to_string(),
                name: record.parsed_name(),
                result: ProcessingResult::Failed,
            });
            continue;
        }

        // Each top-level record tallies into a scratch count so a record
        // that is rolled back does not show up as stored.
        let mut record_stats = ImportStats::new();
        let result = record.normalise_and_store_in_db(None, messages, &mut record_stats, store);
        match result {
            ProcessingResult::Failed => {
                record.delete_from_db(store, messages);
                report.stats.skipped(def.class_name());
            }
            _ => report.stats.merge(record_stats),
        }
        report.results.push(TopLevelResult {
            tag: tag.to_string(),
            name: record.parsed_name(),
            result,
        });
    }

    info!("Import finished. {}", report.stats);
    Ok(report)
}

/// Exports stored entities as one XML document wrapped in `root_tag`.
pub fn export_document(
    coding: &XmlCoding,
    store: &dyn ObjectStore,
    root_tag: &str,
    ids: &[EntityId],
) -> Result<String> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<{}>\n", root_tag));
    for id in ids {
        let entity = store
            .find_by_id(*id)
            .ok_or_else(|| anyhow!("no stored entity with id {}", id))?;
        let def = coding.record_for_kind(entity.kind()).ok_or_else(|| {
            anyhow!("coding {} has no record type for {:?} entities", coding.name(), entity.kind())
        })?;
        let record = XmlRecord::new(coding, def, ImportOptions::default());
        record.to_xml(&entity, store, &mut out, 1, "  ")?;
    }
    out.push_str(&format!("</{}>\n", root_tag));
    Ok(out)
}
