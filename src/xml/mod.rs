pub mod beerxml;
pub mod coding;
pub mod importer;
pub mod record;
pub mod report;
pub mod schema;
pub mod stats;
pub mod value;
pub mod xpath;

pub use coding::{XmlCoding, coding_named};
pub use importer::{export_document, import_document};
pub use record::{
    ConstantMismatchPolicy, ImportOptions, NestedFailurePolicy, ProcessingResult, XmlRecord,
};
pub use report::{ImportReport, Messages, TopLevelResult};
pub use stats::{ImportStats, RecordCount};
