/// XML record-mapping engine tests
///
/// This module contains end-to-end tests for the import/export engine,
/// organized by functionality area.

pub mod duplicates;
pub mod export;
pub mod import;
pub mod naming;

use brewxml::store::ObjectStore;
use brewxml::xml::coding::XmlCoding;
use brewxml::xml::{self, ImportOptions, ImportReport, Messages};

pub fn coding() -> &'static XmlCoding {
    xml::coding_named("BeerXML 1.0").expect("BeerXML 1.0 coding is registered")
}

/// Test helper to run a whole import with default options.
pub fn import(text: &str, store: &mut dyn ObjectStore, messages: &mut Messages) -> ImportReport {
    xml::import_document(coding(), text, store, ImportOptions::default(), messages)
        .expect("document parses")
}

/// Normalize XML for comparison by removing the declaration, comments,
/// extra whitespace and newlines.
pub fn normalize_xml(xml: &str) -> String {
    xml.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with("<?xml"))
        .filter(|line| !line.starts_with("<!--"))
        .collect::<Vec<&str>>()
        .join("")
}

/// One complete recipe with a style, two hops, a yeast and a two-step mash.
/// Element order matches the schema's declaration order so exports can be
/// compared against it directly.
pub const SAMPLE_RECIPE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<RECIPES>
  <RECIPE>
    <VERSION>1</VERSION>
    <NAME>Oatmeal Stout</NAME>
    <TYPE>All Grain</TYPE>
    <STYLE>
      <VERSION>1</VERSION>
      <NAME>Oatmeal Stout</NAME>
      <CATEGORY>Stout</CATEGORY>
      <CATEGORY_NUMBER>16</CATEGORY_NUMBER>
      <STYLE_LETTER>B</STYLE_LETTER>
      <STYLE_GUIDE>BJCP 2015</STYLE_GUIDE>
      <TYPE>Ale</TYPE>
      <OG_MIN>1.045</OG_MIN>
      <OG_MAX>1.065</OG_MAX>
    </STYLE>
    <BREWER>Sam</BREWER>
    <BATCH_SIZE>20.5</BATCH_SIZE>
    <BOIL_SIZE>24</BOIL_SIZE>
    <BOIL_TIME>60</BOIL_TIME>
    <FERMENTATION_STAGES>2</FERMENTATION_STAGES>
    <DATE>2023-07-14</DATE>
    <HOPS>
      <HOP>
        <VERSION>1</VERSION>
        <NAME>East Kent Goldings</NAME>
        <ALPHA>5.5</ALPHA>
        <AMOUNT>0.05</AMOUNT>
        <USE>Boil</USE>
        <TIME>60</TIME>
        <ORIGIN>United Kingdom</ORIGIN>
      </HOP>
      <HOP>
        <VERSION>1</VERSION>
        <NAME>Fuggle</NAME>
        <ALPHA>4.5</ALPHA>
        <AMOUNT>0.025</AMOUNT>
        <USE>Aroma</USE>
        <TIME>10</TIME>
      </HOP>
    </HOPS>
    <YEASTS>
      <YEAST>
        <VERSION>1</VERSION>
        <NAME>Irish Ale</NAME>
        <TYPE>Ale</TYPE>
        <FORM>Liquid</FORM>
        <AMOUNT>0.25</AMOUNT>
        <AMOUNT_IS_WEIGHT>FALSE</AMOUNT_IS_WEIGHT>
        <ATTENUATION>71</ATTENUATION>
        <LABORATORY>Wyeast</LABORATORY>
        <PRODUCT_ID>1084</PRODUCT_ID>
      </YEAST>
    </YEASTS>
    <MASH>
      <VERSION>1</VERSION>
      <NAME>Single Infusion</NAME>
      <GRAIN_TEMP>22</GRAIN_TEMP>
      <MASH_STEPS>
        <MASH_STEP>
          <VERSION>1</VERSION>
          <NAME>Conversion</NAME>
          <TYPE>Infusion</TYPE>
          <INFUSE_AMOUNT>15</INFUSE_AMOUNT>
          <STEP_TEMP>67</STEP_TEMP>
          <STEP_TIME>60</STEP_TIME>
        </MASH_STEP>
        <MASH_STEP>
          <VERSION>1</VERSION>
          <NAME>Mash Out</NAME>
          <TYPE>Temperature</TYPE>
          <STEP_TEMP>75.5</STEP_TEMP>
          <STEP_TIME>10</STEP_TIME>
        </MASH_STEP>
      </MASH_STEPS>
    </MASH>
    <NOTES>Roasty &amp; smooth.</NOTES>
  </RECIPE>
</RECIPES>"#;
