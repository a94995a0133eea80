use brewxml::model::{EntityKind, NamedEntity};
use brewxml::store::{MemoryStore, ObjectStore};
use brewxml::xml::{
    self, ConstantMismatchPolicy, ImportOptions, Messages, NestedFailurePolicy, ProcessingResult,
};

use super::{SAMPLE_RECIPE, coding, import};

fn stored_recipe(store: &MemoryStore) -> brewxml::model::Recipe {
    let mut recipes = store.find_all(EntityKind::Recipe);
    assert_eq!(recipes.len(), 1);
    match recipes.remove(0).1 {
        NamedEntity::Recipe(recipe) => recipe,
        other => panic!("expected a recipe, got {:?}", other),
    }
}

#[test]
fn test_import_sample_document() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(SAMPLE_RECIPE, &mut store, &mut messages);

    assert!(messages.is_empty(), "unexpected messages: {}", messages);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(report.results[0].name.as_deref(), Some("Oatmeal Stout"));

    // recipe + style + 2 hops + yeast + mash + 2 mash steps
    assert_eq!(store.len(), 8);
    assert_eq!(report.stats.count_for("Recipe").stored, 1);
    assert_eq!(report.stats.count_for("Style").stored, 1);
    assert_eq!(report.stats.count_for("Hop").stored, 2);
    assert_eq!(report.stats.count_for("Yeast").stored, 1);
    assert_eq!(report.stats.count_for("Mash").stored, 1);
    // mash steps are owned by the mash and stay out of the stats
    assert_eq!(report.stats.count_for("MashStep").stored, 0);
}

#[test]
fn test_import_links_contained_entities() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    import(SAMPLE_RECIPE, &mut store, &mut messages);

    let recipe = stored_recipe(&store);
    assert_eq!(recipe.hop_ids.len(), 2);
    assert_eq!(recipe.yeast_ids.len(), 1);
    let style_id = recipe.style_id.expect("style is linked");
    let mash_id = recipe.mash_id.expect("mash is linked");

    assert_eq!(store.find_by_id(style_id).unwrap().kind(), EntityKind::Style);
    assert_eq!(store.find_by_id(mash_id).unwrap().kind(), EntityKind::Mash);

    // both mash steps point back at the recipe's mash
    let steps = store.find_all(EntityKind::MashStep);
    assert_eq!(steps.len(), 2);
    for (_, step) in steps {
        match step {
            NamedEntity::MashStep(step) => assert_eq!(step.mash_id, Some(mash_id)),
            other => panic!("expected a mash step, got {:?}", other),
        }
    }
}

const HOP_WITH_BAD_VERSION: &str = r#"<HOPS>
  <HOP>
    <VERSION>2</VERSION>
    <NAME>Cascade</NAME>
    <ALPHA>5.5</ALPHA>
    <AMOUNT>0.05</AMOUNT>
    <USE>Boil</USE>
    <TIME>60</TIME>
  </HOP>
</HOPS>"#;

#[test]
fn test_version_mismatch_is_reported_but_not_fatal() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(HOP_WITH_BAD_VERSION, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(store.len(), 1);
    assert!(messages.contains("Format mismatch"));
    assert!(messages.contains("VERSION"));
}

#[test]
fn test_version_mismatch_fails_under_strict_policy() {
    let options = ImportOptions {
        constant_mismatch: ConstantMismatchPolicy::Fail,
        ..ImportOptions::default()
    };
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report =
        xml::import_document(coding(), HOP_WITH_BAD_VERSION, &mut store, options, &mut messages)
            .unwrap();

    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    assert!(store.is_empty());
    assert_eq!(report.stats.count_for("Hop").skipped, 1);
}

#[test]
fn test_unknown_top_level_tag_is_skipped() {
    let text = r#"<BREWERY>
      <EQUIPMENT>
        <NAME>Kettle</NAME>
      </EQUIPMENT>
      <HOP>
        <VERSION>1</VERSION>
        <NAME>Saaz</NAME>
        <ALPHA>3.5</ALPHA>
        <AMOUNT>0.03</AMOUNT>
        <USE>Aroma</USE>
        <TIME>15</TIME>
      </HOP>
    </BREWERY>"#;

    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(text, &mut store, &mut messages);

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    assert_eq!(report.results[1].result, ProcessingResult::Succeeded);
    assert!(messages.contains("unknown tag <EQUIPMENT>"));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_non_numeric_int_field_fails_the_record() {
    let text = SAMPLE_RECIPE.replace(
        "<FERMENTATION_STAGES>2</FERMENTATION_STAGES>",
        "<FERMENTATION_STAGES>two</FERMENTATION_STAGES>",
    );

    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(&text, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    // nothing was constructed or stored
    assert!(store.is_empty());
    assert_eq!(report.stats.count_for("Recipe").skipped, 1);
    assert!(messages.contains("RECIPE"));
    assert!(messages.contains("FERMENTATION_STAGES"));
    assert!(messages.contains("two"));
}

#[test]
fn test_missing_required_field_fails_at_construction() {
    let text = r#"<HOPS>
      <HOP>
        <VERSION>1</VERSION>
        <NAME>Cascade</NAME>
        <AMOUNT>0.05</AMOUNT>
        <USE>Boil</USE>
        <TIME>60</TIME>
      </HOP>
    </HOPS>"#;

    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(text, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    assert!(store.is_empty());
    assert!(messages.contains("required field alpha missing"));
}

#[test]
fn test_bad_nested_record_fails_parent_by_default() {
    let text = SAMPLE_RECIPE.replace("<ALPHA>4.5</ALPHA>", "<ALPHA>lots</ALPHA>");

    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report = import(&text, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    assert!(store.is_empty());
    assert!(messages.contains("ALPHA"));
}

#[test]
fn test_bad_nested_record_can_be_skipped() {
    let text = SAMPLE_RECIPE.replace("<ALPHA>4.5</ALPHA>", "<ALPHA>lots</ALPHA>");
    let options = ImportOptions {
        nested_failure: NestedFailurePolicy::SkipAndLog,
        ..ImportOptions::default()
    };

    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let report =
        xml::import_document(coding(), &text, &mut store, options, &mut messages).unwrap();

    assert_eq!(report.results[0].result, ProcessingResult::Succeeded);
    assert!(messages.contains("Skipped unreadable HOP record"));

    // the good hop made it in, the bad one did not
    let recipe = stored_recipe(&store);
    assert_eq!(recipe.hop_ids.len(), 1);
    assert_eq!(report.stats.count_for("Hop").stored, 1);
}

#[test]
fn test_malformed_document_is_a_hard_error() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let result = xml::import_document(
        coding(),
        "<RECIPES><RECIPE>",
        &mut store,
        ImportOptions::default(),
        &mut messages,
    );
    assert!(result.is_err());
}
