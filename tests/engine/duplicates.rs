use brewxml::model::{EntityKind, Hop, HopUse, NamedEntity};
use brewxml::store::{MemoryStore, ObjectStore};
use brewxml::xml::{Messages, ProcessingResult};

use super::{SAMPLE_RECIPE, import};

#[test]
fn test_reimporting_a_document_stores_nothing_new() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    let first = import(SAMPLE_RECIPE, &mut store, &mut messages);
    assert_eq!(first.results[0].result, ProcessingResult::Succeeded);
    let after_first = store.len();

    let second = import(SAMPLE_RECIPE, &mut store, &mut messages);
    assert_eq!(second.results[0].result, ProcessingResult::FoundDuplicate);
    assert_eq!(store.len(), after_first);

    assert_eq!(second.stats.count_for("Recipe").duplicates, 1);
    assert_eq!(second.stats.count_for("Style").duplicates, 1);
    assert_eq!(second.stats.count_for("Hop").duplicates, 2);
    assert_eq!(second.stats.count_for("Yeast").duplicates, 1);
    assert_eq!(second.stats.count_for("Mash").duplicates, 1);
    assert_eq!(second.stats.count_for("Recipe").stored, 0);
    assert_eq!(second.stats.count_for("Hop").stored, 0);
}

#[test]
fn test_nested_duplicate_is_redirected_to_the_stored_entity() {
    let mut store = MemoryStore::new();
    // Same name, alpha and use as the sample's first hop; amount and time
    // differ but do not count towards hop equivalence.
    let existing_id = store
        .insert(NamedEntity::Hop(Hop {
            id: None,
            name: "East Kent Goldings".to_string(),
            alpha: 5.5,
            amount: 0.9,
            use_in: HopUse::Boil,
            time: 90.0,
            beta: None,
            origin: None,
            notes: None,
        }))
        .unwrap();

    let mut messages = Messages::new();
    let report = import(SAMPLE_RECIPE, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(report.stats.count_for("Hop").stored, 1);
    assert_eq!(report.stats.count_for("Hop").duplicates, 1);
    assert_eq!(store.find_all(EntityKind::Hop).len(), 2);

    // The recipe references the hop that was already in the store.
    let (_, recipe) = store.find_all(EntityKind::Recipe).remove(0);
    match recipe {
        NamedEntity::Recipe(recipe) => {
            assert_eq!(recipe.hop_ids.len(), 2);
            assert!(recipe.hop_ids.contains(&existing_id));
        }
        other => panic!("expected a recipe, got {:?}", other),
    }
}

#[test]
fn test_same_name_different_data_is_not_a_duplicate() {
    let mut store = MemoryStore::new();
    // Same name but a different alpha acid percentage.
    store
        .insert(NamedEntity::Hop(Hop {
            id: None,
            name: "East Kent Goldings".to_string(),
            alpha: 6.2,
            amount: 0.05,
            use_in: HopUse::Boil,
            time: 60.0,
            beta: None,
            origin: None,
            notes: None,
        }))
        .unwrap();

    let mut messages = Messages::new();
    let report = import(SAMPLE_RECIPE, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(report.stats.count_for("Hop").stored, 2);
    assert_eq!(report.stats.count_for("Hop").duplicates, 0);
    // Hops do not require unique names, so both spellings coexist.
    assert_eq!(store.find_by_name(EntityKind::Hop, "East Kent Goldings").len(), 2);
}
