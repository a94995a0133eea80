use brewxml::model::{EntityKind, Mash, NamedEntity};
use brewxml::store::{MemoryStore, ObjectStore};
use brewxml::xml::{self, Messages};

use super::{SAMPLE_RECIPE, coding, import, normalize_xml};

fn export_recipes(store: &MemoryStore) -> String {
    let ids: Vec<_> = store
        .find_all(EntityKind::Recipe)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    xml::export_document(coding(), store, "RECIPES", &ids).unwrap()
}

#[test]
fn test_export_round_trips_the_sample_document() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    import(SAMPLE_RECIPE, &mut store, &mut messages);

    let exported = export_recipes(&store);
    assert_eq!(normalize_xml(&exported), normalize_xml(SAMPLE_RECIPE));
}

#[test]
fn test_export_escapes_text_content() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    import(SAMPLE_RECIPE, &mut store, &mut messages);

    let exported = export_recipes(&store);
    assert!(exported.contains("<NOTES>Roasty &amp; smooth.</NOTES>"));
}

#[test]
fn test_reimporting_an_export_is_stable() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();
    import(SAMPLE_RECIPE, &mut store, &mut messages);
    let first_export = export_recipes(&store);

    let mut second_store = MemoryStore::new();
    let report = import(&first_export, &mut second_store, &mut messages);
    assert!(report.succeeded(), "re-import failed: {}", messages);

    let second_export = export_recipes(&second_store);
    assert_eq!(first_export, second_export);
}

#[test]
fn test_empty_contained_collection_is_marked_with_a_comment() {
    let mut store = MemoryStore::new();
    let mash_id = store
        .insert(NamedEntity::Mash(Mash {
            id: None,
            name: "No Sparge".to_string(),
            grain_temp: 20.0,
            tun_temp: None,
            notes: None,
        }))
        .unwrap();

    let exported = xml::export_document(coding(), &store, "MASHS", &[mash_id]).unwrap();
    assert!(exported.contains("<!-- No MASH_STEP records in this MASH -->"));
    assert!(!exported.contains("<MASH_STEPS>"));
}

#[test]
fn test_export_of_unknown_id_is_an_error() {
    let store = MemoryStore::new();
    let result = xml::export_document(coding(), &store, "RECIPES", &[42]);
    assert!(result.is_err());
}
