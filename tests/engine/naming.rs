use brewxml::error::StoreError;
use brewxml::model::{EntityKind, NamedEntity, Recipe, RecipeType};
use brewxml::store::{EntityId, MemoryStore, ObjectStore};
use brewxml::xml::{Messages, ProcessingResult};

use super::{SAMPLE_RECIPE, import};

fn recipe_names(store: &MemoryStore) -> Vec<String> {
    store
        .find_all(EntityKind::Recipe)
        .into_iter()
        .map(|(_, entity)| entity.name().to_string())
        .collect()
}

#[test]
fn test_clashing_recipe_names_get_numbered() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();

    // Three recipes with the same name but different brewers: not
    // duplicates of one another, so each needs its own unique name.
    let by_alex = SAMPLE_RECIPE.replace("<BREWER>Sam</BREWER>", "<BREWER>Alex</BREWER>");
    let by_kim = SAMPLE_RECIPE.replace("<BREWER>Sam</BREWER>", "<BREWER>Kim</BREWER>");

    let first = import(SAMPLE_RECIPE, &mut store, &mut messages);
    let second = import(&by_alex, &mut store, &mut messages);
    let third = import(&by_kim, &mut store, &mut messages);

    assert_eq!(first.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(second.results[0].result, ProcessingResult::Succeeded);
    assert_eq!(third.results[0].result, ProcessingResult::Succeeded);

    let names = recipe_names(&store);
    assert!(names.contains(&"Oatmeal Stout".to_string()));
    assert!(names.contains(&"Oatmeal Stout (1)".to_string()));
    assert!(names.contains(&"Oatmeal Stout (2)".to_string()));
}

/// Wraps a MemoryStore but claims every recipe name is already taken (by a
/// recipe that is never duplicate-equivalent), so renaming can never settle
/// on a free name.
struct EveryRecipeNameTaken {
    inner: MemoryStore,
}

impl ObjectStore for EveryRecipeNameTaken {
    fn find_by_id(&self, id: EntityId) -> Option<NamedEntity> {
        self.inner.find_by_id(id)
    }

    fn find_by_name(&self, kind: EntityKind, name: &str) -> Vec<(EntityId, NamedEntity)> {
        if kind == EntityKind::Recipe {
            return vec![(
                9999,
                NamedEntity::Recipe(Recipe {
                    id: Some(9999),
                    name: name.to_string(),
                    recipe_type: RecipeType::Extract,
                    brewer: "Someone Else".to_string(),
                    batch_size: 10.0,
                    boil_size: 12.0,
                    boil_time: 60.0,
                    fermentation_stages: None,
                    date: None,
                    notes: None,
                    style_id: None,
                    mash_id: None,
                    hop_ids: Vec::new(),
                    yeast_ids: Vec::new(),
                }),
            )];
        }
        self.inner.find_by_name(kind, name)
    }

    fn find_all(&self, kind: EntityKind) -> Vec<(EntityId, NamedEntity)> {
        self.inner.find_all(kind)
    }

    fn insert(&mut self, entity: NamedEntity) -> Result<EntityId, StoreError> {
        self.inner.insert(entity)
    }

    fn update(&mut self, id: EntityId, entity: NamedEntity) -> Result<(), StoreError> {
        self.inner.update(id, entity)
    }

    fn delete(&mut self, id: EntityId) -> Result<(), StoreError> {
        self.inner.delete(id)
    }
}

#[test]
fn test_unresolvable_name_clash_fails_after_the_retry_cap() {
    let mut store = EveryRecipeNameTaken { inner: MemoryStore::new() };
    let mut messages = Messages::new();
    let report = import(SAMPLE_RECIPE, &mut store, &mut messages);

    assert_eq!(report.results[0].result, ProcessingResult::Failed);
    assert!(messages.contains("could not find a non-clashing name for \"Oatmeal Stout\""));
    assert!(messages.contains("1000 attempts"));

    // The record failed before anything was inserted.
    assert!(store.inner.is_empty());
    assert_eq!(report.stats.count_for("Recipe").skipped, 1);
    assert_eq!(report.stats.count_for("Hop").stored, 0);
}

#[test]
fn test_renamed_recipes_share_their_identical_children() {
    let mut store = MemoryStore::new();
    let mut messages = Messages::new();

    let by_alex = SAMPLE_RECIPE.replace("<BREWER>Sam</BREWER>", "<BREWER>Alex</BREWER>");
    import(SAMPLE_RECIPE, &mut store, &mut messages);
    let second = import(&by_alex, &mut store, &mut messages);

    // The second recipe's style, hops, yeast and mash are duplicates of the
    // first import's, so only the recipe itself was added.
    assert_eq!(second.stats.count_for("Recipe").stored, 1);
    assert_eq!(second.stats.count_for("Style").duplicates, 1);
    assert_eq!(second.stats.count_for("Hop").duplicates, 2);
    assert_eq!(store.find_all(EntityKind::Style).len(), 1);
    assert_eq!(store.find_all(EntityKind::Hop).len(), 2);
    assert_eq!(store.find_all(EntityKind::Mash).len(), 1);

    // Both recipes point at the same stored style.
    let recipes = store.find_all(EntityKind::Recipe);
    assert_eq!(recipes.len(), 2);
    let style_ids: Vec<_> = recipes
        .into_iter()
        .map(|(_, entity)| match entity {
            NamedEntity::Recipe(recipe) => recipe.style_id,
            other => panic!("expected a recipe, got {:?}", other),
        })
        .collect();
    assert_eq!(style_ids[0], style_ids[1]);
    assert!(style_ids[0].is_some());
}
