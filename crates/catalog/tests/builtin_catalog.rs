use crave_catalog::{normalize, Catalog, FavoriteSet};
use pretty_assertions::assert_eq;

#[test]
fn builtin_keys_are_canonical() {
    let catalog = Catalog::builtin().unwrap();
    for key in catalog.store().keys() {
        assert_eq!(normalize(key), key);
    }
}

#[test]
fn every_synonym_group_points_at_records() {
    let catalog = Catalog::builtin().unwrap();
    for entry in catalog.synonyms().entries() {
        let target = entry
            .first_existing_target(catalog.store())
            .expect("validated groups always have a target");
        assert!(catalog.store().get(target).is_some());
    }
}

#[test]
fn favorites_page_lists_alternatives_with_record_names() {
    let catalog = Catalog::builtin().unwrap();
    let favorites: FavoriteSet = [150, 101].into_iter().collect();

    let items = catalog.store().favorite_items(&favorites);
    let listed: Vec<_> = items
        .iter()
        .map(|item| (item.record_name, item.alternative.name.as_str()))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("Chicken Breast", "Gardein Chicken Scallopini"),
            ("Bacon", "Coconut Bacon"),
        ]
    );
}

#[test]
fn alternative_lookup_spans_records() {
    let catalog = Catalog::builtin().unwrap();
    let (record, product) = catalog.store().alternative(21).unwrap();
    assert_eq!(record.key, "sausage");
    assert_eq!(product.name, "Homemade Lentil Sausage");
}

#[test]
fn dairy_fats_carry_their_own_alternatives() {
    let catalog = Catalog::builtin().unwrap();
    let (record, product) = catalog.store().alternative(230).unwrap();
    assert_eq!(record.key, "ghee");
    assert_eq!(product.name, "Fourth & Heart Vegan Ghee");
    assert_eq!(catalog.store().get("butter").unwrap().alternatives.len(), 4);
}
