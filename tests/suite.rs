// Integration suite for the indexer and the search engine; runs against
// scratch vaults and the seed items shipped at the repository root.
mod support;

use anyhow::Result;
use std::collections::BTreeSet;
use std::fs;
use std::thread;
use std::time::Duration;
use support::{FixtureVault, seed_items};
use uivault::indexer::{self, ItemWarning};
use uivault::{
    IndexEntry, ItemRegistry, ItemStatus, ItemType, MetaSchema, SearchFilters, SearchIndex,
    build_index, load_index_from_path,
};

fn ids(results: &[&IndexEntry]) -> Vec<String> {
    results.iter().map(|entry| entry.meta.id.to_string()).collect()
}

fn seed_index() -> Result<SearchIndex<IndexEntry>> {
    let schema = MetaSchema::builtin()?;
    let report = build_index(&seed_items(), &schema)?;
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    Ok(SearchIndex::new(report.index.items))
}

// N valid and M invalid items yield N entries and M warnings without failing.
#[test]
fn mixed_tree_indexes_valid_items_only() -> Result<()> {
    let vault = FixtureVault::new()?;
    vault.add_item("components", "component", "testimonial-card", &["testimonial"])?;
    vault.add_item("sections", "section", "hero-split-image", &["hero"])?;
    vault.add_item("templates", "template", "saas-landing-v1", &["saas"])?;
    // Missing definition file.
    fs::create_dir_all(vault.items().join("components/empty-dir"))?;
    // Definition without the `meta` table.
    vault.write("sections", "no-export", "meta.toml", "title = \"x\"\n")?;
    // Schema violation: no tags.
    vault.write(
        "templates",
        "no-tags",
        "meta.toml",
        "[meta]\nid = \"no-tags\"\ntype = \"template\"\nname = \"x\"\n\
         description = \"x\"\ntags = []\ncreatedAt = \"a\"\nupdatedAt = \"b\"\n",
    )?;
    // Id does not match the directory.
    vault.write(
        "components",
        "renamed",
        "meta.toml",
        "[meta]\nid = \"original\"\ntype = \"component\"\nname = \"x\"\n\
         description = \"x\"\ntags = [\"x\"]\ncreatedAt = \"a\"\nupdatedAt = \"b\"\n",
    )?;
    // Dot directories are never considered.
    fs::create_dir_all(vault.items().join("components/.cache"))?;

    let schema = MetaSchema::builtin()?;
    let report = indexer::run(&vault.items(), &vault.output(), &schema)?;

    assert_eq!(report.index.items.len(), 3);
    assert_eq!(report.warnings.len(), 4, "{:?}", report.warnings);
    let rendered: Vec<String> = report.warnings.iter().map(ToString::to_string).collect();
    assert!(rendered.contains(&"missing metadata: components/empty-dir".to_string()));
    assert!(rendered.contains(&"no metadata export found: sections/no-export".to_string()));
    assert!(
        rendered
            .iter()
            .any(|w| w.starts_with("error processing templates/no-tags: "))
    );
    assert!(matches!(
        report.warnings.iter().find(|w| w.label() == "components/renamed"),
        Some(ItemWarning::Invalid { .. })
    ));

    let written = load_index_from_path(&vault.output())?;
    assert_eq!(written.items, report.index.items);
    Ok(())
}

#[test]
fn indexed_paths_follow_category_and_id() -> Result<()> {
    let vault = FixtureVault::new()?;
    vault.add_item("components", "component", "b-card", &["card"])?;
    vault.add_item("components", "component", "a-card", &["card"])?;
    vault.add_item("templates", "template", "landing", &["saas"])?;
    vault.write("components", "a-card", "README.md", "# A\n")?;

    let report = build_index(&vault.items(), &MetaSchema::builtin()?)?;
    let entries = &report.index.items;
    let order: Vec<&str> = entries.iter().map(|e| e.meta.id.as_str()).collect();
    assert_eq!(order, vec!["a-card", "b-card", "landing"]);

    for entry in entries {
        assert_eq!(
            entry.path,
            format!("items/{}/{}", entry.meta.item_type.dir_name(), entry.meta.id)
        );
    }
    assert!(entries[0].has_readme);
    assert!(!entries[1].has_readme);
    Ok(())
}

#[test]
fn reindexing_is_idempotent() -> Result<()> {
    let vault = FixtureVault::new()?;
    vault.add_item("sections", "section", "faq", &["faq"])?;
    vault.add_item("sections", "section", "pricing", &["pricing"])?;
    let schema = MetaSchema::builtin()?;

    let first = indexer::run(&vault.items(), &vault.output(), &schema)?;
    thread::sleep(Duration::from_millis(5));
    let second = indexer::run(&vault.items(), &vault.output(), &schema)?;

    assert_eq!(first.index.items, second.index.items);
    assert_ne!(first.index.generated_at, second.index.generated_at);
    Ok(())
}

#[test]
fn missing_category_directories_are_fine() -> Result<()> {
    let vault = FixtureVault::new()?;
    vault.add_item("sections", "section", "faq", &["faq"])?;
    let report = build_index(&vault.items(), &MetaSchema::builtin()?)?;
    assert_eq!(report.index.items.len(), 1);
    assert!(report.warnings.is_empty());
    Ok(())
}

#[test]
fn seed_items_index_with_schema_defaults() -> Result<()> {
    let report = build_index(&seed_items(), &MetaSchema::builtin()?)?;
    let registry = ItemRegistry::from_index(report.index)?;
    assert_eq!(registry.len(), 3);

    let order: Vec<&str> = registry
        .entries()
        .iter()
        .map(|entry| entry.meta.id.as_str())
        .collect();
    assert_eq!(order, vec!["testimonial-card", "hero-split-image", "saas-landing-v1"]);

    let saas = &registry.entries()[2];
    assert_eq!(saas.meta.status, ItemStatus::Draft);
    assert_eq!(saas.meta.preview_height, Some(1200.0));
    assert!(!saas.has_readme);
    assert_eq!(
        saas.meta.tech.motion.as_deref(),
        Some(&["framer-motion".to_string()][..])
    );
    assert!(registry.entries()[0].has_readme);
    Ok(())
}

// Seed walkthrough: "hero" query, template filter, and marketing tag filter.
#[test]
fn seed_end_to_end_queries() -> Result<()> {
    let index = seed_index()?;

    let hero = index.search("hero", &SearchFilters::default());
    assert_eq!(ids(&hero), vec!["hero-split-image"]);

    let templates = index.search("", &SearchFilters::default().with_type(ItemType::Template));
    assert_eq!(ids(&templates), vec!["saas-landing-v1"]);

    let marketing = index.search("", &SearchFilters::default().with_tag("marketing"));
    assert_eq!(ids(&marketing), vec!["testimonial-card", "hero-split-image"]);
    Ok(())
}

#[test]
fn seed_search_tolerates_a_typo() -> Result<()> {
    let index = seed_index()?;
    let hits = index.search("testimonail", &SearchFilters::default());
    assert_eq!(
        ids(&hits).first().map(String::as_str),
        Some("testimonial-card")
    );
    Ok(())
}

#[test]
fn empty_query_without_filters_returns_everything_in_order() -> Result<()> {
    let index = seed_index()?;
    let all = index.search("", &SearchFilters::default());
    let expected: Vec<String> = index
        .items()
        .iter()
        .map(|entry| entry.meta.id.to_string())
        .collect();
    assert_eq!(ids(&all), expected);
    Ok(())
}

#[test]
fn additional_filters_only_narrow() -> Result<()> {
    let index = seed_index()?;
    let steps = [
        SearchFilters::default(),
        SearchFilters::default().with_tag("saas"),
        SearchFilters::default().with_tag("saas").with_collection("SaaS Landing"),
        SearchFilters::default()
            .with_tag("saas")
            .with_collection("SaaS Landing")
            .with_status(ItemStatus::Draft),
    ];

    for query in ["", "saas", "landing"] {
        let mut previous: Option<BTreeSet<String>> = None;
        for filters in &steps {
            let current: BTreeSet<String> =
                ids(&index.search(query, filters)).into_iter().collect();
            if let Some(previous) = &previous {
                assert!(current.is_subset(previous), "{query:?} {filters:?}");
            }
            previous = Some(current);
        }
    }
    Ok(())
}

#[test]
fn tag_filter_is_or_within_field() -> Result<()> {
    let vault = FixtureVault::new()?;
    vault.add_item("components", "component", "a", &["x"])?;
    vault.add_item("components", "component", "b", &["y"])?;
    vault.add_item("components", "component", "c", &["z"])?;
    let report = build_index(&vault.items(), &MetaSchema::builtin()?)?;
    let index = SearchIndex::new(report.index.items);

    let filters = SearchFilters::default().with_tag("x").with_tag("y");
    assert_eq!(ids(&index.search("", &filters)), vec!["a", "b"]);
    Ok(())
}

#[test]
fn type_filter_is_exact() -> Result<()> {
    let index = seed_index()?;
    let components = index.search("", &SearchFilters::default().with_type(ItemType::Component));
    assert!(!components.is_empty());
    assert!(
        components
            .iter()
            .all(|entry| entry.meta.item_type == ItemType::Component)
    );
    Ok(())
}
