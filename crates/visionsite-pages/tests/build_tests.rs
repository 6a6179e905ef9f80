use serde_json::Value;
use std::fs;
use tempfile::TempDir;

use visionsite_core::{
    ConditionIndexEntry, Page, Provenance, Resolver, Route, SiteCatalog, SiteConfig, Slug,
};
use visionsite_pages::{
    document_path, BuildReport, PageRenderer, SiteBuilder, REPORT_FILE, SITEMAP_FILE,
};

fn script_json(tag: &str) -> Value {
    let inner = tag
        .strip_prefix(r#"<script type="application/ld+json">"#)
        .and_then(|s| s.strip_suffix("</script>"))
        .expect("script tag");
    serde_json::from_str(inner).expect("valid JSON-LD")
}

fn catalog_with_rare_condition() -> SiteCatalog {
    let builtin = SiteCatalog::builtin().unwrap();
    let mut index = builtin.condition_index.clone();
    index.push(ConditionIndexEntry {
        slug: Slug::parse("some-rare-condition").unwrap(),
        name: "Some Rare Condition".into(),
        category: "Retinal".into(),
        aliases: vec![],
    });
    SiteCatalog::new(
        builtin.business.clone(),
        builtin.cities.clone(),
        builtin.conditions.clone(),
        index,
        builtin.services.clone(),
        builtin.insurances.clone(),
        builtin.doctors.clone(),
        builtin.reviews.clone(),
        builtin.landing_pages.clone(),
    )
    .unwrap()
}

#[test]
fn test_keratoconus_irvine_document() {
    let catalog = SiteCatalog::builtin().unwrap();
    let resolver = Resolver::new(&catalog, 3);
    let renderer = PageRenderer::new(&catalog, catalog.business.url.clone());

    let route = Route::parse("/conditions/keratoconus/irvine").unwrap();
    let doc = renderer.render(&route, resolver.resolve(&route).unwrap()).unwrap();

    let crumbs = script_json(&doc.json_ld[0]);
    assert_eq!(crumbs["@type"], "BreadcrumbList");
    let items = crumbs["itemListElement"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[3]["@type"], "ListItem");
    assert_eq!(items[3]["position"], 4);
    assert_eq!(items[3]["name"], "Irvine");

    let graph = script_json(&doc.json_ld[1]);
    let nodes = graph["@graph"].as_array().unwrap();
    assert_eq!(nodes[0]["areaServed"][0]["name"], "Irvine");
    assert_eq!(nodes[1]["@type"], "MedicalCondition");
    assert_eq!(nodes[2]["@type"], "FAQPage");

    let authored = catalog.condition(&Slug::parse("keratoconus").unwrap()).unwrap();
    match &doc.page {
        Page::ConditionInCity(p) => {
            assert_eq!(p.condition.condition.description, authored.description);
            assert!(p.city.neighborhoods.contains(&"Woodbridge".to_string()));
        }
        other => panic!("unexpected page kind {}", other.kind()),
    }
    assert_eq!(doc.provenance, Provenance::Authored);
    assert!(doc.title.contains("Keratoconus") && doc.title.contains("Irvine"));
    assert!(doc.description.chars().count() <= 160);
}

#[test]
fn test_every_document_has_breadcrumbs_and_business() {
    let catalog = SiteCatalog::builtin().unwrap();
    let builder = SiteBuilder::new(&catalog, &SiteConfig::default());
    let docs = builder.render_all().unwrap();
    assert_eq!(docs.len(), builder.routes().len());

    for doc in &docs {
        assert_eq!(doc.json_ld.len(), 2, "{}", doc.path);
        assert_eq!(script_json(&doc.json_ld[0])["@type"], "BreadcrumbList");
        let graph = script_json(&doc.json_ld[1]);
        assert_eq!(graph["@context"], "https://schema.org");
        assert_eq!(graph["@graph"][0]["@type"][0], "MedicalBusiness");
        assert_eq!(doc.cta.tracking_class, "callrail-phone");
    }
}

#[test]
fn test_build_writes_documents_sitemap_and_report() {
    let catalog = catalog_with_rare_condition();
    let dir = TempDir::new().unwrap();
    let builder = SiteBuilder::new(&catalog, &SiteConfig::default()).with_output_dir(dir.path());
    let report = builder.build().unwrap();

    assert_eq!(report.total, builder.routes().len());
    assert_eq!(report.by_kind.values().sum::<usize>(), report.total);
    assert_eq!(report.by_kind["landing"], catalog.landing_pages.len());
    assert!(report
        .synthesized
        .contains(&"/conditions/some-rare-condition/irvine".to_string()));
    assert!(!report.synthesized.contains(&"/conditions/keratoconus".to_string()));

    assert!(dir.path().join("index.json").exists());
    let page_file = dir.path().join("conditions/some-rare-condition/irvine/index.json");
    let doc: Value = serde_json::from_str(&fs::read_to_string(page_file).unwrap()).unwrap();
    assert_eq!(doc["provenance"], "synthesized");
    assert_eq!(doc["page"]["condition"]["condition"]["category"], "Retinal");

    let sitemap = fs::read_to_string(dir.path().join(SITEMAP_FILE)).unwrap();
    assert!(sitemap.contains("<loc>https://www.clearviewoc.com/conditions/keratoconus/irvine</loc>"));
    assert!(!sitemap.contains("/lp/"));
    assert_eq!(sitemap.matches("<url>").count(), report.indexable);

    let saved: BuildReport =
        serde_json::from_str(&fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap()).unwrap();
    assert_eq!(saved.total, report.total);
    assert_eq!(saved.synthesized, report.synthesized);
}

#[test]
fn test_parallel_and_sequential_builds_match() {
    let catalog = SiteCatalog::builtin().unwrap();
    let parallel_dir = TempDir::new().unwrap();
    let sequential_dir = TempDir::new().unwrap();

    let parallel = SiteBuilder::new(&catalog, &SiteConfig::default())
        .with_output_dir(parallel_dir.path())
        .with_parallel(true);
    let sequential = SiteBuilder::new(&catalog, &SiteConfig::default())
        .with_output_dir(sequential_dir.path())
        .with_parallel(false);
    parallel.build().unwrap();
    sequential.build().unwrap();

    for route in parallel.routes() {
        let path = route.path();
        let a = fs::read(document_path(parallel_dir.path(), &path).unwrap()).unwrap();
        let b = fs::read(document_path(sequential_dir.path(), &path).unwrap()).unwrap();
        assert_eq!(a, b, "{} differs", path);
    }
    assert_eq!(
        fs::read(parallel_dir.path().join(SITEMAP_FILE)).unwrap(),
        fs::read(sequential_dir.path().join(SITEMAP_FILE)).unwrap()
    );
}

#[test]
fn test_progress_called_once_per_page() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let catalog = SiteCatalog::builtin().unwrap();
    let dir = TempDir::new().unwrap();
    let builder = SiteBuilder::new(&catalog, &SiteConfig::default()).with_output_dir(dir.path());
    let seen = AtomicUsize::new(0);
    let report = builder
        .build_with_progress(|_| {
            seen.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
    assert_eq!(seen.load(Ordering::Relaxed), report.total);
}
