use approx::assert_relative_eq;
use serde_json::Value;

use visionsite_core::{Crumb, Faq, Resolver, Review, SiteCatalog};
use visionsite_jsonld::{
    aggregate_rating, breadcrumbs, business, condition, faq_page, standalone, JsonLdGraph,
};

fn review(rating: u8) -> Review {
    Review {
        author: "Patient".into(),
        rating,
        body: "Helpful staff and a thorough exam.".into(),
        date: "2024-06-01".into(),
        source: None,
    }
}

#[test]
fn test_faq_round_trip_fidelity() {
    let catalog = SiteCatalog::builtin().unwrap();
    for c in &catalog.conditions {
        let doc = standalone(&faq_page(&c.faqs)).unwrap();
        let entities = doc["mainEntity"].as_array().unwrap();
        assert_eq!(entities.len(), c.faqs.len());
        for (entity, faq) in entities.iter().zip(&c.faqs) {
            assert_eq!(entity["@type"], "Question");
            assert_eq!(entity["name"], faq.question.as_str());
            assert_eq!(entity["acceptedAnswer"]["@type"], "Answer");
            assert_eq!(entity["acceptedAnswer"]["text"], faq.answer.as_str());
        }
    }
}

#[test]
fn test_faq_with_markup_survives_script_embedding() {
    let faqs = vec![Faq::new(
        "What does </script> do?",
        "It would end the element if it were not escaped.",
    )];
    let mut graph = JsonLdGraph::new();
    graph.push(&faq_page(&faqs)).unwrap();
    let tag = graph.to_script_tag().unwrap();

    let inner = tag
        .strip_prefix(r#"<script type="application/ld+json">"#)
        .and_then(|s| s.strip_suffix("</script>"))
        .unwrap();
    let parsed: Value = serde_json::from_str(inner).unwrap();
    assert_eq!(
        parsed["@graph"][0]["mainEntity"][0]["name"],
        "What does </script> do?"
    );
}

#[test]
fn test_breadcrumb_positions_are_sequential() {
    for n in 0..6 {
        let crumbs: Vec<Crumb> = (0..n)
            .map(|i| Crumb::new(format!("Level {}", i), format!("/level-{}", i)))
            .collect();
        let list = serde_json::to_value(breadcrumbs(&crumbs, "https://example.com")).unwrap();
        let items = list["itemListElement"].as_array().unwrap();
        assert_eq!(items.len(), n);
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item["@type"], "ListItem");
            assert_eq!(item["position"], i + 1);
            assert_eq!(item["name"], format!("Level {}", i));
        }
    }
}

#[test]
fn test_keratoconus_irvine_breadcrumbs() {
    let catalog = SiteCatalog::builtin().unwrap();
    let resolver = Resolver::new(&catalog, 3);
    let page = resolver.resolve_path("/conditions/keratoconus/irvine").unwrap();

    let list =
        serde_json::to_value(breadcrumbs(page.breadcrumbs(), &catalog.business.url)).unwrap();
    let items = list["itemListElement"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[3]["name"], "Irvine");
    assert_eq!(
        items[3]["item"],
        "https://www.clearviewoc.com/conditions/keratoconus/irvine"
    );
}

#[test]
fn test_aggregate_rating_is_rounded_mean() {
    let cases = vec![
        (vec![5], 5.0),
        (vec![5, 4], 4.5),
        (vec![5, 5, 4], 4.7),
        (vec![1, 2, 2], 1.7),
    ];
    for (ratings, expected) in cases {
        let reviews: Vec<Review> = ratings.into_iter().map(review).collect();
        let rating = aggregate_rating(&reviews);
        assert_relative_eq!(rating.rating_value, expected);
        assert_eq!(rating.review_count as usize, reviews.len());
    }
}

#[test]
fn test_aggregate_rating_empty_is_defined() {
    let rating = aggregate_rating(&[]);
    assert!(!rating.rating_value.is_nan());
    assert_relative_eq!(rating.rating_value, 0.0);
    assert_eq!(rating.review_count, 0);
}

#[test]
fn test_business_rating_is_passed_through() {
    let catalog = SiteCatalog::builtin().unwrap();
    let node = business(&catalog.business, None);
    assert_relative_eq!(node.aggregate_rating.rating_value, catalog.business.rating.value);
    assert_eq!(node.aggregate_rating.review_count, catalog.business.rating.count);
}

#[test]
fn test_graph_of_page_nodes() {
    let catalog = SiteCatalog::builtin().unwrap();
    let glaucoma = &catalog.conditions[1];

    let mut graph = JsonLdGraph::new();
    graph
        .push(&business(&catalog.business, None))
        .unwrap()
        .push(&condition(glaucoma, "https://www.clearviewoc.com/conditions/glaucoma"))
        .unwrap()
        .push(&faq_page(&glaucoma.faqs))
        .unwrap();

    let doc = graph.to_value();
    assert_eq!(doc["@context"], "https://schema.org");
    let types: Vec<&Value> = doc["@graph"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| &n["@type"])
        .collect();
    assert_eq!(types[1], "MedicalCondition");
    assert_eq!(types[2], "FAQPage");
}
