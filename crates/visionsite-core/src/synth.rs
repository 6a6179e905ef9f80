//! Fallback synthesis of full condition records from search-index entries.

use tracing::debug;

use crate::{
    Condition, ConditionIndexEntry, Faq, Provenance, ResolvedCondition, Result, Severity,
    SiteCatalog, SiteError, Slug,
};

/// Expands a minimal index entry into the full condition shape.
///
/// Pure: the output depends only on the entry, so a slug always synthesizes to
/// the same record.
pub fn synthesize(entry: &ConditionIndexEntry) -> Condition {
    let name = entry.name.trim();
    let category = entry.category.trim();
    let lower = name.to_lowercase();

    let description = format!(
        "{name} is a {category_lower} eye condition that can affect how clearly and comfortably you see. \
         Our optometrists evaluate {name} with a comprehensive, dilated eye exam and build a care plan \
         around your symptoms, your daily visual needs and the health of your eyes.",
        category_lower = category.to_lowercase(),
    );

    let mut symptoms = vec![
        format!("Blurred or fluctuating vision associated with {}", name),
        "Eye discomfort, redness or irritation".to_string(),
        "Increased sensitivity to light or glare".to_string(),
        "Difficulty with reading, screens or night driving".to_string(),
        format!("Symptoms of {} that progress without treatment", name),
    ];
    symptoms.extend(
        entry
            .aliases
            .iter()
            .map(|alias| format!("Also known as: {}", alias.trim())),
    );

    let treatments = vec![
        format!("Comprehensive diagnostic eye exam for {}", name),
        "Advanced retinal and anterior segment imaging".to_string(),
        format!("Personalized {} management plan", name),
        "Prescription eyewear or specialty contact lenses when appropriate".to_string(),
        "Ongoing monitoring and co-management with eye surgeons when needed".to_string(),
    ];

    let faqs = vec![
        Faq::new(
            format!("What is {}?", name),
            format!(
                "{} is a {} condition of the eye. An optometrist can confirm the diagnosis \
                 during a comprehensive eye exam and explain how it affects your vision.",
                name,
                category.to_lowercase()
            ),
        ),
        Faq::new(
            format!("How is {} treated?", name),
            format!(
                "Treatment for {} depends on its severity. Options range from monitoring and \
                 prescription lenses to medical therapy or referral to a specialist.",
                name
            ),
        ),
    ];

    let keywords = vec![
        lower.clone(),
        format!("{} treatment", lower),
        format!("{} eye doctor", lower),
        format!("{} optometrist", lower),
    ];

    Condition {
        slug: entry.slug.clone(),
        name: name.to_string(),
        category: category.to_string(),
        severity: Severity::Moderate,
        description,
        symptoms,
        treatments,
        faqs,
        keywords,
        aliases: entry.aliases.clone(),
    }
}

/// Two-source lookup: the authored catalog wins, the search index is synthesized.
pub fn resolve_condition(catalog: &SiteCatalog, slug: &Slug) -> Result<ResolvedCondition> {
    if let Some(condition) = catalog.condition(slug) {
        return Ok(ResolvedCondition {
            condition: condition.clone(),
            provenance: Provenance::Authored,
        });
    }
    match catalog.index_entry(slug) {
        Some(entry) => {
            debug!("synthesizing condition '{}' from search index", slug);
            Ok(ResolvedCondition {
                condition: synthesize(entry),
                provenance: Provenance::Synthesized,
            })
        }
        None => Err(SiteError::not_found("condition", slug.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(aliases: &[&str]) -> ConditionIndexEntry {
        ConditionIndexEntry {
            slug: Slug::parse("some-rare-condition").unwrap(),
            name: "Some Rare Condition".into(),
            category: "Retinal".into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_synthesized_fields_are_populated() {
        let condition = synthesize(&entry(&[]));
        assert_eq!(condition.category, "Retinal");
        assert_eq!(condition.slug, "some-rare-condition");
        assert!(!condition.description.is_empty());
        assert!(!condition.symptoms.is_empty());
        assert!(!condition.treatments.is_empty());
        assert!(!condition.faqs.is_empty());
        assert!(!condition.keywords.is_empty());
        assert!(condition.description.contains("Some Rare Condition"));
    }

    #[test]
    fn test_aliases_become_symptoms() {
        let plain = synthesize(&entry(&[]));
        let aliased = synthesize(&entry(&["SRC", "Rare Retinopathy"]));
        assert_eq!(aliased.symptoms.len(), plain.symptoms.len() + 2);
        assert_eq!(
            &aliased.symptoms[aliased.symptoms.len() - 2..],
            &["Also known as: SRC", "Also known as: Rare Retinopathy"]
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let e = entry(&["SRC"]);
        let first = serde_json::to_string(&synthesize(&e)).unwrap();
        let second = serde_json::to_string(&synthesize(&e)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_authored_wins_over_index() {
        let catalog = SiteCatalog::builtin().unwrap();
        let slug = Slug::parse("keratoconus").unwrap();
        assert!(catalog.index_entry(&slug).is_some());

        let resolved = resolve_condition(&catalog, &slug).unwrap();
        assert_eq!(resolved.provenance, Provenance::Authored);
        assert_eq!(resolved.condition, *catalog.condition(&slug).unwrap());
    }

    #[test]
    fn test_index_only_is_synthesized() {
        let catalog = SiteCatalog::builtin().unwrap();
        let entry = catalog
            .condition_index
            .iter()
            .find(|e| catalog.condition(&e.slug).is_none())
            .unwrap();

        let resolved = resolve_condition(&catalog, &entry.slug).unwrap();
        assert!(resolved.is_synthesized());
        assert_eq!(resolved.condition.category, entry.category);
    }

    #[test]
    fn test_unknown_condition_not_found() {
        let catalog = SiteCatalog::builtin().unwrap();
        let err =
            resolve_condition(&catalog, &Slug::parse("not-a-condition").unwrap()).unwrap_err();
        assert!(err.is_not_found());
    }
}
