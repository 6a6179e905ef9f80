use visionsite_core::{City, Condition, Doctor, Service};

use crate::organization::rating_summary;
use crate::schema::{Credential, MedicalCondition, MedicalProcedure, Named, NodeRef, Physician};

const SPECIALTY: &str = "Optometric";

/// Maps a condition category onto the anatomical structure it affects.
pub fn anatomy_for_category(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "corneal" => "Cornea",
        "retinal" => "Retina",
        "optic nerve" => "Optic nerve",
        "lens" => "Crystalline lens",
        "ocular surface" => "Ocular surface",
        _ => "Eye",
    }
}

pub fn condition(condition: &Condition, url: &str) -> MedicalCondition {
    MedicalCondition {
        schema_type: "MedicalCondition",
        name: condition.name.clone(),
        alternate_name: condition.aliases.clone(),
        description: condition.description.clone(),
        url: url.to_string(),
        sign_or_symptom: condition
            .symptoms
            .iter()
            .map(|s| Named::new("MedicalSignOrSymptom", s.clone()))
            .collect(),
        possible_treatment: condition
            .treatments
            .iter()
            .map(|t| Named::new("MedicalTherapy", t.clone()))
            .collect(),
        associated_anatomy: Named::new(
            "AnatomicalStructure",
            anatomy_for_category(&condition.category),
        ),
        relevant_specialty: SPECIALTY,
    }
}

/// `MedicalProcedure` for a service, named for the city when one is given.
pub fn procedure(service: &Service, url: &str, city: Option<&City>) -> MedicalProcedure {
    let name = match city {
        Some(city) => format!("{} in {}", service.name, city.name),
        None => service.name.clone(),
    };
    let how_performed = (!service.steps.is_empty()).then(|| {
        service
            .steps
            .iter()
            .map(|s| format!("{}: {}", s.title, s.description))
            .collect::<Vec<_>>()
            .join(" ")
    });

    MedicalProcedure {
        schema_type: "MedicalProcedure",
        name,
        alternate_name: service.short_name.clone(),
        description: service.description.clone(),
        url: url.to_string(),
        procedure_type: service.procedure_type.clone(),
        how_performed,
        body_location: "Eye",
        relevant_specialty: SPECIALTY,
    }
}

pub fn physician(doctor: &Doctor, url: &str, provider_id: &str) -> Physician {
    Physician {
        schema_type: "Physician",
        id: format!("{}#{}", url, doctor.slug),
        name: doctor.display_name(),
        description: doctor.bio.clone(),
        url: url.to_string(),
        image: doctor.image.clone(),
        medical_specialty: SPECIALTY,
        knows_about: doctor.specialties.clone(),
        knows_language: doctor.languages.clone(),
        has_credential: doctor
            .education
            .iter()
            .map(|school| Credential {
                schema_type: "EducationalOccupationalCredential",
                credential_category: "degree",
                recognized_by: Named::new("EducationalOrganization", school.clone()),
            })
            .collect(),
        member_of: doctor
            .memberships
            .iter()
            .map(|m| Named::new("Organization", m.clone()))
            .collect(),
        parent_organization: NodeRef::new(provider_id),
        aggregate_rating: rating_summary(&doctor.rating),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visionsite_core::{synthesize, ConditionIndexEntry, SiteCatalog, Slug};

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    #[test]
    fn test_condition_node() {
        let catalog = SiteCatalog::builtin().unwrap();
        let keratoconus = catalog.condition(&slug("keratoconus")).unwrap();
        let json = serde_json::to_value(condition(
            keratoconus,
            "https://www.clearviewoc.com/conditions/keratoconus",
        ))
        .unwrap();

        assert_eq!(json["@type"], "MedicalCondition");
        assert_eq!(json["associatedAnatomy"]["name"], "Cornea");
        assert_eq!(
            json["signOrSymptom"].as_array().unwrap().len(),
            keratoconus.symptoms.len()
        );
        assert_eq!(json["possibleTreatment"][1]["name"], "Scleral contact lenses");
        assert_eq!(json["relevantSpecialty"], "Optometric");
    }

    #[test]
    fn test_synthesized_condition_node() {
        let entry = ConditionIndexEntry {
            slug: slug("some-rare-condition"),
            name: "Some Rare Condition".into(),
            category: "Retinal".into(),
            aliases: vec![],
        };
        let node = condition(&synthesize(&entry), "https://example.com/x");
        assert_eq!(node.associated_anatomy.name, "Retina");
        assert!(!node.possible_treatment.is_empty());
        assert!(node.alternate_name.is_empty());
    }

    #[test]
    fn test_procedure_localized_name() {
        let catalog = SiteCatalog::builtin().unwrap();
        let service = catalog.service(&slug("scleral-lenses")).unwrap();
        let irvine = catalog.city(&slug("irvine")).unwrap();

        let node = procedure(service, "https://example.com/s", Some(irvine));
        assert_eq!(node.name, "Scleral Contact Lenses in Irvine");
        assert!(node
            .how_performed
            .as_deref()
            .unwrap()
            .starts_with("Corneal mapping:"));

        let node = procedure(service, "https://example.com/s", None);
        assert_eq!(node.name, "Scleral Contact Lenses");
    }

    #[test]
    fn test_physician_node() {
        let catalog = SiteCatalog::builtin().unwrap();
        let doctor = catalog.doctor(&slug("jane-park")).unwrap();
        let json = serde_json::to_value(physician(
            doctor,
            "https://www.clearviewoc.com/about",
            "https://www.clearviewoc.com/#organization",
        ))
        .unwrap();

        assert_eq!(json["@type"], "Physician");
        assert_eq!(json["name"], "Dr. Jane Park, OD, FAAO");
        assert_eq!(
            json["parentOrganization"]["@id"],
            "https://www.clearviewoc.com/#organization"
        );
        assert_eq!(json["aggregateRating"]["reviewCount"], 268);
        assert_eq!(
            json["hasCredential"][0]["recognizedBy"]["@type"],
            "EducationalOrganization"
        );
        assert_eq!(json["knowsLanguage"][1], "Korean");
    }
}
