//! Practice-level nodes: the business itself, its ratings and reviews.

use visionsite_core::{Business, City, RatingSummary, Review};

use crate::schema::{
    self, AggregateRating, EntryPoint, GeoCoordinates, MedicalBusiness, Named, NodeRef,
    OpeningHoursSpecification, PostalAddress, Rating, ReserveAction,
};
use crate::absolute_url;

pub const BEST_RATING: u8 = 5;
pub const WORST_RATING: u8 = 1;

/// The practice as `MedicalBusiness` + `Optician`. With a city the node is
/// localized to serve that city; otherwise it serves the whole region.
pub fn business(business: &Business, city: Option<&City>) -> MedicalBusiness {
    let area_served = match city {
        Some(city) => vec![Named::new("City", city.name.clone())],
        None => vec![Named::new(
            "AdministrativeArea",
            business.region.name.clone(),
        )],
    };

    MedicalBusiness {
        schema_type: vec!["MedicalBusiness", "Optician"],
        id: business.node_id(),
        name: business.name.clone(),
        legal_name: business.legal_name.clone(),
        description: business.description.clone(),
        url: business.url.clone(),
        logo: business.logo.clone(),
        image: business.image.clone(),
        telephone: business.phones.main.e164(),
        email: business.email.clone(),
        price_range: business.price_range.clone(),
        address: PostalAddress {
            schema_type: "PostalAddress",
            street_address: business.address.street_line(),
            address_locality: business.address.locality.clone(),
            address_region: business.address.region.clone(),
            postal_code: business.address.postal_code.clone(),
            address_country: business.address.country.clone(),
        },
        geo: GeoCoordinates {
            schema_type: "GeoCoordinates",
            latitude: business.geo.latitude,
            longitude: business.geo.longitude,
        },
        opening_hours_specification: business
            .hours
            .iter()
            .map(|h| OpeningHoursSpecification {
                schema_type: "OpeningHoursSpecification",
                day_of_week: h.days.clone(),
                opens: h.opens.clone(),
                closes: h.closes.clone(),
            })
            .collect(),
        same_as: business.social.clone(),
        area_served,
        medical_specialty: "Optometric",
        aggregate_rating: rating_summary(&business.rating),
        potential_action: ReserveAction {
            schema_type: "ReserveAction",
            target: EntryPoint {
                schema_type: "EntryPoint",
                url_template: absolute_url(&business.url, &business.booking_path),
            },
        },
    }
}

/// Published rating, passed through unmodified.
pub fn rating_summary(summary: &RatingSummary) -> AggregateRating {
    AggregateRating {
        schema_type: "AggregateRating",
        rating_value: summary.value,
        review_count: summary.count,
        best_rating: BEST_RATING,
        worst_rating: WORST_RATING,
    }
}

/// Mean of the individual ratings rounded to one decimal; an empty list
/// yields `0.0` with a count of zero.
pub fn aggregate_rating(reviews: &[Review]) -> AggregateRating {
    let rating_value = if reviews.is_empty() {
        0.0
    } else {
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        round_one(f64::from(sum) / reviews.len() as f64)
    };

    AggregateRating {
        schema_type: "AggregateRating",
        rating_value,
        review_count: reviews.len() as u32,
        best_rating: BEST_RATING,
        worst_rating: WORST_RATING,
    }
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn review(review: &Review, item_id: &str) -> schema::Review {
    schema::Review {
        schema_type: "Review",
        author: Named::new("Person", review.author.clone()),
        review_rating: Rating {
            schema_type: "Rating",
            rating_value: review.rating,
            best_rating: BEST_RATING,
            worst_rating: WORST_RATING,
        },
        review_body: review.body.clone(),
        date_published: review.date.clone(),
        item_reviewed: NodeRef::new(item_id),
        publisher: review
            .source
            .as_ref()
            .map(|s| Named::new("Organization", s.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visionsite_core::{SiteCatalog, Slug};

    fn review_with(rating: u8) -> Review {
        Review {
            author: "A. Patient".into(),
            rating,
            body: "Great visit.".into(),
            date: "2024-01-01".into(),
            source: None,
        }
    }

    #[test]
    fn test_business_node() {
        let catalog = SiteCatalog::builtin().unwrap();
        let node = business(&catalog.business, None);
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["@type"][0], "MedicalBusiness");
        assert_eq!(json["@type"][1], "Optician");
        assert_eq!(json["@id"], "https://www.clearviewoc.com/#organization");
        assert_eq!(json["telephone"], "+19495550142");
        assert_eq!(json["address"]["streetAddress"], "4000 Barranca Pkwy, Suite 250");
        assert_eq!(json["aggregateRating"]["ratingValue"], 4.9);
        assert_eq!(json["aggregateRating"]["reviewCount"], 412);
        assert_eq!(json["areaServed"][0]["name"], "Orange County");
        assert_eq!(
            json["potentialAction"]["target"]["urlTemplate"],
            "https://www.clearviewoc.com/book-appointment"
        );
    }

    #[test]
    fn test_business_localized_to_city() {
        let catalog = SiteCatalog::builtin().unwrap();
        let tustin = catalog.city(&Slug::parse("tustin").unwrap()).unwrap();
        let node = business(&catalog.business, Some(tustin));
        assert_eq!(node.area_served, vec![Named::new("City", "Tustin")]);
    }

    #[test]
    fn test_aggregate_rating_mean() {
        let reviews: Vec<_> = [5, 4, 4].into_iter().map(review_with).collect();
        let rating = aggregate_rating(&reviews);
        assert_eq!(rating.rating_value, 4.3);
        assert_eq!(rating.review_count, 3);
    }

    #[test]
    fn test_aggregate_rating_empty() {
        let rating = aggregate_rating(&[]);
        assert_eq!(rating.rating_value, 0.0);
        assert_eq!(rating.review_count, 0);
        assert!(serde_json::to_string(&rating).unwrap().contains("\"ratingValue\":0.0"));
    }

    #[test]
    fn test_review_publisher_optional() {
        let mut r = review_with(5);
        let node = review(&r, "https://example.com/#organization");
        assert!(node.publisher.is_none());

        r.source = Some("Google".into());
        let json = serde_json::to_value(review(&r, "x")).unwrap();
        assert_eq!(json["publisher"]["name"], "Google");
        assert_eq!(json["itemReviewed"]["@id"], "x");
        assert_eq!(json["reviewRating"]["ratingValue"], 5);
    }
}
