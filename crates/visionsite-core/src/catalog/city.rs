use serde::{Deserialize, Serialize};

use crate::{Region, Slug};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub slug: Slug,
    pub name: String,
    pub county: String,
    /// Display string, e.g. "307,670".
    pub population: String,
    #[serde(default)]
    pub neighborhoods: Vec<String>,
    #[serde(default)]
    pub zip_codes: Vec<String>,
    pub description: String,
    pub seo_title: String,
    pub seo_description: String,
}

impl City {
    /// Builds the region pseudo-city that stands for the whole service area.
    ///
    /// Neighborhoods are the member city names and zip codes their union, both in
    /// declaration order.
    pub fn region(region: &Region, cities: &[City]) -> City {
        let neighborhoods: Vec<String> = cities.iter().map(|c| c.name.clone()).collect();

        let mut zip_codes: Vec<String> = Vec::new();
        for zip in cities.iter().flat_map(|c| c.zip_codes.iter()) {
            if !zip_codes.contains(zip) {
                zip_codes.push(zip.clone());
            }
        }

        let description = format!(
            "Our optometrists serve patients across {}, including {}.",
            region.name,
            join_names(&neighborhoods)
        );

        City {
            slug: region.slug.clone(),
            name: region.name.clone(),
            county: region.county.clone(),
            population: format!("{} communities", cities.len()),
            neighborhoods,
            zip_codes,
            description,
            seo_title: format!("Eye Doctor in {} | Optometry & Eye Care", region.name),
            seo_description: format!(
                "Comprehensive eye exams, dry eye treatment and specialty contact lenses for families throughout {}.",
                region.name
            ),
        }
    }
}

fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
