use visionsite_core::{Crumb, Faq};

use crate::absolute_url;
use crate::schema::{Answer, BreadcrumbList, FaqPage, ListItem, Question};

/// One `Question` per FAQ, text copied verbatim and in input order. An empty
/// list still yields a valid `FAQPage` with no entities.
pub fn faq_page(faqs: &[Faq]) -> FaqPage {
    FaqPage {
        schema_type: "FAQPage",
        main_entity: faqs
            .iter()
            .map(|faq| Question {
                schema_type: "Question",
                name: faq.question.clone(),
                accepted_answer: Answer {
                    schema_type: "Answer",
                    text: faq.answer.clone(),
                },
            })
            .collect(),
    }
}

/// Positions start at 1; `item` is the absolute URL of each crumb.
pub fn breadcrumbs(crumbs: &[Crumb], base_url: &str) -> BreadcrumbList {
    BreadcrumbList {
        schema_type: "BreadcrumbList",
        item_list_element: crumbs
            .iter()
            .enumerate()
            .map(|(i, crumb)| ListItem {
                schema_type: "ListItem",
                position: i + 1,
                name: crumb.name.clone(),
                item: absolute_url(base_url, &crumb.path),
            })
            .collect(),
    }
}
