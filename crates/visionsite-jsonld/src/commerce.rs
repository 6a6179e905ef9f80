use visionsite_core::{GalleryImage, Product};

use crate::schema::{self, AggregateRating, ImageGallery, ImageObject, Named, NodeRef, Offer};

/// `Product` with a single in-stock `Offer` sold by `seller_id`.
pub fn product(
    product: &Product,
    url: &str,
    seller_id: &str,
    rating: Option<AggregateRating>,
) -> schema::Product {
    schema::Product {
        schema_type: "Product",
        name: product.name.clone(),
        description: product.description.clone(),
        brand: Named::new("Brand", product.brand.clone()),
        image: product.image.clone(),
        url: url.to_string(),
        offers: Offer {
            schema_type: "Offer",
            price: product.price.clone(),
            price_currency: product.currency.clone(),
            availability: "https://schema.org/InStock",
            url: url.to_string(),
            seller: NodeRef::new(seller_id),
        },
        aggregate_rating: rating,
    }
}

pub fn image_gallery(name: &str, images: &[GalleryImage], url: &str) -> ImageGallery {
    ImageGallery {
        schema_type: "ImageGallery",
        name: name.to_string(),
        url: url.to_string(),
        associated_media: images
            .iter()
            .map(|img| ImageObject {
                schema_type: "ImageObject",
                content_url: img.url.clone(),
                caption: img.caption.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organization::aggregate_rating;
    use visionsite_core::SiteCatalog;

    #[test]
    fn test_product_offer() {
        let catalog = SiteCatalog::builtin().unwrap();
        let landing = catalog
            .landing_pages
            .iter()
            .find(|p| p.product.is_some())
            .unwrap();
        let item = landing.product.as_ref().unwrap();

        let node = product(item, "https://example.com/lp/x", "org", None);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["offers"]["price"], "899.00");
        assert_eq!(json["offers"]["priceCurrency"], "USD");
        assert_eq!(json["offers"]["availability"], "https://schema.org/InStock");
        assert!(json.get("aggregateRating").is_none());

        let rated = product(item, "u", "org", Some(aggregate_rating(&catalog.reviews)));
        assert_eq!(rated.aggregate_rating.unwrap().review_count, 4);
    }

    #[test]
    fn test_image_gallery() {
        let catalog = SiteCatalog::builtin().unwrap();
        let gallery = image_gallery("Our office", &catalog.business.gallery, "https://e.com/about");
        assert_eq!(gallery.associated_media.len(), catalog.business.gallery.len());
        assert_eq!(gallery.associated_media[0].caption, "Reception and optical boutique");
    }
}
