use crate::models::Product;

/// One product tile, with every label already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub image_url: String,
    /// Shown instead of `image_url` when that fails to load
    pub fallback_image: String,
    pub name: String,
    pub category: String,
    pub badge: String,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub link: String,
    pub link_label: String,
}

impl Card {
    pub fn new(product: &Product, placeholder: &str) -> Self {
        let percent = product.similarity_percent().unwrap_or_default();

        // Zero prices and ratings are treated like missing ones.
        let price = product
            .actual_price
            .filter(|price| *price != 0.0)
            .map(|price| t!("card.price", price = price).to_string());

        let rating = product.ratings.filter(|r| *r != 0.0).map(|ratings| {
            t!(
                "card.rating",
                ratings = ratings,
                count = product.no_of_ratings.unwrap_or(0)
            )
            .to_string()
        });

        Self {
            image_url: product.image_url.clone(),
            fallback_image: placeholder.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            badge: t!("card.match", percent = percent).to_string(),
            price,
            rating,
            link: product
                .link
                .clone()
                .filter(|link| !link.is_empty())
                .unwrap_or_else(|| "#".to_string()),
            link_label: t!("card.view").to_string(),
        }
    }
}
