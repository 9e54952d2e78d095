use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// A catalog product with its appended customer reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    pub fn new(name: String, description: String, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            price,
            image_url: None,
            categories: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn add_review(&mut self, review: Review) {
        self.reviews.push(review);
    }

    /// Mean review rating, 0.0 when the product has no reviews yet.
    pub fn average_rating(&self) -> f64 {
        if self.reviews.is_empty() {
            return 0.0;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        f64::from(sum) / self.reviews.len() as f64
    }

    /// Reviews sorted highest rating first.
    pub fn reviews_by_rating(&self) -> Vec<&Review> {
        let mut sorted: Vec<&Review> = self.reviews.iter().collect();
        sorted.sort_by(|a, b| b.rating.cmp(&a.rating));
        sorted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user_id: Uuid,
    pub username: String,
    pub body: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        user_id: Uuid,
        username: String,
        body: String,
        rating: u8,
    ) -> Result<Self, DomainError> {
        if !(1..=5).contains(&rating) {
            return Err(DomainError::InvalidRating(rating));
        }

        Ok(Self {
            user_id,
            username,
            body,
            rating,
            created_at: Utc::now(),
        })
    }
}
