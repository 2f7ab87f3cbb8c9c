use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Eintrag der Rating-Tabelle, z.B. `FourStar -> 4`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScore {
    pub rating: String,
    pub score: u32,
}

pub fn default_ratings() -> Vec<RatingScore> {
    [("TwoStar", 2), ("ThreeStar", 3), ("FourStar", 4), ("FiveStar", 6)]
        .into_iter()
        .map(|(rating, score)| RatingScore {
            rating: rating.to_string(),
            score,
        })
        .collect()
}

/// Price for a rating score: 99 when unrated, `score * 100 - 1` otherwise.
pub fn calculate_price(score: u32) -> i64 {
    if score == 0 {
        return 99;
    }
    i64::from(score) * 100 - 1
}

/// Lookup Rating-String -> Score, exakter Vergleich
#[derive(Debug, Clone)]
pub struct RatingTable {
    scores: HashMap<String, u32>,
}

impl RatingTable {
    pub fn new(entries: &[RatingScore]) -> Self {
        Self {
            scores: entries
                .iter()
                .map(|entry| (entry.rating.clone(), entry.score))
                .collect(),
        }
    }

    /// Unknown or absent ratings score 0.
    pub fn score(&self, rating: Option<&str>) -> u32 {
        rating
            .and_then(|rating| self.scores.get(rating))
            .copied()
            .unwrap_or(0)
    }

    pub fn price_for(&self, rating: Option<&str>) -> i64 {
        calculate_price(self.score(rating))
    }
}

impl Default for RatingTable {
    fn default() -> Self {
        Self::new(&default_ratings())
    }
}

/// Room Type mit Preis-Multiplikator relativ zum Hotelpreis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    pub name: String,
    pub price_multiplier: Decimal,
}

impl RoomType {
    pub fn new(name: &str, price_multiplier: Decimal) -> Self {
        Self {
            name: name.to_string(),
            price_multiplier,
        }
    }

    /// `None` when the product leaves the `Decimal` range.
    pub fn price_for(&self, hotel_price: Decimal) -> Option<Decimal> {
        hotel_price
            .checked_mul(self.price_multiplier)
            .map(|price| price.normalize())
    }
}

pub fn default_room_types() -> Vec<RoomType> {
    vec![
        RoomType::new("Single Room", Decimal::ONE),
        RoomType::new("Deluxe Room", Decimal::new(13, 1)),
        RoomType::new("Suite Room", Decimal::TWO),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_per_rating() {
        let table = RatingTable::default();

        assert_eq!(table.price_for(None), 99);
        assert_eq!(table.price_for(Some("OneStar")), 99);
        assert_eq!(table.price_for(Some("All")), 99);
        assert_eq!(table.price_for(Some("TwoStar")), 199);
        assert_eq!(table.price_for(Some("ThreeStar")), 299);
        assert_eq!(table.price_for(Some("FourStar")), 399);
        assert_eq!(table.price_for(Some("FiveStar")), 599);
    }

    #[test]
    fn test_rating_match_is_exact() {
        let table = RatingTable::default();
        assert_eq!(table.score(Some("fourstar")), 0);
        assert_eq!(table.score(Some(" FourStar")), 0);
    }

    #[test]
    fn test_custom_rating_table() {
        let table = RatingTable::new(&[RatingScore {
            rating: "OneStar".to_string(),
            score: 1,
        }]);
        assert_eq!(table.price_for(Some("OneStar")), 99);
        assert_eq!(table.price_for(Some("FiveStar")), 99);
    }

    #[test]
    fn test_room_multipliers() {
        let prices: Vec<String> = default_room_types()
            .iter()
            .map(|room| room.price_for(Decimal::from(299)).unwrap().to_string())
            .collect();

        assert_eq!(prices, ["299", "388.7", "598"]);
    }

    #[test]
    fn test_room_price_from_fractional_hotel_price() {
        let deluxe = RoomType::new("Deluxe Room", Decimal::new(13, 1));
        assert_eq!(deluxe.price_for(Decimal::new(995, 1)).unwrap().to_string(), "129.35");
    }

    #[test]
    fn test_room_price_overflow() {
        let suite = RoomType::new("Suite Room", Decimal::TWO);
        assert_eq!(suite.price_for(Decimal::MAX), None);
        assert_eq!(suite.price_for(Decimal::ZERO), Some(Decimal::ZERO));
    }
}
