use errors::RecommendationError;
use stats::DataDictionary;
use store::RatingObservation;
use types;
use types::RatingVector;

/// User by item matrix of observed ratings, one sparse row per user.
/// Cells stay absent when no rating was observed, they are never filled
/// with zeros here.
#[derive(Debug)]
pub struct RatingMatrix {
    rows: Vec<RatingVector>,
    num_items: usize,
}

impl RatingMatrix {

    /// Pivots the raw observations into their matrix form. A second
    /// rating for the same user and item pair is rejected instead of
    /// silently overwriting the first one.
    pub fn from_observations(
        observations: &[RatingObservation],
        dict: &DataDictionary,
    ) -> Result<RatingMatrix, RecommendationError> {

        let mut rows: Vec<RatingVector> = vec![types::new_rating_vector(); dict.num_users()];

        for observation in observations {

            if !observation.rating.is_finite() {
                return Err(RecommendationError::MalformedRating {
                    user: observation.user,
                    item: observation.item,
                });
            }

            // The dictionary is derived from these observations, every id resolves.
            let user_index = dict.user_index(observation.user).unwrap() as usize;
            let item_index = dict.item_index(observation.item).unwrap();

            let previous = rows[user_index].insert(item_index, observation.rating);

            if previous.is_some() {
                return Err(RecommendationError::DuplicateRating {
                    user: observation.user,
                    item: observation.item,
                });
            }
        }

        Ok(RatingMatrix { rows, num_items: dict.num_items() })
    }

    pub fn rating(&self, user: usize, item: u32) -> Option<f64> {
        self.rows[user].get(&item).cloned()
    }

    pub fn is_rated(&self, user: usize, item: u32) -> bool {
        self.rows[user].contains_key(&item)
    }

    pub fn row(&self, user: usize) -> &RatingVector {
        &self.rows[user]
    }

    pub fn rows(&self) -> &[RatingVector] {
        &self.rows
    }

    pub fn num_users(&self) -> usize {
        self.rows.len()
    }

    pub fn num_items(&self) -> usize {
        self.num_items
    }
}
