use fnv::FnvHashMap;

use matrix::RatingMatrix;
use rank;
use rank::ScoredItem;
use similarity::SimilarityModel;
use stats::Renaming;
use store::RatingStore;

/// The `n` items with the highest mean rating over all observations,
/// best first. Items nobody rated have no mean and never appear.
pub fn popular(store: &RatingStore, n: usize) -> Vec<ScoredItem> {

    let mut accumulated: FnvHashMap<u32, (f64, u32)> =
        FnvHashMap::with_capacity_and_hasher(100, Default::default());

    for observation in store.ratings() {
        let entry = accumulated.entry(observation.item).or_insert((0.0, 0));
        entry.0 += observation.rating;
        entry.1 += 1;
    }

    let means = accumulated.into_iter()
        .map(|(item, (rating_sum, count))| {
            ScoredItem { item, score: rating_sum / count as f64 }
        });

    rank::top_n(means, n)
}

/// Predicted rating of a single item for a user, the weighted mean of the
/// other users' ratings for it with the similarities as weights. When no
/// weight is available the prediction falls back to zero, such items
/// simply rank low.
pub fn predict(
    user: usize,
    item: u32,
    matrix: &RatingMatrix,
    model: &SimilarityModel,
) -> f64 {

    let mut weighted_sum = 0.0;
    let mut similarity_sum = 0.0;

    for (other_user, row) in matrix.rows().iter().enumerate() {

        if other_user == user {
            continue;
        }

        if let Some(rating) = row.get(&item) {
            let similarity = model.between(user, other_user);

            weighted_sum += similarity * rating;
            similarity_sum += similarity;
        }
    }

    if similarity_sum == 0.0 {
        0.0
    } else {
        weighted_sum / similarity_sum
    }
}

/// Up to `n` items the user has not rated yet, ordered by predicted
/// rating. Already rated items are removed from the candidate set before
/// ranking, a low prediction must stay distinguishable from an already
/// seen movie.
pub fn personalized(
    user: usize,
    n: usize,
    matrix: &RatingMatrix,
    model: &SimilarityModel,
    renaming: &Renaming,
) -> Vec<ScoredItem> {

    let already_rated = matrix.row(user);

    let predictions = (0..matrix.num_items() as u32)
        .filter(|item| !already_rated.contains_key(item))
        .map(|item| {
            ScoredItem {
                item: renaming.item_id(item),
                score: predict(user, item, matrix, model),
            }
        });

    rank::top_n(predictions, n)
}
