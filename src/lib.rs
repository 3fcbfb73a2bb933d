extern crate chrono;
extern crate csv;
extern crate fnv;
#[macro_use]
extern crate log;
extern crate scoped_pool;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate thiserror;

use std::cmp;
use std::sync::Mutex;
use std::time::Instant;

use scoped_pool::Pool;

pub mod errors;
pub mod types;
pub mod store;
pub mod stats;
pub mod matrix;
pub mod similarity;
pub mod rank;
pub mod recommend;
pub mod io;
pub mod utils;

#[cfg(test)]
mod usage_tests;

use errors::RecommendationError;
use matrix::RatingMatrix;
use similarity::SimilarityModel;
use stats::{DataDictionary, Renaming};
use store::RatingStore;
use types::DenseVector;


/// Computes the user to user similarity model for a rating matrix
/// snapshot. The rows of the output are independent of each other, so we
/// shard them over a pool of workers, with every worker filling its own
/// output row.
pub fn similarities(matrix: &RatingMatrix, pool_size: usize) -> SimilarityModel {

    let pool = Pool::new(cmp::max(1, pool_size));

    let num_users = matrix.num_users();
    let norms = similarity::row_norms(matrix);

    let mut rows: Vec<Mutex<DenseVector>> = Vec::with_capacity(num_users);

    for _ in 0..num_users {
        rows.push(Mutex::new(types::new_dense_vector(num_users)));
    }

    let build_start = Instant::now();

    pool.scoped(|scope| {
        for user in 0..num_users {

            let row = &rows[user];
            let reference_to_norms = &norms;

            scope.execute(move || {
                score_row(user, matrix, reference_to_norms, row);
            });
        }
    });

    info!(
        "{} user pairs scored, {}ms model build time",
        num_users * num_users,
        utils::to_millis(build_start.elapsed()),
    );

    let scores = rows.into_iter()
        .map(|row| row.into_inner().unwrap())
        .collect();

    SimilarityModel::from_rows(scores)
}

fn score_row(
    user: usize,
    matrix: &RatingMatrix,
    norms: &DenseVector,
    row: &Mutex<DenseVector>,
) {

    let mut scores = row.lock().unwrap();

    for other_user in 0..matrix.num_users() {

        scores[other_user] = if other_user == user {
            1.0
        } else if norms[user] == 0.0 || norms[other_user] == 0.0 {
            // a user without ratings has no signal, nobody resembles them
            0.0
        } else {
            /* Always iterate the lower of the two rows, so that both
               orientations of a pair sum their terms in the same order
               and the model stays exactly symmetric. */
            let (first, second) = if user < other_user {
                (user, other_user)
            } else {
                (other_user, user)
            };

            similarity::dot(matrix.row(first), matrix.row(second))
                / (norms[user] * norms[other_user])
        };
    }
}


/// Shared recommendation context, owned by the caller. Derives the
/// rating matrix and the similarity model once per data load and answers
/// all ranking queries from these immutable snapshots.
#[derive(Debug)]
pub struct Recommender {
    store: RatingStore,
    dict: DataDictionary,
    renaming: Renaming,
    matrix: RatingMatrix,
    model: SimilarityModel,
    pool_size: usize,
}

impl Recommender {

    pub fn new(store: RatingStore, pool_size: usize) -> Result<Recommender, RecommendationError> {

        let dict = DataDictionary::from(&store);
        let renaming = Renaming::from(&dict);

        let matrix = RatingMatrix::from_observations(store.ratings(), &dict)?;
        let model = similarities(&matrix, pool_size);

        info!(
            "{} ratings from {} users for {} items loaded",
            dict.num_ratings(),
            dict.num_users(),
            dict.num_items(),
        );

        Ok(Recommender { store, dict, renaming, matrix, model, pool_size })
    }

    /// Discards all derived state and rebuilds it from freshly loaded
    /// data.
    pub fn reload(&mut self, store: RatingStore) -> Result<(), RecommendationError> {
        *self = Recommender::new(store, self.pool_size)?;
        Ok(())
    }

    /// The `n` highest rated items on average, as external item ids,
    /// best first.
    pub fn popular(&self, n: usize) -> Vec<u32> {
        recommend::popular(&self.store, n)
            .into_iter()
            .map(|scored_item| scored_item.item)
            .collect()
    }

    /// Up to `n` items the user has not rated yet, as external item ids,
    /// ordered by predicted rating. A known user without any ratings
    /// gets the neutral fallback ranking, an id we have never seen is an
    /// error.
    pub fn personalized(&self, user: u32, n: usize) -> Result<Vec<u32>, RecommendationError> {

        let user_index = self.dict.user_index(user)
            .ok_or(RecommendationError::UnknownUser(user))?;

        let ranked = recommend::personalized(
            user_index as usize,
            n,
            &self.matrix,
            &self.model,
            &self.renaming,
        );

        Ok(ranked.into_iter().map(|scored_item| scored_item.item).collect())
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    pub fn similarities(&self) -> &SimilarityModel {
        &self.model
    }
}
