/**
 * CineReco
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use matrix::RatingMatrix;
use types::{DenseVector, RatingVector};

/// Symmetric user to user matrix of cosine similarities in [-1, 1].
/// Derived once from a fixed rating matrix snapshot, a fresh data load
/// requires a rebuild.
#[derive(Debug)]
pub struct SimilarityModel {
    rows: Vec<DenseVector>,
}

impl SimilarityModel {

    pub fn from_rows(rows: Vec<DenseVector>) -> Self {
        SimilarityModel { rows }
    }

    pub fn between(&self, user_a: usize, user_b: usize) -> f64 {
        self.rows[user_a][user_b]
    }

    pub fn num_users(&self) -> usize {
        self.rows.len()
    }
}

/// Cosine similarity of two rating rows over the full item space, with
/// unobserved cells standing in as zero. A user without any ratings has
/// no signal, their similarity to everyone is defined as zero instead of
/// being undefined.
pub fn cosine(row_a: &RatingVector, row_b: &RatingVector) -> f64 {

    let norm_a = norm(row_a);
    let norm_b = norm(row_b);

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot(row_a, row_b) / (norm_a * norm_b)
}

pub fn dot(row_a: &RatingVector, row_b: &RatingVector) -> f64 {
    row_a.iter()
        .map(|(item, rating)| match row_b.get(item) {
            Some(other_rating) => rating * other_rating,
            None => 0.0,
        })
        .sum()
}

pub fn norm(row: &RatingVector) -> f64 {
    row.values().map(|rating| rating * rating).sum::<f64>().sqrt()
}

pub fn row_norms(matrix: &RatingMatrix) -> DenseVector {
    matrix.rows().iter().map(norm).collect()
}

#[cfg(test)]
mod tests {

    use similarity;
    use types::RatingVector;

    fn row(ratings: &[(u32, f64)]) -> RatingVector {
        ratings.iter().cloned().collect()
    }

    fn close_enough_to(value: f64, expected: f64) -> bool {
        (value - expected).abs() < 1e-9
    }

    #[test]
    fn cosine_of_parallel_rows_is_one() {
        let row_a = row(&[(0, 2.0), (1, 4.0)]);
        let row_b = row(&[(0, 1.0), (1, 2.0)]);

        assert!(close_enough_to(similarity::cosine(&row_a, &row_b), 1.0));
    }

    #[test]
    fn cosine_of_disjoint_rows_is_zero() {
        let row_a = row(&[(0, 5.0)]);
        let row_b = row(&[(1, 5.0)]);

        assert!(close_enough_to(similarity::cosine(&row_a, &row_b), 0.0));
    }

    #[test]
    fn cosine_of_empty_row_is_defined() {
        let empty = row(&[]);
        let rated = row(&[(0, 5.0), (3, 1.0)]);

        assert_eq!(similarity::cosine(&empty, &rated), 0.0);
        assert_eq!(similarity::cosine(&empty, &empty), 0.0);
    }

    #[test]
    fn cosine_matches_hand_computed_value() {
        // (5,1) against (1,5): (5 + 5) / (sqrt(26) * sqrt(26))
        let row_a = row(&[(0, 5.0), (1, 1.0)]);
        let row_b = row(&[(0, 1.0), (1, 5.0)]);

        assert!(close_enough_to(similarity::cosine(&row_a, &row_b), 10.0 / 26.0));
    }
}
