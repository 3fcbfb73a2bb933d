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

use fnv::FnvHashMap;

pub type DenseVector = Vec<f64>;

/// One user's observed ratings, keyed by dense item index. A missing key
/// means the user has not rated the item, which is different from a
/// rating of zero.
pub type RatingVector = FnvHashMap<u32, f64>;

pub fn new_dense_vector(dimensions: usize) -> DenseVector {
    vec![0.0; dimensions]
}

pub fn new_rating_vector() -> RatingVector {
    FnvHashMap::with_capacity_and_hasher(0, Default::default())
}
