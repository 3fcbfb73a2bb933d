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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Result type used to find the top-n scored items via a binary heap.
/// Carries the external item id so that equal scores rank the smaller
/// id first.
#[derive(PartialEq, Debug)]
pub struct ScoredItem {
    pub item: u32,
    pub score: f64,
}

/// Ordering for our max-heap, note that we must use a special implementation
/// here as there is no total order on floating point numbers. Higher scores
/// order first, equal scores fall back to ascending item id.
fn cmp_reverse(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(Ordering::Less) => Ordering::Greater,
        Some(Ordering::Greater) => Ordering::Less,
        _ => scored_item_a.item.cmp(&scored_item_b.item),
    }
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_reverse(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_reverse(self, other))
    }
}

/// Retains the best `n` of the scored items in a bounded heap and
/// returns them best first.
pub fn top_n<I>(scored_items: I, n: usize) -> Vec<ScoredItem>
where
    I: IntoIterator<Item = ScoredItem>,
{
    if n == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(n);

    for scored_item in scored_items {
        if heap.len() < n {
            heap.push(scored_item);
        } else {
            let mut top = heap.peek_mut().unwrap();
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    heap.into_sorted_vec()
}
