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

#[cfg(test)]
mod tests {

    use errors::RecommendationError;
    use matrix::RatingMatrix;
    use similarity;
    use stats::DataDictionary;
    use store::{RatingObservation, RatingStore, UserRecord};
    use super::super::{similarities, Recommender};

    /* Three moviegoers with opposing tastes. Users 1 and 2 agree with
       each other and disagree with user 3. */
    fn opposing_tastes() -> RatingStore {
        RatingStore::from_ratings(vec![
            RatingObservation::new(1, 1, 5.0, 0),
            RatingObservation::new(1, 2, 1.0, 1),
            RatingObservation::new(2, 1, 4.0, 2),
            RatingObservation::new(2, 2, 2.0, 3),
            RatingObservation::new(3, 1, 1.0, 4),
            RatingObservation::new(3, 2, 5.0, 5),
        ])
    }

    fn roster_entry(user: u32) -> UserRecord {
        UserRecord {
            user,
            age: 30,
            gender: "F".to_string(),
            occupation: "programmer".to_string(),
            zip_code: "10115".to_string(),
        }
    }

    #[test]
    fn programmatic_usage() {

        /* Our input data comprises of observed ratings that users gave
           to movies, one observation per user and movie. */
        let store = RatingStore::from_ratings(vec![
            RatingObservation::new(1, 1, 4.0, 0),
            RatingObservation::new(1, 2, 5.0, 1),
            RatingObservation::new(1, 3, 1.0, 2),
            RatingObservation::new(2, 1, 3.0, 3),
            RatingObservation::new(2, 2, 1.0, 4),
            RatingObservation::new(2, 4, 5.0, 5),
            RatingObservation::new(3, 2, 5.0, 6),
            RatingObservation::new(3, 5, 4.0, 7),
            RatingObservation::new(4, 1, 5.0, 8),
        ]);

        /* The recommender derives the rating matrix and the user
           similarity model once and caches both, all queries afterwards
           are pure reads. */
        let recommender = Recommender::new(store, 2).unwrap();

        println!(
            "Loaded {} ratings.",
            recommender.store().num_ratings(),
        );

        /* The most popular movies overall, by mean rating. */
        let popular_movies = recommender.popular(3);

        println!("Most popular movies: {:?}", popular_movies);
        assert_eq!(popular_movies, vec![4, 1, 5]);

        /* Personalized recommendations for user 4, who has only seen
           movie 1 so far. Movies they already rated never show up. */
        let recommended_movies = recommender.personalized(4, 2).unwrap();

        println!("Movies recommended for user 4: {:?}", recommended_movies);
        assert_eq!(recommended_movies, vec![4, 2]);
    }

    #[test]
    fn similarity_model_is_symmetric_with_unit_diagonal() {

        let store = opposing_tastes();
        let dict = DataDictionary::from(&store);
        let matrix = RatingMatrix::from_observations(store.ratings(), &dict).unwrap();

        let model = similarities(&matrix, 2);

        for user_a in 0..matrix.num_users() {
            assert_eq!(model.between(user_a, user_a), 1.0);

            for user_b in 0..matrix.num_users() {
                assert_eq!(model.between(user_a, user_b), model.between(user_b, user_a));
            }
        }
    }

    #[test]
    fn similarity_model_matches_the_pairwise_definition() {

        let store = opposing_tastes();
        let dict = DataDictionary::from(&store);
        let matrix = RatingMatrix::from_observations(store.ratings(), &dict).unwrap();

        let model = similarities(&matrix, 2);

        for user_a in 0..matrix.num_users() {
            for user_b in 0..matrix.num_users() {

                if user_a == user_b {
                    continue;
                }

                let definition = similarity::cosine(matrix.row(user_a), matrix.row(user_b));

                assert!((model.between(user_a, user_b) - definition).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn agreeing_users_score_high_and_opposed_users_low() {

        let store = opposing_tastes();
        let dict = DataDictionary::from(&store);
        let matrix = RatingMatrix::from_observations(store.ratings(), &dict).unwrap();

        let model = similarities(&matrix, 2);

        // users 1, 2 and 3 occupy rows 0, 1 and 2
        let agreeing = model.between(0, 1);
        let opposed = model.between(0, 2);

        assert!(agreeing > 0.9);
        assert!(opposed < 0.4);
        assert!(agreeing > opposed);
    }

    #[test]
    fn user_without_ratings_has_no_signal() {

        let store = RatingStore::new(
            opposing_tastes().ratings().to_vec(),
            Vec::new(),
            vec![roster_entry(42)],
        );

        let dict = DataDictionary::from(&store);
        let matrix = RatingMatrix::from_observations(store.ratings(), &dict).unwrap();

        let model = similarities(&matrix, 2);

        let silent = dict.user_index(42).unwrap() as usize;

        assert_eq!(model.between(silent, silent), 1.0);

        for other_user in 0..matrix.num_users() {
            if other_user != silent {
                assert_eq!(model.between(silent, other_user), 0.0);
            }
        }
    }

    #[test]
    fn known_user_without_ratings_degrades_to_the_fallback_ranking() {

        let store = RatingStore::new(
            opposing_tastes().ratings().to_vec(),
            Vec::new(),
            vec![roster_entry(42)],
        );

        let recommender = Recommender::new(store, 2).unwrap();

        /* All predictions for user 42 fall back to zero, so the ranking
           degrades to the movie ids in ascending order. */
        assert_eq!(recommender.personalized(42, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn unknown_user_is_rejected() {

        let recommender = Recommender::new(opposing_tastes(), 2).unwrap();

        let failure = recommender.personalized(999, 5).unwrap_err();

        assert_eq!(failure, RecommendationError::UnknownUser(999));
    }

    #[test]
    fn user_with_nothing_left_to_recommend_gets_an_empty_ranking() {

        let recommender = Recommender::new(opposing_tastes(), 2).unwrap();

        // user 3 has rated both movies already
        assert!(recommender.personalized(3, 1).unwrap().is_empty());
    }

    #[test]
    fn rankings_are_idempotent() {

        let recommender = Recommender::new(opposing_tastes(), 2).unwrap();

        assert_eq!(recommender.popular(2), recommender.popular(2));
        assert_eq!(
            recommender.personalized(1, 2).unwrap(),
            recommender.personalized(1, 2).unwrap(),
        );
    }

    #[test]
    fn reload_replaces_the_derived_state() {

        let mut recommender = Recommender::new(opposing_tastes(), 2).unwrap();

        // movie 1 carries the higher mean rating
        assert_eq!(recommender.popular(1), vec![1]);

        recommender.reload(RatingStore::from_ratings(vec![
            RatingObservation::new(1, 1, 1.0, 0),
            RatingObservation::new(1, 2, 5.0, 1),
        ])).unwrap();

        assert_eq!(recommender.popular(1), vec![2]);
    }

    #[test]
    fn duplicate_observations_fail_the_load() {

        let store = RatingStore::from_ratings(vec![
            RatingObservation::new(1, 1, 5.0, 0),
            RatingObservation::new(1, 1, 2.0, 1),
        ]);

        let failure = Recommender::new(store, 2).unwrap_err();

        assert_eq!(failure, RecommendationError::DuplicateRating { user: 1, item: 1 });
    }
}
