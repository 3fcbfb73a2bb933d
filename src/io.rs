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

use std;
use std::io;
use std::io::prelude::*;
use std::io::stdout;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv;

use store::{Genre, ItemRecord, RatingObservation, RatingStore, UserRecord};

/// Reads a ratings file. We expect NO headers, and a user, item, rating,
/// timestamp tuple per line with tab separation.
pub fn ratings_reader(file: &str) -> Result<csv::Reader<std::fs::File>, csv::Error> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_path(file)?;

    Ok(reader)
}

/// Reads a movie or user metadata file, pipe separated as well as
/// headerless, with a varying number of columns per line.
pub fn metadata_reader(file: &str) -> Result<csv::Reader<std::fs::File>, csv::Error> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'|')
        .flexible(true)
        .from_path(file)?;

    Ok(reader)
}

pub fn ratings_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>
) -> impl Iterator<Item = RatingObservation> + 'a
    where R: std::io::Read {

    // TODO surface malformed lines to the caller instead of skipping them
    reader.deserialize::<(u32, u32, f64, u64)>()
        .filter_map(Result::ok)
        .map(|(user, item, rating, timestamp)| {
            RatingObservation { user, item, rating, timestamp }
        })
}

/// Movie metadata lines carry the id, the name, a release date in
/// `01-Jan-1995` notation and nineteen genre flag columns. Unparseable
/// dates are treated as absent.
pub fn items_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>
) -> impl Iterator<Item = ItemRecord> + 'a
    where R: std::io::Read {

    reader.records()
        .filter_map(Result::ok)
        .filter_map(|record| {

            let item: u32 = match record.get(0).and_then(|field| field.parse().ok()) {
                Some(id) => id,
                None => return None,
            };

            let name = match record.get(1) {
                Some(field) => field.to_string(),
                None => return None,
            };

            let release_date = record.get(2)
                .and_then(|field| NaiveDate::parse_from_str(field, "%d-%b-%Y").ok());

            let mut genres = Vec::new();

            for (position, genre) in Genre::ALL.iter().enumerate() {
                if let Some("1") = record.get(5 + position) {
                    genres.push(*genre);
                }
            }

            Some(ItemRecord { item, name, genres, release_date })
        })
}

pub fn users_from_csv<'a, R>(
    reader: &'a mut csv::Reader<R>
) -> impl Iterator<Item = UserRecord> + 'a
    where R: std::io::Read {

    reader.deserialize::<(u32, u32, String, String, String)>()
        .filter_map(Result::ok)
        .map(|(user, age, gender, occupation, zip_code)| {
            UserRecord { user, age, gender, occupation, zip_code }
        })
}

/// Struct used for JSON serialization of a computed ranking. Field names
/// will be used in JSON.
#[derive(Serialize)]
struct Ranking<'a> {
    list: &'a str,
    for_user: Option<u32>,
    movies: Vec<String>,
}

/// Output the computed rankings in JSON format, one ranking per line,
/// with item ids resolved to movie names where the catalog knows them.
/// If an `output_path` is supplied, we write to a file at the specified
/// path, otherwise, we output to stdout.
pub fn write_rankings(
    rankings: &[(&str, Option<u32>, Vec<u32>)],
    store: &RatingStore,
    output_path: Option<String>,
) -> io::Result<()> {

    let mut out: Box<Write> = match output_path {
        Some(path) => Box::new(File::create(&Path::new(&path))?),
        _ => Box::new(stdout())
    };

    for &(list, for_user, ref items) in rankings.iter() {

        let movies = items.iter()
            .map(|item| match store.item(*item) {
                Some(record) => record.name.clone(),
                None => item.to_string(),
            })
            .collect();

        let ranking_as_json = json!(
            Ranking {
                list,
                for_user,
                movies
            });

        write!(out, "{}\n", ranking_as_json.to_string())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {

    use csv;
    use io;
    use store::Genre;

    fn tab_reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'\t')
            .from_reader(data.as_bytes())
    }

    fn pipe_reader(data: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'|')
            .flexible(true)
            .from_reader(data.as_bytes())
    }

    #[test]
    fn ratings_are_parsed_from_tab_separated_lines() {

        let data = "196\t242\t3\t881250949\n186\t302\t3.5\t891717742\n";

        let mut reader = tab_reader(data);
        let observations: Vec<_> = io::ratings_from_csv(&mut reader).collect();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].user, 196);
        assert_eq!(observations[0].item, 242);
        assert_eq!(observations[0].rating, 3.0);
        assert_eq!(observations[1].rating, 3.5);
        assert_eq!(observations[1].timestamp, 891717742);
    }

    #[test]
    fn malformed_rating_lines_are_skipped() {

        let data = "196\t242\t3\t881250949\nnot-a-user\t302\t3\t891717742\n";

        let mut reader = tab_reader(data);
        let observations: Vec<_> = io::ratings_from_csv(&mut reader).collect();

        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn items_are_parsed_with_genres_and_release_date() {

        let data = "1|Toy Story (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|0|0|0|1|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0\n\
                    2|GoldenEye (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?GoldenEye%20(1995)|0|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0|1|0|0\n";

        let mut reader = pipe_reader(data);
        let items: Vec<_> = io::items_from_csv(&mut reader).collect();

        assert_eq!(items.len(), 2);

        assert_eq!(items[0].item, 1);
        assert_eq!(items[0].name, "Toy Story (1995)");
        assert!(items[0].has_genre(Genre::Animation));
        assert!(items[0].has_genre(Genre::Children));
        assert!(items[0].has_genre(Genre::Comedy));
        assert!(!items[0].has_genre(Genre::Action));
        assert!(items[0].release_date.is_some());

        assert_eq!(items[1].name, "GoldenEye (1995)");
        assert!(items[1].has_genre(Genre::Action));
        assert!(items[1].has_genre(Genre::Thriller));
    }

    #[test]
    fn missing_release_date_is_absent() {

        let data = "267|unknown||||1|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0\n";

        let mut reader = pipe_reader(data);
        let items: Vec<_> = io::items_from_csv(&mut reader).collect();

        assert_eq!(items.len(), 1);
        assert!(items[0].release_date.is_none());
        assert!(items[0].has_genre(Genre::Unknown));
    }

    #[test]
    fn users_are_parsed_from_pipe_separated_lines() {

        let data = "1|24|M|technician|85711\n2|53|F|other|94043\n";

        let mut reader = pipe_reader(data);
        let users: Vec<_> = io::users_from_csv(&mut reader).collect();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].user, 1);
        assert_eq!(users[0].age, 24);
        assert_eq!(users[1].gender, "F");
        assert_eq!(users[1].occupation, "other");
        assert_eq!(users[1].zip_code, "94043");
    }
}
