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

extern crate cinereco;
extern crate env_logger;
extern crate getopts;
extern crate num_cpus;

use std::error::Error;
use std::env;
use getopts::Options;

use cinereco::io;
use cinereco::store::{ItemRecord, RatingStore, UserRecord};
use cinereco::Recommender;

fn main() {

    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("r", "ratings", "Ratings file name (required). The input consists of ratings \
        that users gave to movies. The file must contain a user, movie, rating and timestamp \
        tuple per line, separated by a tab.", "PATH");
    opts.optopt("m", "movies", "Movie metadata file name (optional). Pipe-separated lines with \
        the movie id, name, release date and genre flags, used to print names instead of ids.",
        "PATH");
    opts.optopt("u", "users", "User roster file name (optional). Pipe-separated lines with the \
        user id, age, gender, occupation and zip code. Listed users are known to the \
        recommender even before their first rating.", "PATH");
    opts.optopt("t", "target-user", "User id to compute personalized recommendations for \
        (optional, only the overall ranking is computed by default).", "ID");
    opts.optopt("n", "num-recs", "Number of movies to recommend per ranking (optional, \
        defaults to 10).", "NUMBER");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to \
        stdout by default).", "PATH");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    if !matches.opt_present("r") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify a ratings file via --ratings."),
        );
    }

    let ratings_path = matches.opt_str("r").unwrap();
    let movies_path = matches.opt_str("m");
    let users_path = matches.opt_str("u");
    let output_path = matches.opt_str("o");

    let n: usize = match matches.opt_get_default("n", 10) {
        Ok(n) => n,
        Err(failure) => {
            let hint = format!("Problem with option 'n': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    let target_user: Option<u32> = match matches.opt_get("t") {
        Ok(target_user) => target_user,
        Err(failure) => {
            let hint = format!("Problem with option 't': {}", failure.to_string());
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    compute_recommendations(
        &ratings_path,
        movies_path,
        users_path,
        target_user,
        n,
        output_path,
    ).unwrap();
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
}

fn compute_recommendations(
    ratings_path: &str,
    movies_path: Option<String>,
    users_path: Option<String>,
    target_user: Option<u32>,
    n: usize,
    output_path: Option<String>,
) -> Result<(), Box<Error>> {

    println!("Reading ratings from {}", ratings_path);

    let mut ratings_reader = io::ratings_reader(ratings_path)?;
    let ratings: Vec<_> = io::ratings_from_csv(&mut ratings_reader).collect();

    let movies: Vec<ItemRecord> = match movies_path {
        Some(path) => {
            println!("Reading movie metadata from {}", path);
            let mut reader = io::metadata_reader(&path)?;
            io::items_from_csv(&mut reader).collect()
        },
        None => Vec::new(),
    };

    let users: Vec<UserRecord> = match users_path {
        Some(path) => {
            println!("Reading user roster from {}", path);
            let mut reader = io::metadata_reader(&path)?;
            io::users_from_csv(&mut reader).collect()
        },
        None => Vec::new(),
    };

    let store = RatingStore::new(ratings, movies, users);

    println!("Building the similarity model from {} ratings", store.num_ratings());

    let recommender = Recommender::new(store, num_cpus::get())?;

    let mut rankings = vec![("popular", None, recommender.popular(n))];

    if let Some(user) = target_user {
        match recommender.personalized(user, n) {
            Ok(recommended) => rankings.push(("personalized", Some(user), recommended)),
            Err(failure) => eprintln!("No personalized recommendations: {}", failure),
        }
    }

    println!("Writing rankings...");
    io::write_rankings(&rankings, recommender.store(), output_path)?;

    Ok(())
}
