use chrono::NaiveDate;
use fnv::FnvHashMap;

/// A single observed rating. Immutable once loaded, the timestamp is
/// carried along but never interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingObservation {
    pub user: u32,
    pub item: u32,
    pub rating: f64,
    pub timestamp: u64,
}

impl RatingObservation {
    pub fn new(user: u32, item: u32, rating: f64, timestamp: u64) -> Self {
        RatingObservation { user, item, rating, timestamp }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Unknown,
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {

    /// All genres, in the column order of the movie metadata file.
    pub const ALL: [Genre; 19] = [
        Genre::Unknown,
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Children,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    pub fn label(&self) -> &'static str {
        match *self {
            Genre::Unknown => "unknown",
            Genre::Action => "action",
            Genre::Adventure => "adventure",
            Genre::Animation => "animation",
            Genre::Children => "children",
            Genre::Comedy => "comedy",
            Genre::Crime => "crime",
            Genre::Documentary => "documentary",
            Genre::Drama => "drama",
            Genre::Fantasy => "fantasy",
            Genre::FilmNoir => "film-noir",
            Genre::Horror => "horror",
            Genre::Musical => "musical",
            Genre::Mystery => "mystery",
            Genre::Romance => "romance",
            Genre::SciFi => "sci-fi",
            Genre::Thriller => "thriller",
            Genre::War => "war",
            Genre::Western => "western",
        }
    }
}

/// Static movie metadata, keyed by the external item id.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item: u32,
    pub name: String,
    pub genres: Vec<Genre>,
    pub release_date: Option<NaiveDate>,
}

impl ItemRecord {
    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.contains(&genre)
    }
}

/// Static user roster entry. Users listed here own a matrix row even
/// before their first rating arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub user: u32,
    pub age: u32,
    pub gender: String,
    pub occupation: String,
    pub zip_code: String,
}

/// Owns the raw observations and the static reference data, loaded once
/// and treated as immutable afterwards.
#[derive(Debug)]
pub struct RatingStore {
    ratings: Vec<RatingObservation>,
    items: FnvHashMap<u32, ItemRecord>,
    users: FnvHashMap<u32, UserRecord>,
}

impl RatingStore {

    pub fn new(
        ratings: Vec<RatingObservation>,
        items: Vec<ItemRecord>,
        users: Vec<UserRecord>,
    ) -> Self {

        let mut item_catalog: FnvHashMap<u32, ItemRecord> =
            FnvHashMap::with_capacity_and_hasher(items.len(), Default::default());

        for record in items {
            item_catalog.insert(record.item, record);
        }

        let mut user_roster: FnvHashMap<u32, UserRecord> =
            FnvHashMap::with_capacity_and_hasher(users.len(), Default::default());

        for record in users {
            user_roster.insert(record.user, record);
        }

        RatingStore { ratings, items: item_catalog, users: user_roster }
    }

    pub fn from_ratings(ratings: Vec<RatingObservation>) -> Self {
        RatingStore::new(ratings, Vec::new(), Vec::new())
    }

    pub fn ratings(&self) -> &[RatingObservation] {
        &self.ratings
    }

    pub fn item(&self, item: u32) -> Option<&ItemRecord> {
        self.items.get(&item)
    }

    pub fn user(&self, user: u32) -> Option<&UserRecord> {
        self.users.get(&user)
    }

    pub fn items<'a>(&'a self) -> impl Iterator<Item = &'a ItemRecord> {
        self.items.values()
    }

    pub fn users<'a>(&'a self) -> impl Iterator<Item = &'a UserRecord> {
        self.users.values()
    }

    pub fn num_ratings(&self) -> u64 {
        self.ratings.len() as u64
    }

    pub fn num_items(&self) -> usize {
        self.items.len()
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    /// Case-insensitive substring search over the movie names, matches
    /// ordered by item id.
    pub fn search(&self, query: &str) -> Vec<&ItemRecord> {
        let query = query.to_lowercase();

        let mut matches: Vec<&ItemRecord> = self.items.values()
            .filter(|record| record.name.to_lowercase().contains(&query))
            .collect();

        matches.sort_by_key(|record| record.item);
        matches
    }
}
