use fnv::FnvHashMap;

use store::RatingStore;

/// Maps the external user and item identifiers to consecutive integer
/// indices and keeps basic statistics of the data for efficient
/// allocation later on.
#[derive(Debug)]
pub struct DataDictionary {
    user_dict: FnvHashMap<u32, u32>,
    item_dict: FnvHashMap<u32, u32>,
    num_ratings: u64,
}

impl DataDictionary {

    pub fn num_users(&self) -> usize {
        self.user_dict.len()
    }

    pub fn num_items(&self) -> usize {
        self.item_dict.len()
    }

    pub fn num_ratings(&self) -> u64 {
        self.num_ratings
    }

    pub fn user_index(&self, user: u32) -> Option<u32> {
        self.user_dict.get(&user).cloned()
    }

    pub fn item_index(&self, item: u32) -> Option<u32> {
        self.item_dict.get(&item).cloned()
    }
}

impl<'a> From<&'a RatingStore> for DataDictionary {

    fn from(store: &'a RatingStore) -> Self {

        let mut user_index: u32 = 0;
        let mut user_dict: FnvHashMap<u32, u32> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut item_index: u32 = 0;
        let mut item_dict: FnvHashMap<u32, u32> =
            FnvHashMap::with_capacity_and_hasher(100, Default::default());

        let mut num_ratings: u64 = 0;

        for observation in store.ratings() {

            if !user_dict.contains_key(&observation.user) {
                user_dict.insert(observation.user, user_index);
                user_index += 1;
            }

            if !item_dict.contains_key(&observation.item) {
                item_dict.insert(observation.item, item_index);
                item_index += 1;
            }

            num_ratings += 1;
        }

        // Roster users without a single rating still own a matrix row.
        // Sorted so that index assignment does not depend on map order.
        let mut roster: Vec<u32> = store.users().map(|record| record.user).collect();
        roster.sort();

        for user in roster {
            if !user_dict.contains_key(&user) {
                user_dict.insert(user, user_index);
                user_index += 1;
            }
        }

        DataDictionary { user_dict, item_dict, num_ratings }
    }
}

/// Reverse index that restores the external identifiers from the
/// consecutive internal ones.
#[derive(Debug)]
pub struct Renaming {
    user_ids: FnvHashMap<u32, u32>,
    item_ids: FnvHashMap<u32, u32>,
}

impl Renaming {

    pub fn user_id(&self, user_index: u32) -> u32 {
        self.user_ids[&user_index]
    }

    pub fn item_id(&self, item_index: u32) -> u32 {
        self.item_ids[&item_index]
    }
}

impl<'a> From<&'a DataDictionary> for Renaming {

    fn from(dict: &'a DataDictionary) -> Self {

        let mut user_ids: FnvHashMap<u32, u32> =
            FnvHashMap::with_capacity_and_hasher(dict.num_users(), Default::default());

        let mut item_ids: FnvHashMap<u32, u32> =
            FnvHashMap::with_capacity_and_hasher(dict.num_items(), Default::default());

        for (user, user_index) in dict.user_dict.iter() {
            user_ids.insert(*user_index, *user);
        }

        for (item, item_index) in dict.item_dict.iter() {
            item_ids.insert(*item_index, *item);
        }

        Renaming { user_ids, item_ids }
    }
}
