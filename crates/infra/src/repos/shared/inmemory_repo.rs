use crate::repos::shared::repo::DeleteResult;
use renewal_tracker_domain::{Entity, ID};
use std::sync::Mutex;

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    let mut items = Vec::new();
    for item in collection.iter() {
        if compare(item) {
            items.push(item.clone());
        }
    }
    items
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    for i in 0..collection.len() {
        if collection[i].id() == val_id {
            let deleted_val = collection.remove(i);
            return Some(deleted_val);
        }
    }
    None
}

pub fn delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> DeleteResult {
    let mut collection = collection.lock().unwrap();
    DeleteResult {
        deleted_count: find_and_delete_by(&mut collection, compare).len() as i64,
    }
}

/// Works on an already locked collection so that callers can combine it
/// with other changes under the same lock
pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(collection: &mut Vec<T>, compare: F) -> Vec<T> {
    let mut deleted_items = Vec::new();
    let mut i = 0;
    while i < collection.len() {
        if compare(&collection[i]) {
            deleted_items.push(collection.remove(i));
        } else {
            i += 1;
        }
    }
    deleted_items
}

/// Updates every matching item and returns how many were updated
pub fn update_many<T: Clone, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) -> usize {
    let mut collection = collection.lock().unwrap();
    let mut updated = 0;
    for item in collection.iter_mut() {
        if compare(item) {
            update(item);
            updated += 1;
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: ID,
        value: i64,
    }

    impl Entity for Item {
        fn id(&self) -> &ID {
            &self.id
        }
    }

    fn collection() -> Mutex<Vec<Item>> {
        Mutex::new(
            (1..=5)
                .map(|i| Item {
                    id: ID::new(i),
                    value: i * 10,
                })
                .collect(),
        )
    }

    #[test]
    fn deletes_all_matching_items() {
        let items = collection();
        let res = delete_by(&items, |item| item.value > 20);
        assert_eq!(res.deleted_count, 3);
        let left = find_by(&items, |_| true);
        assert_eq!(
            left.iter().map(|i| i.id.inner()).collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn updates_and_deletes_items() {
        let items = collection();
        let updated = update_many(&items, |item| item.value >= 40, |item| item.value = 0);
        assert_eq!(updated, 2);
        assert_eq!(find(&ID::new(4), &items).unwrap().value, 0);
        assert_eq!(find(&ID::new(3), &items).unwrap().value, 30);

        assert!(delete(&ID::new(2), &items).is_some());
        assert!(find(&ID::new(2), &items).is_none());
        assert!(delete(&ID::new(2), &items).is_none());
    }
}
