// 📚 Repository - Observable in-memory collection
//
// Every committed mutation sends exactly ONE zero-payload notification.
// Subscribers re-read the whole collection; nothing is diffed.
//
// Failed mutations (bad index) leave the collection untouched and stay silent.

use crate::animal::{seed_animals, Animal, Identifiable};
use crate::error::RepositoryError;
use std::fmt;
use tracing::{debug, warn};

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut()>;

// ============================================================================
// REPOSITORY
// ============================================================================

pub struct Repository<T: Identifiable> {
    /// Insertion order is display order
    items: Vec<T>,

    /// Listeners, invoked in subscription order
    subscribers: Vec<(SubscriptionId, Callback)>,

    next_subscription: u64,
}

pub type AnimalRepository = Repository<Animal>;

impl<T: Identifiable> Repository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::from_items(Vec::new())
    }

    /// Create a repository pre-filled with `items` (no notification)
    pub fn from_items(items: Vec<T>) -> Self {
        Repository {
            items,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    // ========================================================================
    // READS
    // ========================================================================

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Current position of the item with this id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    // ========================================================================
    // MUTATIONS
    // ========================================================================

    /// Insert at the end
    pub fn append(&mut self, item: T) {
        debug!(id = item.id(), "append");
        self.items.push(item);
        self.notify();
    }

    /// Remove and return the item at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<T, RepositoryError> {
        let len = self.items.len();
        if index >= len {
            warn!(index, len, "remove_at rejected");
            return Err(RepositoryError::IndexOutOfRange { index, len });
        }

        let removed = self.items.remove(index);
        debug!(index, id = removed.id(), "remove_at");
        self.notify();
        Ok(removed)
    }

    /// Remove several positions as one mutation
    ///
    /// All offsets are checked before anything is removed, so a bad offset
    /// leaves the collection as it was. Removal runs highest index first so
    /// the remaining offsets stay valid. Returned items are in ascending
    /// original-index order.
    pub fn remove_offsets(&mut self, offsets: &[usize]) -> Result<Vec<T>, RepositoryError> {
        if offsets.is_empty() {
            return Ok(Vec::new());
        }

        let len = self.items.len();
        if let Some(&index) = offsets.iter().find(|&&i| i >= len) {
            warn!(index, len, "remove_offsets rejected");
            return Err(RepositoryError::IndexOutOfRange { index, len });
        }

        let mut sorted = offsets.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let mut removed: Vec<T> = sorted.iter().map(|&i| self.items.remove(i)).collect();
        removed.reverse();

        debug!(count = removed.len(), "remove_offsets");
        self.notify();
        Ok(removed)
    }

    // ========================================================================
    // NOTIFICATION
    // ========================================================================

    /// Register a callback invoked once per committed mutation
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut() + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback();
        }
    }
}

impl AnimalRepository {
    /// Session start state: Eagle, Owl, Parrot, Penguin, Zebra
    pub fn with_seed_animals() -> Self {
        Self::from_items(seed_animals())
    }
}

impl<T: Identifiable> Default for Repository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identifiable + fmt::Debug> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn names(repo: &AnimalRepository) -> Vec<String> {
        repo.items().iter().map(|a| a.name.clone()).collect()
    }

    fn counter(repo: &mut AnimalRepository) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        repo.subscribe(move || handle.set(handle.get() + 1));
        count
    }

    #[test]
    fn test_seeded_repository() {
        let repo = AnimalRepository::with_seed_animals();

        assert_eq!(repo.len(), 5);
        assert_eq!(names(&repo), vec!["Eagle", "Owl", "Parrot", "Penguin", "Zebra"]);
    }

    #[test]
    fn test_append_to_seeded() {
        let mut repo = AnimalRepository::with_seed_animals();
        repo.append(Animal::new("Owl2", "Test!"));

        assert_eq!(repo.len(), 6);
        assert_eq!(repo.items().last().unwrap().name, "Owl2");
    }

    #[test]
    fn test_remove_first_seed() {
        let mut repo = AnimalRepository::with_seed_animals();
        let removed = repo.remove_at(0).unwrap();

        assert_eq!(removed.name, "Eagle");
        assert_eq!(repo.len(), 4);
        assert_eq!(repo.items()[0].name, "Owl");
    }

    #[test]
    fn test_remove_middle_shifts_down() {
        let mut repo = AnimalRepository::with_seed_animals();
        repo.remove_at(2).unwrap();

        assert_eq!(names(&repo), vec!["Eagle", "Owl", "Penguin", "Zebra"]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut repo = AnimalRepository::with_seed_animals();
        let notified = counter(&mut repo);

        let err = repo.remove_at(5).unwrap_err();

        assert_eq!(err, RepositoryError::IndexOutOfRange { index: 5, len: 5 });
        assert_eq!(repo.len(), 5);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_remove_from_empty() {
        let mut repo = AnimalRepository::new();

        assert!(repo.remove_at(0).is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_one_notification_per_mutation() {
        let mut repo = AnimalRepository::with_seed_animals();
        let notified = counter(&mut repo);

        repo.append(Animal::new("Owl", "Test!"));
        assert_eq!(notified.get(), 1);

        repo.remove_at(0).unwrap();
        assert_eq!(notified.get(), 2);

        repo.remove_offsets(&[0, 1, 2]).unwrap();
        assert_eq!(notified.get(), 3);
    }

    #[test]
    fn test_all_subscribers_notified() {
        let mut repo = AnimalRepository::with_seed_animals();
        let first = counter(&mut repo);
        let second = counter(&mut repo);

        repo.append(Animal::new("Owl", "Test!"));

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
        assert_eq!(repo.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let mut repo = AnimalRepository::with_seed_animals();
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        let id = repo.subscribe(move || handle.set(handle.get() + 1));

        assert!(repo.unsubscribe(id));
        assert!(!repo.unsubscribe(id));

        repo.append(Animal::new("Owl", "Test!"));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_remove_offsets_batch() {
        let mut repo = AnimalRepository::with_seed_animals();
        let removed = repo.remove_offsets(&[2, 0]).unwrap();

        let removed_names: Vec<&str> = removed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(removed_names, vec!["Eagle", "Parrot"]);
        assert_eq!(names(&repo), vec!["Owl", "Penguin", "Zebra"]);
    }

    #[test]
    fn test_remove_offsets_duplicates_collapse() {
        let mut repo = AnimalRepository::with_seed_animals();
        let removed = repo.remove_offsets(&[4, 4, 1]).unwrap();

        assert_eq!(removed.len(), 2);
        assert_eq!(names(&repo), vec!["Eagle", "Parrot", "Penguin"]);
    }

    #[test]
    fn test_remove_offsets_rejects_whole_batch() {
        let mut repo = AnimalRepository::with_seed_animals();
        let notified = counter(&mut repo);

        let err = repo.remove_offsets(&[0, 9]).unwrap_err();

        assert_eq!(err, RepositoryError::IndexOutOfRange { index: 9, len: 5 });
        assert_eq!(repo.len(), 5);
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_remove_offsets_empty_is_silent() {
        let mut repo = AnimalRepository::with_seed_animals();
        let notified = counter(&mut repo);

        assert!(repo.remove_offsets(&[]).unwrap().is_empty());
        assert_eq!(notified.get(), 0);
    }

    #[test]
    fn test_position_of() {
        let repo = AnimalRepository::with_seed_animals();
        let penguin_id = repo.items()[3].id().to_string();

        assert_eq!(repo.position_of(&penguin_id), Some(3));
        assert_eq!(repo.position_of("non-existent-uuid"), None);
    }

    proptest! {
        #[test]
        fn prop_append_grows_by_one(names in proptest::collection::vec("[A-Za-z]{1,8}", 0..20)) {
            let mut repo = AnimalRepository::with_seed_animals();
            for (i, name) in names.iter().enumerate() {
                repo.append(Animal::new(name.clone(), "Test!"));
                prop_assert_eq!(repo.len(), 5 + i + 1);
                prop_assert_eq!(&repo.items().last().unwrap().name, name);
            }
        }

        #[test]
        fn prop_remove_at_preserves_order(extra in 0usize..10, pick in any::<proptest::sample::Index>()) {
            let mut repo = AnimalRepository::with_seed_animals();
            for i in 0..extra {
                repo.append(Animal::new(format!("Extra{i}"), "Test!"));
            }
            let before: Vec<Animal> = repo.items().to_vec();
            let index = pick.index(before.len());

            let removed = repo.remove_at(index).unwrap();

            prop_assert_eq!(&removed, &before[index]);
            prop_assert_eq!(repo.len(), before.len() - 1);
            let mut expected = before.clone();
            expected.remove(index);
            prop_assert_eq!(repo.items(), expected.as_slice());
        }
    }
}
