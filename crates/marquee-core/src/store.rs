//! In-memory movie catalog store.
//!
//! The store is an explicitly owned value: tests and the server construct
//! their own instances instead of sharing process-wide state. Records live
//! in a `HashMap` keyed by id with a separate `Vec` preserving insertion
//! order, so listing replays creation order while id lookups stay O(1).
//!
//! All access goes through a single `RwLock`: reads share, mutations are
//! exclusive. Every operation is a synchronous in-memory computation.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::id::MovieId;
use crate::movie::{Movie, MovieDraft, MoviePatch};

/// The seed catalog embedded in the crate.
pub const DEFAULT_SEED: &str = include_str!("../seed/movies.json");

#[derive(Debug, Default)]
struct StoreInner {
    records: HashMap<MovieId, Movie>,
    order: Vec<MovieId>,
}

impl StoreInner {
    fn push(&mut self, movie: Movie) -> Result<()> {
        if self.records.contains_key(&movie.id) {
            return Err(Error::DuplicateId {
                id: movie.id.to_string(),
            });
        }
        self.order.push(movie.id);
        self.records.insert(movie.id, movie);
        Ok(())
    }
}

/// Insertion-ordered, id-keyed movie collection.
#[derive(Debug, Default)]
pub struct MovieStore {
    inner: RwLock<StoreInner>,
}

impl MovieStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a JSON array of complete movie records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Serialization` if the document does not parse as a
    /// movie array, or `Error::DuplicateId` if two seed records share an id.
    pub fn from_seed_json(seed: &str) -> Result<Self> {
        let movies: Vec<Movie> = serde_json::from_str(seed).map_err(|e| Error::Serialization {
            message: format!("failed to parse seed catalog: {e}"),
        })?;

        let mut inner = StoreInner::default();
        for movie in movies {
            inner.push(movie)?;
        }

        tracing::debug!(movies = inner.order.len(), "seed catalog parsed");
        Ok(Self {
            inner: RwLock::new(inner),
        })
    }

    /// Builds a store from the embedded default seed catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded document is malformed; covered by
    /// tests, so in practice this only fails on a corrupted build.
    pub fn with_default_seed() -> Result<Self> {
        Self::from_seed_json(DEFAULT_SEED)
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.order.len())
    }

    /// Returns true when the store holds no records.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Lists records in insertion order, optionally filtered by a
    /// case-insensitive genre name.
    ///
    /// An unmatched filter yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the lock is poisoned.
    pub fn list(&self, genre: Option<&str>) -> Result<Vec<Movie>> {
        let inner = self.read()?;
        let movies = inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .filter(|movie| match genre {
                Some(filter) => movie.genre.iter().any(|tag| tag.matches_filter(filter)),
                None => true,
            })
            .cloned()
            .collect();
        Ok(movies)
    }

    /// Fetches a record by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` for an unknown id, or
    /// `Error::Internal` if the lock is poisoned.
    pub fn get(&self, id: &MovieId) -> Result<Movie> {
        self.read()?
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| Error::resource_not_found("movie", id))
    }

    /// Appends a validated draft as a new record with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `Error::Internal` if the lock is poisoned.
    pub fn insert(&self, draft: MovieDraft) -> Result<Movie> {
        let mut inner = self.write()?;

        // ULID collisions are not expected; regenerate rather than clobber.
        let mut id = MovieId::generate();
        while inner.records.contains_key(&id) {
            id = MovieId::generate();
        }

        let movie = Movie::from_draft(id, draft);
        inner.push(movie.clone())?;
        Ok(movie)
    }

    /// Merges a validated patch into the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` for an unknown id, or
    /// `Error::Internal` if the lock is poisoned.
    pub fn update(&self, id: &MovieId, patch: MoviePatch) -> Result<Movie> {
        let mut inner = self.write()?;
        let movie = inner
            .records
            .get_mut(id)
            .ok_or_else(|| Error::resource_not_found("movie", id))?;
        movie.apply_patch(patch);
        Ok(movie.clone())
    }

    /// Removes the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` for an unknown id, or
    /// `Error::Internal` if the lock is poisoned.
    pub fn remove(&self, id: &MovieId) -> Result<()> {
        let mut inner = self.write()?;
        if inner.records.remove(id).is_none() {
            return Err(Error::resource_not_found("movie", id));
        }
        inner.order.retain(|held| held != id);
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| Error::Internal {
            message: "store lock poisoned".into(),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| Error::Internal {
            message: "store lock poisoned".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::Genre;

    fn draft(title: &str, genre: Vec<Genre>) -> MovieDraft {
        MovieDraft {
            title: title.to_string(),
            year: 2001,
            duration: 120,
            rate: 7.0,
            poster: "https://images.example.com/poster.jpg".to_string(),
            genre,
        }
    }

    #[test]
    fn default_seed_parses_and_has_unique_ids() {
        let store = MovieStore::with_default_seed().expect("embedded seed");
        assert!(!store.is_empty().expect("len"));

        let movies = store.list(None).expect("list");
        let ids: std::collections::HashSet<MovieId> =
            movies.iter().map(|movie| movie.id).collect();
        assert_eq!(ids.len(), movies.len());
    }

    #[test]
    fn insert_appends_in_order_with_fresh_ids() {
        let store = MovieStore::new();
        let first = store.insert(draft("First", vec![Genre::Drama])).expect("insert");
        let second = store
            .insert(draft("Second", vec![Genre::Comedy]))
            .expect("insert");
        assert_ne!(first.id, second.id);

        let titles: Vec<String> = store
            .list(None)
            .expect("list")
            .into_iter()
            .map(|movie| movie.title)
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn list_filter_is_case_insensitive() {
        let store = MovieStore::new();
        store
            .insert(draft("Laughs", vec![Genre::Comedy, Genre::Drama]))
            .expect("insert");
        store
            .insert(draft("Tears", vec![Genre::Drama]))
            .expect("insert");

        let comedies = store.list(Some("cOmEdY")).expect("list");
        assert_eq!(comedies.len(), 1);
        assert_eq!(comedies[0].title, "Laughs");

        assert!(store.list(Some("Western")).expect("list").is_empty());
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        let store = MovieStore::new();
        let err = store.get(&MovieId::generate()).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
    }

    #[test]
    fn update_merges_into_the_stored_record() {
        let store = MovieStore::new();
        let movie = store.insert(draft("Patchable", vec![Genre::Action])).expect("insert");

        let updated = store
            .update(
                &movie.id,
                MoviePatch {
                    rate: Some(9.5),
                    ..MoviePatch::default()
                },
            )
            .expect("update");

        assert!((updated.rate - 9.5).abs() < f64::EPSILON);
        assert_eq!(updated.title, movie.title);
        assert_eq!(store.get(&movie.id).expect("get"), updated);
    }

    #[test]
    fn remove_deletes_exactly_one_record() {
        let store = MovieStore::new();
        let keep = store.insert(draft("Keep", vec![Genre::Drama])).expect("insert");
        let gone = store.insert(draft("Gone", vec![Genre::Drama])).expect("insert");

        store.remove(&gone.id).expect("remove");
        assert_eq!(store.len().expect("len"), 1);
        assert!(store.get(&keep.id).is_ok());
        assert!(matches!(
            store.get(&gone.id).unwrap_err(),
            Error::ResourceNotFound { .. }
        ));
    }

    #[test]
    fn remove_unknown_id_leaves_the_collection_unchanged() {
        let store = MovieStore::with_default_seed().expect("seed");
        let before = store.len().expect("len");

        let err = store.remove(&MovieId::generate()).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
        assert_eq!(store.len().expect("len"), before);
    }

    #[test]
    fn duplicate_seed_ids_are_rejected() {
        let movie = serde_json::json!({
            "id": "01ARZ3NDEKTSV4RRFFQ69G5FAV",
            "title": "Twin",
            "year": 2000,
            "duration": 100,
            "rate": 5.0,
            "poster": "https://images.example.com/twin.jpg",
            "genre": ["Drama"],
        });
        let seed = serde_json::json!([movie.clone(), movie]).to_string();

        let err = MovieStore::from_seed_json(&seed).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { .. }));
    }

    #[test]
    fn malformed_seed_is_a_serialization_error() {
        let err = MovieStore::from_seed_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Serialization { .. }));
    }
}
