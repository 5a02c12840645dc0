//! Movie domain record, genre enumeration, draft, and patch types.

use serde::{Deserialize, Serialize};

use crate::id::MovieId;

/// Genre tags form a closed set; payloads naming anything else are rejected
/// on the write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    /// Action.
    Action,
    /// Adventure.
    Adventure,
    /// Comedy.
    Comedy,
    /// Drama.
    Drama,
    /// Fantasy.
    Fantasy,
    /// Horror.
    Horror,
    /// Thriller.
    Thriller,
    /// Science fiction, spelled `Sci-Fi` on the wire.
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    /// Every member of the closed set, in canonical order.
    pub const ALL: [Self; 8] = [
        Self::Action,
        Self::Adventure,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::Thriller,
        Self::SciFi,
    ];

    /// Returns the canonical wire name of this genre.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Adventure => "Adventure",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Thriller => "Thriller",
            Self::SciFi => "Sci-Fi",
        }
    }

    /// Looks up a genre by its exact canonical name.
    ///
    /// Write-path validation is case-sensitive; only the canonical spelling
    /// is accepted.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|genre| genre.name() == name)
    }

    /// Case-insensitive name match, used by the list filter.
    #[must_use]
    pub fn matches_filter(self, filter: &str) -> bool {
        self.name().eq_ignore_ascii_case(filter)
    }
}

/// Fully materialized, authoritative catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Stable movie identifier, assigned by the server.
    pub id: MovieId,
    /// Non-empty title.
    pub title: String,
    /// Release year, within [1900, 2024].
    pub year: i32,
    /// Runtime in minutes, at least 1.
    pub duration: u32,
    /// Rating in [0, 10].
    pub rate: f64,
    /// Poster URL.
    pub poster: String,
    /// Non-empty list of genre tags.
    pub genre: Vec<Genre>,
}

impl Movie {
    /// Materializes a record from a validated draft and a fresh id.
    #[must_use]
    pub fn from_draft(id: MovieId, draft: MovieDraft) -> Self {
        Self {
            id,
            title: draft.title,
            year: draft.year,
            duration: draft.duration,
            rate: draft.rate,
            poster: draft.poster,
            genre: draft.genre,
        }
    }

    /// Merges a patch into this record.
    ///
    /// Only `Some` fields overwrite; the id never changes.
    pub fn apply_patch(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }
}

/// Insert payload used to create a new [`Movie`].
///
/// Produced only by [`crate::validate::validate_movie`], so every field
/// already satisfies its constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDraft {
    /// Non-empty title.
    pub title: String,
    /// Release year, within [1900, 2024].
    pub year: i32,
    /// Runtime in minutes, at least 1.
    pub duration: u32,
    /// Rating in [0, 10]; defaulted to 0 when absent from the payload.
    pub rate: f64,
    /// Poster URL.
    pub poster: String,
    /// Non-empty list of genre tags.
    pub genre: Vec<Genre>,
}

/// Sparse patch where each `Some` field overwrites the record value.
///
/// Produced only by [`crate::validate::validate_partial_movie`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoviePatch {
    /// Optional replacement title.
    pub title: Option<String>,
    /// Optional replacement year.
    pub year: Option<i32>,
    /// Optional replacement duration.
    pub duration: Option<u32>,
    /// Optional replacement rate.
    pub rate: Option<f64>,
    /// Optional replacement poster URL.
    pub poster: Option<String>,
    /// Optional replacement genre list.
    pub genre: Option<Vec<Genre>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_names_round_trip_through_from_name() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_name(genre.name()), Some(genre));
        }
    }

    #[test]
    fn genre_serde_names_agree_with_canonical_names() {
        for genre in Genre::ALL {
            let json = serde_json::to_string(&genre).expect("serialize genre");
            assert_eq!(json, format!("\"{}\"", genre.name()));
        }
    }

    #[test]
    fn from_name_is_case_sensitive() {
        assert_eq!(Genre::from_name("comedy"), None);
        assert_eq!(Genre::from_name("SCI-FI"), None);
        assert_eq!(Genre::from_name("Sci-Fi"), Some(Genre::SciFi));
    }

    #[test]
    fn filter_match_is_case_insensitive() {
        assert!(Genre::Comedy.matches_filter("comedy"));
        assert!(Genre::SciFi.matches_filter("sci-fi"));
        assert!(!Genre::Drama.matches_filter("comedy"));
    }

    fn sample_movie() -> Movie {
        Movie {
            id: MovieId::generate(),
            title: "Blade Runner".to_string(),
            year: 1982,
            duration: 117,
            rate: 8.1,
            poster: "https://images.example.com/blade-runner.jpg".to_string(),
            genre: vec![Genre::SciFi, Genre::Thriller],
        }
    }

    #[test]
    fn apply_patch_overwrites_only_present_fields() {
        let mut movie = sample_movie();
        let before = movie.clone();

        movie.apply_patch(MoviePatch {
            rate: Some(9.5),
            ..MoviePatch::default()
        });

        assert_eq!(movie.rate, 9.5);
        assert_eq!(movie.id, before.id);
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.year, before.year);
        assert_eq!(movie.duration, before.duration);
        assert_eq!(movie.poster, before.poster);
        assert_eq!(movie.genre, before.genre);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut movie = sample_movie();
        let before = movie.clone();
        movie.apply_patch(MoviePatch::default());
        assert_eq!(movie, before);
    }
}
