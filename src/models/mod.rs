use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod display;
pub mod tmdb;

/// One movie as it appears in a discover/search result list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    /// Average rating on a 0-10 scale
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub original_language: String,
    /// ISO date string, e.g. "2010-07-16"
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Full poster URL at card size, or `None` when the movie has no poster
    pub fn poster_url(&self, image_base: &str) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}/w500{}", image_base, path))
    }

    /// Release year portion of the release date
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
    }
}

/// One page of list results, tied to a single (query, page) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPage {
    pub movies: Vec<MovieSummary>,
    pub total_pages: u32,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self {
            movies: Vec::new(),
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCountry {
    #[serde(default)]
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub iso_639_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
}

/// Full movie detail shown in the modal, including the resolved trailer URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub overview: Option<String>,
    pub genres: Vec<Genre>,
    pub production_countries: Vec<ProductionCountry>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub production_companies: Vec<ProductionCompany>,
    pub budget: u64,
    pub revenue: u64,
    pub homepage: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    /// Embed URL of the first attached video of type "Trailer", if any
    pub trailer_url: Option<String>,
}

/// One ranked entry of the trending list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingEntry {
    /// Stable document identifier, usable as a rendering key
    pub id: String,
    pub search_term: String,
    pub count: u64,
    pub poster_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// What the presentation layer should render for the result list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Loaded(ResultPage),
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Movies to render, empty unless a page is loaded
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            RequestState::Loaded(page) => &page.movies,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(poster: Option<&str>, date: Option<&str>) -> MovieSummary {
        MovieSummary {
            id: 27205,
            title: "Inception".to_string(),
            poster_path: poster.map(String::from),
            vote_average: Some(8.4),
            vote_count: Some(34_000),
            original_language: "en".to_string(),
            release_date: date.map(String::from),
        }
    }

    #[test]
    fn poster_url_joins_base_size_and_path() {
        let movie = summary(Some("/edv5CZvWj09upOsy2Y6IwDhK8bt.jpg"), None);
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p"),
            Some("https://image.tmdb.org/t/p/w500/edv5CZvWj09upOsy2Y6IwDhK8bt.jpg".to_string())
        );
    }

    #[test]
    fn poster_url_absent_without_poster_path() {
        let movie = summary(None, None);
        assert_eq!(movie.poster_url("https://image.tmdb.org/t/p"), None);
    }

    #[test]
    fn release_year_is_leading_date_segment() {
        let movie = summary(None, Some("2010-07-16"));
        assert_eq!(movie.release_year(), Some("2010"));
    }

    #[test]
    fn release_year_absent_without_date() {
        let movie = summary(None, None);
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn request_state_movies_empty_unless_loaded() {
        assert!(RequestState::Idle.movies().is_empty());
        assert!(RequestState::Loading.movies().is_empty());
        assert!(RequestState::Failed("boom".to_string()).movies().is_empty());

        let loaded = RequestState::Loaded(ResultPage {
            movies: vec![summary(None, None)],
            total_pages: 50,
        });
        assert_eq!(loaded.movies().len(), 1);
    }

    #[test]
    fn request_state_error_message_only_when_failed() {
        assert_eq!(RequestState::Loading.error_message(), None);
        assert_eq!(
            RequestState::Failed("Invalid query".to_string()).error_message(),
            Some("Invalid query")
        );
    }
}
