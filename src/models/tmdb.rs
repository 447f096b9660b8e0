/// Raw TMDB wire types
///
/// Kept separate from the domain types so the controller never sees TMDB's
/// shape directly. TMDB signals application-level failure inside a 200
/// response via `success: false` plus `status_message`; list and detail
/// envelopes both carry it, so the fields default to absent here.
use serde::Deserialize;

use crate::models::{
    Genre, MovieDetail, MovieSummary, ProductionCompany, ProductionCountry, SpokenLanguage,
};

/// List envelope from /discover/movie and /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status_message: Option<String>,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

impl TmdbPage {
    /// True when the body is a 200-level application failure
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<TmdbMovie> for MovieSummary {
    fn from(movie: TmdbMovie) -> Self {
        MovieSummary {
            id: movie.id,
            title: movie.title,
            poster_path: movie.poster_path,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            original_language: movie.original_language.unwrap_or_default(),
            // TMDB sends "" for unknown release dates
            release_date: movie.release_date.filter(|date| !date.is_empty()),
        }
    }
}

/// Detail envelope from /movie/{id}?append_to_response=videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    #[serde(rename = "type")]
    pub video_type: String,
    pub key: String,
}

impl From<TmdbMovieDetail> for MovieDetail {
    fn from(detail: TmdbMovieDetail) -> Self {
        let trailer_url = detail
            .videos
            .unwrap_or_default()
            .results
            .into_iter()
            .find(|video| video.video_type == "Trailer")
            .map(|video| {
                format!(
                    "https://www.youtube.com/embed/{}?autoplay=1&rel=0",
                    video.key
                )
            });

        MovieDetail {
            id: detail.id,
            title: detail.title,
            poster_path: detail.poster_path,
            backdrop_path: detail.backdrop_path,
            vote_average: detail.vote_average,
            vote_count: detail.vote_count,
            release_date: detail.release_date.filter(|date| !date.is_empty()),
            runtime: detail.runtime,
            overview: detail.overview,
            genres: detail.genres,
            production_countries: detail.production_countries,
            spoken_languages: detail.spoken_languages,
            production_companies: detail.production_companies,
            budget: detail.budget,
            revenue: detail.revenue,
            homepage: detail.homepage,
            tagline: detail.tagline,
            status: detail.status,
            trailer_url,
        }
    }
}
