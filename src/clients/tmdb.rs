use anyhow::Result;
use futures::{StreamExt, stream};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::config::TmdbConfig;
use crate::constants::limits;

#[derive(Debug, Deserialize)]
struct Page<T> {
    results: Vec<T>,
}

/// One entry of a trending/search listing. Movies carry `title` and
/// `release_date`, series carry `name` and `first_air_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSummary {
    pub id: i64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub media_type: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    pub vote_average: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<i32>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvDetail {
    pub id: i64,
    pub name: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub first_air_date: Option<String>,
    pub number_of_seasons: Option<i32>,
    pub number_of_episodes: Option<i32>,
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A stored media id resolved against both detail endpoints. The id alone
/// does not say whether it names a movie or a series, so both lookups run
/// and whichever matched is populated.
#[derive(Debug, Serialize)]
pub struct MediaLookup {
    pub media_id: i64,
    pub movie: Option<MovieDetail>,
    pub tv: Option<TvDetail>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
    include_adult: bool,
}

impl TmdbClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &TmdbConfig, api_key: String) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
            include_adult: config.include_adult,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<Option<T>> {
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TMDB API error: {} - {}", status, body));
        }

        Ok(Some(response.json().await?))
    }

    pub async fn trending(&self) -> Result<Vec<MediaSummary>> {
        let url = format!(
            "{}/trending/all/week?api_key={}&language={}",
            self.base_url, self.api_key, self.language
        );

        let page: Page<MediaSummary> = self
            .get_json(url)
            .await?
            .ok_or_else(|| anyhow::anyhow!("TMDB trending endpoint not found"))?;

        Ok(page.results)
    }

    pub async fn search_multi(&self, query: &str) -> Result<Vec<MediaSummary>> {
        let url = format!(
            "{}/search/multi?api_key={}&query={}&include_adult={}&language={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query),
            self.include_adult,
            self.language
        );

        let page: Page<MediaSummary> = self
            .get_json(url)
            .await?
            .ok_or_else(|| anyhow::anyhow!("TMDB search endpoint not found"))?;

        Ok(page.results)
    }

    pub async fn movie(&self, movie_id: i64) -> Result<Option<MovieDetail>> {
        let url = format!(
            "{}/movie/{}?api_key={}&language={}",
            self.base_url, movie_id, self.api_key, self.language
        );
        self.get_json(url).await
    }

    pub async fn tv(&self, series_id: i64) -> Result<Option<TvDetail>> {
        let url = format!(
            "{}/tv/{}?api_key={}&language={}",
            self.base_url, series_id, self.api_key, self.language
        );
        self.get_json(url).await
    }

    /// Look up one ambiguous media id against both detail endpoints.
    pub async fn resolve(&self, media_id: i64) -> Result<MediaLookup> {
        let (movie, tv) = tokio::try_join!(self.movie(media_id), self.tv(media_id))?;

        Ok(MediaLookup {
            media_id,
            movie,
            tv,
        })
    }

    /// Resolve a batch of ids with bounded concurrency, preserving order.
    pub async fn resolve_batch(&self, media_ids: &[i64]) -> Result<Vec<MediaLookup>> {
        let lookups: Vec<Result<MediaLookup>> = stream::iter(media_ids.to_vec())
            .map(|id| self.resolve(id))
            .buffered(limits::DETAIL_FETCH_CONCURRENCY)
            .collect()
            .await;

        lookups.into_iter().collect()
    }

    /// Fetch movie details for a batch of ids with bounded concurrency,
    /// preserving order. Ids that are not movies yield `None`.
    pub async fn movie_batch(&self, media_ids: &[i64]) -> Result<Vec<(i64, Option<MovieDetail>)>> {
        let fetches: Vec<Result<(i64, Option<MovieDetail>)>> = stream::iter(media_ids.to_vec())
            .map(|id| async move { Ok::<_, anyhow::Error>((id, self.movie(id).await?)) })
            .buffered(limits::DETAIL_FETCH_CONCURRENCY)
            .collect()
            .await;

        fetches.into_iter().collect()
    }
}
