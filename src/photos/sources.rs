//! Public image sources: Wikipedia, Wikimedia Commons and Openverse.
//!
//! None of them need a key. Each lookup returns `Ok(None)` when the source
//! simply has nothing, and an error when the request itself fails.

use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::debug;

use crate::config::PhotoConfig;
use crate::{Result, TripPlannerError};

/// Where each source lives; production hosts unless configured otherwise.
#[derive(Debug, Clone)]
pub(crate) struct Endpoints {
    wikipedia: String,
    commons: String,
    openverse: String,
}

impl Endpoints {
    pub(crate) fn from_config(config: &PhotoConfig) -> Self {
        Self {
            wikipedia: config.wikipedia_url.trim_end_matches('/').to_string(),
            commons: config.commons_api_url.clone(),
            openverse: config.openverse_api_url.clone(),
        }
    }

    fn wikipedia(&self, lang: &str) -> String {
        self.wikipedia.replace("{lang}", lang)
    }

    pub(crate) fn wiki_title_search_url(&self, lang: &str, query: &str) -> String {
        format!(
            "{}/w/rest.php/v1/search/title?q={}&limit=1",
            self.wikipedia(lang),
            urlencoding::encode(query)
        )
    }

    pub(crate) fn wiki_summary_url(&self, lang: &str, title: &str) -> String {
        format!(
            "{}/api/rest_v1/page/summary/{}",
            self.wikipedia(lang),
            urlencoding::encode(title)
        )
    }

    pub(crate) fn commons_search_url(&self, query: &str, width: u32) -> String {
        format!(
            "{}?action=query&format=json&origin=*&prop=imageinfo&generator=search\
             &gsrsearch={}&gsrnamespace=6&gsrlimit=1&iiprop=url&iiurlwidth={width}",
            self.commons,
            urlencoding::encode(query)
        )
    }

    pub(crate) fn openverse_search_url(&self, query: &str) -> String {
        // flickr thumbnails are frequently refused
        format!(
            "{}?q={}&page_size=1&excluded_source=flickr",
            self.openverse,
            urlencoding::encode(query)
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TitleSearch {
    #[serde(default)]
    pages: Vec<TitleHit>,
}

#[derive(Debug, Deserialize)]
struct TitleHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ImageSource {
    #[serde(default)]
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageSummary {
    #[serde(default)]
    thumbnail: Option<ImageSource>,
    #[serde(default)]
    originalimage: Option<ImageSource>,
}

impl PageSummary {
    /// Thumbnail first, then the original image.
    pub(crate) fn image(self) -> Option<String> {
        [self.thumbnail, self.originalimage]
            .into_iter()
            .flatten()
            .filter_map(|image| image.source)
            .find(|source| !source.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CommonsResponse {
    #[serde(default)]
    query: Option<CommonsQuery>,
}

#[derive(Debug, Deserialize)]
struct CommonsQuery {
    #[serde(default)]
    pages: BTreeMap<String, CommonsPage>,
}

#[derive(Debug, Deserialize)]
struct CommonsPage {
    #[serde(default)]
    imageinfo: Vec<ImageInfo>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    #[serde(default)]
    thumburl: Option<String>,
}

impl CommonsResponse {
    pub(crate) fn thumbnail(self) -> Option<String> {
        self.query?
            .pages
            .into_values()
            .next()?
            .imageinfo
            .into_iter()
            .next()?
            .thumburl
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenverseResponse {
    #[serde(default)]
    results: Vec<OpenverseImage>,
}

#[derive(Debug, Deserialize)]
struct OpenverseImage {
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl OpenverseResponse {
    pub(crate) fn image(self) -> Option<String> {
        let first = self.results.into_iter().next()?;
        first
            .thumbnail
            .filter(|url| !url.is_empty())
            .or_else(|| first.url.filter(|url| !url.is_empty()))
    }
}

async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(TripPlannerError::api(format!(
            "Image source returned {status} for {url}"
        )));
    }
    Ok(response.json().await?)
}

/// Lead image of the best-matching Wikipedia article in `lang`.
pub(crate) async fn wikipedia_image(
    client: &Client,
    endpoints: &Endpoints,
    lang: &str,
    query: &str,
) -> Result<Option<String>> {
    let search: TitleSearch = fetch_json(client, &endpoints.wiki_title_search_url(lang, query)).await?;
    let Some(hit) = search.pages.into_iter().next() else {
        debug!(lang, query, "No Wikipedia article");
        return Ok(None);
    };

    let summary: PageSummary = fetch_json(client, &endpoints.wiki_summary_url(lang, &hit.title)).await?;
    Ok(summary.image())
}

pub(crate) async fn commons_image(
    client: &Client,
    endpoints: &Endpoints,
    query: &str,
    width: u32,
) -> Result<Option<String>> {
    let response: CommonsResponse = fetch_json(client, &endpoints.commons_search_url(query, width)).await?;
    Ok(response.thumbnail())
}

pub(crate) async fn openverse_image(
    client: &Client,
    endpoints: &Endpoints,
    query: &str,
) -> Result<Option<String>> {
    let response: OpenverseResponse = fetch_json(client, &endpoints.openverse_search_url(query)).await?;
    Ok(response.image())
}
