//! Request orchestration: fetch from the catalog, shape, cache, and overlay
//! the caller's annotations.

use std::sync::Arc;

use marquee_core::annotation::AnnotationFilter;
use marquee_core::error::CoreError;
use marquee_core::listing::{validate_page, validate_search_query, ListingKind, Page};
use marquee_core::merge::{join_annotated, merge, overlay, MovieView};
use marquee_core::raw::RawPage;
use marquee_core::types::{CatalogId, UserId};
use marquee_db::{CatalogCache, MovieRepository, UserAnnotationStore};
use marquee_tmdb::{CatalogClient, CatalogError, CatalogRequest};

use crate::error::{AppError, AppResult};

/// Entry point for every movie read the API serves.
///
/// Each operation runs fetch, shape, upsert, and merge strictly in order
/// and calls the catalog at most once.
pub struct MovieService {
    catalog: Arc<dyn CatalogClient>,
    cache: CatalogCache,
    annotations: UserAnnotationStore,
}

impl MovieService {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        movies: Arc<dyn MovieRepository>,
        annotations: UserAnnotationStore,
    ) -> Self {
        Self {
            catalog,
            cache: CatalogCache::new(movies),
            annotations,
        }
    }

    pub fn annotations(&self) -> &UserAnnotationStore {
        &self.annotations
    }

    /// One page of a catalog listing.
    pub async fn listing(
        &self,
        user_id: UserId,
        kind: ListingKind,
        page: Option<u32>,
    ) -> AppResult<Page<MovieView>> {
        let page = validate_page(page)?;
        self.fetch_page(user_id, CatalogRequest::listing(kind, page))
            .await
    }

    /// One page of search results for a non-blank query.
    pub async fn search(
        &self,
        user_id: UserId,
        query: Option<&str>,
        page: Option<u32>,
    ) -> AppResult<Page<MovieView>> {
        let query = validate_search_query(query)?;
        let page = validate_page(page)?;
        self.fetch_page(user_id, CatalogRequest::search(query, page))
            .await
    }

    /// Fetch a paged endpoint, cache every usable record, and overlay the
    /// caller's annotations with a single bulk lookup.
    async fn fetch_page(
        &self,
        user_id: UserId,
        request: CatalogRequest,
    ) -> AppResult<Page<MovieView>> {
        let raw = self.catalog.fetch(&request).await?;
        let raw_page = RawPage::from_value(raw)?;

        let outcome = self.cache.upsert_page(&raw_page.results).await;
        tracing::debug!(
            path = %request.endpoint.path(),
            cached = outcome.movies.len(),
            skipped = outcome.skipped,
            "Catalog page processed"
        );

        let ids: Vec<CatalogId> = outcome.movies.iter().map(|m| m.catalog_id()).collect();
        let annotations = self.annotations.find_for_movies(user_id, &ids).await?;

        Ok(Page::from_upstream(&raw_page, overlay(outcome.movies, &annotations)))
    }

    /// Full details for one movie.
    ///
    /// If the catalog reports the id unknown, a previously cached copy is
    /// served instead; with no cached copy the movie is not found. Any
    /// other catalog failure is returned as is.
    pub async fn details(&self, user_id: UserId, catalog_id: CatalogId) -> AppResult<MovieView> {
        let movie = match self.catalog.fetch(&CatalogRequest::details(catalog_id)).await {
            Ok(raw) => self.cache.shape_and_upsert(&raw, true).await?,
            Err(CatalogError::NotFound { .. }) => {
                let cached = self
                    .cache
                    .repository()
                    .find_by_catalog_id(catalog_id)
                    .await?;
                match cached {
                    Some(movie) => {
                        tracing::info!(
                            catalog_id,
                            "Catalog no longer knows movie, serving cached copy"
                        );
                        movie
                    }
                    None => {
                        return Err(AppError::Core(CoreError::NotFound {
                            entity: "Movie",
                            id: catalog_id,
                        }))
                    }
                }
            }
            Err(e) => return Err(e.into()),
        };

        let annotation = self.annotations.get(user_id, catalog_id).await?;
        Ok(merge(movie, annotation.as_ref()))
    }

    /// Cached movies behind the caller's annotations matching `filter`, in
    /// annotation order. Annotated movies that were never cached are left
    /// out.
    pub async fn annotated(
        &self,
        user_id: UserId,
        filter: AnnotationFilter,
    ) -> AppResult<Vec<MovieView>> {
        let annotations = self.annotations.list_matching(user_id, filter).await?;
        let ids: Vec<CatalogId> = annotations.iter().map(|a| a.catalog_id).collect();
        let movies = self.cache.repository().find_many(&ids).await?;
        Ok(join_annotated(&annotations, movies))
    }

    /// Whether the movie store answers.
    pub async fn store_healthy(&self) -> bool {
        match self.cache.repository().ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store ping failed");
                false
            }
        }
    }
}
