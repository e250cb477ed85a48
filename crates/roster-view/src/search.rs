//! Search view (`/`)
//!
//! Same lifecycle as the detail views, keyed by a [`SearchQuery`] instead of
//! a record identifier.

use crate::descriptor::{error_indicator, loading_indicator};
use crate::fetch::{FetchHandle, FetchOutcome, Loader, Phase, ViewId};
use crate::markup::{Element, Markup};
use crate::route::RouteTable;
use roster_client::RecordSource;
use roster_model::{SearchHit, SearchQuery, SearchResults, SearchSection};
use std::sync::Arc;

pub const SEARCH_LOADING: &str = "Searching...";
pub const SEARCH_FAILED: &str = "Search failed. Please try again later.";
pub const NO_RESULTS: &str = "No results found.";

pub struct SearchView {
    source: Arc<dyn RecordSource>,
    routes: RouteTable,
    query: Option<SearchQuery>,
    loader: Loader<SearchResults>,
}

impl std::fmt::Debug for SearchView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchView")
            .field("query", &self.query)
            .field("view_id", &self.loader.view_id())
            .finish_non_exhaustive()
    }
}

impl SearchView {
    /// `routes` decides which hit URLs become links
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>, routes: RouteTable) -> Self {
        Self {
            source,
            routes,
            query: None,
            loader: Loader::new("search"),
        }
    }

    /// Enter Loading and issue the search
    pub fn mount(&mut self, query: SearchQuery) -> FetchHandle {
        self.query = Some(query.clone());
        let source = Arc::clone(&self.source);
        let fetch = async move { source.search(&query).await };
        self.loader.start(fetch, SEARCH_FAILED.to_string())
    }

    /// Prop change; `None` when the query is unchanged
    pub fn set_query(&mut self, query: SearchQuery) -> Option<FetchHandle> {
        if self.query.as_ref() == Some(&query) && self.loader.is_mounted() {
            return None;
        }
        Some(self.mount(query))
    }

    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    #[must_use]
    pub fn query(&self) -> Option<&SearchQuery> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn view_id(&self) -> ViewId {
        self.loader.view_id()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.loader.is_mounted()
    }

    #[must_use]
    pub fn outcome(&self) -> FetchOutcome<SearchResults> {
        self.loader.outcome()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.loader.outcome().phase()
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        if !self.loader.is_mounted() {
            return Markup::empty();
        }
        match self.loader.outcome() {
            FetchOutcome::Pending => loading_indicator(SEARCH_LOADING),
            FetchOutcome::Failed { message } => error_indicator(message),
            FetchOutcome::Succeeded(results) => self.render_results(&results),
        }
    }

    fn render_results(&self, results: &SearchResults) -> Markup {
        let page = Element::new("div").class("search-results");
        if results.is_empty() {
            return page
                .child(Element::new("p").class("empty").text(NO_RESULTS))
                .into();
        }
        page.children(
            results
                .sections
                .iter()
                .filter(|section| !section.results.is_empty())
                .map(|section| self.render_section(section)),
        )
        .into()
    }

    fn render_section(&self, section: &SearchSection) -> Element {
        Element::new("section")
            .class("search-section")
            .child(Element::new("h2").text(format!("{} ({})", section.title, section.count)))
            .child(Element::new("ul").children(section.results.iter().map(|hit| self.render_hit(hit))))
    }

    /// Links use the canonical href of the resolved route, never the raw URL
    fn render_hit(&self, hit: &SearchHit) -> Element {
        let route = self.routes.resolve_location(&hit.url);
        let title = match route.is_detail().then(|| route.href()).flatten() {
            Some(href) => Element::new("a").attr("href", href).text(&hit.title),
            None => Element::new("span").class("title").text(&hit.title),
        };
        let item = Element::new("li").child(title);
        match &hit.subtitle {
            Some(subtitle) => item.child(Element::new("span").class("subtitle").text(subtitle)),
            None => item,
        }
    }
}
