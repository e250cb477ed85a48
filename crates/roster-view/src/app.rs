//! Navigator: one mounted view at a time
//!
//! [`App::navigate`] resolves a location through the [`RouteTable`]. Staying on
//! the same kind of page forwards the new identifier (or query) as a prop
//! change; anything else unmounts the current view and mounts the next one.
//! Not-found paths and invalid queries never issue a request.

use crate::descriptor::error_indicator;
use crate::detail::DetailView;
use crate::fetch::{FetchHandle, Phase};
use crate::markup::{Element, Markup};
use crate::route::{Location, Route, RouteTable};
use crate::search::SearchView;
use crate::{CompanyDescriptor, EmployeeDescriptor};
use roster_client::RecordSource;
use roster_model::{QueryError, RecordId, SearchQuery};
use std::sync::Arc;

/// Whatever is currently mounted
#[derive(Debug)]
pub enum ActiveView {
    /// Nothing navigated to yet
    Blank,
    Search(SearchView),
    Company(DetailView<CompanyDescriptor>),
    Employee(DetailView<EmployeeDescriptor>),
    NotFound { path: String },
    InvalidQuery { message: String },
}

impl ActiveView {
    fn unmount(&mut self) {
        match self {
            Self::Search(view) => view.unmount(),
            Self::Company(view) => view.unmount(),
            Self::Employee(view) => view.unmount(),
            Self::Blank | Self::NotFound { .. } | Self::InvalidQuery { .. } => {}
        }
    }

    /// Phase of a fetching view; not-found and invalid-query count as Error
    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Blank => None,
            Self::Search(view) => Some(view.phase()),
            Self::Company(view) => Some(view.phase()),
            Self::Employee(view) => Some(view.phase()),
            Self::NotFound { .. } | Self::InvalidQuery { .. } => Some(Phase::Error),
        }
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        match self {
            Self::Blank => Markup::empty(),
            Self::Search(view) => view.render(),
            Self::Company(view) => view.render(),
            Self::Employee(view) => view.render(),
            Self::NotFound { path } => Element::new("div")
                .class("not-found")
                .child(Element::new("h1").text("Page not found"))
                .child(Element::new("p").text(format!("Nothing lives at {path}.")))
                .into(),
            Self::InvalidQuery { message } => error_indicator(message.clone()),
        }
    }
}

/// Where a location leads, before anything is mounted
enum Destination {
    Search(Result<SearchQuery, QueryError>),
    Company(RecordId),
    Employee(RecordId),
    NotFound(String),
}

pub struct App {
    source: Arc<dyn RecordSource>,
    routes: RouteTable,
    location: Option<String>,
    view: ActiveView,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("location", &self.location)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl App {
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            routes: RouteTable::default(),
            location: None,
            view: ActiveView::Blank,
        }
    }

    #[must_use]
    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    /// Go to `location`; returns the read it started, if any
    ///
    /// Must be called from within a tokio runtime.
    pub fn navigate(&mut self, location: &str) -> Option<FetchHandle> {
        tracing::debug!("Navigating to {}", location);
        self.location = Some(location.to_string());

        let destination = self.destination(location);
        match (&destination, &mut self.view) {
            (Destination::Company(id), ActiveView::Company(view)) => return view.set_id(*id),
            (Destination::Employee(id), ActiveView::Employee(view)) => return view.set_id(*id),
            (Destination::Search(Ok(query)), ActiveView::Search(view)) => {
                return view.set_query(query.clone());
            }
            _ => {}
        }

        self.view.unmount();
        let (view, handle) = match destination {
            Destination::Search(Ok(query)) => {
                let mut view = SearchView::new(Arc::clone(&self.source), self.routes.clone());
                let handle = view.mount(query);
                (ActiveView::Search(view), Some(handle))
            }
            Destination::Search(Err(err)) => {
                tracing::warn!("Invalid search query: {}", err);
                (
                    ActiveView::InvalidQuery {
                        message: err.to_string(),
                    },
                    None,
                )
            }
            Destination::Company(id) => {
                let mut view = DetailView::<CompanyDescriptor>::new(Arc::clone(&self.source));
                let handle = view.mount(id);
                (ActiveView::Company(view), Some(handle))
            }
            Destination::Employee(id) => {
                let mut view = DetailView::<EmployeeDescriptor>::new(Arc::clone(&self.source));
                let handle = view.mount(id);
                (ActiveView::Employee(view), Some(handle))
            }
            Destination::NotFound(path) => {
                tracing::info!("No route for {}", path);
                (ActiveView::NotFound { path }, None)
            }
        };
        self.view = view;
        handle
    }

    fn destination(&self, location: &str) -> Destination {
        let Some(parsed) = Location::parse(location) else {
            return Destination::NotFound(location.to_string());
        };
        match self.routes.resolve(&parsed.path) {
            Route::Search => Destination::Search(SearchQuery::from_pairs(parsed.query)),
            Route::CompanyDetail { id } => Destination::Company(id),
            Route::EmployeeDetail { id } => Destination::Employee(id),
            Route::NotFound => Destination::NotFound(parsed.path),
        }
    }

    /// Unmount whatever is showing
    pub fn close(&mut self) {
        self.view.unmount();
    }

    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    #[must_use]
    pub fn phase(&self) -> Option<Phase> {
        self.view.phase()
    }

    #[must_use]
    pub fn render(&self) -> Markup {
        self.view.render()
    }
}
