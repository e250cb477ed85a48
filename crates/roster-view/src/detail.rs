//! Generic record detail view

use crate::descriptor::{error_indicator, loading_indicator, RecordDescriptor};
use crate::fetch::{FetchHandle, FetchOutcome, Loader, Phase, ViewId};
use crate::markup::Markup;
use roster_client::{fetch_record, RecordSource};
use roster_model::RecordId;
use std::marker::PhantomData;
use std::sync::Arc;

/// Detail page for one record, parameterised by its descriptor
///
/// The identifier is the view's only prop. [`DetailView::mount`] issues one
/// read; [`DetailView::set_id`] restarts at Loading only when the identifier
/// actually changes.
pub struct DetailView<D: RecordDescriptor> {
    source: Arc<dyn RecordSource>,
    id: Option<RecordId>,
    loader: Loader<D::Record>,
    _descriptor: PhantomData<D>,
}

impl<D: RecordDescriptor> std::fmt::Debug for DetailView<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailView")
            .field("kind", &D::kind())
            .field("id", &self.id)
            .field("view_id", &self.loader.view_id())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<D: RecordDescriptor> DetailView<D> {
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            id: None,
            loader: Loader::new(D::kind().noun()),
            _descriptor: PhantomData,
        }
    }

    /// Enter Loading and issue the read for `id`
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&mut self, id: RecordId) -> FetchHandle {
        self.id = Some(id);
        let source = Arc::clone(&self.source);
        let fetch = async move { fetch_record::<D::Record>(&*source, id).await };
        self.loader.start(fetch, D::error_text())
    }

    /// Prop change; `None` when `id` is already the mounted identifier
    pub fn set_id(&mut self, id: RecordId) -> Option<FetchHandle> {
        if self.id == Some(id) && self.loader.is_mounted() {
            tracing::debug!(view = %self.loader.view_id(), %id, "identifier unchanged");
            return None;
        }
        Some(self.mount(id))
    }

    /// Tear down; a read still in flight completes without effect
    pub fn unmount(&mut self) {
        self.loader.unmount();
    }

    #[must_use]
    pub fn id(&self) -> Option<RecordId> {
        self.id
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
    pub fn outcome(&self) -> FetchOutcome<D::Record> {
        self.loader.outcome()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.loader.outcome().phase()
    }

    /// Markup for the current state; an unmounted view renders nothing
    #[must_use]
    pub fn render(&self) -> Markup {
        if !self.loader.is_mounted() {
            return Markup::empty();
        }
        match self.loader.outcome() {
            FetchOutcome::Pending => loading_indicator(D::loading_text()),
            FetchOutcome::Failed { message } => error_indicator(message),
            FetchOutcome::Succeeded(record) => D::render(&record),
        }
    }
}
