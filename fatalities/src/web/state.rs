use axum::extract::FromRef;
use fatality_charts::Dataset;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct WebState {
    /// Loaded once at startup, read by every request.
    pub(crate) dataset: Arc<Dataset>,
}

impl FromRef<WebState> for Arc<Dataset> {
    fn from_ref(input: &WebState) -> Self {
        input.dataset.clone()
    }
}
