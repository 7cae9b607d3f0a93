use std::sync::Arc;

use crate::config::SemesterConfig;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub semester: Arc<SemesterConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, semester: SemesterConfig) -> Self {
        Self {
            store,
            semester: Arc::new(semester),
        }
    }
}
