use crate::clock::SystemClock;
use crate::storage::FileStorage;
use crate::store::EntryStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type CalorieStore = EntryStore<FileStorage, SystemClock>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<CalorieStore>>,
}

impl AppState {
    pub fn new(store: CalorieStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
