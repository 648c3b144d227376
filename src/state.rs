use crate::{cache::CategoryCache, db::DbPool};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub categories: CategoryCache,
}
