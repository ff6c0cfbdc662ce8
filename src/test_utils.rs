#[cfg(test)]
pub mod test_helpers {
    use crate::db::{create_pool, run_migrations};
    use crate::store::TaskStore;
    use tempfile::TempDir;

    pub struct TestContext {
        pub store: TaskStore,
        pub _temp_dir: TempDir,
    }

    impl TestContext {
        pub async fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();

            let forest_dir = temp_dir.path().join(".task-forest");
            std::fs::create_dir_all(&forest_dir).unwrap();

            let db_path = forest_dir.join("tasks.db");

            let pool = create_pool(&db_path).await.unwrap();
            run_migrations(&pool).await.unwrap();

            Self {
                store: TaskStore::new(pool),
                _temp_dir: temp_dir,
            }
        }

        pub fn store(&self) -> &TaskStore {
            &self.store
        }
    }
}
