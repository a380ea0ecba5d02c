use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

pub async fn pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("unable to connect to test db");

    data_access::MIGRATOR
        .run(&pool)
        .await
        .expect("unable to run migrations");

    pool
}
