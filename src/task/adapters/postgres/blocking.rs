//! Helpers for running synchronous Diesel work off the async executor.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool shared by the task adapters.
pub type TodoPgPool = Pool<ConnectionManager<PgConnection>>;

/// Error types that can absorb pool and join failures.
pub(super) trait PersistenceFailure: Sized {
    fn from_failure(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Checks out a connection and runs `f` on the blocking thread pool.
pub(super) async fn run_blocking<F, T, E>(pool: &TodoPgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure + Send + 'static,
{
    let shared = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared.get().map_err(E::from_failure)?;
        f(&mut connection)
    })
    .await
    .map_err(E::from_failure)?
}
