//! Offloads synchronous Diesel work from the async executor.

use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use tokio::task::JoinError;

/// `PostgreSQL` connection pool shared by request and chat adapters.
pub type ServiceRequestPgPool = Pool<ConnectionManager<PgConnection>>;

type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Checks out a connection and runs `f` on the blocking thread pool.
///
/// Pool and join failures are mapped into the caller's error type.
pub(super) async fn run_blocking_with<F, T, E, P, J>(
    pool: &ServiceRequestPgPool,
    f: F,
    map_pool_err: P,
    map_join_err: J,
) -> Result<T, E>
where
    F: FnOnce(&mut PooledConn) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    P: FnOnce(PoolError) -> E + Send + 'static,
    J: FnOnce(JoinError) -> E,
{
    let owned_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = owned_pool.get().map_err(map_pool_err)?;
        f(&mut connection)
    })
    .await
    .map_err(map_join_err)?
}
