pub mod schema;
pub mod kudo;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

pub use kudo::service::PgKudoService;

pub type PgPool = Pool<ConnectionManager<PgConnection>>;

pub fn build_pool(database_url: &str, max_connections: u32) -> Result<PgPool, r2d2::Error> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_connections).build(manager)
}
