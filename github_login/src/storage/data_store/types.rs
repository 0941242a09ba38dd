use sqlx::{Pool, Postgres, Sqlite};

/// Handle on the relational store backing users and OAuth2 accounts
///
/// Constructed once at startup (see [`DataStore::from_env`]) and cloned into
/// each store that needs it; the underlying sqlx pools are cheap to clone.
#[derive(Clone, Debug)]
pub enum DataStore {
    Sqlite(Pool<Sqlite>),
    Postgres(Pool<Postgres>),
}

impl DataStore {
    pub(crate) fn as_sqlite(&self) -> Option<&Pool<Sqlite>> {
        match self {
            Self::Sqlite(pool) => Some(pool),
            Self::Postgres(_) => None,
        }
    }

    pub(crate) fn as_postgres(&self) -> Option<&Pool<Postgres>> {
        match self {
            Self::Sqlite(_) => None,
            Self::Postgres(pool) => Some(pool),
        }
    }
}
