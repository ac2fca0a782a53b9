use crate::record::DbDataError;
use postdesk_common::model::Id;
use sqlx::{
    FromRow, Sqlite,
    query::Query,
    sqlite::{SqliteArguments, SqliteRow},
};

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// A model type stored in its own table with an integer primary key.
///
/// [`Entity::COLUMNS`] lists every column except the id, in the order
/// [`Entity::bind_columns`] binds them.
pub trait Entity: Clone + PartialEq + Send + Sync + Unpin + 'static {
    type Marker: Send + Sync + 'static;
    type Record: for<'r> FromRow<'r, SqliteRow> + TryInto<Self, Error = DbDataError>
        + Send
        + Unpin
        + 'static;

    const TABLE: &'static str;
    const ID_COLUMN: &'static str;
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Id<Self::Marker>;

    #[must_use]
    fn with_id(self, id: Id<Self::Marker>) -> Self;

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;
}
