use crate::{
    client::{DbError, Result},
    entity::Entity,
};
use derive_where::derive_where;
use futures_util::{Stream, StreamExt};
use postdesk_common::model::Id;
use sqlx::{Row, SqlitePool, query, query_as};
use std::marker::PhantomData;
use tracing::debug;

/// Result of [`Store::update`].
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Updated<T> {
    pub entity: T,
    pub changed: bool,
}

/// Typed access to the table of one [`Entity`].
///
/// Every write is a single statement on the pool and is committed before the
/// call returns.
#[derive_where(Clone, Debug)]
pub struct Store<T> {
    pool: SqlitePool,
    select_sql: String,
    list_sql: String,
    phantom_data: PhantomData<fn() -> T>,
}

impl<T: Entity> Store<T> {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        let select_sql = format!(
            "SELECT {}, {} FROM {}",
            T::ID_COLUMN,
            T::COLUMNS.join(", "),
            T::TABLE
        );
        let list_sql = format!("{select_sql} ORDER BY {}", T::ID_COLUMN);

        Self {
            pool,
            select_sql,
            list_sql,
            phantom_data: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        let records = query_as::<_, T::Record>(&self.list_sql)
            .fetch_all(&self.pool)
            .await?;

        let entities = records
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<T>, _>>()?;
        Ok(entities)
    }

    /// Lazily yields every row, in id order.
    pub fn stream(&self) -> impl Stream<Item = Result<T>> + Send + '_ {
        query_as::<_, T::Record>(&self.list_sql)
            .fetch(&self.pool)
            .map(|record| -> Result<T> { Ok(record?.try_into()?) })
    }

    pub async fn find_by_id(&self, id: Id<T::Marker>) -> Result<Option<T>> {
        let sql = format!("{} WHERE {} = ?", self.select_sql, T::ID_COLUMN);
        let record = query_as::<_, T::Record>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await?;

        let entity = record.map(TryInto::try_into).transpose()?;
        Ok(entity)
    }

    /// Inserts `entity` under a freshly assigned id and returns the stored row.
    ///
    /// Any id already set on `entity` is ignored.
    pub async fn create(&self, entity: T) -> Result<T> {
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders,
            T::ID_COLUMN
        );

        let row = entity
            .bind_columns(query(&sql))
            .fetch_one(&self.pool)
            .await?;
        let id: i64 = row.try_get(0)?;

        debug!(table = T::TABLE, id, "Inserted row");
        Ok(entity.with_id(id.into()))
    }

    /// Overwrites every column of the row identified by `entity`'s id.
    ///
    /// Fails with [`DbError::RowNotFound`] if there is no such row. No write is
    /// issued when the stored row already equals `entity`.
    pub async fn update(&self, entity: T) -> Result<Updated<T>> {
        let id = entity.id();
        let existing = self.find_by_id(id).await?.ok_or(DbError::RowNotFound {
            table: T::TABLE,
            id: id.get(),
        })?;

        if existing == entity {
            return Ok(Updated {
                entity,
                changed: false,
            });
        }

        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            T::TABLE,
            assignments,
            T::ID_COLUMN
        );

        let result = entity
            .bind_columns(query(&sql))
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        debug!(table = T::TABLE, id = id.get(), "Updated row");
        Ok(Updated {
            entity,
            changed: result.rows_affected() > 0,
        })
    }

    /// Removes the row identified by `entity`'s id. Returns whether a row was removed.
    pub async fn delete(&self, entity: &T) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", T::TABLE, T::ID_COLUMN);
        let result = query(&sql)
            .bind(entity.id().get())
            .execute(&self.pool)
            .await?;

        debug!(table = T::TABLE, id = entity.id().get(), "Deleted row");
        Ok(result.rows_affected() > 0)
    }
}
