use crate::client::{DbClient, Result};
use postdesk_common::model::{Id, customer::CustomerMarker};
use sqlx::{SqliteConnection, query, query_scalar};
use tracing::{debug, error};

/// Existence checks and the cascading delete for customers.
#[derive(Clone, Debug)]
pub struct CustomerRegistry {
    client: DbClient,
}

impl CustomerRegistry {
    #[must_use]
    pub fn new(client: DbClient) -> Self {
        Self { client }
    }

    pub async fn exists(&self, customer_id: Id<CustomerMarker>) -> Result<bool> {
        let count: i64 = query_scalar("SELECT COUNT(*) FROM customers WHERE customer_id = ?")
            .bind(customer_id.get())
            .fetch_one(self.client.pool())
            .await?;

        Ok(count > 0)
    }

    /// Deletes the customer together with all of its posts in one transaction.
    ///
    /// Either both deletes are committed or neither is. Returns the number of
    /// posts that were removed.
    pub async fn delete_customer_and_posts(&self, customer_id: Id<CustomerMarker>) -> Result<u64> {
        let mut transaction = self.client.begin().await?;

        match delete_customer_and_posts_in(&mut transaction, customer_id).await {
            Ok(removed_posts) => {
                if let Err(err) = transaction.commit().await {
                    error!(%customer_id, error = %err, "Committing customer and posts deletion failed");
                    return Err(err.into());
                }
                debug!(%customer_id, removed_posts, "Deleted customer and posts");
                Ok(removed_posts)
            }
            Err(err) => {
                error!(%customer_id, error = %err, "Deleting customer and posts failed, rolling back");
                if let Err(rollback_err) = transaction.rollback().await {
                    error!(%customer_id, error = %rollback_err, "Rollback failed");
                }
                Err(err.into())
            }
        }
    }
}

async fn delete_customer_and_posts_in(
    connection: &mut SqliteConnection,
    customer_id: Id<CustomerMarker>,
) -> Result<u64, sqlx::Error> {
    let removed_posts = query("DELETE FROM posts WHERE customer_id = ?")
        .bind(customer_id.get())
        .execute(&mut *connection)
        .await?
        .rows_affected();

    query("DELETE FROM customers WHERE customer_id = ?")
        .bind(customer_id.get())
        .execute(&mut *connection)
        .await?;

    Ok(removed_posts)
}
