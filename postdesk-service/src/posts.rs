use crate::{Result, ServiceError};
use postdesk_common::{
    model::{
        CustomerOwned, Id,
        post::{Post, PostMarker},
    },
    policy::{apply_category, truncate_body},
};
use postdesk_db::{
    client::DbClient,
    registry::CustomerRegistry,
    store::{Store, Updated},
};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct PostService {
    posts: Store<Post>,
    registry: CustomerRegistry,
}

impl PostService {
    #[must_use]
    pub fn new(db: &DbClient) -> Self {
        Self {
            posts: db.store(),
            registry: db.registry(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Post>> {
        Ok(self.posts.list().await?)
    }

    pub async fn find(&self, post_id: Id<PostMarker>) -> Result<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::PostNotFound(post_id))
    }

    /// Validates and normalizes `post`, then stores it under a new id.
    pub async fn create(&self, post: Post) -> Result<Post> {
        let post = self.prepare(post).await?;
        let post = self.posts.create(post).await?;

        info!(post_id = %post.post_id, customer_id = %post.customer_id, "Created post");
        Ok(post)
    }

    /// Applies the same rules as [`PostService::create`] and overwrites the
    /// stored post with the same id.
    pub async fn update(&self, post: Post) -> Result<Updated<Post>> {
        if self.posts.find_by_id(post.post_id).await?.is_none() {
            return Err(ServiceError::PostNotFound(post.post_id));
        }

        let post = self.prepare(post).await?;
        let updated = self.posts.update(post).await?;

        info!(post_id = %updated.entity.post_id, changed = updated.changed, "Updated post");
        Ok(updated)
    }

    /// Removes the stored post with `post_id` and returns it.
    pub async fn delete(&self, post_id: Id<PostMarker>) -> Result<Post> {
        let post = self.find(post_id).await?;
        self.posts.delete(&post).await?;

        info!(%post_id, "Deleted post");
        Ok(post)
    }

    /// Creates each post in order.
    ///
    /// Stops at the first failure. Posts created before it stay stored.
    pub async fn create_multiple(&self, posts: Vec<Post>) -> Result<Vec<Post>> {
        let mut created = Vec::with_capacity(posts.len());
        for post in posts {
            created.push(self.create(post).await?);
        }

        Ok(created)
    }

    async fn prepare(&self, mut post: Post) -> Result<Post> {
        self.ensure_customer_exists(&post).await?;

        if truncate_body(&mut post) {
            debug!(post_id = %post.post_id, "Truncated post body");
        }
        apply_category(&mut post);

        Ok(post)
    }

    async fn ensure_customer_exists<T: CustomerOwned>(&self, entity: &T) -> Result<()> {
        let customer_id = entity.customer_id();
        if self.registry.exists(customer_id).await? {
            Ok(())
        } else {
            Err(ServiceError::UnknownCustomer(customer_id))
        }
    }
}
