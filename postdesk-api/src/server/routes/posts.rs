use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::routing::{RouterExt, TypedPath};
use postdesk_common::model::{
    Id,
    post::{Post, PostMarker},
};
use postdesk_service::{PostService, ServiceError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_get(get_post)
        .typed_post(create_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
        .typed_post(create_multiple_posts)
}

#[derive(TypedPath)]
#[typed_path("/post")]
struct PostsPath;

#[derive(TypedPath, Deserialize)]
#[typed_path("/post/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

#[derive(TypedPath)]
#[typed_path("/post/create-multiple")]
struct CreateMultiplePostsPath;

/// Body of a delete request. Only the id is read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostReference {
    post_id: Id<PostMarker>,
}

/// Failure of a bulk create, reported as `400` with a plain message.
///
/// Unlike [`ServerError`] this is handled where it happens instead of going
/// through the generic error response.
#[derive(Debug)]
struct CreateMultiplePostsError(ServiceError);

impl IntoResponse for CreateMultiplePostsError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Bulk post creation failed");

        let message = format!("Error creating posts: {}", self.0);
        (StatusCode::BAD_REQUEST, Json(message)).into_response()
    }
}

async fn list_posts(
    PostsPath: PostsPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(posts.list().await?))
}

async fn get_post(
    PostPath { id }: PostPath,
    State(posts): State<Arc<PostService>>,
) -> Result<Json<Post>> {
    Ok(Json(posts.find(id).await?))
}

async fn create_post(
    PostsPath: PostsPath,
    State(posts): State<Arc<PostService>>,
    Json(post): Json<Post>,
) -> Result<Json<Post>> {
    Ok(Json(posts.create(post).await?))
}

async fn update_post(
    PostsPath: PostsPath,
    State(posts): State<Arc<PostService>>,
    Json(post): Json<Post>,
) -> Result<Json<Post>> {
    let updated = posts.update(post).await?;

    Ok(Json(updated.entity))
}

async fn delete_post(
    PostsPath: PostsPath,
    State(posts): State<Arc<PostService>>,
    Json(PostReference { post_id }): Json<PostReference>,
) -> Result<Json<Post>> {
    Ok(Json(posts.delete(post_id).await?))
}

async fn create_multiple_posts(
    CreateMultiplePostsPath: CreateMultiplePostsPath,
    State(posts): State<Arc<PostService>>,
    Json(new_posts): Json<Vec<Post>>,
) -> Result<Json<Vec<Post>>, CreateMultiplePostsError> {
    let created = posts
        .create_multiple(new_posts)
        .await
        .map_err(CreateMultiplePostsError)?;

    Ok(Json(created))
}
