use crate::server::ServerRouter;
use axum::Router;

mod customers;
mod posts;

pub fn routes() -> ServerRouter {
    Router::new()
        .merge(customers::routes())
        .merge(posts::routes())
}
