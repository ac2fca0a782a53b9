//! Business rules on top of the stores.

pub mod customers;
pub mod posts;

use postdesk_common::model::{
    Id,
    customer::{CustomerMarker, CustomerName},
    post::PostMarker,
};
use postdesk_db::client::DbError;
use thiserror::Error;

pub use customers::CustomerService;
pub use posts::PostService;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Customer with id {0} was not found.")]
    CustomerNotFound(Id<CustomerMarker>),
    #[error("Post with id {0} was not found.")]
    PostNotFound(Id<PostMarker>),
    #[error("A customer named {0} already exists.")]
    DuplicateName(CustomerName),
    #[error("The post references customer {0}, which does not exist.")]
    UnknownCustomer(Id<CustomerMarker>),
    #[error(transparent)]
    Database(#[from] DbError),
}
