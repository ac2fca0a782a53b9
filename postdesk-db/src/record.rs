use crate::entity::{Entity, SqliteQuery};
use postdesk_common::model::{
    Id, ModelValidationError,
    customer::{Customer, CustomerMarker, CustomerName},
    post::{Post, PostMarker},
};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
#[error("Database had invalid entry: {0}")]
pub struct DbDataError(#[from] ModelValidationError);

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, sqlx::FromRow)]
pub struct CustomerRecord {
    pub customer_id: i64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, sqlx::FromRow)]
pub struct PostRecord {
    pub post_id: i64,
    pub customer_id: i64,
    pub body: String,
    pub post_type: i32,
    pub category: String,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = DbDataError;

    fn try_from(value: CustomerRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            customer_id: value.customer_id.into(),
            name: CustomerName::new(value.name).map_err(ModelValidationError::from)?,
            email: value.email,
        })
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = DbDataError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            post_id: value.post_id.into(),
            customer_id: value.customer_id.into(),
            body: value.body,
            post_type: value.post_type,
            category: value.category,
        })
    }
}

impl Entity for Customer {
    type Marker = CustomerMarker;
    type Record = CustomerRecord;

    const TABLE: &'static str = "customers";
    const ID_COLUMN: &'static str = "customer_id";
    const COLUMNS: &'static [&'static str] = &["name", "email"];

    fn id(&self) -> Id<CustomerMarker> {
        self.customer_id
    }

    fn with_id(self, customer_id: Id<CustomerMarker>) -> Self {
        Self {
            customer_id,
            ..self
        }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.name.get()).bind(self.email.as_deref())
    }
}

impl Entity for Post {
    type Marker = PostMarker;
    type Record = PostRecord;

    const TABLE: &'static str = "posts";
    const ID_COLUMN: &'static str = "post_id";
    const COLUMNS: &'static [&'static str] = &["customer_id", "body", "post_type", "category"];

    fn id(&self) -> Id<PostMarker> {
        self.post_id
    }

    fn with_id(self, post_id: Id<PostMarker>) -> Self {
        Self { post_id, ..self }
    }

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.customer_id.get())
            .bind(self.body.as_str())
            .bind(self.post_type)
            .bind(self.category.as_str())
    }
}
