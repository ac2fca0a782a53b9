pub mod customer;
pub mod post;

use crate::model::customer::InvalidCustomerNameError;
use derive_where::derive_where;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    CustomerName(#[from] InvalidCustomerNameError),
}

/// Row identity of a stored entity, tagged with the entity it belongs to.
///
/// Ids are assigned by the store. An entity that has not been persisted yet
/// carries [`Id::UNASSIGNED`].
#[derive_where(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(i64, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    pub const UNASSIGNED: Self = Self(0, PhantomData);

    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value, PhantomData)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn is_assigned(self) -> bool {
        self.0 != Self::UNASSIGNED.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<i64> for Id<Marker> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<Id<Marker>> for i64 {
    fn from(value: Id<Marker>) -> Self {
        value.get()
    }
}

/// Read access to the display name of an entity.
pub trait Named {
    fn name(&self) -> &str;
}

/// An entity that references the customer it belongs to.
pub trait CustomerOwned {
    fn customer_id(&self) -> Id<customer::CustomerMarker>;
}

pub trait HasBody {
    fn body(&self) -> &str;
    fn set_body(&mut self, body: String);
}

/// An entity whose category label is derived from an integer type code.
pub trait Categorized {
    fn type_code(&self) -> i32;
    fn category(&self) -> &str;
    fn set_category(&mut self, category: String);
}
