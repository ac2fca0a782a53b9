use crate::model::{Id, Named};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;

pub const CUSTOMER_NAME_MAX_LEN: usize = 100;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CustomerMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Id<CustomerMarker>,
    pub name: CustomerName,
    #[serde(default)]
    pub email: Option<String>,
}

impl Named for Customer {
    fn name(&self) -> &str {
        self.name.get()
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerName(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The customer name is invalid: {0:?}")]
pub struct InvalidCustomerNameError(String);

impl CustomerName {
    pub fn new(name: String) -> Result<Self, InvalidCustomerNameError> {
        if !name.trim().is_empty() && name.chars().count() <= CUSTOMER_NAME_MAX_LEN {
            Ok(CustomerName(name))
        } else {
            Err(InvalidCustomerNameError(name))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CustomerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CustomerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        CustomerName::new(inner)
            .map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"CustomerName"))
    }
}
