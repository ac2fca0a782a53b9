use crate::model::{Categorized, CustomerOwned, HasBody, Id, customer::CustomerMarker};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub post_id: Id<PostMarker>,
    pub customer_id: Id<CustomerMarker>,
    pub body: String,
    #[serde(rename = "type")]
    pub post_type: i32,
    #[serde(default)]
    pub category: String,
}

impl CustomerOwned for Post {
    fn customer_id(&self) -> Id<CustomerMarker> {
        self.customer_id
    }
}

impl HasBody for Post {
    fn body(&self) -> &str {
        &self.body
    }

    fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

impl Categorized for Post {
    fn type_code(&self) -> i32 {
        self.post_type
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn set_category(&mut self, category: String) {
        self.category = category;
    }
}
