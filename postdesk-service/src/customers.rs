use crate::{Result, ServiceError};
use postdesk_common::model::{
    Id, Named,
    customer::{Customer, CustomerMarker},
};
use postdesk_db::{
    client::DbClient,
    registry::CustomerRegistry,
    store::{Store, Updated},
};
use tracing::info;

#[derive(Clone, Debug)]
pub struct CustomerService {
    customers: Store<Customer>,
    registry: CustomerRegistry,
}

impl CustomerService {
    #[must_use]
    pub fn new(db: &DbClient) -> Self {
        Self {
            customers: db.store(),
            registry: db.registry(),
        }
    }

    pub async fn list(&self) -> Result<Vec<Customer>> {
        Ok(self.customers.list().await?)
    }

    pub async fn find(&self, customer_id: Id<CustomerMarker>) -> Result<Customer> {
        self.customers
            .find_by_id(customer_id)
            .await?
            .ok_or(ServiceError::CustomerNotFound(customer_id))
    }

    /// Stores a new customer, refusing names that are already taken.
    pub async fn create(&self, customer: Customer) -> Result<Customer> {
        if name_taken(&self.customers.list().await?, customer.name()) {
            return Err(ServiceError::DuplicateName(customer.name));
        }

        let customer = self.customers.create(customer).await?;
        info!(customer_id = %customer.customer_id, name = %customer.name, "Created customer");
        Ok(customer)
    }

    /// Overwrites the stored customer `customer_id` with `customer`.
    ///
    /// `customer_id` takes precedence over the id carried by `customer`.
    pub async fn update(
        &self,
        customer_id: Id<CustomerMarker>,
        customer: Customer,
    ) -> Result<Updated<Customer>> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }

        let updated = self
            .customers
            .update(Customer {
                customer_id,
                ..customer
            })
            .await?;
        info!(%customer_id, changed = updated.changed, "Updated customer");
        Ok(updated)
    }

    pub async fn delete_customer_and_posts(&self, customer_id: Id<CustomerMarker>) -> Result<bool> {
        if !self.registry.exists(customer_id).await? {
            return Err(ServiceError::CustomerNotFound(customer_id));
        }

        let removed_posts = self.registry.delete_customer_and_posts(customer_id).await?;
        info!(%customer_id, removed_posts, "Deleted customer");
        Ok(true)
    }
}

fn name_taken<T: Named>(existing: &[T], name: &str) -> bool {
    existing.iter().any(|entity| entity.name() == name)
}
