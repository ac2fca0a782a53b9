use crate::server::{Result, ServerError, ServerRouter, json::Json};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use postdesk_common::model::{
    Id,
    customer::{Customer, CustomerMarker},
};
use postdesk_service::CustomerService;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_customers)
        .typed_get(get_customer)
        .typed_post(create_customer)
        .typed_put(update_customer)
        .typed_delete(delete_customer)
}

#[derive(TypedPath)]
#[typed_path("/customer")]
struct CustomersPath;

#[derive(TypedPath, Deserialize)]
#[typed_path("/customer/{id}", rejection(ServerError))]
struct CustomerPath {
    id: Id<CustomerMarker>,
}

/// Body of a delete request. Only the id is read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomerReference {
    customer_id: Id<CustomerMarker>,
}

async fn list_customers(
    CustomersPath: CustomersPath,
    State(customers): State<Arc<CustomerService>>,
) -> Result<Json<Vec<Customer>>> {
    Ok(Json(customers.list().await?))
}

async fn get_customer(
    CustomerPath { id }: CustomerPath,
    State(customers): State<Arc<CustomerService>>,
) -> Result<Json<Customer>> {
    Ok(Json(customers.find(id).await?))
}

async fn create_customer(
    CustomersPath: CustomersPath,
    State(customers): State<Arc<CustomerService>>,
    Json(customer): Json<Customer>,
) -> Result<Json<Customer>> {
    Ok(Json(customers.create(customer).await?))
}

async fn update_customer(
    CustomersPath: CustomersPath,
    State(customers): State<Arc<CustomerService>>,
    Json(customer): Json<Customer>,
) -> Result<Json<Customer>> {
    let updated = customers.update(customer.customer_id, customer).await?;

    Ok(Json(updated.entity))
}

async fn delete_customer(
    CustomersPath: CustomersPath,
    State(customers): State<Arc<CustomerService>>,
    Json(CustomerReference { customer_id }): Json<CustomerReference>,
) -> Result<Json<bool>> {
    Ok(Json(customers.delete_customer_and_posts(customer_id).await?))
}
