use postdesk_common::model::{
    Id,
    customer::{Customer, CustomerName},
    post::Post,
};
use postdesk_db::client::DbClient;
use postdesk_service::{CustomerService, PostService, ServiceError};

async fn services() -> (CustomerService, PostService) {
    let db = DbClient::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    (CustomerService::new(&db), PostService::new(&db))
}

fn customer(name: &str) -> Customer {
    Customer {
        name: CustomerName::new(name.to_owned()).unwrap(),
        ..Customer::default()
    }
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let (customers, _) = services().await;

    let acme = customers.create(customer("Acme")).await.unwrap();
    assert!(acme.customer_id.is_assigned());

    let err = customers.create(customer("Acme")).await.unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName(ref name) if name.get() == "Acme"));

    customers.create(customer("acme")).await.unwrap();
    assert_eq!(customers.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_uses_given_id() {
    let (customers, _) = services().await;
    let acme = customers.create(customer("Acme")).await.unwrap();

    let mut edited = customer("Acme Corporation");
    edited.email = Some("sales@acme.test".to_owned());
    let updated = customers.update(acme.customer_id, edited).await.unwrap();

    assert!(updated.changed);
    assert_eq!(updated.entity.customer_id, acme.customer_id);
    assert_eq!(
        customers.find(acme.customer_id).await.unwrap().email.as_deref(),
        Some("sales@acme.test")
    );

    let again = customers
        .update(acme.customer_id, updated.entity.clone())
        .await
        .unwrap();
    assert!(!again.changed);
}

#[tokio::test]
async fn update_unknown_customer_fails() {
    let (customers, _) = services().await;

    let err = customers
        .update(Id::new(8), customer("Nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CustomerNotFound(id) if id.get() == 8));
}

#[tokio::test]
async fn find_unknown_customer_fails() {
    let (customers, _) = services().await;

    let err = customers.find(Id::new(3)).await.unwrap_err();
    assert!(matches!(err, ServiceError::CustomerNotFound(_)));
}

#[tokio::test]
async fn delete_cascades_to_posts() {
    let (customers, posts) = services().await;
    let acme = customers.create(customer("Acme")).await.unwrap();
    let globex = customers.create(customer("Globex")).await.unwrap();

    for owner in [&acme, &acme, &globex] {
        posts
            .create(Post {
                customer_id: owner.customer_id,
                body: "short".to_owned(),
                ..Post::default()
            })
            .await
            .unwrap();
    }

    assert!(
        customers
            .delete_customer_and_posts(acme.customer_id)
            .await
            .unwrap()
    );

    assert_eq!(customers.list().await.unwrap(), vec![globex.clone()]);
    let remaining = posts.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].customer_id, globex.customer_id);
}

#[tokio::test]
async fn delete_unknown_customer_fails() {
    let (customers, _) = services().await;

    let err = customers
        .delete_customer_and_posts(Id::new(41))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::CustomerNotFound(id) if id.get() == 41));
}
