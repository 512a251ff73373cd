use cellhub_checkout::checkout::{CheckoutRequest, CheckoutService, SettlementOutcome};
use cellhub_checkout::clients::OrderClient;
use cellhub_checkout::collaborators::{CartStore, InMemoryCarts};
use cellhub_checkout::model::{
    AddressCreate, BuyerCreate, Order, OrderId, OrderStatus, ProductCreate, ShippingTarget,
};
use cellhub_checkout::payment::{PaymentMode, PaymentRegistry};
use cellhub_checkout::{address_actor, buyer_actor, product_actor};
use resource_actor::mock::{create_mock_client, expect_create};
use resource_actor::ResourceRequest;
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

/// The order actor answers the create after the checkout timeout has passed.
/// The order it persisted is the one checkout returns, and the cart is cleared,
/// so a retry cannot create a second order.
#[tokio::test]
async fn test_slow_order_persistence_is_awaited_not_abandoned() {
    let (product_actor, products) = product_actor::new(8);
    tokio::spawn(product_actor.run(()));
    let (buyer_actor, buyers) = buyer_actor::new(8);
    tokio::spawn(buyer_actor.run(()));
    let (address_actor, addresses) = address_actor::new(8);
    tokio::spawn(address_actor.run(()));
    let (order_inner, mut order_requests) = create_mock_client::<Order>(8);

    let buyer = buyers
        .create_buyer(BuyerCreate {
            name: "Ana".into(),
            email: "ana@cellhub.co".into(),
            phone: "3001234567".into(),
        })
        .await
        .unwrap();
    let address = addresses
        .create_address(AddressCreate {
            buyer_id: buyer,
            full_name: "Ana Gómez".into(),
            city: "Medellín".into(),
            department: "Antioquia".into(),
            neighborhood: "Laureles".into(),
            street: "Cl. 33 # 76-20".into(),
            reference: String::new(),
            phone: "3001234567".into(),
            provisional: false,
        })
        .await
        .unwrap();
    let phone = products
        .create_product(ProductCreate {
            brand: "Motorola".into(),
            model_name: "Moto G84".into(),
            price: dec!(1199900),
            initial_stock: 5,
        })
        .await
        .unwrap();

    let carts = Arc::new(InMemoryCarts::new());
    carts.add_item(buyer, phone, 1).await.unwrap();

    let checkout = CheckoutService::new(
        products.clone(),
        OrderClient::new(order_inner),
        buyers.clone(),
        Arc::new(addresses.clone()),
        carts.clone(),
        Arc::new(PaymentRegistry::with_builtin(PaymentMode::Simulated)),
    )
    .with_timeouts(Duration::from_millis(200), Duration::from_secs(1));

    let task = tokio::spawn(async move {
        checkout
            .checkout(CheckoutRequest::new(buyer, ShippingTarget::Existing(address), "pse"))
            .await
    });

    let (params, respond) = expect_create(&mut order_requests)
        .await
        .expect("checkout should send a Create");
    tokio::time::sleep(Duration::from_millis(400)).await;
    let persisted = Order::new(OrderId(1), params).unwrap();
    respond.send(Ok(OrderId(1))).unwrap();

    match order_requests.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => {
            assert_eq!(id, OrderId(1));
            respond_to.send(Ok(Some(persisted.clone()))).unwrap();
        }
        _ => panic!("checkout should read back the persisted order"),
    }

    let outcome = task.await.unwrap().expect("a persisted order is not a failure");
    assert_eq!(outcome.order, persisted);
    assert_eq!(outcome.order.status(), OrderStatus::Pending);
    assert_eq!(outcome.payment, SettlementOutcome::Deferred);
    assert!(carts.lines(buyer).await.unwrap().is_empty());
}
