use async_trait::async_trait;
use cellhub_checkout::checkout::{CheckoutError, CheckoutRequest, SettlementOutcome};
use cellhub_checkout::lifecycle::StoreSystem;
use cellhub_checkout::model::{
    AddressCreate, BuyerCreate, BuyerId, OrderStatus, ProductCreate, ProductId, ShippingTarget,
};
use cellhub_checkout::payment::{
    PaymentError, PaymentPayload, PaymentResult, PaymentStatus, PaymentStrategy,
};
use resource_actor::ActorClient;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

async fn buyer_with_address(system: &StoreSystem, n: usize) -> (BuyerId, ShippingTarget) {
    let buyer = system
        .buyers
        .create_buyer(BuyerCreate {
            name: format!("Buyer {n}"),
            email: format!("buyer{n}@cellhub.co"),
            phone: format!("30000000{n:02}"),
        })
        .await
        .unwrap();
    let address = system
        .addresses
        .create_address(AddressCreate {
            buyer_id: buyer,
            full_name: format!("Buyer {n}"),
            city: "Barranquilla".into(),
            department: "Atlántico".into(),
            neighborhood: "El Prado".into(),
            street: format!("Cl. 53 # {n}-10"),
            reference: String::new(),
            phone: format!("30000000{n:02}"),
            provisional: false,
        })
        .await
        .unwrap();
    (buyer, ShippingTarget::Existing(address))
}

async fn scarce_phone(system: &StoreSystem, stock: u32) -> ProductId {
    system
        .products
        .create_product(ProductCreate {
            brand: "Apple".into(),
            model_name: "iPhone 15".into(),
            price: dec!(4299900),
            initial_stock: stock,
        })
        .await
        .unwrap()
}

fn card() -> PaymentPayload {
    PaymentPayload::new()
        .with("card_number", "4111111111111111")
        .with("cvv", "123")
        .with("expiry", "12/28")
        .with("cardholder_name", "BUYER")
}

/// Approves everything and counts how often it was charged.
struct CountingCard {
    charges: Arc<AtomicUsize>,
}

#[async_trait]
impl PaymentStrategy for CountingCard {
    fn method(&self) -> &str {
        "counting_card"
    }

    fn missing_fields(&self, _payload: &PaymentPayload) -> Vec<String> {
        Vec::new()
    }

    async fn process(&self, amount: Decimal, _payload: &PaymentPayload) -> Result<PaymentResult, PaymentError> {
        let n = self.charges.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::task::yield_now().await;
        Ok(PaymentResult {
            status: PaymentStatus::Approved,
            transaction_id: format!("CT-{n:04}"),
            amount,
            method: "counting_card".into(),
            redirect_url: None,
        })
    }
}

fn lost_the_race(result: &Result<cellhub_checkout::checkout::CheckoutOutcome, CheckoutError>) -> bool {
    match result {
        Err(CheckoutError::InsufficientStock { .. }) => true,
        Ok(outcome) => matches!(
            outcome.payment,
            SettlementOutcome::Failed(CheckoutError::InsufficientStock { .. })
        ),
        Err(_) => false,
    }
}

/// Last unit, two buyers, both paying by card at the same time: one order is
/// confirmed, the other is refused for stock. Never both.
#[tokio::test]
async fn test_two_checkouts_race_for_the_last_unit() {
    let system = StoreSystem::new();
    let phone = scarce_phone(&system, 1).await;

    let mut handles = Vec::new();
    for n in 0..2 {
        let (buyer, shipping) = buyer_with_address(&system, n).await;
        system.carts.add_item(buyer, phone, 1).await.unwrap();
        let checkout = system.checkout.clone();
        handles.push(tokio::spawn(async move {
            checkout
                .checkout(CheckoutRequest::new(buyer, shipping, "credit_card").settle_with(card()))
                .await
        }));
    }

    let mut confirmed = 0;
    let mut refused = 0;
    for handle in handles {
        let result = handle.await.unwrap();
        match &result {
            Ok(outcome)
                if matches!(&outcome.payment, SettlementOutcome::Settled(p) if p.status == PaymentStatus::Approved) =>
            {
                confirmed += 1
            }
            other if lost_the_race(other) => refused += 1,
            other => panic!("unexpected checkout result: {other:?}"),
        }
    }
    assert_eq!((confirmed, refused), (1, 1));

    let record = system.products.inventory(phone).await.unwrap();
    assert_eq!((record.available(), record.reserved()), (0, 1));
    system.shutdown().await.unwrap();
}

/// Ten deferred orders pass pre-flight against three units; settling them
/// concurrently reserves exactly three.
#[tokio::test]
async fn test_concurrent_settlements_never_oversell() {
    let system = StoreSystem::new();
    let phone = scarce_phone(&system, 3).await;

    let mut orders = Vec::new();
    for n in 0..10 {
        let (buyer, shipping) = buyer_with_address(&system, n).await;
        system.carts.add_item(buyer, phone, 1).await.unwrap();
        let outcome = system
            .checkout
            .checkout(CheckoutRequest::new(buyer, shipping, "debit_card"))
            .await
            .unwrap();
        orders.push(outcome.order.id);
    }

    let mut handles = Vec::new();
    for id in orders {
        let checkout = system.checkout.clone();
        handles.push(tokio::spawn(async move { checkout.confirm_payment(id, card()).await }));
    }

    let mut settled = 0;
    let mut short = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => settled += 1,
            Err(CheckoutError::InsufficientStock { .. }) => short += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(settled, 3);
    assert_eq!(short, 7);

    let record = system.products.inventory(phone).await.unwrap();
    assert_eq!((record.available(), record.reserved()), (0, 3));

    let pending_with_reason = system
        .orders
        .list()
        .await
        .unwrap()
        .into_iter()
        .filter(|o| o.rejection_reason().is_some())
        .count();
    assert_eq!(pending_with_reason, 7);
    system.shutdown().await.unwrap();
}

/// Two confirmations of the same order at once: one settles, the other is told
/// the order is busy, and the buyer is charged once.
#[tokio::test]
async fn test_double_confirm_charges_once() {
    let system = StoreSystem::new();
    let charges = Arc::new(AtomicUsize::new(0));
    let counter = charges.clone();
    system.registry.register("counting_card", move || {
        Box::new(CountingCard {
            charges: counter.clone(),
        })
    });

    let phone = scarce_phone(&system, 10).await;
    let (buyer, shipping) = buyer_with_address(&system, 0).await;
    system.carts.add_item(buyer, phone, 10).await.unwrap();
    let order = system
        .checkout
        .checkout(CheckoutRequest::new(buyer, shipping, "counting_card"))
        .await
        .unwrap()
        .order;

    let (first, second) = tokio::join!(
        system.checkout.confirm_payment(order.id, PaymentPayload::new()),
        system.checkout.confirm_payment(order.id, PaymentPayload::new()),
    );

    let (won, lost) = match (first, second) {
        (Ok(settlement), Err(e)) | (Err(e), Ok(settlement)) => (settlement, e),
        other => panic!("expected exactly one settlement, got {other:?}"),
    };
    assert_eq!(won.order.status(), OrderStatus::Confirmed);
    assert_eq!(lost.status_code(), 409, "loser saw {lost:?}");
    assert_eq!(charges.load(Ordering::SeqCst), 1);

    let stored = system.orders.order(order.id).await.unwrap();
    assert_eq!(stored.status(), OrderStatus::Confirmed);
    assert_eq!(stored.rejection_reason(), None);
    let record = system.products.inventory(phone).await.unwrap();
    assert_eq!((record.available(), record.reserved()), (0, 10));
    system.shutdown().await.unwrap();
}
