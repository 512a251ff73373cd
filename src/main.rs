use cellhub_checkout::checkout::{CheckoutRequest, SettlementOutcome};
use cellhub_checkout::config::StoreConfig;
use cellhub_checkout::lifecycle::{setup_tracing, StoreSystem};
use cellhub_checkout::model::{BuyerCreate, NewAddress, OrderStatus, ProductCreate, ShippingTarget};
use cellhub_checkout::payment::PaymentPayload;
use rust_decimal::Decimal;
use std::error::Error;
use tracing::{info, info_span, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let system = StoreSystem::with_config(StoreConfig::from_env());
    info!(methods = ?system.checkout.supported_payment_methods(), "Store ready");

    let (buyer, galaxy, redmi) = async {
        let buyer = system
            .buyers
            .create_buyer(BuyerCreate {
                name: "Ana Gómez".into(),
                email: "ana@cellhub.co".into(),
                phone: "3001234567".into(),
            })
            .await?;
        let galaxy = system
            .products
            .create_product(ProductCreate {
                brand: "Samsung".into(),
                model_name: "Galaxy A54".into(),
                price: Decimal::new(1_799_900, 0),
                initial_stock: 5,
            })
            .await?;
        let redmi = system
            .products
            .create_product(ProductCreate {
                brand: "Xiaomi".into(),
                model_name: "Redmi Note 13".into(),
                price: Decimal::new(899_900, 0),
                initial_stock: 1,
            })
            .await?;
        Ok::<_, Box<dyn Error>>((buyer, galaxy, redmi))
    }
    .instrument(info_span!("seed"))
    .await?;

    // Card checkout with an inline address: confirmed straight away.
    system.carts.add_item(buyer, galaxy, 2).await?;
    let card = PaymentPayload::new()
        .with("card_number", "4111111111114242")
        .with("cvv", "123")
        .with("expiry", "12/28")
        .with("cardholder_name", "ANA GOMEZ");
    let shipping = ShippingTarget::Provisional(NewAddress {
        full_name: "Ana Gómez".into(),
        city: "Medellín".into(),
        street: "Cl. 10 # 43-20".into(),
        phone: "3001234567".into(),
        ..Default::default()
    });
    let outcome = system
        .checkout
        .checkout(
            CheckoutRequest::new(buyer, shipping, "credit_card")
                .with_notes("Gift wrap, please")
                .settle_with(card),
        )
        .instrument(info_span!("card_checkout"))
        .await?;
    info!(order_id = %outcome.order.id, status = %outcome.order.status(), "Card checkout done");

    // PSE checkout, payment deferred, then confirmed separately: stays pending.
    system.carts.add_item(buyer, redmi, 1).await?;
    let address = outcome.order.shipping_address;
    let deferred = system
        .checkout
        .checkout(CheckoutRequest::new(buyer, ShippingTarget::Existing(address), "pse"))
        .instrument(info_span!("pse_checkout"))
        .await?;
    let pse = PaymentPayload::new()
        .with("bank_code", "1007")
        .with("document_type", "CC")
        .with("document_number", "1020304050");
    match system.checkout.confirm_payment(deferred.order.id, pse).await {
        Ok(settlement) => info!(
            order_id = %settlement.order.id,
            status = %settlement.order.status(),
            redirect = ?settlement.payment.redirect_url,
            "PSE payment started"
        ),
        Err(e) => warn!(error = %e, "PSE payment failed"),
    }

    // The Redmi is now held; another checkout for it loses at pre-flight.
    system.carts.add_item(buyer, redmi, 1).await?;
    if let Err(e) = system
        .checkout
        .checkout(CheckoutRequest::new(buyer, ShippingTarget::Existing(address), "nequi"))
        .await
    {
        info!(error = %e, status_code = e.status_code(), "Second Redmi checkout refused");
    }

    let shipped = system
        .checkout
        .change_order_status(outcome.order.id, OrderStatus::Shipped)
        .await?;
    info!(order_id = %shipped.id, status = %shipped.status(), "Order shipped");

    let cancelled = system
        .checkout
        .change_order_status(deferred.order.id, OrderStatus::Cancelled)
        .await?;
    let stock = system.products.inventory(redmi).await?;
    info!(order_id = %cancelled.id, available = stock.available(), "Order cancelled, stock released");

    for order in system.checkout.orders_for_buyer(buyer).await? {
        info!(order_id = %order.id, status = %order.status(), total = %order.total(), "History");
    }
    if let SettlementOutcome::Settled(payment) = outcome.payment {
        info!(transaction_id = %payment.transaction_id, "First payment");
    }

    system.shutdown().await?;
    Ok(())
}
