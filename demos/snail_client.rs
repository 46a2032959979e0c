//! Example: verify a payment code and list recent payments
//!
//! Run with:
//!   SNAIL_API_KEY=sk_... cargo run --example snail_client -- ABCDEFGHIJ

use snailpay::{SnailClient, SnailError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = SnailClient::from_env()?;

    if let Some(code) = std::env::args().nth(1) {
        match client.verify_payment(&code).await {
            Ok(payment) => println!(
                "✅ {} paid {} for {} ({})",
                payment.email, payment.amount, payment.product, payment.status
            ),
            Err(SnailError::InvalidCode) => println!("❌ Code {} is not a valid payment", code),
            Err(e) => return Err(e.into()),
        }
    }

    for payment in client.list_payments().await? {
        println!(
            "{} {:>8} {:<10} {}",
            payment.id, payment.amount, payment.status, payment.email
        );
    }

    let payouts = client.list_payouts().await?;
    println!(
        "Balance: {:.2}  Pending: {:.2}  Withdrawn: {:.2}",
        payouts.balance, payouts.pending, payouts.withdrawn
    );

    Ok(())
}
