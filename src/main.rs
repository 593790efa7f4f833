use btce::exchanges::btce::{format_currency, pairs, validate_order};
use btce::{create_btce_connection, ConnectionConfig, OrderRequest};
use rust_decimal_macros::dec;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("Registered pairs:");
    for spec in pairs::pairs() {
        println!(
            "  {:<8} digits={} min_order={}",
            spec.name,
            spec.max_digits,
            format_currency(spec.min_order, spec.name)?
        );
    }

    // Validation happens locally, before anything is sent
    if let Err(e) = validate_order("usd_btc", "buy", dec!(600), dec!(0.5)) {
        println!("Rejected: {}", e);
    }
    if let Err(e) = validate_order("btc_usd", "buy", dec!(600), dec!(0.005)) {
        println!("Rejected: {}", e);
    }

    let order = OrderRequest::new("btc_usd", "buy", dec!(612.34567), dec!(0.0123456))?;
    println!("Order body: {}", order.to_form_body());

    let config = ConnectionConfig::from_env("btce")?;
    let mut conn = create_btce_connection(config)?;
    info!(state = ?conn.state(), "Connection ready");

    // Example authenticated call (commented out for safety); `Key` and `Sign`
    // must come from your own signing code
    /*
    let body = format!("method=getInfo&nonce={}", 1);
    let info = conn
        .send_json("/tapi", &body, &[("Key", "..."), ("Sign", "...")], true)
        .await?;
    println!("BTC balance: {:?}", info["return"]["funds"]["btc"].as_decimal());
    */

    match conn.send("/tapi", "", &[], true).await {
        Ok(body) => info!(bytes = body.len(), "Unauthenticated request answered"),
        Err(e) => warn!(error = %e, transport = e.is_transport(), "Probe failed"),
    }

    Ok(())
}
