use std::io;

use nexmo::NexmoClient;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let number = std::env::args().nth(1).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "usage: phone_type <number>")
    })?;

    let client = NexmoClient::from_env()?;
    println!("normalized: {}", client.normalize_number(&number));
    match client.parse_phone_number(&number) {
        Ok(parsed) => println!("e164: {}", parsed.e164()),
        Err(err) => println!("e164: {err}"),
    }

    match client.network_type(&number) {
        Ok(network_type) => println!(
            "network type: {network_type:?} (mobile: {})",
            network_type.is_mobile()
        ),
        Err(err) => println!("lookup failed: {}", err.detail()),
    }

    Ok(())
}
