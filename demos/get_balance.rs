use nexmo::NexmoClient;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = NexmoClient::from_env()?;
    let payload = client.get_balance()?;
    match payload.get("value") {
        Some(value) => println!("balance: {value}"),
        None => println!("balance response: {}", payload.to_json_string()),
    }

    Ok(())
}
