use std::io;

use nexmo::{NexmoClient, SendSms};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let to = std::env::var("NEXMO_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_TO environment variable is required",
        )
    })?;
    let text = std::env::var("NEXMO_TEXT")
        .unwrap_or_else(|_| "Hello from the nexmo demo.".to_owned());

    let client = NexmoClient::from_env()?;
    if !client.is_valid_phone(&to) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_TO does not look like a phone number",
        )
        .into());
    }

    match client.send_sms(SendSms::new(to, text)) {
        Ok(payload) => println!("sent: {}", payload.to_json_string()),
        Err(err) => {
            eprintln!("send failed ({:?}): {}", err.kind(), err.detail());
            if let Some(raw) = client.last_response() {
                eprintln!("raw response: {raw}");
            }
        }
    }

    Ok(())
}
