use std::io;

use smsru_plain::ClientConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let phone = std::env::var("SMSRU_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSRU_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("SMSRU_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsru-plain demo.".to_owned());

    let client = ClientConfig::from_env()?.build_client()?;
    let mut sms = client.new_sms(phone, message);
    sms.test = std::env::var("SMSRU_TEST").is_ok_and(|value| value == "1");

    let response = client.send_sms(&sms).await?;
    println!(
        "id: {}, status: {} ({}), phone: {:?}",
        response.id,
        response.status,
        response.status_code.as_i64(),
        response.phone
    );

    Ok(())
}
