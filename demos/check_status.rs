use std::io;

use smsru_plain::{ClientConfig, SmsId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let id = std::env::var("SMSRU_SMS_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSRU_SMS_ID environment variable is required",
        )
    })?;

    let client = ClientConfig::from_env()?.build_client()?;
    let response = client.check_status(&SmsId::new(id)?).await?;
    println!(
        "id: {}, status: {} ({})",
        response.id,
        response.status,
        response.status_code.as_i64()
    );

    Ok(())
}
