use std::io;

use sendotp::{AuthKey, Otp, OtpClient, OtpResponse};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let auth_key = required_env("MSG91_AUTH_KEY")?;
    let mobile = required_env("MSG91_MOBILE")?;
    let sender = std::env::var("MSG91_SENDER").unwrap_or_else(|_| "OTPSMS".to_owned());
    let otp = std::env::var("MSG91_OTP").ok().map(Otp::from);

    let client = OtpClient::new(AuthKey::new(auth_key)?);
    let payload = client.send(&mobile, &sender, otp).await?;
    let response = OtpResponse::from_payload(&payload)?;
    println!("type: {:?}, message: {}", response.kind, response.message);

    Ok(())
}

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}
