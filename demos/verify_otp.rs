use std::io;

use sendotp::{AuthKey, OtpClient, OtpResponse};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let auth_key = required_env("MSG91_AUTH_KEY")?;
    let mobile = required_env("MSG91_MOBILE")?;
    let otp = required_env("MSG91_OTP")?;

    let client = OtpClient::new(AuthKey::new(auth_key)?);
    let payload = client.verify(&mobile, otp).await?;
    let response = OtpResponse::from_payload(&payload)?;
    if response.is_success() {
        println!("verified: {}", response.message);
    } else {
        println!("not verified: {}", response.message);
    }

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
