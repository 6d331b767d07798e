use std::io;

use sendotp::{AuthKey, OtpClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let auth_key = required_env("MSG91_AUTH_KEY")?;
    let mobile = required_env("MSG91_MOBILE")?;
    // Anything but "text" retries by voice call.
    let voice = std::env::var("MSG91_RETRY_TYPE").map_or(true, |value| value != "text");

    let client = OtpClient::new(AuthKey::new(auth_key)?);
    client
        .retry_with(&mobile, Some(voice), |error, data, response| match error {
            None => println!("retry accepted: {data:?}"),
            Some(error) => eprintln!(
                "retry failed ({:?}): {error}; status: {:?}",
                error.kind(),
                response.map(|it| it.status)
            ),
        })
        .await;

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
