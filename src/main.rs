use portfolio_backend::{configuration::get_configuration, telemetry, App};
use std::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().expect("Failed to read configuration.");
    let listener = TcpListener::bind(configuration.application.address())?;

    telemetry::init_subscriber(telemetry::get_subscriber(
        "portfolio-backend".to_string(),
        std::io::stdout,
    ));

    App::serve(listener, configuration).await?;

    Ok(())
}
