use subscription_aggregator::{
    configuration::get_configuration,
    error::StartupError,
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let subscriber = get_subscriber(
        "subscription_aggregator".into(),
        "info".into(),
        std::io::stdout,
    );
    init_subscriber(subscriber)?;

    let configuration = get_configuration()?;
    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
