use std::net::TcpListener;

use env_logger::Env;
use pricehound::{
    configuration::{get_configuration, Environment},
    services::{OpenaiClient, PriceAggregator, QueryInterpreter, Retriever, SourceCatalog},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    let environment = Environment::current();

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;

    let openai_key = configuration.api_keys.openai;
    let openai_client = match openai_key.trim().is_empty() {
        true => {
            log::warn!("No OpenAI API key configured, queries use the local interpreter only");
            None
        }
        false => Some(OpenaiClient::new(openai_key, &configuration.interpreter)),
    };
    let interpreter = QueryInterpreter::new(openai_client, configuration.interpreter.timeout());

    let retriever = Retriever::new(configuration.retrieval).map_err(std::io::Error::other)?;
    let aggregator = PriceAggregator::new(interpreter, SourceCatalog::builtin(), retriever);

    log::info!(
        "Serving price searches on http://{}/api/prices ({})",
        address,
        environment.as_str()
    );
    run(listener, aggregator, environment)?.await
}
