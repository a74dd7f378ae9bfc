//! Lambda entry point wrapping the search event handler.
//!
//! Built only with the `lambda` feature; the CLI binary is the default
//! surface.

#[cfg(feature = "lambda")]
use bizsearch::event::{handle_search_event, SearchEvent, SearchEventResponse};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<SearchEvent>) -> Result<SearchEventResponse, Error> {
    log::info!(
        "Search request for {} in {}",
        event.payload.query,
        event.payload.zip
    );

    let response = handle_search_event(event.payload)
        .await
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    log::info!("Returning {} rows", response.body.len());
    Ok(response)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    run(service_fn(function_handler)).await
}
