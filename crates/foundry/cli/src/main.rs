//! Foundry CLI entry point

#[tokio::main]
async fn main() {
    if let Err(err) = foundry::run().await {
        foundry::output::print_error(&err.to_string());
        std::process::exit(1);
    }
}
