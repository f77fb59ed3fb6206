//! Products API - REST server entry point

#[tokio::main]
async fn main() -> eyre::Result<()> {
    products_api::run().await
}
