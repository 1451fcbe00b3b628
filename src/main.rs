#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    mt5_notion_relay::init_tracing();

    if !dotenv_loaded {
        tracing::info!(".env file not found, using environment variables");
    }

    mt5_notion_relay::run().await
}
