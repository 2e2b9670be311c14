use ai_grow::config::Config;
use ai_grow::{logger, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();

    let config = Config::default();
    log::info!("🚀 {} backend starting", config.assistant_name);

    server::run(config).await
}
