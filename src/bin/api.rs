use boom_summarizer::core::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    boom_summarizer::setup_logging()?;
    boom_summarizer::api::serve(ServerConfig::from_env()).await?;
    Ok(())
}
