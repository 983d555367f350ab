use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    crave_cli::main_entry().await
}
