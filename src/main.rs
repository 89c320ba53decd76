#[tokio::main]
async fn main() -> anyhow::Result<()> {
    club_gateway_lib::run().await?;
    Ok(())
}
