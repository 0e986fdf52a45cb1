#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ovt_server::run().await
}
