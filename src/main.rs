#[tokio::main]
async fn main() -> std::io::Result<()> {
    sheetjoin::run().await
}
