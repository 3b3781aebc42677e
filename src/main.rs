#[tokio::main]
async fn main() {
    amparo::run().await;
}
