#[tokio::main]
async fn main() {
    wellness_backend::run().await;
}
