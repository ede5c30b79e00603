#[actix_web::main]
async fn main() -> std::io::Result<()> {
    solar_quote_server::run().await
}
