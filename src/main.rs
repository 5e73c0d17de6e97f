use reco_toolkit::cli::RecoCli;
use reco_toolkit::BoxError;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    RecoCli::run().await
}
