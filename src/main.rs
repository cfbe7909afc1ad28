use jmastat::{Jmastat, JmastatError};
use log::info;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), JmastatError> {
    env_logger::init();

    let scraper = Jmastat::builder().build();
    let results = scraper.run().await?;
    results.write_to_dir(Path::new("."))?;
    info!("Scraped {} observations", results.len());
    Ok(())
}
