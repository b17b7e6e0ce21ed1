use inventory_probe::{
    config::Config,
    models::InventoryRecord,
    probe::Probe,
    report::{outcome_lines, write_lines},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The target comes from the process environment only; .env may tune
    // logging but never redirects the probe.
    let config = Config::from_env();
    dotenv::dotenv().ok();
    inventory_probe::init_tracing();

    let record = InventoryRecord::probe_fixture();

    // Every failure from client construction to body read ends up as one
    // printed line; the process still exits 0.
    let result = match Probe::new(&config) {
        Ok(probe) => probe.submit(&record).await,
        Err(e) => Err(e),
    };

    write_lines(&mut std::io::stdout().lock(), &outcome_lines(&result))?;
    Ok(())
}
