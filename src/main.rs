use mimalloc::MiMalloc;
use signup_load_test::init::{cli::Cli, logging::init_logging, run_init::run_init_proc};
use tracing::info;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    let cli = Cli::load()?;
    // Dropping the guard flushes buffered file logs; keep it for the whole run.
    let _log_guard = init_logging(&cli.log_options())?;

    info!("Initializing load test...");
    run_init_proc(cli, start).await?;

    Ok(())
}
