mod args;
mod driver;
mod logging;

use clap::Parser;
use sql_relay::relay::Relay;
use tracing::Level;

use crate::args::{Args, HostConfig};
use crate::logging::LogWriter;

fn main() {
    let args = Args::parse();
    let config = HostConfig::from_args(args);
    let writer = LogWriter::new(config.log.clone()).unwrap_or_else(|err| {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(Level::from(config.level))
        .init();

    let config_json = serde_json::to_string(&config).unwrap_or_else(|_| "{}".to_string());
    tracing::info!("config: {}", config_json);

    let mut builder = Relay::sqlite_builder().worker_name(config.worker_name.clone());
    for sql in &config.init_sql {
        builder = builder.init_sql(sql.clone());
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(error = %err, "failed to start runtime");
            std::process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        let relay = builder.build()?;
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        driver::run(relay, input, tokio::io::stdout()).await
    });

    if let Err(err) = result {
        tracing::error!(error = %err, "relay host stopped");
        std::process::exit(1);
    }
}
