use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = meter_billing::app::Cli::parse();
    if let Err(err) = meter_billing::app::run(cli) {
        eprintln!("erro: {err}");
        std::process::exit(1);
    }
}
