use pagetree::cli::{self, Cli};
use pagetree::ui::output;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse_args();

    // --debug wins, otherwise RUST_LOG or default to WARN
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli::run(cli) {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
