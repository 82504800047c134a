mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;
use tracing::Level;

use crate::core::error::GraphError;

fn init_logging(debug: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if debug { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    // a subscriber installed by an embedding program wins
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run() -> Result<(), GraphError> {
    let cli = parse::Cli::parse();
    init_logging(cli.debug);
    match cli.cmd {
        parse::Command::Csv(a) => handlers::csv(a),
        parse::Command::Histogram(a) => handlers::histogram(a),
        parse::Command::Demo(a) => handlers::demo(&a),
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
        parse::Command::Examples => {
            handlers::examples();
            Ok(())
        }
    }
}
