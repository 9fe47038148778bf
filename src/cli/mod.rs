mod handlers;
pub mod parse;

use clap::Parser;
pub use parse::Cli;

use crate::core::error::DashboardError;

/// `RUST_LOG` decides the level unless `--debug` forces it.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // a second init (tests) keeps the first logger
    let _ = builder.format_timestamp_micros().try_init();
}

pub fn run() -> Result<(), DashboardError> {
    let cli = parse::Cli::parse();
    init_logging(cli.debug);
    match cli.cmd {
        parse::Command::Show(a) => handlers::show(&cli.data, &a),
        parse::Command::Interactive(a) => handlers::interactive(&cli.data, &a),
        parse::Command::Columns => handlers::columns(&cli.data),
        parse::Command::Summary(a) => handlers::summary(&cli.data, &a),
        parse::Command::Charts => {
            handlers::charts();
            Ok(())
        }
        parse::Command::Colors => {
            handlers::colors();
            Ok(())
        }
    }
}
