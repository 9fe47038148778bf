use std::process::ExitCode;

fn main() -> ExitCode {
    match metric_dashboard::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
