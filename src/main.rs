use std::env;
use std::process::ExitCode;

use thunderdome::cli;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    ExitCode::from(cli::run_with_args(&args).clamp(0, u8::MAX as i32) as u8)
}
