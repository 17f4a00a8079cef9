//! rmdupes - Remove duplicated files by content hash
//!
//! Entry point for the rmdupes CLI application.

use clap::Parser;
use rmdupes::{
    cli::Cli,
    error::{ExitCode, StructuredError},
};
use yansi::Paint;

fn main() {
    let cli = Cli::parse();
    let json_errors = cli.json_errors;

    match rmdupes::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = ExitCode::for_error(&err);

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                match serde_json::to_string_pretty(&structured) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("[{}] Error: {err:#}", exit_code.code_prefix()),
                }
            } else {
                let prefix = format!("[{}] Error:", exit_code.code_prefix());
                eprintln!("{} {err:#}", prefix.red().bold());
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
