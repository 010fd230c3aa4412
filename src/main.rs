//! `ts-doc-gen` - single-page TypeScript API reference builder

use clap::Parser;

use ts_doc_gen::cli::args::Cli;
use ts_doc_gen::cli::commands;
use ts_doc_gen::error::ExitCode;
use ts_doc_gen::observability::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(cli.log_format, cli.verbose, cli.color);
    }

    match commands::run(&cli).await {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
