use clap::Parser;
use fry9c_processor::FilingProcessor;
use fry9c_processor::cli::args::Args;
use fry9c_processor::cli::logging::setup_logging;
use fry9c_processor::cli::report::render_report;
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        process::exit(2);
    }

    if let Err(e) = setup_logging(&args) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(2);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        FilingProcessor::new(args.to_config())
            .with_progress(args.show_progress())
            .process()
            .await
    });

    match result {
        Ok(report) => {
            render_report(&args.output_format, &report);
            // The run succeeds when at least one partition landed;
            // skipped files alone do not fail it.
            if report.wrote_any() {
                process::exit(0);
            }
            eprintln!("Error: no partitions could be written");
            process::exit(1);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
