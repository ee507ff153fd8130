//Vendor Imports
#[macro_use]
extern crate log;
extern crate simplelog;
use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, Config as LogConfig, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::process::ExitCode;

//Application Imports
use sqlevallib::config::Config;
use sqlevallib::sqleval::SqlEval;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        config.log_level,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = &config.log_file {
        match File::create(path) {
            Ok(file) => loggers.push(WriteLogger::new(config.log_level, LogConfig::default(), file)),
            Err(e) => eprintln!("Unable to open log file {}: {}", path.display(), e),
        }
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Unable to start logging: {}", e);
    }

    info!("Benchmarking model {}", config.model);

    let eval = match SqlEval::new(config) {
        Ok(e) => e,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match eval.run().await {
        Ok(reports) => {
            for report in reports {
                info!(
                    "{}: {:.2} correct, written to {}",
                    report.prompt_file.display(),
                    report.summary.overall.correct_rate(),
                    report.output_file.display()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Benchmark failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
