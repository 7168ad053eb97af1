use clap::Parser;
use rawdump::{Cli, OutputFormatter, OutputMode, RawDump, RawDumpError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let rawdump = match RawDump::from_cli(&cli) {
        Ok(rawdump) => rawdump,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    if cli.dry_run {
        rawdump.describe_plan();
        return 0;
    }

    match rawdump.run() {
        Ok(report) => {
            rawdump.output_formatter().print_extraction_report(&report);

            if let Some(ref report_path) = cli.report {
                if let Err(e) = report.save_json(report_path) {
                    rawdump.handle_error(&e);
                    return exit_code_for(&e);
                }
            }

            // Per-file read failures are recorded in the dump, not fatal
            0
        }
        Err(e) => {
            rawdump.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &RawDumpError) -> i32 {
    match error {
        RawDumpError::InvalidPath { .. } => 2,
        RawDumpError::DirectoryAccess { .. } => 3,
        RawDumpError::OutputWrite { .. } => 4,
        RawDumpError::Config { .. } => 5,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "rawdump.toml".to_string());

    match RawDump::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  rawdump --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &RawDumpError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
