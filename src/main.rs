use clap::Parser;
use collision_csv::cli::{Args, setup_logging};
use collision_csv::constants::exit_codes;
use collision_csv::{ConversionStats, convert};
use colored::*;
use std::process;

fn main() {
    let args = Args::parse();

    if let Err(error) = setup_logging(&args) {
        eprintln!("Failed to initialize logging: {:#}", error);
        process::exit(exit_codes::FAILURE);
    }

    let input = args.input();
    let output = args.output();

    match convert(&input, &output, args.to_config()) {
        Ok(stats) => {
            if !args.quiet {
                print_summary(&stats);
            }
            process::exit(exit_codes::SUCCESS);
        }
        Err(error) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), error);
            process::exit(error.exit_code());
        }
    }
}

fn print_summary(stats: &ConversionStats) {
    println!("{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Input:".bright_cyan(),
        stats.input_path.display()
    );
    println!(
        "  {} {}",
        "Output:".bright_cyan(),
        stats.output_path.display()
    );
    println!(
        "  {} {}",
        "Layout:".bright_cyan(),
        stats.layout.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
}
