//! Octet CLI - Command line interface
//!
//! Loads a program file into memory and interprets it; PRINT bytes go to stdout.

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::{exit_code_for, print_error, report_halt, EXIT_FAILURE};
use octet_api::{
    disassemble, get_config, init_config, load_config, load_program, run_to_stdout, LogLevel,
    OctetConfig, OctetError, RunConfig, StallPolicy,
};

/// 未指定 `--config` 时在当前目录查找的配置文件
const DEFAULT_CONFIG_FILE: &str = "octet.json";

#[derive(Parser)]
#[command(
    name = "octet",
    about = "Octet - self-modifying bytecode interpreter",
    version = "0.1.0"
)]
struct Cli {
    /// Program file to execute
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// JSON configuration file (default: ./octet.json if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a disassembly listing and exit
    #[arg(long)]
    disasm: bool,

    /// Halt after this many executed instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Halt the first time an instruction fails validation instead of spinning
    #[arg(long)]
    halt_on_stall: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log level for the VM ("error", "warn", "info", "debug", "trace")
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_vm: Option<LogLevel>,
}

fn main() {
    let cli = Cli::parse();

    // Read config file
    let file_config = match read_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            print_error(&e);
            process::exit(EXIT_FAILURE);
        }
    };

    let log_config = LogConfig::resolve(&file_config.log, cli.verbose, cli.log_vm);
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_deref())
    {
        eprintln!("Error: cannot open log file: {e}");
        process::exit(EXIT_FAILURE);
    }

    // Build run configuration; flags override the file
    init_config(build_run_config(&cli, &file_config, &log_config));
    let run_config = get_config();
    debug!(target: "octet::cli", ?run_config, "Resolved configuration");

    let program = match load_program(&cli.program) {
        Ok(p) => p,
        Err(e) => {
            print_error(&e);
            process::exit(EXIT_FAILURE);
        }
    };

    if cli.disasm {
        handle_disasm(&program, run_config);
    } else {
        handle_run(program, run_config);
    }
}

/// Read the config file named on the command line, or ./octet.json if present
fn read_config(path: Option<&Path>) -> Result<OctetConfig, OctetError> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => load_config(DEFAULT_CONFIG_FILE),
        None => Ok(OctetConfig::default()),
    }
}

fn build_run_config(cli: &Cli, file_config: &OctetConfig, log_config: &LogConfig) -> RunConfig {
    let mut run_config = RunConfig::from_config(file_config);
    if let Some(max_steps) = cli.max_steps {
        run_config.vm.limits.max_steps = Some(max_steps);
    }
    if cli.halt_on_stall {
        run_config.vm.stall = StallPolicy::Halt;
    }
    run_config.dump_listing = log_config.vm_debug_enabled();
    run_config
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{s}'"))
}

fn handle_disasm(program: &[u8], config: &RunConfig) {
    match disassemble(program, config) {
        Ok(listing) => {
            for line in listing {
                println!("{line}");
            }
        }
        Err(e) => {
            print_error(&e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn handle_run(program: Vec<u8>, config: &RunConfig) {
    match run_to_stdout(program, config) {
        Ok(output) => {
            info!(target: "octet::cli", halt = %output.halt, steps = output.steps, "Done");
            report_halt(&output.halt);
            process::exit(exit_code_for(&output.halt));
        }
        Err(e) => {
            print_error(&e);
            process::exit(EXIT_FAILURE);
        }
    }
}
