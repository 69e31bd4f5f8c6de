use std::{env, path::Path, process::ExitCode};

use refbridge::{
    BridgeConfig, BridgeError, Runtime,
    demo::{run_demo, run_search_scenarios},
};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_logging();

    let mut args: Vec<String> = env::args().collect();
    let trace_refcounts = args.iter().any(|arg| arg == "--trace-refcounts");
    let leak_detector = args.iter().any(|arg| arg == "--leak-detector");
    if trace_refcounts {
        args.retain(|arg| arg != "--trace-refcounts");
    }
    if leak_detector {
        args.retain(|arg| arg != "--leak-detector");
    }
    let Some(config_path) = extract_value(&mut args, "--config") else {
        return ExitCode::FAILURE;
    };
    let Some(heap_limit) = extract_value(&mut args, "--heap-limit") else {
        return ExitCode::FAILURE;
    };
    let mut module_dirs = Vec::new();
    if !extract_module_dirs(&mut args, &mut module_dirs) {
        return ExitCode::FAILURE;
    }

    if args.len() < 2 {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match build_config(config_path, heap_limit, module_dirs, trace_refcounts) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            ExitCode::SUCCESS
        }
        "demo" => run_command(config, leak_detector, run_demo),
        "search" => run_command(config, leak_detector, run_search_scenarios),
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: refbridge eval <expression>");
                return ExitCode::FAILURE;
            }
            let snippet = args[2].clone();
            run_command(config, leak_detector, move |rt| {
                let value = rt.evaluate(&snippet, &[])?;
                rt.print_object(Some(value.as_borrowed()))
            })
        }
        other => {
            eprintln!("Error: unknown command `{}`", other);
            print_help();
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    // REFBRIDGE_LOG controls the filter; warnings only by default.
    let filter = EnvFilter::try_from_env("REFBRIDGE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_help() {
    println!(
        "\
refbridge

Usage:
  refbridge demo              Import `lib` and call every function it defines
  refbridge search            Run the binary search scenarios through both policies
  refbridge eval <expression> Evaluate one expression and print the result
  refbridge help

Flags:
  --config <file>       Read settings from a JSON file (default: ./refbridge.json if present)
  --module-dir <dir>    Add a module directory (can be repeated)
  --heap-limit <n>      Fail allocations beyond n live objects
  --trace-refcounts     Log every reference count change at TRACE level
  --leak-detector       Print reference count stats at teardown

Environment:
  REFBRIDGE_LOG         Log filter, e.g. `debug` or `refbridge=trace`"
    );
}

fn run_command(
    config: BridgeConfig,
    leak_detector: bool,
    command: impl FnOnce(&Runtime) -> Result<(), BridgeError>,
) -> ExitCode {
    let rt = match Runtime::initialize(config) {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let result = command(&rt);
    let report = rt.teardown();

    if leak_detector {
        let stats = report.stats;
        println!(
            "\nLeak stats:\n  allocations: {}\n  frees: {}\n  increfs: {}\n  decrefs: {}\n  live: {}",
            stats.allocations, stats.frees, stats.increfs, stats.decrefs, stats.live
        );
        for leaked in &report.leaked {
            println!(
                "  leaked #{} {} (refcount {}): {}",
                leaked.id, leaked.kind, leaked.refcount, leaked.repr
            );
        }
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn build_config(
    config_path: Option<String>,
    heap_limit: Option<String>,
    module_dirs: Vec<String>,
    trace_refcounts: bool,
) -> Result<BridgeConfig, BridgeError> {
    let mut config = match config_path {
        Some(path) => BridgeConfig::load(Path::new(&path))?,
        None => BridgeConfig::discover()?,
    };
    for dir in module_dirs {
        config = config.with_module_dir(dir);
    }
    if let Some(limit) = heap_limit {
        let limit = limit.parse::<usize>().map_err(|_| {
            BridgeError::Config("--heap-limit expects a non-negative integer".to_string())
        })?;
        config = config.with_heap_limit(limit);
    }
    if trace_refcounts {
        config = config.with_trace_refcounts(true);
    }
    Ok(config)
}

/// Removes `flag <value>` from `args`. The outer `None` means the flag was
/// given without a value.
fn extract_value(args: &mut Vec<String>, flag: &str) -> Option<Option<String>> {
    let mut value = None;
    let mut i = 0;
    while i < args.len() {
        if args[i] == flag {
            if i + 1 >= args.len() {
                eprintln!("Usage: refbridge <command> {} <value>", flag);
                return None;
            }
            value = Some(args.remove(i + 1));
            args.remove(i);
            continue;
        }
        i += 1;
    }
    Some(value)
}

fn extract_module_dirs(args: &mut Vec<String>, dirs: &mut Vec<String>) -> bool {
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--module-dir" {
            if i + 1 >= args.len() {
                eprintln!("Usage: refbridge <command> --module-dir <dir> [--module-dir <dir> ...]");
                return false;
            }
            let dir = args.remove(i + 1);
            args.remove(i);
            dirs.push(dir);
            continue;
        }
        i += 1;
    }
    true
}
