//! utfin CLI
//!
//! Print text files of any supported encoding as UTF-8.

use std::sync::Once;

use utfin::commands::{cat_file, detect_file, parse_open_options};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Enable with `RUST_LOG=utfin=debug` or `RUST_LOG=utfin_decode=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "cat" | "detect" => {
            let Some(path) = args.iter().skip(2).find(|arg| !arg.starts_with('-')) else {
                eprintln!("error: missing file path");
                eprintln!("Usage: utfin {command} <file> [options]");
                std::process::exit(1);
            };
            let options = parse_open_options(&args[2..]);

            if command == "cat" {
                cat_file(path, &options);
            } else {
                detect_file(path, &options);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("utfin {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("utfin - read text files of unknown encoding as UTF-8");
    println!();
    println!("Usage: utfin <command> [options]");
    println!();
    println!("Commands:");
    println!("  cat <file>       Write the file to stdout as UTF-8");
    println!("  detect <file>    Print the detected encoding");
    println!("  help             Show this help message");
    println!("  version          Show version information");
    println!();
    println!("Options:");
    println!("  --legacy=<label>     Fallback for non-UTF-8 text (default: from locale)");
    println!("  --chunk-size=<n>     Raw bytes decoded per read (default: 4096)");
    println!("  --prefix=<n>         Bytes inspected for detection (default: 4096)");
    println!();
    println!("Set RUST_LOG=utfin=debug to trace detection.");
}
