//! Command handlers for the `utfin` CLI.
//!
//! Handlers report failures on stderr and exit with status 1, so `main`
//! only has to dispatch.

use std::io::{self, Write};

use crate::{LegacyEncoding, OpenError, OpenOptions};

/// Parse `--legacy=`, `--chunk-size=` and `--prefix=` flags.
///
/// Unknown or malformed values produce a warning and keep the default.
pub fn parse_open_options(args: &[String]) -> OpenOptions {
    let mut options = OpenOptions::default();

    for arg in args {
        if let Some(label) = arg.strip_prefix("--legacy=") {
            if let Some(legacy) = LegacyEncoding::from_label(label) {
                options.legacy = legacy;
            } else {
                eprintln!(
                    "warning: '{label}' is not a usable legacy encoding, using {}",
                    options.legacy.name()
                );
            }
        } else if let Some(size) = arg.strip_prefix("--chunk-size=") {
            match size.parse::<usize>() {
                Ok(n) if n > 0 => options.chunk_size = n,
                _ => eprintln!(
                    "warning: invalid chunk size '{size}', using {}",
                    options.chunk_size
                ),
            }
        } else if let Some(len) = arg.strip_prefix("--prefix=") {
            match len.parse::<usize>() {
                Ok(n) => options.prefix_len = n,
                Err(_) => eprintln!(
                    "warning: invalid prefix length '{len}', using {}",
                    options.prefix_len
                ),
            }
        } else if arg.starts_with('-') {
            eprintln!("warning: unknown option '{arg}'");
        }
    }

    options
}

/// Write `path` to stdout as UTF-8.
pub fn cat_file(path: &str, options: &OpenOptions) {
    let mut stream = options.open(path).unwrap_or_else(|e| fail_open(&e));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let copied = io::copy(&mut stream, &mut out).and_then(|_| out.flush());

    match copied {
        Ok(()) => {}
        // `utfin cat big.txt | head` closes the pipe early.
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => {
            eprintln!("error reading '{path}': {e}");
            std::process::exit(1);
        }
    }
}

/// Print the encoding detected for `path`.
pub fn detect_file(path: &str, options: &OpenOptions) {
    match options.detect(path) {
        Ok(encoding) => println!("{encoding}"),
        Err(e) => fail_open(&e),
    }
}

fn fail_open(err: &OpenError) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
