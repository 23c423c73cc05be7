use std::env;
use std::io::{self, BufRead};
use std::process;

use playa_log::{paths, Error, ProcessLogger};

const USAGE: &str = "Usage: playa_log <message>... | playa_log - | playa_log --path";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(&'static str),
    #[error(transparent)]
    Log(#[from] Error),
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        return Err(CliError::InvalidArguments(USAGE));
    }

    match args[0].as_str() {
        // query only, must not create the directory or the file
        "--path" if args.len() == 1 => {
            let path = paths::log_dir()?.join(paths::FILE_NAME);
            println!("{}", path.display());
        }
        "-" if args.len() == 1 => log_stdin(playa_log::logger()?)?,
        "--path" | "-" => return Err(CliError::InvalidArguments(USAGE)),
        _ => {
            let logger = playa_log::logger()?;
            for message in &args {
                logger.log_message(message);
            }
        }
    }

    Ok(())
}

// One log line per stdin line, so `tail -f` style pipelines work. Lines
// that are not UTF-8 are logged lossily instead of ending the run.
fn log_stdin(logger: &ProcessLogger) -> Result<(), Error> {
    for line in io::stdin().lock().split(b'\n') {
        let bytes = line?;
        let line = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
        logger.log_message(&String::from_utf8_lossy(line));
    }
    Ok(())
}
