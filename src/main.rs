//! Count word frequency of a text file.
//!
//! Usage: `word-frequency [PATH|-] [NODES]`. Reads standard input without a
//! path or with `-`. Log verbosity is controlled by `RUST_LOG`.

use std::env;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::process;

use env_logger;
use failure::{Error, ResultExt};
use word_frequency::{self, Execution, MapReduce};

fn main() {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "info");

    env_logger::init_from_env(env);

    if let Err(error) = run(env::args().skip(1).collect()) {
        log::error!("Failed to count words, cause: {}", error);
        process::exit(1);
    }
}

fn run(args: Vec<String>) -> Result<(), Error> {
    let text = read_source(args.get(0).map(String::as_str))?;

    let words = word_frequency::tokenize(&text);

    let nodes = node_count(args.get(1).map(String::as_str), words.len())?;

    let model = MapReduce::new(words, nodes)?.with_execution(Execution::Threaded);

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    for (word, count) in model.process_sorted() {
        writeln!(writer, "{}\t{}", word, count)?;
    }

    writer.flush()?;

    Ok(())
}

/// Requested node count, or `DEFAULT_NODES` clamped to the word count.
///
/// An explicit value is only parsed here; its range is checked by `MapReduce`.
fn node_count(arg: Option<&str>, words: usize) -> Result<i64, Error> {
    match arg {
        Some(value) => {
            let nodes = value
                .parse::<i64>()
                .with_context(|_| format!("Invalid node count {}", value))?;
            Ok(nodes)
        }
        None => Ok(word_frequency::DEFAULT_NODES.min(words.max(1)) as i64),
    }
}

fn read_source(path: Option<&str>) -> Result<String, Error> {
    let mut text = String::new();

    match path {
        None | Some("-") => {
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
        }
        Some(path) => {
            log::info!("Count words for file {}", path);

            text = fs::read_to_string(path)
                .with_context(|_| format!("Missing source text file {}", path))?;
        }
    }

    Ok(text)
}
