use wrapgen::emitter::{DefaultArgPolicy, TargetConfig, TargetLanguage};
use wrapgen::error::ErrorMode;
use wrapgen::{SourceText, compile};

use yansi::Paint;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut files = vec![];
    let mut targets = vec![];
    let mut out_dir = ".".to_string();
    let mut mode = ErrorMode::Aggregate;
    let mut defaults = DefaultArgPolicy::Native;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--target" => match args.next().as_deref() {
                Some("cpp") => targets.push(TargetLanguage::Cpp),
                Some("python") => targets.push(TargetLanguage::Python),
                other => {
                    eprintln!("unknown target {other:?}; expected cpp or python");
                    return ExitCode::FAILURE;
                }
            },
            "--out" => match args.next() {
                Some(dir) => out_dir = dir,
                None => {
                    eprintln!("--out needs a directory");
                    return ExitCode::FAILURE;
                }
            },
            "--fail-fast" => mode = ErrorMode::FailFast,
            "--synthesize-defaults" => defaults = DefaultArgPolicy::Synthesize,
            "--reject-defaults" => defaults = DefaultArgPolicy::Reject,
            _ => files.push(arg),
        }
    }

    if files.is_empty() {
        eprintln!("usage: wrapgen [--target cpp|python]... [--out DIR] [--fail-fast] SCHEMA...");
        return ExitCode::FAILURE;
    }
    if targets.is_empty() {
        targets.push(TargetLanguage::Cpp);
    }

    let mut sources = vec![];
    for file in &files {
        match fs::read_to_string(file) {
            Ok(text) => sources.push(SourceText {
                file: file.clone(),
                text,
            }),
            Err(e) => {
                eprintln!("{}: cannot read {file}: {e}", "error".red().bold());
                return ExitCode::FAILURE;
            }
        }
    }

    let configs: Vec<TargetConfig> = targets
        .iter()
        .map(|language| TargetConfig {
            language: *language,
            defaults,
        })
        .collect();

    let outputs = match compile(&sources, &configs, mode) {
        Ok(outputs) => outputs,
        Err(errors) => {
            for error in &errors {
                let text = sources
                    .iter()
                    .find(|s| s.file == error.file)
                    .map(|s| s.text.as_str())
                    .unwrap_or("");
                if error.eprint(text).is_err() {
                    eprintln!("{error}");
                }
            }
            eprintln!(
                "{}: {} error(s), no artifacts written",
                "failed".red().bold(),
                errors.len()
            );
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    for output in outputs {
        match output.artifacts {
            Ok(artifacts) => {
                for artifact in artifacts {
                    let path = Path::new(&out_dir).join(&artifact.filename);
                    if let Err(e) = fs::write(&path, &artifact.contents) {
                        eprintln!("{}: cannot write {}: {e}", "error".red().bold(), path.display());
                        failed = true;
                        continue;
                    }
                    println!("{} {}", "wrote".green().bold(), path.display());
                }
            }
            Err(error) => {
                eprintln!("{error}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
