//! Command-line diff of two representation algebras.
//!
//! Logs what a component would remove and add when switching from the first
//! algebra to the second, using the grammar and defaults of an optional
//! options preset.

use std::path::PathBuf;

use molrep::algebra::{diff, foreign_segment, project_selections, Parser};
use molrep::options::Options;
use molrep::MolrepError;

const USAGE: &str = "molrep [--options <preset.toml>] <ACTIVE> <NEXT>";

struct Args {
    options: Option<PathBuf>,
    active: String,
    next: String,
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<Args, MolrepError> {
    let mut options = None;
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        if arg == "--options" {
            let path = args.next().ok_or_else(|| {
                MolrepError::Usage("--options needs a path".into())
            })?;
            options = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }
    match <[String; 2]>::try_from(positional) {
        Ok([active, next]) => Ok(Args {
            options,
            active,
            next,
        }),
        Err(_) => Err(MolrepError::Usage(USAGE.into())),
    }
}

fn run(args: &Args) -> Result<(), MolrepError> {
    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let parser = Parser::from_options(&options.algebra);

    for raw in [&args.active, &args.next] {
        if let Some(segment) = foreign_segment(raw, parser.grammar()) {
            return Err(MolrepError::GrammarMismatch {
                expected: parser.grammar(),
                segment: segment.to_owned(),
            });
        }
    }

    let active = parser.parse(&args.active);
    let next = parser.parse(&args.next);
    let changes = diff(Some(&active), &next);

    for entry in &changes.to_remove {
        log::info!("- [{}] {}", entry.index, entry.spec);
    }
    for spec in &changes.to_add {
        log::info!("+ {spec}");
    }
    log::info!(
        "{} removed, {} added, {} kept",
        changes.to_remove.len(),
        changes.to_add.len(),
        changes.kept
    );
    log::info!("selection: {}", project_selections(&next));
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let result =
        parse_args(std::env::args().skip(1)).and_then(|args| run(&args));
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
