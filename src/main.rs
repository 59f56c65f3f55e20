use std::{collections::HashMap, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use scandi::{
    compiler::compiler::{dot_path, Compiler, Options},
    errors::errors::{Error, ErrorTip, Severity},
    get_line_at_position,
};

/// Checks scandi source files for lexical, syntax and scope errors
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Log every stage and dump the scope tree after each file
    #[arg(short, long)]
    debug: bool,

    /// Source files, compiled in the order given
    #[arg(required = true, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    files: Vec<PathBuf>,
}

impl Args {
    /// Parses the command line, also accepting a bare leading `DEBUG` word.
    fn from_args<I>(args: I) -> Result<Args, clap::Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args: Vec<String> = args.into_iter().collect();
        let debug_word = args.get(1).is_some_and(|arg| arg.eq_ignore_ascii_case("DEBUG"));
        if debug_word {
            args.remove(1);
        }

        let mut parsed = Args::try_parse_from(args)?;
        parsed.debug |= debug_word;
        Ok(parsed)
    }
}

fn main() -> ExitCode {
    let args = match Args::from_args(std::env::args()) {
        Ok(args) => args,
        Err(error) => error.exit(),
    };

    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();
    debug!("{:?}", args);

    let start = Instant::now();
    let mut compiler = Compiler::new(Options { debug: args.debug });
    let mut sources = HashMap::new();

    for file in &args.files {
        sources.insert(dot_path(&file.to_string_lossy()), file.clone());
        compiler.compile_file(file);
    }
    compiler.resolve();

    info!("Total time: {:?}", start.elapsed());

    for error in compiler.diagnostics.entries() {
        let file = sources.get(error.get_position().file.as_str());
        display_error(error, file);
    }

    if compiler.has_errors() {
        println!(
            "{} errors, {} warnings",
            compiler.diagnostics.error_count(),
            compiler.diagnostics.warning_count()
        );
        ExitCode::FAILURE
    } else {
        if compiler.diagnostics.warning_count() > 0 {
            println!("{} warnings", compiler.diagnostics.warning_count());
        }
        ExitCode::SUCCESS
    }
}

fn display_error(error: &Error, file: Option<&PathBuf>) {
    /*
        Error: InvalidSyntax (No statement has the shape `ID-EQ-OP-ID-`)
        -> app/main.scandi
           |
        20 | x ? + y
           |
    */

    let label = match error.severity() {
        Severity::Warning => "Warning",
        Severity::Error => "Error",
    };

    match error.get_tip() {
        ErrorTip::None => println!("{}: {}", label, error.get_error_name()),
        tip => println!("{}: {} ({})", label, error.get_error_name(), tip),
    }
    println!("   {}", error);

    let position = error.get_position();
    let Some(file) = file else {
        return;
    };
    println!("-> {}", file.to_string_lossy());

    let Some(line_text) = get_line_at_position(file, position.line) else {
        return;
    };

    let line_str = position.line.to_string();
    let padding = line_str.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_str, line_text_removed.trim_end());

    if position.column as usize > removed_whitespace {
        let arrows = position.column as usize - removed_whitespace;
        println!("{:>padding$} {:->arrows$}", "|", "^");
    } else {
        println!("{:>padding$}", "|");
    }
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start();
    (trimmed, string.chars().count() - trimmed.chars().count())
}
