//! richspan - toggle inline styles in stored rich-text documents

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use richspan::markup::{deserialize_verbatim, read_markup};
use richspan::{
    Color, EditSession, NodeId, StyleCatalog, StyleKind, check_invariants,
    read_document, write_document,
};

#[derive(Parser)]
#[command(name = "richspan")]
#[command(version, about = "Inline style-span engine for rich-text documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    richspan apply note.html --style bold --range 0..5 -o out.html
    richspan apply note.html --style text-color --value '#00ff00' --range 3..9
    richspan check note.html --json
    richspan dump note.html")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Toggle a style over a range of document chars
    Apply {
        /// Stored markup file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Style kind (bold, italic, underline, strikethrough, text-color,
        /// background-color)
        #[arg(short, long)]
        style: StyleKind,

        /// Char range, as START..END
        #[arg(short, long)]
        range: CharRange,

        /// Color for the color kinds (defaults from the catalog)
        #[arg(long)]
        value: Option<String>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON style catalog with default colors
        #[arg(long, value_name = "CATALOG")]
        config: Option<PathBuf>,
    },

    /// Report normalization problems in stored markup
    Check {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Print violations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the parsed document tree as JSON
    Dump {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Copy)]
struct CharRange {
    start: usize,
    end: usize,
}

impl FromStr for CharRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| format!("expected START..END, got `{s}`"))?;
        let parse = |n: &str| {
            n.trim()
                .parse::<usize>()
                .map_err(|e| format!("bad offset `{n}`: {e}"))
        };
        Ok(CharRange {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Apply {
            input,
            style,
            range,
            value,
            output,
            config,
        } => apply(&input, style, range, value, output.as_deref(), config.as_deref()),
        Command::Check { input, json } => check(&input, json),
        Command::Dump { input } => dump(&input),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(path: &Path) -> Result<StyleCatalog, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}

fn apply(
    input: &Path,
    style: StyleKind,
    range: CharRange,
    value: Option<String>,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<ExitCode, String> {
    let mut doc = read_document(input).map_err(|e| e.to_string())?;
    if let Some(path) = config {
        doc.set_catalog(load_catalog(path)?);
    }

    let mut session = EditSession::new(doc);
    session.select(range.start, range.end);
    let active = session.toggle(style, value.map(Color::new));
    session.blur();

    eprintln!(
        "{} {} over chars {}..{}",
        style,
        if active { "applied" } else { "removed" },
        range.start,
        range.end
    );

    match output {
        Some(path) => {
            write_document(session.document(), path).map_err(|e| e.to_string())?;
        }
        None => println!("{}", session.serialize().map_err(|e| e.to_string())?),
    }
    Ok(ExitCode::SUCCESS)
}

fn check(input: &Path, json: bool) -> Result<ExitCode, String> {
    let text = read_markup(input).map_err(|e| e.to_string())?;
    let doc = deserialize_verbatim(&text).map_err(|e| e.to_string())?;
    let violations = check_invariants(&doc, NodeId::ROOT);

    if json {
        let out = serde_json::to_string_pretty(&violations).map_err(|e| e.to_string())?;
        println!("{out}");
    } else if violations.is_empty() {
        println!("{}: ok", input.display());
    } else {
        for violation in &violations {
            println!("{}: {violation}", input.display());
        }
    }

    Ok(if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn dump(input: &Path) -> Result<ExitCode, String> {
    let doc = read_document(input).map_err(|e| e.to_string())?;
    let out = serde_json::to_string_pretty(&doc.root_view()).map_err(|e| e.to_string())?;
    println!("{out}");
    Ok(ExitCode::SUCCESS)
}
