//! Command-line interface for split-text
//! Reads an HTML file, splits the text of the selected elements and prints the result.
//!
//! Usage:
//!   split-text `<path>` [--delimiter `<name>` | --pattern `<regex>`] [--target `<tag>`]
//!              [--format html|fragment|json] [--config `<file>`] [flags]

use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use split_text::config::{Loader, OptionsConfig};
use split_text::dom::{self, HtmlDocument};
use split_text::{split_text, SplitError, SplitTextOptions};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// One wrapper, as printed by `--format json`
#[derive(Debug, Serialize)]
struct WrapperSummary {
    index: usize,
    text: String,
    class: Option<String>,
    id: Option<String>,
}

fn main() {
    let matches = Command::new("split-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Wraps the characters, words or sentences of HTML text in their own elements")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the HTML file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("delimiter")
                .long("delimiter")
                .short('d')
                .help("Unit to wrap: all, character, word, sentence or element"),
        )
        .arg(
            Arg::new("pattern")
                .long("pattern")
                .short('p')
                .help("Custom regex to match units with (group 1 is wrapped if present)")
                .conflicts_with("delimiter"),
        )
        .arg(
            Arg::new("tag")
                .long("tag")
                .short('t')
                .help("Element name for wrappers"),
        )
        .arg(
            Arg::new("class")
                .long("class")
                .help("Extra class added to every wrapper"),
        )
        .arg(
            Arg::new("index-id")
                .long("index-id")
                .help("Give wrappers an id of <class>-<n>")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("value-class")
                .long("value-class")
                .help("Add a class derived from each wrapper's text")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("strip-html")
                .long("strip-html")
                .help("Flatten each target to plain text before splitting")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-aria")
                .long("no-aria")
                .help("Do not set aria-label / aria-hidden")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Log traversal timing")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with options, layered over the defaults"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .help("Tag name of the elements to split")
                .default_value("body"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(["html", "fragment", "json"])
                .default_value("html"),
        )
        .get_matches();

    // The log level follows `debug` from any layer, and converting the raw config
    // into options may already warn
    let config = load_config(&matches);
    let debug = match &config {
        Ok(config) => config.debug,
        Err(_) => matches.get_flag("debug"),
    };
    init_tracing(debug);

    let result = config.and_then(|config| run(&matches, config.into()));
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches, options: SplitTextOptions) -> Result<(), SplitError> {
    // Required or defaulted by clap
    let path = matches.get_one::<String>("path").expect("path is required");
    let target = matches
        .get_one::<String>("target")
        .expect("target has a default");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default");

    let source = std::fs::read_to_string(path)?;
    let doc = HtmlDocument::parse(&source);

    let targets = doc.elements_by_tag(target);
    if targets.is_empty() {
        return Err(SplitError::TargetNotFound(target.clone()));
    }

    let mut wrappers = Vec::new();
    for element in &targets {
        wrappers.extend(split_text(element, &options));
    }

    let output = match format.as_str() {
        "fragment" => doc.body_html()?,
        "json" => {
            let summaries: Vec<WrapperSummary> = wrappers
                .iter()
                .enumerate()
                .map(|(index, wrapper)| WrapperSummary {
                    index,
                    text: dom::text_content(wrapper),
                    class: dom::get_attribute(wrapper, "class"),
                    id: dom::get_attribute(wrapper, "id"),
                })
                .collect();
            serde_json::to_string_pretty(&summaries)
                .map_err(|e| SplitError::Serialization(e.to_string()))?
        }
        _ => doc.to_html()?,
    };

    println!("{}", output);
    Ok(())
}

/// Defaults, then `--config`, then individual flags
fn load_config(matches: &ArgMatches) -> Result<OptionsConfig, SplitError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    // An explicit delimiter beats a pattern coming from the config file
    if matches.get_one::<String>("delimiter").is_some() {
        loader = loader.set_override("pattern", "")?;
    }

    for (arg, key) in [
        ("delimiter", "delimiter"),
        ("pattern", "pattern"),
        ("tag", "tag"),
        ("class", "custom_class"),
    ] {
        if let Some(value) = matches.get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    for (flag, key) in [
        ("index-id", "generate_index_id"),
        ("value-class", "generate_value_class"),
        ("strip-html", "strip_html_tags"),
        ("debug", "debug"),
    ] {
        if matches.get_flag(flag) {
            loader = loader.set_override(key, true)?;
        }
    }
    if matches.get_flag("no-aria") {
        loader = loader.set_override("aria", false)?;
    }

    loader.build_config()
}
