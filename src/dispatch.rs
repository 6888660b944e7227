//! Dispatch: bootstrap, build the tree, parse, answer meta-flags, run.
//!
//! Meta-flags short-circuit in fixed priority before any command behavior:
//! help, long help, markdown help, version, print-config, print-url,
//! completion. Everything else funnels into the selected node's handler.

use crate::bootstrap::{self, BootstrapResult};
use crate::command::{Command, CommandNode};
use crate::completion;
use crate::error::{Error, Result};
use crate::help::{self, HelpMode};
use crate::logging;
use crate::metadata::AppInfo;
use crate::parse;
use crate::registry::Registry;
use clap::parser::ValueSource;
use clap::ArgMatches;
use std::io::Write;

/// Run the application and return its exit code.
///
/// `argv` is the full vector as produced by `std::env::args`, program name
/// first. Errors are reported on stderr; meta-flag output goes to stdout,
/// colorized only when stdout is an interactive terminal.
pub fn run(info: &AppInfo, root: Box<dyn Command>, argv: &[String]) -> i32 {
    let mut stdout = std::io::stdout();
    match try_run(info, root, argv, help::terminal_mode(), &mut stdout) {
        Ok(code) => code,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    }
}

fn report(err: &Error) {
    match err {
        Error::Usage(message) => eprintln!("{message}"),
        Error::MissingCommand { usage } if !usage.is_empty() => {
            eprintln!("{usage}");
            eprintln!("error: {err}");
        }
        _ => eprintln!("error: {err}"),
    }
}

/// Dispatch with an explicit help mode and output stream. [`run`] wraps
/// this; tests call it directly to capture output.
pub fn try_run(
    info: &AppInfo,
    root: Box<dyn Command>,
    argv: &[String],
    mode: HelpMode,
    out: &mut dyn Write,
) -> Result<i32> {
    let tail = argv.get(1..).unwrap_or_default();
    let boot = bootstrap::bootstrap(info, tail)?;
    logging::init(boot.verbosity());

    let root = Registry::new(info).build_root(root)?;
    tracing::debug!(command = %root.name(), "command tree finalized");

    let matches = parse::to_clap(&root, &boot)
        .try_get_matches_from(argv.iter())
        .map_err(|err| Error::Usage(err.to_string().trim_end().to_owned()))?;
    let chain = parse::match_chain(&root, &matches);

    // Help binds to the shallowest node it was given on; a deeper `-h`
    // only parses at all when no shallower one was present.
    for level in &chain {
        if level.matches.get_flag("help") {
            return emit(out, &help::render(level.node, info, mode));
        }
    }

    let root_matches = chain[0].matches;
    if root.has_children() && root_matches.get_flag("long-help") {
        return emit(out, &help::render_tree(&root, info, mode));
    }
    if root_matches.get_flag("md-help") {
        let text = if root.has_children() {
            help::render_tree(&root, info, HelpMode::Markdown)
        } else {
            help::render(&root, info, HelpMode::Markdown)
        };
        return emit(out, &text);
    }
    if root_matches.get_flag("version") {
        return emit(out, &format!("{}\n", info.version));
    }
    if root_matches.get_flag("print-config") {
        let table = effective_config(info, &boot, &root, root_matches);
        let rendered = toml::to_string(&table).map_err(|err| Error::Command(err.into()))?;
        return emit(out, &rendered);
    }
    if root_matches.get_flag("print-url") {
        return emit(out, &format!("{}\n", info.url));
    }
    if root_matches.value_source("completion") == Some(ValueSource::CommandLine) {
        let shell = root_matches
            .get_one::<String>("completion")
            .cloned()
            .unwrap_or_else(|| "bash".to_owned());
        completion::generate_script(&shell, parse::to_clap(&root, &boot), out)?;
        return Ok(0);
    }

    parse::validate_required(&chain, &boot)?;
    let options = parse::collect(&chain);
    let selected = chain.last().expect("chain starts at root").node;
    tracing::info!(command = %selected.path_string(), "dispatching");

    match selected.handler().run(&options) {
        Ok(()) => Ok(0),
        Err(Error::MissingCommand { .. }) => Err(Error::MissingCommand {
            usage: usage_line(selected),
        }),
        Err(err) => Err(err),
    }
}

fn emit(out: &mut dyn Write, text: &str) -> Result<i32> {
    out.write_all(text.as_bytes())
        .map_err(|err| Error::Command(err.into()))?;
    Ok(0)
}

fn usage_line(node: &CommandNode) -> String {
    format!("Usage: {}", help::document::usage_line(node))
}

/// Effective configuration: file values overlaid with root options given
/// explicitly on the command line, wrapped in the config section when set.
fn effective_config(
    info: &AppInfo,
    boot: &BootstrapResult,
    root: &CommandNode,
    matches: &ArgMatches,
) -> toml::Table {
    let mut table = boot.values().clone();
    for spec in root.specs() {
        if spec.is_common() || spec.is_hidden() {
            continue;
        }
        if matches.value_source(spec.name()) != Some(ValueSource::CommandLine) {
            continue;
        }
        if let Some(value) = toml_value(spec, matches) {
            table.insert(spec.name().to_owned(), value);
        }
    }
    match &info.config_section {
        Some(section) => {
            let mut outer = toml::Table::new();
            outer.insert(section.clone(), toml::Value::Table(table));
            outer
        }
        None => table,
    }
}

fn toml_value(spec: &crate::args::ArgumentSpec, matches: &ArgMatches) -> Option<toml::Value> {
    use crate::args::{Arity, ValueKind};
    let name = spec.name();
    match spec.arity() {
        Arity::Flag => Some(toml::Value::Boolean(matches.get_flag(name))),
        Arity::Count => Some(toml::Value::Integer(i64::from(matches.get_count(name)))),
        Arity::Variadic => matches.get_many::<String>(name).map(|values| {
            toml::Value::Array(values.map(|v| toml::Value::String(v.clone())).collect())
        }),
        Arity::Single | Arity::Optional { .. } => match spec.value_kind() {
            ValueKind::Str => matches
                .get_one::<String>(name)
                .map(|v| toml::Value::String(v.clone())),
            ValueKind::Int => matches.get_one::<i64>(name).map(|v| toml::Value::Integer(*v)),
            ValueKind::Path => matches
                .get_one::<std::path::PathBuf>(name)
                .map(|v| toml::Value::String(v.display().to_string())),
        },
    }
}
