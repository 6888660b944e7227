//! Full-parse bridge: compile the finalized spec tree into a `clap` command
//! and lift the matches back into `ParsedOptions`.
//!
//! clap owns tokenization and value coercion only. Help and version handling
//! are disabled here; the dispatcher answers those from the framework's own
//! renderer. Config-file values land as clap defaults, which yields the
//! required precedence: command line over config value over built-in.

use crate::args::{ArgumentSpec, Arity, OptionValue, ParsedOptions, ValueKind};
use crate::bootstrap::BootstrapResult;
use crate::command::CommandNode;
use clap::builder::ValueParser;
use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches};
use std::path::PathBuf;

/// Compile a node and its subtree into a `clap::Command`.
pub(crate) fn to_clap(node: &CommandNode, bootstrap: &BootstrapResult) -> clap::Command {
    let mut cmd = clap::Command::new(node.name().to_owned())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true);
    if !node.about().is_empty() {
        cmd = cmd.about(node.about().to_owned());
    }
    for spec in node.specs() {
        cmd = cmd.arg(to_arg(spec, bootstrap));
    }
    for child in node.children() {
        cmd = cmd.subcommand(to_clap(child, bootstrap));
    }
    cmd
}

fn value_parser_for(kind: ValueKind) -> ValueParser {
    match kind {
        ValueKind::Str => ValueParser::string(),
        ValueKind::Int => clap::value_parser!(i64).into(),
        ValueKind::Path => clap::value_parser!(PathBuf).into(),
    }
}

/// Default for a spec after the config tier is applied. Common options never
/// take config values; their defaults are part of the framework contract.
fn effective_default(spec: &ArgumentSpec, bootstrap: &BootstrapResult) -> Option<String> {
    if spec.is_common() {
        return spec.default_value().map(str::to_owned);
    }
    bootstrap
        .default_for(spec.name())
        .or_else(|| spec.default_value().map(str::to_owned))
}

fn to_arg(spec: &ArgumentSpec, bootstrap: &BootstrapResult) -> Arg {
    let mut arg = Arg::new(spec.name().to_owned());
    if let Some(short) = spec.short_flag() {
        arg = arg.short(short);
    }
    if let Some(long) = spec.long_flag() {
        arg = arg.long(long.to_owned());
    }
    if spec.is_hidden() {
        arg = arg.hide(true);
    }

    let default = effective_default(spec, bootstrap);
    match spec.arity() {
        Arity::Flag => {
            arg = arg.action(ArgAction::SetTrue);
            if let Some(default) = default {
                arg = arg.default_value(default);
            }
        }
        Arity::Count => {
            arg = arg.action(ArgAction::Count);
        }
        Arity::Single => {
            // Requiredness is checked after meta-flag short-circuits, so a
            // bare `-h` on a command with required positionals still helps.
            arg = arg
                .action(ArgAction::Set)
                .value_name(spec.value_name())
                .value_parser(value_parser_for(spec.value_kind()));
            if let Some(default) = default {
                arg = arg.default_value(default);
            }
        }
        Arity::Optional { missing } => {
            arg = arg
                .action(ArgAction::Set)
                .value_name(spec.value_name())
                .value_parser(value_parser_for(spec.value_kind()))
                .num_args(0..=1);
            if let Some(missing) = missing {
                arg = arg.default_missing_value(missing.clone());
            }
            if let Some(default) = default {
                arg = arg.default_value(default);
            }
        }
        Arity::Variadic => {
            // Variadic values are collected as strings regardless of kind.
            arg = arg.action(ArgAction::Append).value_name(spec.value_name());
            if spec.is_positional() {
                arg = arg.num_args(0..);
            }
        }
    }
    arg
}

/// One level of the selected command chain.
pub(crate) struct MatchedNode<'t, 'm> {
    pub node: &'t CommandNode,
    pub matches: &'m ArgMatches,
}

/// Walk the matches from the root down the selected subcommands. The first
/// entry is always the root.
pub(crate) fn match_chain<'t, 'm>(
    root: &'t CommandNode,
    matches: &'m ArgMatches,
) -> Vec<MatchedNode<'t, 'm>> {
    let mut chain = vec![MatchedNode {
        node: root,
        matches,
    }];
    let mut node = root;
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        let Some(child) = node.child(name) else {
            break;
        };
        chain.push(MatchedNode {
            node: child,
            matches: sub,
        });
        node = child;
        current = sub;
    }
    chain
}

/// Enforce required positionals across the selected chain. Runs after the
/// meta-flag checks so `-h` and friends win over a missing argument.
pub(crate) fn validate_required(
    chain: &[MatchedNode<'_, '_>],
    bootstrap: &BootstrapResult,
) -> crate::error::Result<()> {
    for level in chain {
        for spec in level.node.specs() {
            let required = spec.is_positional()
                && matches!(spec.arity(), Arity::Single)
                && effective_default(spec, bootstrap).is_none();
            if required && level.matches.value_source(spec.name()).is_none() {
                return Err(crate::error::Error::Usage(format!(
                    "Usage: {}\nerror: the following required argument was not provided: {}",
                    crate::help::document::usage_line(level.node),
                    spec.value_name()
                )));
            }
        }
    }
    Ok(())
}

/// Flatten the chain into `ParsedOptions`. Deeper nodes overwrite ancestors
/// on shared names; verbosity is the sum over all levels.
pub(crate) fn collect(chain: &[MatchedNode<'_, '_>]) -> ParsedOptions {
    let mut opts = ParsedOptions::default();
    let mut verbosity: u64 = 0;
    for level in chain {
        for spec in level.node.specs() {
            let name = spec.name();
            let explicit = level.matches.value_source(name) == Some(ValueSource::CommandLine);
            match spec.arity() {
                Arity::Flag => {
                    opts.insert(name, OptionValue::Flag(level.matches.get_flag(name)), explicit);
                }
                Arity::Count => {
                    let count = u64::from(level.matches.get_count(name));
                    if name == "verbose" {
                        verbosity += count;
                    }
                    opts.insert(name, OptionValue::Count(count), explicit);
                }
                Arity::Single | Arity::Optional { .. } => match spec.value_kind() {
                    ValueKind::Str => {
                        if let Some(value) = level.matches.get_one::<String>(name) {
                            opts.insert(name, OptionValue::Str(value.clone()), explicit);
                        }
                    }
                    ValueKind::Int => {
                        if let Some(value) = level.matches.get_one::<i64>(name) {
                            opts.insert(name, OptionValue::Int(*value), explicit);
                        }
                    }
                    ValueKind::Path => {
                        if let Some(value) = level.matches.get_one::<PathBuf>(name) {
                            opts.insert(name, OptionValue::Path(value.clone()), explicit);
                        }
                    }
                },
                Arity::Variadic => {
                    let values: Vec<String> = level
                        .matches
                        .get_many::<String>(name)
                        .map(|v| v.cloned().collect())
                        .unwrap_or_default();
                    opts.insert(name, OptionValue::List(values), explicit);
                }
            }
        }
    }
    opts.insert("verbose", OptionValue::Count(verbosity), verbosity > 0);
    opts.set_verbosity(verbosity);
    opts.set_command_path(
        chain[1..]
            .iter()
            .map(|level| level.node.name().to_owned())
            .collect(),
    );
    opts
}
