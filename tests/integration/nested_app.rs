//! Nested subcommand dispatch: selection, missing-command handling,
//! per-node help, and aggregated long help.

use super::test_utils::{dispatch, entries, new_log, wumpus_info, Log, MoveCmd, Wumpus};
use cliframe::{Command, Error, NodeBuilder, ParsedOptions, Result};
use std::sync::Arc;

fn wumpus(log: &Log) -> Box<Wumpus> {
    Box::new(Wumpus {
        log: Arc::clone(log),
    })
}

#[test]
fn test_dispatch_into_nested_leaf() {
    let log = new_log();
    let (result, _) = dispatch(
        &wumpus_info(),
        wumpus(&log),
        &["wumpus", "hunt", "move", "cave3"],
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(entries(&log), ["move cave3"]);
}

#[test]
fn test_dispatch_into_first_level_leaf() {
    let log = new_log();
    let (result, _) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "map"]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(entries(&log), ["map"]);
}

#[test]
fn test_leaf_option_default_and_override() {
    let log = new_log();
    let (result, _) = dispatch(
        &wumpus_info(),
        wumpus(&log),
        &["wumpus", "hunt", "shoot", "den"],
    );
    assert_eq!(result.unwrap(), 0);

    let (result, _) = dispatch(
        &wumpus_info(),
        wumpus(&log),
        &["wumpus", "hunt", "shoot", "--arrows", "2", "den"],
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(entries(&log), ["shoot den x1", "shoot den x2"]);
}

#[test]
fn test_missing_command_at_root_exits_two() {
    let log = new_log();
    let (result, _) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus"]);
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "missing COMMAND");
    assert_eq!(err.exit_code(), 2);
    match err {
        Error::MissingCommand { usage } => {
            assert!(usage.starts_with("Usage: wumpus"));
            assert!(usage.contains("COMMAND ..."));
        }
        other => panic!("expected MissingCommand, got {other:?}"),
    }
    assert!(entries(&log).is_empty());
}

#[test]
fn test_missing_command_at_intermediate_exits_two() {
    let log = new_log();
    let (result, _) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "hunt"]);
    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 2);
    match err {
        Error::MissingCommand { usage } => assert!(usage.starts_with("Usage: wumpus hunt")),
        other => panic!("expected MissingCommand, got {other:?}"),
    }
}

#[test]
fn test_unknown_subcommand_exits_two() {
    let log = new_log();
    let (result, _) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "dance"]);
    let err = result.unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_root_help_lists_commands() {
    let log = new_log();
    let (result, out) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "-h"]);
    assert_eq!(result.unwrap(), 0);
    assert!(out.contains("COMMAND ..."));
    assert!(out.contains("Commands:"));
    assert!(out.contains("Stalk the beast."));
    assert!(out.contains("Draw the cave map."));
    assert!(out.contains("-H, --long-help"));
}

#[test]
fn test_subcommand_help_targets_that_node() {
    let log = new_log();
    let (result, out) = dispatch(
        &wumpus_info(),
        wumpus(&log),
        &["wumpus", "hunt", "move", "-h"],
    );
    assert_eq!(result.unwrap(), 0);
    assert!(out.starts_with("Usage: wumpus hunt move"));
    assert!(out.contains("cave to enter"));
    assert!(entries(&log).is_empty());
}

#[test]
fn test_root_help_wins_over_subcommand_tokens() {
    let log = new_log();
    let (result, out) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "-h", "map"]);
    assert_eq!(result.unwrap(), 0);
    assert!(out.starts_with("Usage: wumpus"));
    assert!(out.contains("Commands:"));
    assert!(entries(&log).is_empty());
}

#[test]
fn test_long_help_walks_preorder_in_declaration_order() {
    let log = new_log();
    let (result, out) = dispatch(&wumpus_info(), wumpus(&log), &["wumpus", "-H"]);
    assert_eq!(result.unwrap(), 0);
    let positions: Vec<usize> = [
        " WUMPUS ",
        " WUMPUS HUNT ",
        " WUMPUS HUNT MOVE ",
        " WUMPUS HUNT SHOOT ",
        " WUMPUS MAP ",
    ]
    .iter()
    .map(|needle| out.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
    .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert!(entries(&log).is_empty());
}

#[test]
fn test_parent_with_run_accepts_bare_invocation() {
    struct Pack {
        log: Log,
    }
    impl Command for Pack {
        fn name(&self) -> &str {
            "pack"
        }
        fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
            node.attach(Box::new(MoveCmd {
                log: Arc::clone(&self.log),
            }))
        }
        fn run(&self, _options: &ParsedOptions) -> Result<()> {
            self.log.lock().unwrap().push("pack itself".to_owned());
            Ok(())
        }
    }

    let log = new_log();
    let info = cliframe::AppInfo::new("pack", "0.1.0");
    let (result, _) = dispatch(
        &info,
        Box::new(Pack {
            log: Arc::clone(&log),
        }),
        &["pack"],
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(entries(&log), ["pack itself"]);
}

#[test]
fn test_verbose_accumulates_across_levels() {
    struct Probe {
        log: Log,
    }
    impl Command for Probe {
        fn name(&self) -> &str {
            "probe"
        }
        fn run(&self, options: &ParsedOptions) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("v={}", options.verbosity()));
            Ok(())
        }
    }
    struct Top {
        log: Log,
    }
    impl Command for Top {
        fn name(&self) -> &str {
            "top"
        }
        fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
            node.attach(Box::new(Probe {
                log: Arc::clone(&self.log),
            }))
        }
    }

    let log = new_log();
    let info = cliframe::AppInfo::new("top", "0.1.0");
    let (result, _) = dispatch(
        &info,
        Box::new(Top {
            log: Arc::clone(&log),
        }),
        &["top", "-v", "probe", "-v"],
    );
    assert_eq!(result.unwrap(), 0);
    assert_eq!(entries(&log), ["v=2"]);
}
