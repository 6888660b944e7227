//! Shared fixture applications for integration tests: a flat greeter and a
//! nested wumpus hunt with two levels of subcommands.

use cliframe::{
    AppInfo, ArgumentSpec, Command, HelpMode, NodeBuilder, ParsedOptions, Result, ValueKind,
};
use std::sync::{Arc, Mutex};

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Run the dispatcher with plain help output captured.
pub fn dispatch(
    info: &AppInfo,
    app: Box<dyn Command>,
    argv: &[&str],
) -> (Result<i32>, String) {
    let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let result = cliframe::try_run(info, app, &argv, HelpMode::Plain, &mut out);
    (result, String::from_utf8(out).unwrap())
}

/// Flat application: `greet [--spanish] [--greeting WORD] name`.
pub struct Greet {
    pub log: Log,
}

impl Command for Greet {
    fn name(&self) -> &str {
        "greet"
    }

    fn description(&self) -> &str {
        "This program says hello."
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        node.declare(ArgumentSpec::flag("spanish").help("say hello in Spanish"))?;
        node.declare(
            ArgumentSpec::option("greeting")
                .metavar("WORD")
                .default("Hello")
                .show_default()
                .help("greeting word"),
        )?;
        node.declare(ArgumentSpec::positional("name").help("the person to say hello to"))
    }

    fn run(&self, options: &ParsedOptions) -> Result<()> {
        let greeting = if options.get_flag("spanish") {
            "Hola"
        } else {
            options.get_str("greeting").unwrap_or("Hello")
        };
        self.log.lock().unwrap().push(format!(
            "{greeting}, {}! (v={})",
            options.get_str("name").unwrap_or("?"),
            options.verbosity()
        ));
        Ok(())
    }
}

pub fn greet_info() -> AppInfo {
    AppInfo::new("greet", "1.0.0")
        .with_description("Say hello")
        .with_url("https://example.com/greet")
}

/// Nested application:
/// `wumpus` -> [`hunt` -> [`move`, `shoot`], `map`].
pub struct Wumpus {
    pub log: Log,
}

impl Command for Wumpus {
    fn name(&self) -> &str {
        "wumpus"
    }

    fn description(&self) -> &str {
        "Hunt the wumpus."
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        node.attach(Box::new(Hunt {
            log: Arc::clone(&self.log),
        }))?;
        node.attach(Box::new(Map {
            log: Arc::clone(&self.log),
        }))
    }
}

pub struct Hunt {
    pub log: Log,
}

impl Command for Hunt {
    fn name(&self) -> &str {
        "hunt"
    }

    fn about(&self) -> &str {
        "stalk the beast"
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        node.attach(Box::new(MoveCmd {
            log: Arc::clone(&self.log),
        }))?;
        node.attach(Box::new(Shoot {
            log: Arc::clone(&self.log),
        }))
    }
}

pub struct MoveCmd {
    pub log: Log,
}

impl Command for MoveCmd {
    fn name(&self) -> &str {
        "move"
    }

    fn about(&self) -> &str {
        "move to an adjacent cave"
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        node.declare(ArgumentSpec::positional("cave").help("cave to enter"))
    }

    fn run(&self, options: &ParsedOptions) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("move {}", options.get_str("cave").unwrap_or("?")));
        Ok(())
    }
}

pub struct Shoot {
    pub log: Log,
}

impl Command for Shoot {
    fn name(&self) -> &str {
        "shoot"
    }

    fn about(&self) -> &str {
        "loose an arrow"
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        node.declare(
            ArgumentSpec::option("arrows")
                .kind(ValueKind::Int)
                .default("1")
                .show_default()
                .help("arrows to loose"),
        )?;
        node.declare(ArgumentSpec::positional("room").help("room to shoot into"))
    }

    fn run(&self, options: &ParsedOptions) -> Result<()> {
        self.log.lock().unwrap().push(format!(
            "shoot {} x{}",
            options.get_str("room").unwrap_or("?"),
            options.get_int("arrows").unwrap_or(0)
        ));
        Ok(())
    }
}

pub struct Map {
    pub log: Log,
}

impl Command for Map {
    fn name(&self) -> &str {
        "map"
    }

    fn about(&self) -> &str {
        "draw the cave map"
    }

    fn run(&self, _options: &ParsedOptions) -> Result<()> {
        self.log.lock().unwrap().push("map".to_owned());
        Ok(())
    }
}

pub fn wumpus_info() -> AppInfo {
    AppInfo::new("wumpus", "4.0.2")
        .with_description("Hunt the wumpus")
        .with_url("https://example.com/wumpus")
}
