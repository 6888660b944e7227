//! Declaration surface: node construction, common-option injection,
//! reserved-name enforcement, and finalization.

use crate::args::ArgumentSpec;
use crate::command::{Command, CommandNode};
use crate::error::{Error, Result};
use crate::metadata::AppInfo;
use crate::normalize;

/// Option names the framework injects; declaring one is a collision.
const RESERVED_COMMON: &[&str] = &["help", "verbose"];
const RESERVED_ROOT: &[&str] = &[
    "long-help",
    "md-help",
    "version",
    "config",
    "print-config",
    "print-url",
    "completion",
];
const RESERVED_SHORTS_COMMON: &[char] = &['h', 'v'];
const RESERVED_SHORTS_ROOT: &[char] = &['H', 'V'];

/// Builds the command tree for one application. Construction happens once
/// per invocation; the finished tree is immutable.
pub struct Registry<'a> {
    info: &'a AppInfo,
}

impl<'a> Registry<'a> {
    pub fn new(info: &'a AppInfo) -> Self {
        Self { info }
    }

    /// Build, seed, and finalize the whole tree from the root command.
    pub fn build_root(&self, handler: Box<dyn Command>) -> Result<CommandNode> {
        let path = vec![self.info.name.clone()];
        let mut builder = NodeBuilder {
            info: self.info,
            path: path.clone(),
            is_root: true,
            specs: Vec::new(),
            children: Vec::new(),
        };
        handler.configure(&mut builder)?;

        let has_children = !builder.children.is_empty();
        let mut root = CommandNode::new(path, handler);
        for spec in builder.specs {
            root.push_spec(spec);
        }
        for spec in root_common_specs(self.info, has_children) {
            root.push_spec(spec);
        }
        for child in builder.children {
            root.push_child(child);
        }

        finalize(&mut root);
        Ok(root)
    }
}

/// Declaration scope handed to [`Command::configure`]. Owns the node parts
/// under construction; the immutable [`CommandNode`] is assembled only after
/// the command's declarations complete.
pub struct NodeBuilder<'a> {
    info: &'a AppInfo,
    path: Vec<String>,
    is_root: bool,
    specs: Vec<ArgumentSpec>,
    children: Vec<CommandNode>,
}

impl<'a> NodeBuilder<'a> {
    /// Full path of the node being built, program name first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Application metadata, available while declaring.
    pub fn app(&self) -> &AppInfo {
        self.info
    }

    /// Append an argument spec. Fails fast on a name already declared here
    /// or reserved by the common-option set.
    pub fn declare(&mut self, spec: ArgumentSpec) -> Result<()> {
        self.check_collision(&spec)?;
        self.specs.push(spec);
        Ok(())
    }

    /// Build a child command's node and link it under this one. The child's
    /// own `configure` runs first, so it may attach further children.
    pub fn attach(&mut self, child: Box<dyn Command>) -> Result<()> {
        let name = child.name().to_owned();
        if self.children.iter().any(|c| c.name() == name) {
            return Err(self.duplicate(&name));
        }

        let mut path = self.path.clone();
        path.push(name);
        let mut builder = NodeBuilder {
            info: self.info,
            path: path.clone(),
            is_root: false,
            specs: Vec::new(),
            children: Vec::new(),
        };
        child.configure(&mut builder)?;

        let mut node = CommandNode::new(path, child);
        for spec in builder.specs {
            node.push_spec(spec);
        }
        for spec in node_common_specs() {
            node.push_spec(spec);
        }
        for grandchild in builder.children {
            node.push_child(grandchild);
        }
        self.children.push(node);
        Ok(())
    }

    fn check_collision(&self, spec: &ArgumentSpec) -> Result<()> {
        let name = spec.name();
        let reserved_name = RESERVED_COMMON.contains(&name)
            || (self.is_root && RESERVED_ROOT.contains(&name));
        let reserved_short = spec.short_flag().is_some_and(|c| {
            RESERVED_SHORTS_COMMON.contains(&c)
                || (self.is_root && RESERVED_SHORTS_ROOT.contains(&c))
        });
        if reserved_name || reserved_short {
            return Err(self.duplicate(name));
        }
        for existing in &self.specs {
            let clash = existing.name() == name
                || (spec.long_flag().is_some() && existing.long_flag() == spec.long_flag())
                || (spec.short_flag().is_some() && existing.short_flag() == spec.short_flag());
            if clash {
                return Err(self.duplicate(name));
            }
        }
        Ok(())
    }

    fn duplicate(&self, name: &str) -> Error {
        Error::DuplicateOption {
            command: self.path.join(" "),
            name: name.to_owned(),
        }
    }
}

/// Common options for every non-root node.
fn node_common_specs() -> Vec<ArgumentSpec> {
    vec![
        ArgumentSpec::flag("help")
            .short('h')
            .help("show this help message and exit")
            .mark_common(),
        ArgumentSpec::counted("verbose")
            .short('v')
            .help("`-v` for detailed output and `-vv` for more detailed")
            .mark_common(),
    ]
}

/// Common options for the root node. `-H/--long-help` exists only when the
/// tree has children; `--md-help` is parsed but never listed.
fn root_common_specs(info: &AppInfo, has_children: bool) -> Vec<ArgumentSpec> {
    let mut specs = vec![ArgumentSpec::flag("help")
        .short('h')
        .help("show this help message and exit")
        .mark_common()];
    if has_children {
        specs.push(
            ArgumentSpec::flag("long-help")
                .short('H')
                .help("show help for all commands and exit")
                .mark_common(),
        );
    }
    specs.push(ArgumentSpec::flag("md-help").hidden().mark_common());
    specs.push(
        ArgumentSpec::counted("verbose")
            .short('v')
            .help("`-v` for detailed output and `-vv` for more detailed")
            .mark_common(),
    );
    specs.push(
        ArgumentSpec::flag("version")
            .short('V')
            .help("print version number and exit")
            .mark_common(),
    );
    let mut config = ArgumentSpec::option("config")
        .metavar("FILE")
        .kind(crate::args::ValueKind::Path)
        .help("use config `FILE`")
        .mark_common();
    if let Some(path) = &info.config_file {
        config = config.default(path.display().to_string()).show_default();
    }
    specs.push(config);
    specs.push(
        ArgumentSpec::flag("print-config")
            .help("print effective config and exit")
            .mark_common(),
    );
    specs.push(
        ArgumentSpec::flag("print-url")
            .help("print project url and exit")
            .mark_common(),
    );
    specs.push(
        ArgumentSpec::option("completion")
            .metavar("SHELL")
            .optional(Some("bash"))
            .default("bash")
            .show_default()
            .help("print completion scripts for `SHELL` and exit")
            .mark_common(),
    );
    specs
}

/// Normalize every spec and child summary, then freeze the node.
fn finalize(node: &mut CommandNode) {
    for spec in node.specs_mut() {
        normalize::normalize_spec(spec);
    }
    for child in node.children_mut() {
        let about = normalize::normalize_help(child.about());
        child.set_about(about);
        finalize(child);
    }
    node.mark_finalized();
}
