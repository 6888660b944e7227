//! Command capability and the subcommand tree.
//!
//! Each node owns its argument specs, its children, and the boxed
//! [`Command`] that runs when the node is the dispatch target. Nodes record
//! their full path at attach time, which serves both path-name display
//! (`prog hunt move`) and aggregated help traversal without parent pointers.

use crate::args::{ArgumentSpec, ParsedOptions};
use crate::error::{Error, Result};
use crate::registry::NodeBuilder;
use std::fmt;

/// A runnable command. Implementations declare their arguments and children
/// in [`configure`](Command::configure) and perform the work in
/// [`run`](Command::run).
///
/// `run` has a default that reports a missing subcommand, which is the
/// correct behavior for intermediate nodes that only host children. Leaf
/// commands and parents that accept bare invocation override it.
pub trait Command {
    /// Subcommand name; the root's name comes from `AppInfo` instead.
    fn name(&self) -> &str;

    /// One-line summary shown in the parent's command listing.
    fn about(&self) -> &str {
        ""
    }

    /// Longer text shown under the usage line of this node's own help.
    fn description(&self) -> &str {
        ""
    }

    fn configure(&self, node: &mut NodeBuilder<'_>) -> Result<()> {
        let _ = node;
        Ok(())
    }

    fn run(&self, options: &ParsedOptions) -> Result<()> {
        let _ = options;
        Err(Error::MissingCommand {
            usage: String::new(),
        })
    }
}

/// A node in the subcommand tree. The root has the program name; children
/// are attached in declaration order and visited in that order by every
/// whole-tree operation.
pub struct CommandNode {
    name: String,
    about: String,
    description: String,
    path: Vec<String>,
    specs: Vec<ArgumentSpec>,
    children: Vec<CommandNode>,
    handler: Box<dyn Command>,
    finalized: bool,
}

impl CommandNode {
    pub(crate) fn new(path: Vec<String>, handler: Box<dyn Command>) -> Self {
        let name = path.last().cloned().unwrap_or_default();
        Self {
            about: handler.about().to_owned(),
            description: handler.description().to_owned(),
            name,
            path,
            specs: Vec::new(),
            children: Vec::new(),
            handler,
            finalized: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Full command path, program name first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Space-joined path, e.g. `wumpus hunt move`.
    pub fn path_string(&self) -> String {
        self.path.join(" ")
    }

    pub fn specs(&self) -> &[ArgumentSpec] {
        &self.specs
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Pre-order traversal, children in declaration order.
    pub fn walk(&self, visit: &mut dyn FnMut(&CommandNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub(crate) fn handler(&self) -> &dyn Command {
        self.handler.as_ref()
    }

    pub(crate) fn set_about(&mut self, about: String) {
        self.about = about;
    }

    pub(crate) fn push_spec(&mut self, spec: ArgumentSpec) {
        debug_assert!(!self.finalized, "spec declared after finalize");
        self.specs.push(spec);
    }

    pub(crate) fn push_child(&mut self, child: CommandNode) {
        debug_assert!(!self.finalized, "child attached after finalize");
        self.children.push(child);
    }

    pub(crate) fn specs_mut(&mut self) -> &mut [ArgumentSpec] {
        &mut self.specs
    }

    pub(crate) fn children_mut(&mut self) -> &mut [CommandNode] {
        &mut self.children
    }

    pub(crate) fn mark_finalized(&mut self) {
        self.finalized = true;
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("path", &self.path)
            .field("specs", &self.specs.len())
            .field("children", &self.children.len())
            .finish()
    }
}
