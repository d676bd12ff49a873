//! Command registry and top-level dispatch.
//!
//! An [`App`] maps command names to registered entries: a help line, an
//! action closure, and optionally a shared handle to the options holder the
//! binder fills before the action runs. The registry is built once at setup
//! and read-only afterwards; `run` takes the raw argument vector explicitly,
//! so nothing here touches process globals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use crate::bind::bind;
use crate::error::{LatchError, Result};
use crate::options::Options;

/// Action invoked after a command's arguments are bound.
pub type Action = Box<dyn FnMut() -> Result<()>>;

/// A registered command entry.
pub struct Command {
    help: String,
    action: Action,
    options: Option<Rc<RefCell<dyn Options>>>,
}

impl Command {
    /// One-line help text shown in the usage listing.
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The options holder bound before this command runs, if it has one.
    pub fn options(&self) -> Option<&Rc<RefCell<dyn Options>>> {
        self.options.as_ref()
    }
}

/// A command-line application: name, description, version, and the command
/// registry.
pub struct App {
    name: String,
    info: String,
    version: String,
    commands: HashMap<String, Command>,
}

impl App {
    /// Create an application.
    ///
    /// An empty `info` or `version` falls back to a generic default; an
    /// empty `name` is substituted with the program name from the argument
    /// vector when usage is rendered.
    pub fn new(name: &str, info: &str, version: &str) -> Self {
        let info = if info.is_empty() { "Command-line tool" } else { info };
        let version = if version.is_empty() { "v0.00" } else { version };
        Self {
            name: name.to_string(),
            info: info.to_string(),
            version: version.to_string(),
            commands: HashMap::new(),
        }
    }

    /// Register a command, inserting or overwriting its entry.
    ///
    /// The options holder, when given, is a shared mutable handle: the
    /// binder needs exclusive in-place access to it at bind time, so a
    /// holder that cannot be mutably borrowed is rejected here with
    /// [`LatchError::InvalidHolderKind`].
    pub fn register(
        &mut self,
        name: &str,
        help: &str,
        action: impl FnMut() -> Result<()> + 'static,
        options: Option<Rc<RefCell<dyn Options>>>,
    ) -> Result<()> {
        if let Some(holder) = &options {
            if holder.try_borrow_mut().is_err() {
                return Err(LatchError::InvalidHolderKind);
            }
        }
        self.commands.insert(
            name.to_string(),
            Command {
                help: help.to_string(),
                action: Box::new(action),
                options,
            },
        );
        Ok(())
    }

    /// Look up a command entry by name.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// (name, help) pairs for every registered command, sorted by name.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .commands
            .iter()
            .map(|(name, command)| (name.as_str(), command.help.as_str()))
            .collect();
        entries.sort_by_key(|&(name, _)| name);
        entries
    }

    /// Render the usage text to the given writer.
    ///
    /// `program` is the invocation name used when the app was created with
    /// an empty name.
    pub fn usage(&self, program: &str, out: &mut dyn Write) -> Result<()> {
        let name = if self.name.is_empty() {
            program
        } else {
            &self.name
        };
        writeln!(out, "NAME:")?;
        writeln!(out, "\t{} - {}\n", name, self.info)?;
        writeln!(out, "USAGE:")?;
        writeln!(
            out,
            "\t{} [global options] command [command options] [arguments...]\n",
            name
        )?;
        writeln!(out, "VERSION:")?;
        writeln!(out, "\t{}\n", self.version)?;
        writeln!(out, "COMMANDS:")?;
        for (command, help) in self.describe() {
            writeln!(out, "\t{}\t{}", command, help)?;
        }
        Ok(())
    }

    /// Dispatch one invocation.
    ///
    /// `argv` is the full argument vector including the program name. With
    /// no command, or with `-h`/`-help` first, usage goes to stderr and the
    /// call succeeds. Otherwise the named command's holder (if any) is bound
    /// from the remaining tokens and its action invoked; action errors
    /// propagate unchanged.
    pub fn run(&mut self, argv: &[String]) -> Result<()> {
        let program = argv.first().map(String::as_str).unwrap_or_default();
        if argv.len() <= 1 {
            self.usage(program, &mut io::stderr())?;
            return Ok(());
        }
        let command = argv[1].as_str();
        if command == "-h" || command == "-help" {
            self.usage(program, &mut io::stderr())?;
            return Ok(());
        }
        let entry = self
            .commands
            .get_mut(command)
            .ok_or_else(|| LatchError::UnknownCommand(command.to_string()))?;

        match entry.options.clone() {
            None => (entry.action)(),
            Some(holder) => {
                let tokens = &argv[2..];
                if tokens.is_empty() {
                    return Err(LatchError::InsufficientArguments(command.to_string()));
                }
                {
                    let mut guard = holder
                        .try_borrow_mut()
                        .map_err(|_| LatchError::InvalidHolderKind)?;
                    bind(&mut *guard, tokens)?;
                }
                (entry.action)()
            }
        }
    }
}
