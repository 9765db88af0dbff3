//! Built-in shell commands.

use crate::shell::{ShellError, ShellResult};

use super::{Arity, CommandContext, CommandSpec, COMMAND_MARKER};

/// Every built-in command
pub fn builtin_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: ":help",
            usage: "[command]",
            description: "Show this help message",
            help: "Show the list of available commands, or help for a specific command.",
            arity: Arity::Range(0, 1),
            executor: help,
        },
        CommandSpec {
            name: ":set",
            usage: "<name> <literal>",
            description: "Set the value of a query parameter",
            help: "Set the specified query parameter to the value of the given literal. \
                   The literal is evaluated by the database, so any literal or expression \
                   of the query language is accepted, including references to other \
                   parameters. Everything after the name is the literal.",
            arity: Arity::Leading(1),
            executor: set,
        },
        CommandSpec {
            name: ":unset",
            usage: "<name>",
            description: "Remove a query parameter",
            help: "Remove the named query parameter. Removing a parameter that is not set \
                   does nothing.",
            arity: Arity::Exactly(1),
            executor: unset,
        },
        CommandSpec {
            name: ":begin",
            usage: "",
            description: "Open a transaction",
            help: "Start a transaction. Statements run until :commit or :rollback belong to it.",
            arity: Arity::Exactly(0),
            executor: begin,
        },
        CommandSpec {
            name: ":commit",
            usage: "",
            description: "Commit the currently open transaction",
            help: "Commit the open transaction and make its changes visible.",
            arity: Arity::Exactly(0),
            executor: commit,
        },
        CommandSpec {
            name: ":rollback",
            usage: "",
            description: "Rollback the currently open transaction",
            help: "Roll back the open transaction, discarding every statement run inside it.",
            arity: Arity::Exactly(0),
            executor: rollback,
        },
        CommandSpec {
            name: ":reset",
            usage: "",
            description: "Reset the session",
            help: "Roll back any open transaction and remove every query parameter.",
            arity: Arity::Exactly(0),
            executor: reset,
        },
        CommandSpec {
            name: ":history",
            usage: "",
            description: "Print a list of the last commands executed",
            help: "Print the lines entered in this shell, oldest first.",
            arity: Arity::Exactly(0),
            executor: history,
        },
        CommandSpec {
            name: ":exit",
            usage: "",
            description: "Exit the shell",
            help: "Leave the shell. An open transaction is rolled back.",
            arity: Arity::Exactly(0),
            executor: exit,
        },
    ]
}

fn help(ctx: &mut dyn CommandContext, args: &[String]) -> ShellResult<()> {
    let commands = ctx.commands();

    if let Some(target) = args.first() {
        let name = if target.starts_with(COMMAND_MARKER) {
            target.clone()
        } else {
            format!("{}{}", COMMAND_MARKER, target)
        };
        let spec = commands
            .iter()
            .find(|c| c.name == name)
            .ok_or(ShellError::UnknownCommand(name))?;

        ctx.print(&format!("usage: {}", spec.synopsis()));
        ctx.print("");
        ctx.print(spec.help);
        return Ok(());
    }

    let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);
    ctx.print("Available commands:");
    for spec in &commands {
        ctx.print(&format!("  {:<width$}  {}", spec.name, spec.description, width = width));
    }
    ctx.print("");
    ctx.print("For help on a specific command type:");
    ctx.print("    :help command");
    Ok(())
}

fn set(ctx: &mut dyn CommandContext, args: &[String]) -> ShellResult<()> {
    ctx.set(&args[0], &args[1])?;
    Ok(())
}

fn unset(ctx: &mut dyn CommandContext, args: &[String]) -> ShellResult<()> {
    ctx.unset(&args[0])?;
    Ok(())
}

fn begin(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    ctx.begin_transaction()
}

fn commit(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    ctx.commit_transaction()
}

fn rollback(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    ctx.rollback_transaction()
}

fn reset(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    ctx.reset()
}

fn history(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    let entries = ctx.history();
    let width = entries.len().to_string().len();
    for (idx, line) in entries.iter().enumerate() {
        ctx.print(&format!(" {:>width$}  {}", idx + 1, line, width = width));
    }
    Ok(())
}

fn exit(ctx: &mut dyn CommandContext, _args: &[String]) -> ShellResult<()> {
    ctx.request_exit();
    Ok(())
}
