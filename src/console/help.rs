//! Built-in `help` command
//!
//! Registered like any other command, first in the table when enabled.

use core::fmt::Write;

use super::commands::{Args, ArgumentDescriptor, CommandDescriptor, Completion, Context};
use super::ConsoleError;

const HELP_ARGS: &[ArgumentDescriptor] = &[ArgumentDescriptor::str(
    "command",
    "The name of the command to give details about",
)
.optional()];

/// `help [command]`
pub const HELP: CommandDescriptor = CommandDescriptor::with_args("help", HELP_ARGS, help_handler)
    .description("List all commands, or give details about a specific command")
    .completion(Completion::Commands);

fn help_handler(ctx: &mut Context<'_>, args: &Args<'_>) {
    match args.str(0) {
        None => list_commands(ctx),
        Some(name) => match ctx.commands().iter().find(|c| c.name == name) {
            Some(cmd) => describe_command(ctx, cmd),
            None => {
                let _ = write!(ctx, "{}", ConsoleError::UnknownCommand(name));
                ctx.newline();
            }
        },
    }
}

fn list_commands(ctx: &mut Context<'_>) {
    let commands = ctx.commands();
    let width = commands.iter().map(|c| c.name.len()).max().unwrap_or(0);

    ctx.line("Available commands:");
    for cmd in commands {
        entry(ctx, cmd.name, cmd.description, width);
    }
}

fn describe_command(ctx: &mut Context<'_>, cmd: &CommandDescriptor) {
    if let Some(desc) = cmd.description {
        ctx.line(desc);
    }

    let _ = write!(ctx, "Usage: {}", cmd.name);
    for arg in cmd.args {
        if arg.optional {
            let _ = write!(ctx, " [{}]", arg.name);
        } else {
            let _ = write!(ctx, " {}", arg.name);
        }
    }
    ctx.newline();

    let width = cmd.args.iter().map(|a| a.name.len()).max().unwrap_or(0);
    for arg in cmd.args {
        entry(ctx, arg.name, arg.description, width);
    }
}

/// `  name<pad> - description`, or just `  name` without a description
fn entry(ctx: &mut Context<'_>, name: &str, description: Option<&str>, width: usize) {
    let _ = write!(ctx, "  {}", name);
    if let Some(desc) = description {
        let _ = write!(ctx, "{:pad$} - {}", "", desc, pad = width - name.len());
    }
    ctx.newline();
}
