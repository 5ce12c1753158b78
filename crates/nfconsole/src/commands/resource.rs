//! Resource command handlers, shared by every entity type.
//!
//! Each subcommand becomes a core `Command`; mutations go through a
//! `Shell` so create/update selection, delete confirmation and the result
//! messages match the TUI.

use nfconsole_core::{Command, CommandResult, Console, CoreError, DetailView, FormValues, ResourceKind, Shell};

use crate::cli::{GlobalOpts, OutputFormat, ResourceArgs, ResourceCommand};
use crate::error::CliError;
use crate::output;

use super::{form, util};

pub async fn handle(
    kind: ResourceKind,
    args: ResourceArgs,
    console: &mut Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    let list_command = format!("{} list", util::command_name(kind));
    let core_err = |e: CoreError| CliError::from_core(e, &list_command);

    match args.command {
        ResourceCommand::List => {
            let spinner = output::spinner(format!("Loading {}...", kind.title()), global.quiet);
            let result = console.execute(Command::Fetch(kind)).await;
            spinner.finish_and_clear();

            if let CommandResult::List(view) = result.map_err(core_err)? {
                let out = output::render_list(&global.output, &view, color);
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        ResourceCommand::Get { key } => {
            let (view, _) = fetch_detail(console, kind, &key, global.quiet).await.map_err(core_err)?;
            let out = output::render_detail(&global.output, &view, color);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourceCommand::Create(args) => {
            let values = form::collect(console, kind, &args, FormValues::new(), false).await?;
            let shell = Shell::new(kind);
            let cmd = shell.submit(values).ok_or_else(|| no_submit(kind))?;
            run_mutation(console, shell, cmd, global).await.map_err(core_err)
        }

        ResourceCommand::Update { key, form: args } => {
            let (_, existing) = fetch_detail(console, kind, &key, global.quiet).await.map_err(core_err)?;
            let values = form::collect(console, kind, &args, existing, true).await?;

            let mut shell = Shell::new(kind);
            shell.open_detail(key);
            shell.begin_edit();
            let cmd = shell.submit(values).ok_or_else(|| no_submit(kind))?;
            run_mutation(console, shell, cmd, global).await.map_err(core_err)
        }

        ResourceCommand::Delete { key } => {
            let mut shell = Shell::new(kind);
            let prompt = shell.request_delete(kind, &key).prompt.clone();
            if !util::confirm(&prompt, &format!("{} delete", util::command_name(kind)), global.yes)? {
                shell.cancel_delete();
                eprintln!("Aborted.");
                return Ok(());
            }
            let cmd = shell.confirm_delete().ok_or_else(|| no_submit(kind))?;
            run_mutation(console, shell, cmd, global).await.map_err(core_err)
        }

        ResourceCommand::Fields => {
            fields(kind, global);
            Ok(())
        }
    }
}

/// Print the editable fields of `kind`.
pub fn fields(kind: ResourceKind, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_field_specs(&global.output, nfconsole_core::fields_of(kind), color);
    output::print_output(&out, global.quiet);
}

async fn fetch_detail(
    console: &mut Console,
    kind: ResourceKind,
    key: &str,
    quiet: bool,
) -> Result<(DetailView, FormValues), CoreError> {
    let spinner = output::spinner(format!("Loading {} {key}...", kind.label()), quiet);
    let result = console
        .execute(Command::Get {
            kind,
            key: key.to_owned(),
        })
        .await;
    spinner.finish_and_clear();

    match result? {
        CommandResult::Detail { view, form } => Ok((view, form)),
        other => Err(CoreError::Payload {
            message: format!("unexpected result: {other:?}"),
        }),
    }
}

/// Run a create / update / delete and report it.
async fn run_mutation(
    console: &mut Console,
    mut shell: Shell,
    cmd: Command,
    global: &GlobalOpts,
) -> Result<(), CoreError> {
    tracing::debug!(command = ?cmd, "running mutation");
    let spinner = output::spinner("Saving...", global.quiet);
    let result = console.execute(cmd).await;
    spinner.finish_and_clear();

    let note = shell.on_result(&result);
    let result = result?;
    if let Some(note) = note {
        output::notify(&note, &global.color, global.quiet);
    }

    if let (OutputFormat::Plain, CommandResult::Saved { key, .. } | CommandResult::Deleted { key, .. }) =
        (&global.output, result)
    {
        output::print_output(&key, global.quiet);
    }
    Ok(())
}

fn no_submit(kind: ResourceKind) -> CliError {
    CliError::Validation {
        field: kind.to_string(),
        reason: "nothing to submit".into(),
    }
}
