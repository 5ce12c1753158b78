//! Form input for create / update.
//!
//! Values layer in order: the existing record (update only), the raw
//! payload of `--from-file`, `--set id=value` pairs, then prompts. Prompts
//! are driven by the resource's field descriptors.

use dialoguer::{Input, MultiSelect, Select};
use tracing::warn;

use nfconsole_core::{Command, CommandResult, Console, FieldKind, FieldSpec, FormValues, ResourceKind};

use crate::cli::FormArgs;
use crate::error::CliError;

use super::util;

const NONE_CHOICE: &str = "(none)";

/// Gather form values for `kind` from every source in `args`.
///
/// With nothing supplied, prompts when a terminal is attached and fails
/// otherwise.
pub async fn collect(
    console: &mut Console,
    kind: ResourceKind,
    args: &FormArgs,
    base: FormValues,
    editing: bool,
) -> Result<FormValues, CliError> {
    let fields = nfconsole_core::fields_of(kind);
    let mut form = base;
    let mut supplied = false;

    if let Some(ref path) = args.from_file {
        let payload = util::read_json_file(path)?;
        let values = nfconsole_core::form_from_json(kind, payload).map_err(|e| CliError::Validation {
            field: "from-file".into(),
            reason: format!("not a {} payload: {e}", kind.label()),
        })?;
        form.merge(&values);
        supplied = true;
    }

    if !args.set.is_empty() {
        form.merge(&parse_assignments(fields, &args.set)?);
        supplied = true;
    }

    if args.interactive || (!supplied && util::interactive()) {
        prompt_fields(console, fields, &mut form, editing).await?;
    } else if !supplied {
        return Err(CliError::Validation {
            field: "form".into(),
            reason: "no values given; use --set id=value, --from-file or --interactive".into(),
        });
    }
    Ok(form)
}

/// Parse `id=value` pairs. Repeating the id of a multi-valued field
/// appends; for other fields the last one wins.
pub fn parse_assignments(fields: &[FieldSpec], pairs: &[String]) -> Result<FormValues, CliError> {
    let mut form = FormValues::new();
    for pair in pairs {
        let (id, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
            field: "set".into(),
            reason: format!("expected id=value, got '{pair}'"),
        })?;
        let id = id.trim();
        let field = fields.iter().find(|f| f.id == id).ok_or_else(|| CliError::Validation {
            field: id.into(),
            reason: format!(
                "unknown field; valid ids: {}",
                fields.iter().map(|f| f.id).collect::<Vec<_>>().join(", ")
            ),
        })?;

        let value = match form.opt(field.id) {
            Some(prev) if field.multiple => format!("{prev}\n{value}"),
            _ => value.to_owned(),
        };
        form.set(field.id, value);
    }
    Ok(form)
}

// ── Prompts ─────────────────────────────────────────────────────────

async fn prompt_fields(
    console: &mut Console,
    fields: &[FieldSpec],
    form: &mut FormValues,
    editing: bool,
) -> Result<(), CliError> {
    for field in fields.iter().filter(|f| f.editable(editing)) {
        let current = if field.multiple {
            form.lines(field.id)
        } else {
            form.opt(field.id).map(str::to_owned).into_iter().collect()
        };

        let value = match field.kind {
            FieldKind::Choice(options) => prompt_choice(field, options, current.first())?,
            FieldKind::Reference(target) => {
                let keys = reference_keys(console, target).await;
                if keys.is_empty() {
                    prompt_text(field, &current)?
                } else {
                    prompt_reference(field, &keys, &current)?
                }
            }
            FieldKind::Text | FieldKind::Integer { .. } | FieldKind::Lines => prompt_text(field, &current)?,
        };
        form.set(field.id, value);
    }
    Ok(())
}

/// Existing keys of `target`; empty when they cannot be fetched.
async fn reference_keys(console: &mut Console, target: ResourceKind) -> Vec<String> {
    match console.execute(Command::Options(target)).await {
        Ok(CommandResult::Options { keys, .. }) => keys,
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!(kind = %target, error = %e, "could not load options");
            Vec::new()
        }
    }
}

fn prompt_label(field: &FieldSpec) -> String {
    let mut label = field.label.to_owned();
    if let Some(help) = field.help {
        label = format!("{label} ({help})");
    } else if field.multiple {
        label.push_str(" (comma-separated)");
    }
    label
}

fn prompt_text(field: &FieldSpec, current: &[String]) -> Result<String, CliError> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt_label(field))
        .allow_empty(!field.required);
    if !current.is_empty() {
        input = input.default(current.join(", "));
    }
    let value = input.interact_text().map_err(util::prompt_err)?;
    Ok(if field.multiple {
        value.split(',').map(str::trim).collect::<Vec<_>>().join("\n")
    } else {
        value
    })
}

fn prompt_choice(field: &FieldSpec, options: &[&str], current: Option<&String>) -> Result<String, CliError> {
    let mut items: Vec<&str> = Vec::with_capacity(options.len() + 1);
    if !field.required {
        items.push(NONE_CHOICE);
    }
    items.extend_from_slice(options);

    let default = current
        .and_then(|c| items.iter().position(|o| *o == c.as_str()))
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt(prompt_label(field))
        .items(&items)
        .default(default)
        .interact()
        .map_err(util::prompt_err)?;

    Ok(items
        .get(picked)
        .filter(|o| **o != NONE_CHOICE)
        .map_or_else(String::new, |o| (*o).to_owned()))
}

fn prompt_reference(field: &FieldSpec, keys: &[String], current: &[String]) -> Result<String, CliError> {
    if field.multiple {
        let defaults: Vec<bool> = keys.iter().map(|k| current.contains(k)).collect();
        let picked = MultiSelect::new()
            .with_prompt(field.label)
            .items(keys)
            .defaults(&defaults)
            .interact()
            .map_err(util::prompt_err)?;
        return Ok(picked
            .into_iter()
            .filter_map(|i| keys.get(i).cloned())
            .collect::<Vec<_>>()
            .join("\n"));
    }

    let default = current
        .first()
        .and_then(|c| keys.iter().position(|k| k == c))
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt(field.label)
        .items(keys)
        .default(default)
        .interact()
        .map_err(util::prompt_err)?;
    Ok(keys.get(picked).cloned().unwrap_or_default())
}
