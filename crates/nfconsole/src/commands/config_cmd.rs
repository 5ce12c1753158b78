//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display in TOML layout, profiles sorted.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "server = \"{}\"", p.server);
        if let Some(ref base) = p.config_base {
            let _ = writeln!(out, "config_base = \"{base}\"");
        }
        if let Some(ref base) = p.subscriber_base {
            let _ = writeln!(out, "subscriber_base = \"{base}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

/// Apply `key = value` to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "server" => {
            nfconsole_config::parse_server(&value)?;
            profile.server = value;
        }
        "config_base" | "config-base" => profile.config_base = Some(value),
        "subscriber_base" | "subscriber-base" => profile.subscriber_base = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => {
            profile.insecure = Some(value.parse().map_err(|_| CliError::Validation {
                field: "insecure".into(),
                reason: "must be 'true' or 'false'".into(),
            })?);
        }
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: server, config_base, \
                     subscriber_base, ca_cert, insecure, timeout"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("✨ nfconsole configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let server: String = Input::new()
                .with_prompt("Configuration service URL")
                .default("http://localhost:5000".into())
                .validate_with(|input: &String| {
                    nfconsole_config::parse_server(input)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let mut profile = Profile::new(server);

            let defaults = nfconsole_core::BasePaths::default();
            let config_base: String = Input::new()
                .with_prompt("Configuration API base path")
                .default(defaults.config.clone())
                .interact_text()
                .map_err(prompt_err)?;
            let subscriber_base: String = Input::new()
                .with_prompt("Subscriber API base path")
                .default(defaults.subscriber.clone())
                .interact_text()
                .map_err(prompt_err)?;
            profile.config_base = (config_base != defaults.config).then_some(config_base);
            profile.subscriber_base = (subscriber_base != defaults.subscriber).then_some(subscriber_base);

            if profile.server.starts_with("https") {
                let insecure = Confirm::new()
                    .with_prompt("Accept self-signed certificates?")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                profile.insecure = insecure.then_some(true);
            }

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: nfconsole device-groups list");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = match global.output {
                OutputFormat::Table | OutputFormat::Plain => format_config(&cfg),
                OutputFormat::Json => output::render_json_pretty(&cfg),
                OutputFormat::JsonCompact => output::render_json_compact(&cfg),
                OutputFormat::Yaml => output::render_yaml(&cfg),
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(String::new()));
            set_profile_value(profile, &key, value)?;

            config::save_config(&cfg)?;
            eprintln!("✓ Set {key} on profile '{profile_name}'");
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: nfconsole config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn set_validates_values() {
        let mut profile = Profile::new("http://core.lab:5000");
        set_profile_value(&mut profile, "timeout", "12".into()).unwrap();
        set_profile_value(&mut profile, "subscriber-base", "/sub".into()).unwrap();
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.subscriber_base.as_deref(), Some("/sub"));

        assert!(set_profile_value(&mut profile, "insecure", "maybe".into()).is_err());
        assert!(set_profile_value(&mut profile, "server", "ftp://x".into()).is_err());
        assert!(set_profile_value(&mut profile, "site", "x".into()).is_err());
        assert_eq!(profile.server, "http://core.lab:5000");
    }

    #[test]
    fn show_lists_profiles_sorted() {
        let mut cfg = Config::default();
        cfg.profiles.insert("zeta".into(), Profile::new("http://z:5000"));
        cfg.profiles.insert("alpha".into(), Profile::new("http://a:5000"));
        let out = format_config(&cfg);
        let alpha = out.find("[profiles.alpha]").unwrap();
        let zeta = out.find("[profiles.zeta]").unwrap();
        assert!(alpha < zeta);
        assert!(out.contains("server = \"http://a:5000\""));
    }
}
