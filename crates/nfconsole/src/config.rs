//! CLI configuration: a thin wrapper around `nfconsole_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --insecure, --timeout).

use nfconsole_core::ConsoleConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use nfconsole_config::{Config, Defaults, Profile, config_path, load_config, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Apply flag overrides on top of a profile.
fn with_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Build the `ConsoleConfig` for a command: profile, then flags.
///
/// Without a matching profile, `--server` alone is enough. A profile named
/// explicitly with `--profile` must exist.
pub fn resolve_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => {
            let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            Profile::new(server)
        }
    };

    tracing::debug!(profile = %profile_name, "resolved profile");
    let profile = with_overrides(profile, global);
    Ok(nfconsole_config::profile_to_console_config(&profile, &cfg.defaults)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["nfconsole"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["gnbs", "list"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_profile() {
        let mut profile = Profile::new("http://core.lab:5000");
        profile.timeout = Some(10);

        let resolved = with_overrides(
            profile,
            &global(&["--server", "http://other:5000", "--timeout", "3", "--insecure"]),
        );
        assert_eq!(resolved.server, "http://other:5000");
        assert_eq!(resolved.timeout, Some(3));
        assert_eq!(resolved.insecure, Some(true));

        let config = nfconsole_config::profile_to_console_config(&resolved, &Defaults::default()).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn profile_name_falls_back_to_default() {
        let mut cfg = Config::default();
        assert_eq!(active_profile_name(&global(&[]), &cfg), "default");
        cfg.default_profile = Some("lab".into());
        assert_eq!(active_profile_name(&global(&[]), &cfg), "lab");
        assert_eq!(active_profile_name(&global(&["--profile", "prod"]), &cfg), "prod");
    }
}
