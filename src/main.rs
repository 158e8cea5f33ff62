//! slirc-perms - inspect and edit hostmask permission groups.
//!
//! Usage: `slirc-perms <config.toml> <command> [args]`

use anyhow::{Context, bail};
use slirc_perms::{Config, PermissionIndex, telemetry};
use tracing::{error, info};

const USAGE: &str = "\
usage: slirc-perms <config.toml> <command> [args]

commands:
  check <mask> <permission>   does <mask> hold <permission>
  groups                      list all groups
  group <name>                show permissions and members of a group
  whois <mask>                show groups and permissions matching <mask>
  add <mask> <group>          add <mask> to <group> and save
  remove <group> <mask>       remove patterns matching <mask> from <group> and save";

fn main() -> anyhow::Result<()> {
    telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((config_path, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };
    let Some((command, params)) = rest.split_first() else {
        bail!("{USAGE}");
    };

    let mut config = Config::load(config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    let index = PermissionIndex::from_config(&config)
        .with_context(|| format!("invalid permissions in {config_path}"))?;

    match (command.as_str(), params) {
        ("check", [mask, permission]) => {
            let allowed = index.has_permission(mask, permission);
            println!("{}", if allowed { "allowed" } else { "denied" });
            if !allowed {
                std::process::exit(1);
            }
        }
        ("groups", []) => {
            for group in index.groups() {
                println!("{group}");
            }
        }
        ("group", [name]) => {
            let Some(perms) = index.group_permissions(name) else {
                bail!("no such group: {name}");
            };
            let members = index.group_members(name).unwrap_or_default();
            println!("permissions: {}", perms.into_iter().collect::<Vec<_>>().join(", "));
            println!("members: {}", members.join(", "));
        }
        ("whois", [mask]) => {
            println!("groups: {}", index.user_groups(mask).join(", "));
            let perms: Vec<String> = index.user_permissions(mask).into_iter().collect();
            println!("permissions: {}", perms.join(", "));
        }
        ("add", [mask, group]) => {
            if index.add_group_member(&mut config.permissions, mask, group)? {
                config.save(config_path)?;
                index.reload(&config.permissions)?;
                info!(user = %mask, group = %group, "Saved config");
                println!("added {mask} to {group}");
            } else {
                println!("{mask} is already in {group}");
            }
        }
        ("remove", [group, mask]) => {
            let removed = index.remove_group_member(&mut config.permissions, group, mask)?;
            if removed.is_empty() {
                println!("nothing matching {mask} in {group}");
            } else {
                config.save(config_path)?;
                index.reload(&config.permissions)?;
                info!(user = %mask, group = %group, "Saved config");
                println!("removed {} from {group}", removed.join(", "));
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
