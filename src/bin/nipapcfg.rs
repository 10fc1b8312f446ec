// src/bin/nipapcfg.rs
//! nipapcfg — read-only inspector for NIPAP configuration files

use anyhow::{bail, Context, Result};
use nipap_config::consts::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use nipap_config::export::to_json_string;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: nipapcfg [-c PATH] <get SECTION OPTION | sections | dump>";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Get { section: String, option: String },
    Sections,
    Dump,
}

#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    path: Option<PathBuf>,
    command: Command,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let invocation = parse_args(std::env::args().skip(1))?;
    let path = resolve_path(invocation.path, std::env::var(CONFIG_PATH_ENV).ok());
    debug!(path = %path.display(), "using configuration file");

    let config = nipap_config::obtain(Some(&path))
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    match invocation.command {
        Command::Get { section, option } => {
            let value = config
                .get(&section, &option)
                .with_context(|| format!("Lookup of [{section}] {option} failed"))?;
            // valueless options print as an empty line
            println!("{}", value.unwrap_or_default());
        }
        Command::Sections => {
            for name in config.sections() {
                println!("{name}");
            }
        }
        Command::Dump => println!("{}", to_json_string(config)?),
    }

    Ok(())
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Invocation> {
    let mut args = args.into_iter();
    let mut path = None;
    let mut rest = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let value = args.next().context("-c requires a path")?;
                path = Some(PathBuf::from(value));
            }
            _ => rest.push(arg),
        }
    }

    let words: Vec<&str> = rest.iter().map(String::as_str).collect();
    let command = match words.as_slice() {
        ["get", section, option] => Command::Get {
            section: section.to_string(),
            option: option.to_string(),
        },
        ["sections"] => Command::Sections,
        ["dump"] => Command::Dump,
        _ => bail!(USAGE),
    };

    Ok(Invocation { path, command })
}

/// `-c` wins, then `$NIPAP_CONFIG`, then the system-wide default
fn resolve_path(explicit: Option<PathBuf>, from_env: Option<String>) -> PathBuf {
    explicit
        .or_else(|| from_env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn parses_get_with_config_flag() {
        let inv = parse_args(args("-c /tmp/n.conf get nipapd port")).unwrap();
        assert_eq!(inv.path, Some(PathBuf::from("/tmp/n.conf")));
        assert_eq!(
            inv.command,
            Command::Get {
                section: "nipapd".into(),
                option: "port".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_args(args("frobnicate")).is_err());
        assert!(parse_args(args("get onlysection")).is_err());
        assert!(parse_args(args("dump -c")).is_err());
    }

    #[test]
    fn path_resolution_order() {
        let explicit = Some(PathBuf::from("a.conf"));
        assert_eq!(
            resolve_path(explicit, Some("b.conf".into())),
            PathBuf::from("a.conf")
        );
        assert_eq!(
            resolve_path(None, Some("b.conf".into())),
            PathBuf::from("b.conf")
        );
        assert_eq!(
            resolve_path(None, Some(String::new())),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
        assert_eq!(resolve_path(None, None), PathBuf::from(DEFAULT_CONFIG_PATH));
    }
}
