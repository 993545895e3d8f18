//! Display Kubernetes resource quotas in human readable form

use std::fs::File;
use std::io::{self, BufReader, Write as _};
use std::path::Path;

use anyhow::Context as _;

mod config;
mod fmt;
mod quantity;
mod quota;
mod table;
mod units;
mod usage;

use crate::quota::ResourceQuota;
use crate::table::Table;

/// Command line options
#[derive(Debug)]
struct CommandLine<'a> {
    namespace: Option<&'a str>,
    file: Option<&'a str>,
    config: Option<&'a str>,
    color: bool,
}

fn build_cli() -> clap::Command<'static> {
    clap::Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            clap::Arg::new("NAMESPACE")
                .help("Only show quotas of this namespace")
                .index(1),
        )
        .arg(
            clap::Arg::new("file")
                .short('f')
                .long("file")
                .takes_value(true)
                .value_name("PATH")
                .help("Read quotas as JSON from this file, '-' for stdin (default)"),
        )
        .arg(
            clap::Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .value_name("PATH")
                .help("Config file to use instead of the XDG one"),
        )
        .arg(
            clap::Arg::new("color")
                .long("color")
                .help("Colorize usage according to configured thresholds"),
        )
}

impl<'a> CommandLine<'a> {
    fn from_matches(matches: &'a clap::ArgMatches) -> Self {
        Self {
            namespace: matches.value_of("NAMESPACE"),
            file: matches.value_of("file"),
            config: matches.value_of("config"),
            color: matches.is_present("color"),
        }
    }
}

/// Load quota objects from file or stdin
fn load_quotas(file: Option<&str>) -> anyhow::Result<Vec<ResourceQuota>> {
    match file {
        None | Some("-") => quota::read_quotas(io::stdin().lock(), "stdin"),
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
            quota::read_quotas(BufReader::new(file), path)
        }
    }
}

/// Keep quota objects to display
fn select_quotas<'q>(
    quotas: &'q [ResourceQuota],
    namespace: Option<&str>,
    cfg: &config::QuotaConfig,
) -> Vec<&'q ResourceQuota> {
    quotas
        .iter()
        .filter(|q| namespace.map_or(true, |ns| q.metadata.namespace.as_deref() == Some(ns)))
        .filter(|q| {
            let excluded = cfg.is_excluded(&q.metadata.name, q.metadata.namespace.as_deref());
            if excluded {
                log::debug!("Skipping blacklisted quota {:?}", q.metadata.name);
            }
            !excluded
        })
        .collect()
}

/// Write one table per quota object
fn output_quotas<W: io::Write>(
    out: &mut W,
    quotas: &[&ResourceQuota],
    namespace: Option<&str>,
    colors: Option<&config::UsageConfig>,
) -> io::Result<()> {
    if quotas.is_empty() {
        return match namespace {
            Some(ns) => writeln!(out, "No resource quotas found in namespace '{}'", ns),
            None => writeln!(out, "No resource quotas found"),
        };
    }

    for quota in quotas {
        log::info!(
            "Quota {:?} in namespace {:?}",
            quota.metadata.name,
            quota.metadata.namespace
        );
        let rows = quota.rows();
        let mut table = Table::new(&rows);
        if let Some(cfg) = colors {
            table = table.with_colors(cfg);
        }
        write!(out, "{}", table)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = build_cli().get_matches();
    let cl = CommandLine::from_matches(&matches);
    log::trace!("{:?}", cl);

    let cfg = match cl.config {
        Some(path) => config::parse_config_file(Path::new(path))?,
        None => config::parse_config()?,
    };
    log::trace!("{:?}", cfg);

    let quotas = load_quotas(cl.file)?;
    let selected = select_quotas(&quotas, cl.namespace, &cfg.quota);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output_quotas(
        &mut out,
        &selected,
        cl.namespace,
        cl.color.then_some(&cfg.usage),
    )
    .context("Failed to write output")?;
    out.flush()?;

    Ok(())
}
