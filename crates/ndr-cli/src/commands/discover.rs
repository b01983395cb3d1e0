//! The discover command

use colored::Colorize;
use ndr_discovery::{
    DiscoveryContext, DiscoveryDefaults, DiscoveryEngine, DiscoveryRecord, DiscoveryReport,
    PathResolver, ProcessEnv, SearchConfiguration, install_defaults,
};
use ndr_fs::{NodeExtension, NormalizedPath};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Where the search configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--search-path` arguments
    Explicit(SearchConfiguration),
    /// `--config` file
    File(SearchConfiguration),
    /// Environment variables, installed as process-wide defaults
    Environment(DiscoveryDefaults),
}

/// Pick the configuration source: explicit paths, then a config file,
/// then the environment.
pub fn resolve_config_source(cli: &Cli) -> Result<ConfigSource> {
    let follow_symlinks = !cli.no_follow_symlinks;

    if !cli.search_paths.is_empty() {
        let config = SearchConfiguration::new(cli.search_paths.iter().cloned())
            .with_follow_symlinks(follow_symlinks);
        return Ok(ConfigSource::Explicit(config));
    }

    if let Some(path) = &cli.config {
        let mut config = SearchConfiguration::load(&NormalizedPath::new(path))?;
        if cli.no_follow_symlinks {
            config.follow_symlinks = false;
        }
        return Ok(ConfigSource::File(config));
    }

    let mut resolver = PathResolver::new();
    if let Some(plugin_dir) = &cli.plugin_dir {
        resolver = resolver.with_plugin_dir(plugin_dir.as_path());
    }
    let defaults = DiscoveryDefaults::from_env(&resolver, &ProcessEnv)
        .with_follow_symlinks(follow_symlinks);
    Ok(ConfigSource::Environment(defaults))
}

/// Parse `--only-ext` values into a normalized extension list.
pub fn parse_only_extensions(values: &[String]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<NodeExtension>()
                .map(|ext| ext.as_str().to_string())
                .map_err(CliError::user)
        })
        .collect()
}

/// Build the engine for one run.
///
/// For the environment source this installs the process-wide defaults, so
/// it may only be called once per process in that case.
pub fn build_engine(cli: &Cli) -> Result<DiscoveryEngine> {
    let engine = match resolve_config_source(cli)? {
        ConfigSource::Explicit(config) | ConfigSource::File(config) => {
            DiscoveryEngine::with_config(config)
        }
        ConfigSource::Environment(defaults) => {
            install_defaults(defaults)?;
            DiscoveryEngine::new()
        }
    };

    let only = parse_only_extensions(&cli.only_extensions)?;
    if only.is_empty() {
        return Ok(engine);
    }
    Ok(engine.with_filter(move |record: &DiscoveryRecord| only.contains(&record.extension)))
}

/// Render records as tab-separated lines:
/// `identifier  extension  uri  [alias,alias]`.
pub fn render_text(records: &[DiscoveryRecord]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("{}\t{}\t{}", record.identifier, record.extension, record.uri));
        if !record.aliases.is_empty() {
            out.push('\t');
            out.push_str(&record.aliases.join(","));
        }
        out.push('\n');
    }
    out
}

fn print_report(report: &DiscoveryReport) {
    eprintln!(
        "{} {} nodes ({} walked, {} alias files, {} rejected, {} aliased)",
        "Discovered".green().bold(),
        report.records.len(),
        report.walked,
        report.alias_files,
        report.rejected,
        report.aliased
    );
}

/// Run the discover command
pub fn run_discover(cli: &Cli) -> Result<()> {
    let engine = build_engine(cli)?;

    if cli.paths {
        for path in engine.search_uris() {
            println!("{}", path);
        }
        return Ok(());
    }

    if engine.search_uris().is_empty() {
        eprintln!(
            "{} no search paths configured; set {} or pass {}",
            "warning:".yellow().bold(),
            "RMAN_SHADERPATH / RMAN_RIXPLUGINPATH / RMANTREE".cyan(),
            "--search-path".cyan()
        );
    }

    let report = engine.discover_nodes_with_report(&DiscoveryContext::new().with_label("ndr-discover"))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
    } else {
        print!("{}", render_text(&report.records));
    }

    if cli.report {
        print_report(&report);
    }

    Ok(())
}
