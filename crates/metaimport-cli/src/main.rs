//! metaimport - vanity import pages for Go packages
//!
//! Usage:
//!   metaimport example.org/myrepo https://github.com/user/myrepo
//!   metaimport --godoc --branch dev -o public example.org/exproj http://code.org/r/p/exproj

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metaimport_core::config::{Config, ConfigStore};
use metaimport_core::doclink;
use metaimport_core::git::{FetchResult, GitFetcher, RepoSpec};
use metaimport_core::site::{BuildOptions, BuildReport, FsPageWriter, SiteBuilder};

const LONG_ABOUT: &str = "\
Generates HTML files with <meta name=\"go-import\"> tags as expected by go get.

<REPO> is the Git repository containing Go source code to generate meta tags
for. <IMPORT_PREFIX> is the import path corresponding to the repository root.
One index.html is written per Go package directory, under
<OUTPUT>/<import path>/.";

#[derive(Parser)]
#[command(name = "metaimport", version)]
#[command(about = "Generate go-import meta tag pages for a Git repository")]
#[command(long_about = LONG_ABOUT)]
struct Cli {
    /// Import path of the repository root (e.g., example.org/myrepo)
    import_prefix: String,

    /// Git repository URL (e.g., https://github.com/user/myrepo)
    repo: String,

    /// Branch to use (default: the remote's default branch)
    #[arg(long, short)]
    branch: Option<String>,

    /// Include <meta name="go-source"> tags as expected by godoc
    ///
    /// Only partial support for repositories not hosted on github.com or
    /// bitbucket.org.
    #[arg(long)]
    godoc: bool,

    /// Output directory for generated HTML files (default: html)
    #[arg(long = "output", short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Redirect to the documentation page when visited in a browser (default: true)
    #[arg(long, value_name = "BOOL")]
    redirect: Option<bool>,

    /// Documentation site to link and redirect to (default: https://godoc.org)
    #[arg(long, value_name = "URL")]
    docs_base_url: Option<String>,

    /// Config file (default: <config dir>/metaimport/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the repository cache (default: <cache dir>/metaimport)
    #[arg(long, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// One line per written page
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl Cli {
    /// Settings given on the command line, as a config layer.
    fn config_overrides(&self) -> Config {
        Config {
            output_dir: self.output_dir.clone(),
            docs_base_url: self.docs_base_url.clone(),
            godoc: self.godoc.then_some(true),
            redirect: self.redirect,
            state_dir: self.state_dir.clone(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metaimport=info,metaimport_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::discover(),
    };
    let mut config = store.load()?;
    config.merge(cli.config_overrides());

    let mut spec = RepoSpec::new(&cli.repo);
    if let Some(branch) = &cli.branch {
        spec = spec.with_branch(branch);
    }

    let fetcher = GitFetcher::new(config.state_dir()?);
    let fetched = fetcher
        .fetch(&spec)
        .with_context(|| format!("Failed to fetch {}", cli.repo))?;

    let options = BuildOptions::new(&cli.import_prefix, &cli.repo)
        .with_docs_base_url(config.docs_base_url())
        .with_redirect(config.redirect());
    let mut builder = SiteBuilder::new(options);
    if config.godoc() {
        let strategy = doclink::select(
            &cli.repo,
            fetched.requested_branch(),
            fetched.default_branch.as_deref(),
        );
        tracing::info!(provider = ?strategy.provider(), "Generating go-source links");
        builder = builder.with_doc_links(strategy);
    }

    let output_dir = config.output_dir();
    let mut writer = FsPageWriter::new(&output_dir);
    let report = builder
        .build(&fetched.snapshot, &mut writer)
        .context("Failed to generate pages")?;

    print_report(&report, &fetched, cli.format)
}

fn print_report(report: &BuildReport, fetched: &FetchResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for page in &report.pages {
                println!("{}", page.path.display());
            }
            eprintln!(
                "Wrote {} page(s) for {} from {} at {}",
                report.pages.len(),
                report.import_prefix,
                fetched.branch,
                fetched.snapshot.commit
            );
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "import_prefix": report.import_prefix,
                "branch": fetched.branch,
                "commit": fetched.snapshot.commit,
                "provider": report.provider,
                "pages": report.pages,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_arguments_and_defaults() {
        let cli = Cli::parse_from([
            "metaimport",
            "example.org/myrepo",
            "https://github.com/user/myrepo",
        ]);
        assert_eq!(cli.import_prefix, "example.org/myrepo");
        assert_eq!(cli.repo, "https://github.com/user/myrepo");
        assert!(cli.branch.is_none());
        assert!(!cli.godoc);

        let overrides = cli.config_overrides();
        assert_eq!(overrides, Config::default());
    }

    #[test]
    fn flags_become_config_overrides() {
        let cli = Cli::parse_from([
            "metaimport",
            "--godoc",
            "--redirect",
            "false",
            "-o",
            "public",
            "--branch",
            "dev",
            "example.org/exproj",
            "http://code.org/r/p/exproj",
        ]);
        let overrides = cli.config_overrides();
        assert_eq!(overrides.godoc, Some(true));
        assert_eq!(overrides.redirect, Some(false));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("public")));
        assert_eq!(cli.branch.as_deref(), Some("dev"));
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["metaimport", "example.org/only"]).is_err());
    }
}
