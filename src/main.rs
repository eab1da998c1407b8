use clap::Parser;
use tracing_subscriber::EnvFilter;

use release_check::config::DEFAULT_CHANGELOG_BRANCH;
use release_check::{CheckConfig, UpdateChecker};

#[derive(Parser)]
#[command(name = "release-check")]
#[command(version, about = "Check GitHub Releases for application updates")]
struct Cli {
    /// Repository owner (user or organization)
    #[arg(long)]
    owner: String,

    /// Repository name
    #[arg(long)]
    repo: String,

    /// Installed version of the application
    #[arg(long)]
    current: String,

    /// Application name sent in the User-Agent header
    #[arg(long)]
    app_name: Option<String>,

    /// Branch to read CHANGELOG.md from
    #[arg(long, default_value = DEFAULT_CHANGELOG_BRANCH)]
    branch: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CheckConfig::new(&cli.owner, &cli.repo);
    config.changelog_branch = cli.branch;
    if let Some(app_name) = cli.app_name {
        config.app_name = app_name;
    }

    let checker = UpdateChecker::from_config(&config, &cli.current);
    checker.check_to_completion().await;

    let state = checker.state();
    if let Some(error) = state.last_error {
        anyhow::bail!("update check failed: {error}");
    }

    let Some(info) = state.update_info else {
        anyhow::bail!("update check produced no result");
    };

    if !info.update_available {
        println!(
            "{}/{} is up to date ({})",
            config.owner, config.repo, info.current_version
        );
        return Ok(());
    }

    println!(
        "update available: {} -> {}",
        info.current_version, info.latest_version
    );
    if let Some(published) = info.published_at {
        println!("published: {}", published.format("%Y-%m-%d"));
    }
    println!("release: {}", info.release_url);
    if let Some(url) = &info.installer_url {
        println!("installer: {url}");
    }
    if let Some(url) = &info.archive_url {
        println!("archive: {url}");
    }

    if !state.changelog.is_empty() {
        println!("\nchanges since {}:", info.current_version);
        for entry in &state.changelog {
            match &entry.date {
                Some(date) => println!("\n## {} ({})", entry.version, date),
                None => println!("\n## {}", entry.version),
            }
            println!("{}", entry.content);
        }
    }

    Ok(())
}
