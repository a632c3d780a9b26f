use crate::config::{DEFAULT_REPO, DEFAULT_STEAM_DIR};
use clap::Parser;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    // Tagged builds report the tag alone
    if let Some(tag) = option_env!("PROTON_UPDATER_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("PROTON_UPDATER_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("PROTON_UPDATER_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser, Debug)]
#[command(name = "proton-updater")]
#[command(about = "Install the latest Proton-GE release into Steam's compatibility tools")]
#[command(version = get_version())]
pub struct Cli {
    /// Path to steam installation
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STEAM_DIR)]
    pub steam_dir: String,

    /// GitHub repository publishing the releases (owner/repo)
    #[arg(long, value_name = "OWNER/REPO", default_value = DEFAULT_REPO)]
    pub repo: String,

    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["proton-updater"]);
        assert_eq!(cli.steam_dir, "~/.steam/");
        assert_eq!(cli.repo, "GloriousEggroll/proton-ge-custom");
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "proton-updater",
            "--steam-dir",
            "/games/steam",
            "-vv",
            "--repo",
            "someone/proton-fork",
        ]);
        assert_eq!(cli.steam_dir, "/games/steam");
        assert_eq!(cli.repo, "someone/proton-fork");
        assert_eq!(cli.verbose, 2);
    }
}
