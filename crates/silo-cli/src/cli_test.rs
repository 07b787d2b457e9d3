use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_remote_config_requires_host() {
    let cli = Cli::parse_from(["silo", "run", "script.txt"]);
    assert!(cli.global.remote_config().is_none());

    let cli = Cli::parse_from([
        "silo",
        "--host",
        "secure.example.com",
        "--username",
        "user",
        "run",
        "script.txt",
    ]);
    let remote = cli.global.remote_config().unwrap();
    assert_eq!(remote.host, "secure.example.com");
    assert_eq!(remote.username, "user");
    assert_eq!(remote.password, "");
}
