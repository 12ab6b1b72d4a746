//! Unit tests for CLI commands

use crate::cli::{render_url, routes_listing, Cli, Commands};
use crate::config::Mode;
use clap::Parser;

#[test]
fn test_build_command_with_flags() {
    let cli = Cli::try_parse_from([
        "spa-router",
        "build",
        "--config",
        "spa.yaml",
        "--mode",
        "production",
    ])
    .unwrap();

    match cli.command {
        Commands::Build { config, mode } => {
            assert_eq!(config.unwrap().to_string_lossy(), "spa.yaml");
            assert_eq!(mode, Some(Mode::Production));
        }
        _ => panic!("Expected Build command"),
    }
}

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["spa-router", "serve"]).unwrap();

    match cli.command {
        Commands::Serve {
            config,
            addr,
            watch,
            no_build,
        } => {
            assert!(config.is_none());
            assert!(addr.is_none());
            assert!(!watch);
            assert!(!no_build);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_serve_with_flags() {
    let cli = Cli::try_parse_from([
        "spa-router",
        "serve",
        "-c",
        "spa.toml",
        "--addr",
        "0.0.0.0:9000",
        "--watch",
        "--no-build",
    ])
    .unwrap();

    match cli.command {
        Commands::Serve {
            config,
            addr,
            watch,
            no_build,
        } => {
            assert_eq!(config.unwrap().to_string_lossy(), "spa.toml");
            assert_eq!(addr.as_deref(), Some("0.0.0.0:9000"));
            assert!(watch);
            assert!(no_build);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_all_commands_parse() {
    let commands = vec![
        vec!["spa-router", "build"],
        vec!["spa-router", "serve", "--watch"],
        vec!["spa-router", "routes"],
        vec!["spa-router", "render", "/about"],
    ];

    for args in commands {
        let cli = Cli::try_parse_from(&args);
        assert!(cli.is_ok(), "Failed to parse command: {:?}", args);
    }
}

#[test]
fn test_invalid_mode_is_rejected() {
    assert!(Cli::try_parse_from(["spa-router", "build", "--mode", "staging"]).is_err());
}

#[test]
fn test_render_requires_url() {
    assert!(Cli::try_parse_from(["spa-router", "render"]).is_err());
}

#[test]
fn test_routes_listing() {
    let listing = routes_listing();
    assert!(listing.contains("app:\n  / (exact) -> home\n"));
    assert!(listing.contains("  /about (prefix) -> about\n"));
    assert!(listing.contains("students:\n  /students/name/:name (prefix) -> student\n"));
}

#[test]
fn test_render_url() {
    let html = render_url("/contact");
    assert!(html.contains("<h1>Contact Us</h1>"));
    assert!(!html.contains("<h1>Home</h1>"));
}
