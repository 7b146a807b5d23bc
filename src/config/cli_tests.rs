//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, FamilyArg, ProviderArg, SourceArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter([
            "ddns-up",
            "--provider",
            "digital-ocean",
            "--api-key",
            "token123",
            "--domain",
            "example.com",
            "--subdomain",
            "home",
        ]);

        assert_eq!(cli.provider, Some(ProviderArg::DigitalOcean));
        assert_eq!(cli.api_key.as_deref(), Some("token123"));
        assert_eq!(cli.domain.as_deref(), Some("example.com"));
        assert_eq!(cli.subdomain.as_deref(), Some("home"));
    }

    #[test]
    fn parse_all_providers() {
        let digital_ocean = Cli::parse_from_iter(["ddns-up", "--provider", "digital-ocean"]);
        assert_eq!(digital_ocean.provider, Some(ProviderArg::DigitalOcean));

        let hetzner = Cli::parse_from_iter(["ddns-up", "--provider", "hetzner"]);
        assert_eq!(hetzner.provider, Some(ProviderArg::Hetzner));
    }

    #[test]
    fn parse_source_and_family() {
        let cli = Cli::parse_from_iter(["ddns-up", "--source", "ipify", "--family", "v6"]);

        assert_eq!(cli.source, Some(SourceArg::Ipify));
        assert_eq!(cli.family, Some(FamilyArg::V6));
    }

    #[test]
    fn parse_schedule_and_record_options() {
        let cli = Cli::parse_from_iter([
            "ddns-up",
            "--interval",
            "120",
            "--ttl",
            "600",
            "--create",
            "false",
        ]);

        assert_eq!(cli.interval, Some(120));
        assert_eq!(cli.ttl, Some(600));
        assert_eq!(cli.create, Some(false));
    }

    #[test]
    fn parse_misc_options() {
        let cli = Cli::parse_from_iter(["ddns-up", "--config", "/path/to/config.toml", "--verbose"]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert!(cli.verbose);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["ddns-up"]);

        // Optional fields have no defaults in CLI - None when not specified
        assert!(cli.provider.is_none());
        assert!(cli.api_key.is_none());
        assert!(cli.source.is_none());
        assert!(cli.family.is_none());
        assert!(cli.interval.is_none());
        assert!(cli.ttl.is_none());
        assert!(cli.create.is_none());
        // Boolean flags default to false
        assert!(!cli.verbose);
    }
}

mod init_command {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["ddns-up", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("ddns-up.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["ddns-up", "init", "--output", "/custom/path/config.toml"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/path/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn is_init_false_for_run_mode() {
        let cli = Cli::parse_from_iter(["ddns-up", "--provider", "hetzner"]);

        assert!(!cli.is_init());
    }
}

mod value_enums {
    use super::*;
    use crate::provider::ProviderKind;
    use crate::source::SourceKind;
    use crate::sync::IpFamily;
    use clap::ValueEnum;

    #[test]
    fn parse_provider_names() {
        let digital_ocean = ProviderArg::from_str("digital-ocean", false).unwrap();
        assert_eq!(digital_ocean, ProviderArg::DigitalOcean);

        let hetzner = ProviderArg::from_str("hetzner", false).unwrap();
        assert_eq!(hetzner, ProviderArg::Hetzner);
    }

    #[test]
    fn parse_invalid_provider_returns_error() {
        let result = ProviderArg::from_str("cloudflare", false);
        assert!(result.is_err());
    }

    #[test]
    fn provider_arg_converts_to_kind() {
        let kind: ProviderKind = ProviderArg::DigitalOcean.into();
        assert_eq!(kind, ProviderKind::DigitalOcean);

        let kind: ProviderKind = ProviderArg::Hetzner.into();
        assert_eq!(kind, ProviderKind::Hetzner);
    }

    #[test]
    fn source_arg_converts_to_kind() {
        let kind: SourceKind = SourceArg::Ipify.into();
        assert_eq!(kind, SourceKind::Ipify);
    }

    #[test]
    fn family_arg_converts_to_family() {
        let v4: IpFamily = FamilyArg::V4.into();
        assert_eq!(v4, IpFamily::V4);

        let v6: IpFamily = FamilyArg::V6.into();
        assert_eq!(v6, IpFamily::V6);
    }
}
