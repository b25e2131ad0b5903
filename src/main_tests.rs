// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `main.rs` - command line parsing

#[cfg(test)]
mod tests {
    use super::super::Args;
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;
    use zonesync::constants::LINODE_API_URL;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments() {
        let args = Args::try_parse_from(["zonesync", "secret", "dns.yaml"]).unwrap();
        assert_eq!(args.api_key, "secret");
        assert_eq!(args.config_file, PathBuf::from("dns.yaml"));
        assert!(!args.dryrun);
        assert_eq!(args.api_url, LINODE_API_URL);
    }

    #[test]
    fn test_short_and_long_dryrun() {
        let short = Args::try_parse_from(["zonesync", "-d", "secret", "dns.yaml"]).unwrap();
        let long = Args::try_parse_from(["zonesync", "secret", "dns.yaml", "--dryrun"]).unwrap();
        assert!(short.dryrun);
        assert!(long.dryrun);
    }

    #[test]
    fn test_api_url_override() {
        let args = Args::try_parse_from([
            "zonesync",
            "--api-url",
            "http://127.0.0.1:8080/",
            "secret",
            "dns.yaml",
        ])
        .unwrap();
        assert_eq!(args.api_url, "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_missing_config_file_is_rejected() {
        assert!(Args::try_parse_from(["zonesync", "secret"]).is_err());
    }
}
