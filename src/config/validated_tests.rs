//! Tests for validated configuration.

use std::fs;
use std::io::Write;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::{NamedTempFile, tempdir};
use tokio::sync::Semaphore;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{Mode, QueryTarget, ValidatedConfig, write_default_config};
use crate::protocol::Request;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["ifshow"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

fn agent_mode(config: ValidatedConfig) -> super::AgentSettings {
    match config.mode {
        Mode::Agent(settings) => settings,
        other => panic!("expected agent mode, got {other:?}"),
    }
}

fn remote_mode(config: ValidatedConfig) -> super::RemoteSettings {
    match config.mode {
        Mode::Remote(settings) => settings,
        other => panic!("expected remote mode, got {other:?}"),
    }
}

mod local {
    use super::*;

    fn target(args: &[&str]) -> QueryTarget {
        match ValidatedConfig::from_raw(&cli(args), None).unwrap().mode {
            Mode::Local(query) => query.target,
            other => panic!("expected local mode, got {other:?}"),
        }
    }

    #[test]
    fn no_flags_lists_names() {
        assert_eq!(target(&[]), QueryTarget::Names);
    }

    #[test]
    fn interface_flag_selects_one() {
        assert_eq!(
            target(&["-i", "eth0"]),
            QueryTarget::Interface("eth0".to_string())
        );
    }

    #[test]
    fn all_flag_selects_grouped() {
        assert_eq!(target(&["-a"]), QueryTarget::All);
    }

    #[test]
    fn json_flag_is_carried() {
        let config = ValidatedConfig::from_raw(&cli(&["--json", "-a"]), None).unwrap();
        assert!(matches!(config.mode, Mode::Local(query) if query.json));
    }

    #[test]
    fn verbose_flag_is_carried() {
        let config = ValidatedConfig::from_raw(&cli(&["-v"]), None).unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn local_flags_with_subcommand_conflict() {
        let result = ValidatedConfig::from_raw(&cli(&["-a", "agent"]), None);
        assert!(matches!(result, Err(ConfigError::Conflict(_))));
    }

    #[test]
    fn init_selects_init_mode_with_default_path() {
        let config = ValidatedConfig::from_raw(&cli(&["init"]), None).unwrap();
        assert_eq!(config.mode, Mode::Init(PathBuf::from("ifshow.toml")));
    }

    #[test]
    fn init_carries_output_path() {
        let config =
            ValidatedConfig::from_raw(&cli(&["init", "-o", "/tmp/custom.toml"]), None).unwrap();
        assert_eq!(config.mode, Mode::Init(PathBuf::from("/tmp/custom.toml")));
        assert_eq!(config.mode.name(), "init");
    }
}

mod agent {
    use super::*;

    #[test]
    fn defaults_when_not_specified() {
        let settings = agent_mode(ValidatedConfig::from_raw(&cli(&["agent"]), None).unwrap());

        assert_eq!(settings.listen, "[::]:5555".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.max_connections, 64);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn toml_values_are_used() {
        let toml = toml(
            r#"
            [agent]
            listen = "127.0.0.1:6000"
            max_connections = 8
            request_timeout = 30
        "#,
        );

        let settings =
            agent_mode(ValidatedConfig::from_raw(&cli(&["agent"]), Some(&toml)).unwrap());

        assert_eq!(settings.listen.port(), 6000);
        assert_eq!(settings.max_connections, 8);
        assert_eq!(settings.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn cli_overrides_toml() {
        let toml = toml(
            r#"
            [agent]
            listen = "127.0.0.1:6000"
            max_connections = 8
        "#,
        );
        let cli = cli(&["agent", "--listen", "0.0.0.0:7000", "--max-connections", "2"]);

        let settings = agent_mode(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.listen, "0.0.0.0:7000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.max_connections, 2);
    }

    #[test]
    fn invalid_listen_address() {
        let result = ValidatedConfig::from_raw(&cli(&["agent", "--listen", "localhost"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidListenAddress { value, .. }) if value == "localhost"
        ));
    }

    #[test]
    fn zero_connection_limit() {
        let result =
            ValidatedConfig::from_raw(&cli(&["agent", "--max-connections", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLimit {
                field: "agent.max_connections",
                ..
            })
        ));
    }

    #[test]
    fn connection_limit_above_semaphore_capacity() {
        let too_many = (Semaphore::MAX_PERMITS + 1).to_string();
        let result =
            ValidatedConfig::from_raw(&cli(&["agent", "--max-connections", &too_many]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLimit {
                field: "agent.max_connections",
                ..
            })
        ));
    }

    #[test]
    fn connection_limit_at_semaphore_capacity_is_accepted() {
        let limit = Semaphore::MAX_PERMITS.to_string();
        let settings = agent_mode(
            ValidatedConfig::from_raw(&cli(&["agent", "--max-connections", &limit]), None)
                .unwrap(),
        );

        assert_eq!(settings.max_connections, Semaphore::MAX_PERMITS);
    }

    #[test]
    fn toml_connection_limit_above_semaphore_capacity() {
        let toml = toml(&format!(
            "[agent]\nmax_connections = {}\n",
            Semaphore::MAX_PERMITS as u64 + 1
        ));
        let result = ValidatedConfig::from_raw(&cli(&["agent"]), Some(&toml));

        assert!(matches!(result, Err(ConfigError::InvalidLimit { .. })));
    }

    #[test]
    fn zero_request_timeout() {
        let result =
            ValidatedConfig::from_raw(&cli(&["agent", "--request-timeout", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidDuration {
                field: "agent.request_timeout",
                ..
            })
        ));
    }
}

mod remote {
    use super::*;

    #[test]
    fn interface_request_with_defaults() {
        let settings = remote_mode(
            ValidatedConfig::from_raw(&cli(&["remote", "-n", "server1", "-i", "eth0"]), None)
                .unwrap(),
        );

        assert_eq!(settings.host, "server1");
        assert_eq!(settings.port, 5555);
        assert_eq!(settings.connect_timeout, Duration::from_secs(10));
        assert_eq!(settings.request, Request::Interface("eth0".to_string()));
    }

    #[test]
    fn all_request() {
        let settings = remote_mode(
            ValidatedConfig::from_raw(&cli(&["remote", "-n", "::1", "-a"]), None).unwrap(),
        );

        assert_eq!(settings.request, Request::All);
    }

    #[test]
    fn toml_port_and_timeout() {
        let toml = toml(
            r"
            [remote]
            port = 6000
            connect_timeout = 3
        ",
        );

        let settings = remote_mode(
            ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-a"]), Some(&toml)).unwrap(),
        );

        assert_eq!(settings.port, 6000);
        assert_eq!(settings.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn cli_port_overrides_toml() {
        let toml = toml("[remote]\nport = 6000\n");
        let cli = cli(&["remote", "-n", "h", "-a", "--port", "7000"]);

        let settings = remote_mode(ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap());

        assert_eq!(settings.port, 7000);
    }

    #[test]
    fn zero_port() {
        let result =
            ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-a", "--port", "0"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidLimit {
                field: "remote.port",
                ..
            })
        ));
    }

    #[test]
    fn zero_connect_timeout() {
        let result = ValidatedConfig::from_raw(
            &cli(&["remote", "-n", "h", "-a", "--connect-timeout", "0"]),
            None,
        );

        assert!(matches!(result, Err(ConfigError::InvalidDuration { .. })));
    }

    #[test]
    fn empty_interface_name() {
        let result = ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-i", ""]), None);

        assert!(matches!(
            result,
            Err(ConfigError::InvalidInterfaceName { name, .. }) if name.is_empty()
        ));
    }

    #[test]
    fn interface_name_with_whitespace() {
        for name in ["eth0 lo", "eth0\t", " eth0"] {
            let result =
                ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-i", name]), None);

            assert!(
                matches!(&result, Err(ConfigError::InvalidInterfaceName { name: n, .. }) if n == name),
                "{name:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn oversized_interface_name() {
        let name = "x".repeat(crate::protocol::MAX_TOKEN_LEN + 1);
        let result = ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-i", &name]), None);

        assert!(matches!(result, Err(ConfigError::InvalidInterfaceName { .. })));
    }
}

mod display {
    use super::*;

    #[test]
    fn agent_summary() {
        let config = ValidatedConfig::from_raw(
            &cli(&["agent", "--listen", "127.0.0.1:5555", "--request-timeout", "5"]),
            None,
        )
        .unwrap();

        let summary = config.to_string();

        assert!(summary.contains("mode: agent"));
        assert!(summary.contains("listen: 127.0.0.1:5555"));
        assert!(summary.contains("request_timeout: 5s"));
    }

    #[test]
    fn remote_summary_includes_request() {
        let config =
            ValidatedConfig::from_raw(&cli(&["remote", "-n", "h", "-i", "lo"]), None).unwrap();

        assert!(config.to_string().contains("request: IFNAME lo"));
    }
}

mod loading {
    use super::*;

    #[test]
    fn load_from_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [agent]
            listen = "127.0.0.1:5556"
            max_connections = 4
        "#
        )
        .unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap(), "agent"]);
        let settings = agent_mode(ValidatedConfig::load(&cli).unwrap());

        assert_eq!(settings.listen.port(), 5556);
        assert_eq!(settings.max_connections, 4);
    }

    #[test]
    fn config_flag_after_subcommand() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[remote]\nport = 6001").unwrap();

        let cli = cli(&["remote", "-n", "h", "-a", "-c", file.path().to_str().unwrap()]);
        let settings = remote_mode(ValidatedConfig::load(&cli).unwrap());

        assert_eq!(settings.port, 6001);
    }

    #[test]
    fn load_without_config_file() {
        let config = ValidatedConfig::load(&cli(&["-a"])).unwrap();
        assert!(matches!(config.mode, Mode::Local(_)));
    }

    #[test]
    fn load_nonexistent_config_file_returns_error() {
        let cli = cli(&["--config", "nonexistent_file_12345.toml"]);
        let result = ValidatedConfig::load(&cli);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn init_ignores_config_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("not-yet-written.toml");
        let missing = missing.to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["-c", missing, "init", "-o", missing])).unwrap();

        assert_eq!(config.mode, Mode::Init(PathBuf::from(missing)));
    }

    #[test]
    fn unknown_key_in_file_returns_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nport = 5555").unwrap();

        let cli = cli(&["--config", file.path().to_str().unwrap(), "agent"]);

        assert!(matches!(
            ValidatedConfig::load(&cli),
            Err(ConfigError::TomlParse(_))
        ));
    }
}

mod write_config {
    use super::*;

    #[test]
    fn write_default_config_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test-config.toml");

        write_default_config(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[agent]"));
        assert!(content.contains("[remote]"));
    }

    #[test]
    fn written_template_loads_as_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ifshow.toml");
        write_default_config(&path).unwrap();

        let cli = cli(&["--config", path.to_str().unwrap(), "agent"]);
        let settings = agent_mode(ValidatedConfig::load(&cli).unwrap());

        assert_eq!(settings.max_connections, 64);
        assert_eq!(settings.request_timeout, None);
    }

    #[test]
    fn write_default_config_to_invalid_path_returns_error() {
        let path = Path::new("/nonexistent_dir_12345/config.toml");
        let result = write_default_config(path);

        assert!(matches!(result, Err(ConfigError::FileWrite { .. })));
    }
}
