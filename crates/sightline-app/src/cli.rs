use std::path::PathBuf;

use clap::Parser;

/// Sightline: a two-surface desktop shell for the glasses data client.
#[derive(Parser, Debug)]
#[command(name = "sightline", version, about)]
pub struct Args {
    /// Dev server port. Required unless SIGHTLINE_ENV=production.
    pub port: Option<u16>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_is_positional() {
        let args = Args::try_parse_from(["sightline", "8888"]).unwrap();
        assert_eq!(args.port, Some(8888));
        assert!(args.config.is_none());
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["sightline"]).unwrap();
        assert!(args.port.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn flags_parse() {
        let args = Args::try_parse_from([
            "sightline",
            "--config",
            "/tmp/s.toml",
            "--log-level",
            "debug",
            "3000",
        ])
        .unwrap();
        assert_eq!(args.port, Some(3000));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/s.toml")));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(Args::try_parse_from(["sightline", "not-a-port"]).is_err());
        assert!(Args::try_parse_from(["sightline", "70000"]).is_err());
    }
}
