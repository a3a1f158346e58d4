use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("launch error: {0}")]
    LaunchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("window manager error: {0}")]
    WindowManagerError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Why a surface could not be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailability {
    /// No surface with that name was ever created.
    NeverCreated,
    /// The surface existed but has been closed.
    Closed,
}

impl fmt::Display for Unavailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeverCreated => write!(f, "never created"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Errors raised by the window registry, surface loader, message bridge
/// and lifecycle controller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShellError {
    #[error("surface '{0}' already exists")]
    DuplicateSurface(String),

    #[error("no route for page '{page}' (surface '{surface}')")]
    UnresolvedRoute { surface: String, page: String },

    #[error("surface '{name}' is unavailable ({reason})")]
    SurfaceUnavailable {
        name: String,
        reason: Unavailability,
    },

    #[error("topic '{0}' is not permitted from a surface")]
    UnauthorizedTopic(String),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("request to surface '{0}' timed out")]
    RequestTimeout(String),

    #[error("host environment never became ready")]
    HostNotReady,

    #[error("startup has already run")]
    AlreadyStarted,

    #[error("surface backend error: {0}")]
    Backend(String),
}

impl ShellError {
    pub fn unavailable(name: impl Into<String>, reason: Unavailability) -> Self {
        Self::SurfaceUnavailable {
            name: name.into(),
            reason,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SightlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Shell(#[from] ShellError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ValidationError("duplicate surface 'main'".into());
        assert_eq!(
            err.to_string(),
            "config validation error: duplicate surface 'main'"
        );

        let err = ConfigError::LaunchError("missing dev server port".into());
        assert_eq!(err.to_string(), "launch error: missing dev server port");
    }

    #[test]
    fn shell_error_display() {
        let err = ShellError::DuplicateSurface("main".into());
        assert_eq!(err.to_string(), "surface 'main' already exists");

        let err = ShellError::UnresolvedRoute {
            surface: "kinect".into(),
            page: "settings".into(),
        };
        assert_eq!(
            err.to_string(),
            "no route for page 'settings' (surface 'kinect')"
        );

        let err = ShellError::unavailable("kinect", Unavailability::Closed);
        assert_eq!(err.to_string(), "surface 'kinect' is unavailable (closed)");

        let err = ShellError::unavailable("ghost", Unavailability::NeverCreated);
        assert_eq!(
            err.to_string(),
            "surface 'ghost' is unavailable (never created)"
        );

        let err = ShellError::UnauthorizedTopic("eval".into());
        assert_eq!(err.to_string(), "topic 'eval' is not permitted from a surface");
    }

    #[test]
    fn sightline_error_from_shell() {
        let err: SightlineError = ShellError::HostNotReady.into();
        assert!(matches!(err, SightlineError::Shell(ShellError::HostNotReady)));
        assert_eq!(err.to_string(), "host environment never became ready");
    }

    #[test]
    fn sightline_error_from_config() {
        let err: SightlineError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, SightlineError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn sightline_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: SightlineError = io_err.into();
        assert!(matches!(err, SightlineError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn sightline_error_other_variants() {
        let err = SightlineError::WebView("js error".into());
        assert_eq!(err.to_string(), "webview error: js error");

        let err = SightlineError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
