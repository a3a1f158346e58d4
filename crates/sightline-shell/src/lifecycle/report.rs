use sightline_common::ShellError;

/// One surface that could not be created or loaded during startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceFailure {
    pub surface: String,
    pub interactive: bool,
    pub error: ShellError,
}

/// Outcome of [`LifecycleController::start`](super::LifecycleController::start).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupReport {
    /// Surfaces created, in creation order.
    pub created: Vec<String>,
    pub failures: Vec<SurfaceFailure>,
}

impl StartupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// The first failure on a main-interactive surface, if any.
    pub fn interactive_failure(&self) -> Option<&SurfaceFailure> {
        self.failures.iter().find(|f| f.interactive)
    }

    pub(super) fn fail(&mut self, surface: &str, interactive: bool, error: ShellError) {
        self.failures.push(SurfaceFailure {
            surface: surface.to_string(),
            interactive,
            error,
        });
    }
}
