pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, PlatformError, ShellError, SightlineError, Unavailability};
pub use id::{new_id, CorrelationId};
pub use types::{Dimensions, Placement, SurfaceId};

pub type Result<T> = std::result::Result<T, SightlineError>;
