pub mod logging;
pub mod transform;

pub use logging::*;
pub use transform::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SherpaConfig {
    pub transform: TransformConfig,
    pub logging: LoggingConfig,
}
