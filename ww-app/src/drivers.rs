//! This module picks the driver that the app renders with, based on the enabled feature.

#[cfg(feature = "driver-debug")]
pub use debug::DebugDriver as Driver;
