//! Session-wide configuration.

use sw_spatial::NetworkConfig;

use crate::acquire::GrowthPolicy;
use crate::explore::ExploreConfig;

/// Everything a [`NavigationSession`](crate::NavigationSession) is tuned by.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavConfig {
    /// Highway classes to drop or to treat as minor.
    pub network: NetworkConfig,
    /// Radius search used when entering road mode.
    pub growth: GrowthPolicy,
    pub explore: ExploreConfig,
}
