use serde::{Deserialize, Serialize};

use crate::profile::ProfileConfig;
use crate::scoring::ScoringConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub profile: Option<ProfileConfig>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}
