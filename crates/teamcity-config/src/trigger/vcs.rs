use strum::{AsRefStr, EnumString};

use crate::{
    entity::{EntityHeader, Variant},
    properties::{Properties, PropertyValue},
    trigger::trigger_type,
};

/// How long the trigger waits after the last change before it starts a
/// build.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumString, PropertyValue,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum QuietPeriodMode {
    #[default]
    DoNotUse,

    /// Uses the quiet period configured on the server.
    UseDefault,

    /// Uses [`TriggerVcs::quiet_period`].
    UseCustom,
}

/// Starts a build when changes are detected in attached VCS roots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct TriggerVcs {
    pub header: EntityHeader,

    /// Newline separated rules like `+:src/**` which filter the changes.
    #[property(name = "triggerRules")]
    pub rules: String,

    /// Newline separated branch filter, like `+:*`.
    #[property(name = "branchFilter")]
    pub branch_filter: String,

    #[property(name = "quietPeriodMode")]
    pub quiet_period_mode: QuietPeriodMode,

    /// The quiet period in seconds.
    #[property(name = "quietPeriod")]
    pub quiet_period: u32,

    /// Starts a separate build for every detected change.
    #[property(name = "perCheckinTriggering")]
    pub per_checkin_triggering: bool,

    #[property(name = "groupCheckinsByCommitter")]
    pub group_checkins_by_committer: bool,

    #[property(name = "enableQueueOptimization")]
    pub queue_optimization: bool,
}

impl TriggerVcs {
    pub fn new(rules: impl Into<String>, branch_filter: impl Into<String>) -> Self {
        Self {
            rules: rules.into(),
            branch_filter: branch_filter.into(),
            ..Self::default()
        }
    }
}

impl Variant for TriggerVcs {
    const TYPE: &'static str = trigger_type::VCS;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
