use strum::{AsRefStr, EnumString};

use crate::properties::{BuildTypeId, Properties, PropertyValue};

/// Selects which build of a dependency provides artifacts.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    EnumString,
    strum::Display,
    PropertyValue,
)]
#[strum(serialize_all = "camelCase")]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum ArtifactDependencyRevision {
    #[default]
    LastFinished,
    LastSuccessful,
    LastPinned,
    BuildNumber,
    BuildTag,
    SameChainOrLastFinished,
}

/// Options shared by schedule triggers, flattened into the property bag of
/// the trigger.
///
/// [`TriggerScheduleOptions::new`] returns the options the server proposes
/// for new triggers. [`Default`] is the zero value, which is what decoding
/// falls back to for missing properties.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct TriggerScheduleOptions {
    #[property(name = "enableQueueOptimization", force)]
    pub queue_optimization: bool,

    #[property(name = "promoteWatchedBuild", force)]
    pub promote_watched_build: bool,

    /// Only triggers a build if there are pending changes.
    #[property(name = "triggerBuildWithPendingChangesOnly", force)]
    pub build_with_pending_changes_only: bool,

    #[property(name = "triggerBuildIfWatchedBuildChanges")]
    pub trigger_if_watched_build_changes: bool,

    #[property(name = "triggerBuildOnAllCompatibleAgents")]
    pub build_on_all_compatible_agents: bool,

    /// The build configuration whose builds are watched.
    #[property(name = "revisionRuleDependsOn")]
    pub revision_rule_source_build: BuildTypeId,

    #[property(name = "revisionRule")]
    pub revision_rule: Option<ArtifactDependencyRevision>,

    #[property(name = "revisionRuleBuildBranch")]
    pub revision_rule_build_branch: String,

    #[property(name = "enforceCleanCheckout")]
    pub enforce_clean_checkout: bool,

    #[property(name = "enforceCleanCheckoutForDependencies")]
    pub enforce_clean_checkout_for_dependencies: bool,
}

impl TriggerScheduleOptions {
    pub fn new() -> Self {
        Self {
            queue_optimization: true,
            promote_watched_build: true,
            build_with_pending_changes_only: true,
            revision_rule: Some(ArtifactDependencyRevision::LastFinished),
            revision_rule_build_branch: "<default>".to_owned(),
            ..Self::default()
        }
    }
}
