use crate::{
    entity::{EntityHeader, Variant},
    properties::{BuildTypeId, Properties},
    trigger::trigger_type,
};

/// Starts a build when a build of another build configuration finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct TriggerBuildFinish {
    pub header: EntityHeader,

    /// The watched build configuration.
    #[property(name = "dependsOn", force)]
    pub depends_on: BuildTypeId,

    #[property(name = "afterSuccessfulBuildOnly")]
    pub after_successful_build_only: bool,

    #[property(name = "branchFilter")]
    pub branch_filter: String,
}

impl TriggerBuildFinish {
    pub fn new(depends_on: impl Into<BuildTypeId>, after_successful_build_only: bool) -> Self {
        Self {
            depends_on: depends_on.into(),
            after_successful_build_only,
            ..Self::default()
        }
    }
}

impl Variant for TriggerBuildFinish {
    const TYPE: &'static str = trigger_type::BUILD_FINISH;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
