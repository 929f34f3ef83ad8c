//! Build steps of the Octopus Deploy integration plugin.
use crate::{
    entity::{EntityHeader, Variant},
    properties::Properties,
    step::{StepExecuteMode, step_type},
};

/// Pushes packages to the built-in package repository of an Octopus Deploy
/// server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct StepOctopusPushPackage {
    pub header: EntityHeader,

    #[property(name = "octopus_host")]
    pub host: String,

    /// The server never returns secure values, so decoded steps carry an
    /// empty API key.
    #[property(name = "secure:octopus_apikey")]
    pub api_key: String,

    #[property(name = "octopus_space_name")]
    pub space_name: String,

    /// Newline separated list of package paths, wildcards are supported.
    #[property(name = "octopus_packagepaths")]
    pub package_paths: String,

    /// Overwrites packages which already exist in the repository.
    #[property(name = "octopus_forcepush")]
    pub force_push: bool,

    #[property(name = "octopus_publishartifacts")]
    pub publish_artifacts: bool,

    #[property(name = "teamcity.step.mode", force)]
    pub execute_mode: StepExecuteMode,
}

impl Variant for StepOctopusPushPackage {
    const TYPE: &'static str = step_type::OCTOPUS_PUSH_PACKAGE;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}

/// Creates a release in Octopus Deploy and optionally deploys it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct StepOctopusCreateRelease {
    pub header: EntityHeader,

    #[property(name = "octopus_host")]
    pub host: String,

    #[property(name = "secure:octopus_apikey")]
    pub api_key: String,

    #[property(name = "octopus_space_name")]
    pub space_name: String,

    #[property(name = "octopus_project_name")]
    pub project_name: String,

    #[property(name = "octopus_releasenumber")]
    pub release_number: String,

    #[property(name = "octopus_channel_name")]
    pub channel_name: String,

    /// Comma separated list of environments to deploy the release to.
    #[property(name = "octopus_deployto")]
    pub deploy_to: String,

    #[property(name = "octopus_waitfordeployments")]
    pub wait_for_deployments: bool,

    #[property(name = "octopus_additionalcommandlinearguments")]
    pub additional_arguments: String,

    #[property(name = "teamcity.step.mode", force)]
    pub execute_mode: StepExecuteMode,
}

impl Variant for StepOctopusCreateRelease {
    const TYPE: &'static str = step_type::OCTOPUS_CREATE_RELEASE;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
