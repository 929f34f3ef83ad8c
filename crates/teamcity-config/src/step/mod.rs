//! Build steps of build configurations and templates.
//!
//! Steps are polymorphic entities: the `"type"` of a step selects its
//! variant, and the settings of every variant live in the property bag.
//!
//! ```
//! use teamcity_config::{
//!     entity::Entity,
//!     step::{Step, decode_steps, encode_steps, StepCommandLine},
//! };
//!
//! let steps = vec![Step::from(StepCommandLine::script("Build", "make"))];
//! let bytes = encode_steps(&steps)?;
//!
//! let decoded = decode_steps(&bytes)?;
//! assert_eq!(decoded[0].entity_type(), "simpleRunner");
//! assert_eq!(decoded, steps);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use std::sync::LazyLock;

use strum::{AsRefStr, EnumString};

use crate::{
    collection::{decode_collection, encode_collection},
    entity::{encode_entity, entity_enum},
    error::{DecodeError, EncodeError},
    properties::PropertyValue,
    registry::{RegistryError, VariantRegistry},
};

mod command_line;
#[cfg(feature = "octopus")]
mod octopus;
mod powershell;

pub use command_line::*;
#[cfg(feature = "octopus")]
pub use octopus::*;
pub use powershell::*;

/// The key listing the items of a step collection.
pub const STEP_ITEM_KEY: &str = "step";

/// Discriminators of the common step types.
pub mod step_type {
    pub const POWERSHELL: &str = "jetbrains_powershell";

    /// The .NET CLI runner. Steps of this type are not supported yet and fail
    /// to decode.
    pub const DOTNET_CLI: &str = "dotnet.cli";

    pub const COMMAND_LINE: &str = "simpleRunner";
    pub const OCTOPUS_PUSH_PACKAGE: &str = "octopus.push.package";
    pub const OCTOPUS_CREATE_RELEASE: &str = "octopus.create.release";
}

/// Controls whether a step runs depending on the outcome of the steps
/// before it.
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
#[strum(serialize_all = "snake_case")]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum StepExecuteMode {
    /// Runs only if all previous steps finished successfully.
    #[default]
    Default,

    /// Runs only if the whole build is successful so far.
    ExecuteIfSuccess,

    /// Runs even if previous steps failed.
    ExecuteIfFailed,

    /// Runs even if the build was asked to stop.
    ExecuteAlways,
}

entity_enum! {
    /// A build step of any supported type.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Step {
        CommandLine(StepCommandLine),
        Powershell(StepPowershell),
        #[cfg(feature = "octopus")]
        OctopusPushPackage(StepOctopusPushPackage),
        #[cfg(feature = "octopus")]
        OctopusCreateRelease(StepOctopusCreateRelease),
    }
}

static STEP_REGISTRY: LazyLock<VariantRegistry<Step>> = LazyLock::new(|| {
    default_step_registry().expect("built-in step types must have unique discriminators")
});

/// Builds a registry of all step types enabled by the crate features.
///
/// Use this as the starting point for registries with additional variants,
/// [`step_registry`] returns a shared instance.
pub fn default_step_registry() -> Result<VariantRegistry<Step>, RegistryError> {
    let registry = VariantRegistry::new(STEP_ITEM_KEY)
        .with_variant_of::<StepPowershell>()?
        .with_variant_of::<StepCommandLine>()?;

    #[cfg(feature = "octopus")]
    let registry = registry
        .with_variant_of::<StepOctopusPushPackage>()?
        .with_variant_of::<StepOctopusCreateRelease>()?;

    Ok(registry)
}

/// The shared registry of all step types enabled by the crate features.
pub fn step_registry() -> &'static VariantRegistry<Step> {
    &STEP_REGISTRY
}

/// Decodes a single step envelope.
pub fn decode_step(bytes: &[u8]) -> Result<Step, DecodeError> {
    step_registry().decode(bytes)
}

/// Decodes a `{"count": n, "step": [...]}` collection.
pub fn decode_steps(bytes: &[u8]) -> Result<Vec<Step>, DecodeError> {
    decode_collection(bytes, STEP_ITEM_KEY, step_registry())
}

pub fn encode_step(step: &Step) -> Result<Vec<u8>, EncodeError> {
    encode_entity(step)
}

pub fn encode_steps(steps: &[Step]) -> Result<Vec<u8>, EncodeError> {
    encode_collection(STEP_ITEM_KEY, steps)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rstest::rstest;
    use serde_json::{Value, json};

    use crate::entity::Entity;

    use super::*;

    #[rstest]
    #[case(step_type::COMMAND_LINE)]
    #[case(step_type::POWERSHELL)]
    fn dispatch_by_type(#[case] tag: &str) {
        let input = json!({"id": "RUNNER_1", "name": "step", "type": tag}).to_string();

        let step = decode_step(input.as_bytes()).unwrap();
        assert_eq!(step.entity_type(), tag);
        assert_eq!(step.id(), "RUNNER_1");
        assert_eq!(step.name(), "step");
    }

    #[rstest]
    #[case("unknown.type")]
    #[case(step_type::DOTNET_CLI)]
    #[case("")]
    fn unsupported_types(#[case] tag: &str) {
        let input = json!({"id": "RUNNER_9", "type": tag}).to_string();

        let err = decode_step(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnsupportedDiscriminator { kind: "step", ref discriminator, ref id }
                if discriminator == tag && id == "RUNNER_9"
        ));
    }

    #[cfg(feature = "octopus")]
    #[test]
    fn dispatch_octopus_types() {
        let push = decode_step(br#"{"id": "RUNNER_2", "type": "octopus.push.package"}"#).unwrap();
        assert!(matches!(push, Step::OctopusPushPackage(_)));

        let release =
            decode_step(br#"{"id": "RUNNER_3", "type": "octopus.create.release"}"#).unwrap();
        assert!(matches!(release, Step::OctopusCreateRelease(_)));
    }

    #[cfg(not(feature = "octopus"))]
    #[test]
    fn octopus_types_need_feature() {
        let input = br#"{"id": "RUNNER_2", "type": "octopus.push.package"}"#;

        let err = decode_step(input).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedDiscriminator { .. }));
    }

    #[test]
    fn decode_steps_preserves_order() {
        let input = indoc! {r#"
            {
              "count": 2,
              "step": [
                {
                  "id": "RUNNER_1",
                  "name": "Compile",
                  "type": "simpleRunner",
                  "properties": {
                    "count": 2,
                    "property": [
                      { "name": "script.content", "value": "make" },
                      { "name": "use.custom.script", "value": "true" }
                    ]
                  }
                },
                {
                  "id": "RUNNER_2",
                  "name": "Package",
                  "type": "jetbrains_powershell",
                  "inherited": true,
                  "properties": {
                    "count": 2,
                    "property": [
                      { "name": "jetbrains_powershell_script_mode", "value": "CODE" },
                      { "name": "jetbrains_powershell_script_code", "value": "./pack.ps1" }
                    ]
                  }
                }
              ]
            }
        "#};

        let steps = decode_steps(input.as_bytes()).unwrap();
        assert_eq!(steps.len(), 2);

        let Step::CommandLine(compile) = &steps[0] else {
            panic!("expected a command line step, got {:?}", steps[0]);
        };
        assert_eq!(compile.id(), "RUNNER_1");
        assert_eq!(compile.script_content, "make");

        let Step::Powershell(package) = &steps[1] else {
            panic!("expected a PowerShell step, got {:?}", steps[1]);
        };
        assert_eq!(package.id(), "RUNNER_2");
        assert!(package.is_inherited());
        assert_eq!(package.script_mode, PowershellScriptMode::Code);
        assert_eq!(package.code, "./pack.ps1");
    }

    #[test]
    fn decode_steps_fails_on_unsupported_item() {
        let input = indoc! {r#"
            {
              "count": 2,
              "step": [
                { "id": "RUNNER_1", "type": "simpleRunner" },
                { "id": "RUNNER_2", "type": "dotnet.cli" }
              ]
            }
        "#};

        let err = decode_steps(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DecodeItem { index: 1, ref id, .. } if id == "RUNNER_2"
        ));
    }

    #[test]
    fn encode_step_envelope() {
        let step = Step::from(StepCommandLine::script("Build", "make"));

        let encoded: Value = serde_json::from_slice(&encode_step(&step).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "disabled": false,
                "name": "Build",
                "properties": {
                    "count": 3,
                    "property": [
                        {"name": "script.content", "value": "make"},
                        {"name": "use.custom.script", "value": "true"},
                        {"name": "teamcity.step.mode", "value": "default"},
                    ],
                },
                "type": "simpleRunner",
            })
        );
    }

    #[test]
    fn encode_then_decode_steps() {
        let mut test = StepCommandLine::executable("Test", "cargo", "test");
        test.header.disabled = true;

        #[allow(unused_mut)]
        let mut steps = vec![
            Step::from(StepPowershell::code("Prepare", "Write-Host ready")),
            Step::from(test),
        ];
        #[cfg(feature = "octopus")]
        steps.extend([
            Step::from(StepOctopusPushPackage {
                header: crate::entity::EntityHeader::new("Push"),
                host: "https://deploy.example.com".to_owned(),
                package_paths: "out/*.nupkg".to_owned(),
                force_push: true,
                execute_mode: StepExecuteMode::ExecuteIfSuccess,
                ..StepOctopusPushPackage::default()
            }),
            Step::from(StepOctopusCreateRelease {
                header: crate::entity::EntityHeader::new("Release"),
                project_name: "Shop".to_owned(),
                deploy_to: "Staging".to_owned(),
                wait_for_deployments: true,
                execute_mode: StepExecuteMode::ExecuteAlways,
                ..StepOctopusCreateRelease::default()
            }),
        ]);

        let decoded = decode_steps(&encode_steps(&steps).unwrap()).unwrap();
        assert_eq!(decoded, steps);
        assert!(decoded[1].is_disabled());

        #[cfg(feature = "octopus")]
        {
            let [.., Step::OctopusPushPackage(push), Step::OctopusCreateRelease(release)] =
                decoded.as_slice()
            else {
                panic!("unexpected steps {decoded:?}");
            };
            assert!(push.force_push);
            assert_eq!(push.execute_mode, StepExecuteMode::ExecuteIfSuccess);
            assert!(release.wait_for_deployments);
            assert_eq!(release.execute_mode, StepExecuteMode::ExecuteAlways);
        }
    }

    #[test]
    fn execute_mode_values() {
        assert_eq!(
            StepExecuteMode::ExecuteIfSuccess.to_property_value(),
            "execute_if_success"
        );
        assert_eq!(
            StepExecuteMode::from_property_value("execute_always").unwrap(),
            StepExecuteMode::ExecuteAlways
        );
        assert_eq!(StepExecuteMode::default().to_string(), "default");
    }

    #[test]
    fn registry_tags() {
        let tags = step_registry().tags().collect::<Vec<_>>();

        assert!(tags.contains(&step_type::COMMAND_LINE));
        assert!(tags.contains(&step_type::POWERSHELL));
        assert!(!tags.contains(&step_type::DOTNET_CLI));
        assert_eq!(
            tags.contains(&step_type::OCTOPUS_PUSH_PACKAGE),
            cfg!(feature = "octopus")
        );
    }
}
