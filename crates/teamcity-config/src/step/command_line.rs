use crate::{
    entity::{EntityHeader, Variant},
    properties::Properties,
    step::{StepExecuteMode, step_type},
};

/// Runs a custom script or an executable with parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct StepCommandLine {
    pub header: EntityHeader,

    /// The script body, only used if `use_custom_script` is set.
    #[property(name = "script.content")]
    pub script_content: String,

    #[property(name = "use.custom.script")]
    pub use_custom_script: bool,

    /// The path of the executable, only used if `use_custom_script` is not
    /// set.
    #[property(name = "command.executable")]
    pub executable: String,

    #[property(name = "command.parameters")]
    pub parameters: String,

    #[property(name = "teamcity.step.mode", force)]
    pub execute_mode: StepExecuteMode,
}

impl StepCommandLine {
    /// Creates a step which runs `script` as a custom script.
    pub fn script(name: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            header: EntityHeader::new(name),
            script_content: script.into(),
            use_custom_script: true,
            ..Self::default()
        }
    }

    /// Creates a step which runs `executable` with the given `parameters`.
    pub fn executable(
        name: impl Into<String>,
        executable: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self {
            header: EntityHeader::new(name),
            executable: executable.into(),
            parameters: parameters.into(),
            ..Self::default()
        }
    }
}

impl Variant for StepCommandLine {
    const TYPE: &'static str = step_type::COMMAND_LINE;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
