use strum::{AsRefStr, EnumString};

use crate::{
    entity::{EntityHeader, Variant},
    properties::{Properties, PropertyValue},
    step::{StepExecuteMode, step_type},
};

/// How the script is handed to the PowerShell process.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumString, PropertyValue,
)]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum PowershellExecution {
    /// Writes the script to a temporary `.ps1` file and executes it.
    #[default]
    #[strum(serialize = "PS1")]
    Ps1,

    /// Pipes the script to the standard input of the process.
    #[strum(serialize = "STDIN")]
    Stdin,
}

/// Where the script comes from.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumString, PropertyValue,
)]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum PowershellScriptMode {
    #[default]
    #[strum(serialize = "FILE")]
    File,

    #[strum(serialize = "CODE")]
    Code,
}

/// Runs a PowerShell script, either from a file or from inline code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct StepPowershell {
    pub header: EntityHeader,

    #[property(name = "jetbrains_powershell_execution")]
    pub execution: PowershellExecution,

    /// Passes `-NoProfile` to PowerShell. The server defaults to loading the
    /// profile when the property is missing, so `false` is always written.
    #[property(name = "jetbrains_powershell_noprofile", force)]
    pub no_profile: bool,

    #[property(name = "jetbrains_powershell_script_mode")]
    pub script_mode: PowershellScriptMode,

    #[property(name = "jetbrains_powershell_script_file")]
    pub script_file: String,

    #[property(name = "jetbrains_powershell_script_code")]
    pub code: String,

    #[property(name = "jetbrains_powershell_scriptArguments")]
    pub script_arguments: String,

    #[property(name = "jetbrains_powershell_additional_arguments")]
    pub additional_arguments: String,

    #[property(name = "teamcity.step.mode", force)]
    pub execute_mode: StepExecuteMode,
}

impl StepPowershell {
    /// Creates a step which executes the script file at `path` with the
    /// given `arguments`.
    pub fn script_file(
        name: impl Into<String>,
        path: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            header: EntityHeader::new(name),
            script_mode: PowershellScriptMode::File,
            script_file: path.into(),
            script_arguments: arguments.into(),
            ..Self::default()
        }
    }

    /// Creates a step which executes `code` inline.
    pub fn code(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            header: EntityHeader::new(name),
            script_mode: PowershellScriptMode::Code,
            code: code.into(),
            ..Self::default()
        }
    }
}

impl Variant for StepPowershell {
    const TYPE: &'static str = step_type::POWERSHELL;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
