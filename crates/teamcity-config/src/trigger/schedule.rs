use strum::{AsRefStr, EnumString};

use crate::{
    entity::{EntityHeader, Variant},
    properties::{Properties, PropertyValue},
    trigger::{TriggerScheduleOptions, trigger_type},
};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumString, PropertyValue,
)]
#[strum(serialize_all = "lowercase")]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum SchedulingPolicy {
    #[default]
    Daily,
    Weekly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, EnumString, PropertyValue)]
#[property_value(path_overrides(properties = "crate::properties"))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

/// Starts builds at a fixed time of the day or of the week.
#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
#[properties(path_overrides(properties = "crate::properties"))]
pub struct TriggerSchedule {
    pub header: EntityHeader,

    #[property(name = "schedulingPolicy")]
    pub policy: SchedulingPolicy,

    /// Midnight is a valid time, so hour and minute are always written.
    #[property(name = "hour", force)]
    pub hour: u8,

    #[property(name = "minute", force)]
    pub minute: u8,

    /// Only used by the weekly policy.
    #[property(name = "dayOfWeek")]
    pub weekday: Option<Weekday>,

    /// A time zone ID like `Europe/Berlin`, or `SERVER` for the time zone of
    /// the server.
    #[property(name = "timezone")]
    pub timezone: String,

    #[property(name = "triggerRules")]
    pub rules: String,

    #[property(name = "branchFilter")]
    pub branch_filter: String,

    #[property(flatten)]
    pub options: TriggerScheduleOptions,
}

impl TriggerSchedule {
    pub fn daily(hour: u8, minute: u8, timezone: impl Into<String>) -> Self {
        Self {
            policy: SchedulingPolicy::Daily,
            hour,
            minute,
            timezone: timezone.into(),
            options: TriggerScheduleOptions::new(),
            ..Self::default()
        }
    }

    pub fn weekly(weekday: Weekday, hour: u8, minute: u8, timezone: impl Into<String>) -> Self {
        Self {
            policy: SchedulingPolicy::Weekly,
            weekday: Some(weekday),
            ..Self::daily(hour, minute, timezone)
        }
    }
}

impl Variant for TriggerSchedule {
    const TYPE: &'static str = trigger_type::SCHEDULE;

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}
