//! Build triggers of build configurations and templates.
//!
//! Triggers use the same envelope and property bag representation as
//! [build steps](crate::step), so they are decoded through the same
//! registry and collection machinery.
use std::sync::LazyLock;

use crate::{
    collection::{decode_collection, encode_collection},
    entity::{encode_entity, entity_enum},
    error::{DecodeError, EncodeError},
    registry::{RegistryError, VariantRegistry},
};

mod build_finish;
mod options;
mod schedule;
mod vcs;

pub use build_finish::*;
pub use options::*;
pub use schedule::*;
pub use vcs::*;

/// The key listing the items of a trigger collection.
pub const TRIGGER_ITEM_KEY: &str = "trigger";

/// Discriminators of the supported trigger types.
pub mod trigger_type {
    pub const VCS: &str = "vcsTrigger";
    pub const SCHEDULE: &str = "schedulingTrigger";
    pub const BUILD_FINISH: &str = "buildDependencyTrigger";
}

entity_enum! {
    /// A build trigger of any supported type.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Trigger {
        Vcs(TriggerVcs),
        Schedule(TriggerSchedule),
        BuildFinish(TriggerBuildFinish),
    }
}

static TRIGGER_REGISTRY: LazyLock<VariantRegistry<Trigger>> = LazyLock::new(|| {
    default_trigger_registry().expect("built-in trigger types must have unique discriminators")
});

/// Builds a registry of all trigger types, see
/// [`default_step_registry`](crate::step::default_step_registry).
pub fn default_trigger_registry() -> Result<VariantRegistry<Trigger>, RegistryError> {
    VariantRegistry::new(TRIGGER_ITEM_KEY)
        .with_variant_of::<TriggerVcs>()?
        .with_variant_of::<TriggerSchedule>()?
        .with_variant_of::<TriggerBuildFinish>()
}

pub fn trigger_registry() -> &'static VariantRegistry<Trigger> {
    &TRIGGER_REGISTRY
}

pub fn decode_trigger(bytes: &[u8]) -> Result<Trigger, DecodeError> {
    trigger_registry().decode(bytes)
}

/// Decodes a `{"count": n, "trigger": [...]}` collection.
pub fn decode_triggers(bytes: &[u8]) -> Result<Vec<Trigger>, DecodeError> {
    decode_collection(bytes, TRIGGER_ITEM_KEY, trigger_registry())
}

pub fn encode_trigger(trigger: &Trigger) -> Result<Vec<u8>, EncodeError> {
    encode_entity(trigger)
}

pub fn encode_triggers(triggers: &[Trigger]) -> Result<Vec<u8>, EncodeError> {
    encode_collection(TRIGGER_ITEM_KEY, triggers)
}
