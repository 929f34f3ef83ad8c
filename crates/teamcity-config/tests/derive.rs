use teamcity_config::{
    collection::{decode_collection, encode_collection},
    entity::{Entity, EntityHeader, Variant},
    iter::TryFromIterator,
    properties::{
        BuildTypeId, Properties, PropertyError, PropertyField, PropertyMapping, PropertyValue,
    },
    registry::VariantRegistry,
};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr, strum::EnumString, PropertyValue,
)]
enum Verbosity {
    #[strum(serialize = "quiet")]
    Quiet,
    #[strum(serialize = "detailed")]
    Detailed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
struct Publish {
    #[property(name = "publish.enabled", force)]
    enabled: bool,
    #[property(name = "publish.target")]
    target: BuildTypeId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Properties)]
struct DotnetStep {
    header: EntityHeader,
    #[property(name = "command")]
    command: String,
    #[property(name = "verbosity")]
    verbosity: Option<Verbosity>,
    #[property(name = "retries")]
    retries: u16,
    #[property(flatten)]
    publish: Publish,
}

impl Variant for DotnetStep {
    const TYPE: &'static str = "dotnet.cli";

    fn header(&self) -> &EntityHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut EntityHeader {
        &mut self.header
    }
}

#[test]
fn derived_fields() {
    assert_eq!(
        DotnetStep::FIELDS
            .iter()
            .map(|PropertyField { name, .. }| *name)
            .collect::<Vec<_>>(),
        ["command", "verbosity", "retries"]
    );
    assert_eq!(
        Publish::FIELDS,
        &[
            PropertyField {
                name: "publish.enabled",
                force: true
            },
            PropertyField {
                name: "publish.target",
                force: false
            },
        ]
    );
    assert!(DotnetStep::is_known_property("publish.target"));
    assert!(!DotnetStep::is_known_property("header"));
}

#[test]
fn derived_roundtrip() {
    let step = DotnetStep {
        header: EntityHeader::default(),
        command: "build".to_owned(),
        verbosity: Some(Verbosity::Detailed),
        retries: 0,
        publish: Publish {
            enabled: false,
            target: BuildTypeId::new("Shop_Publish"),
        },
    };

    let properties = step.to_properties();
    assert_eq!(
        properties,
        Properties::try_from_iter([
            ("command", "build"),
            ("verbosity", "detailed"),
            ("publish.enabled", "false"),
            ("publish.target", "Shop_Publish"),
        ])
        .unwrap()
    );
    assert_eq!(DotnetStep::from_properties(&properties).unwrap(), step);
}

#[test]
fn derived_invalid_value() {
    let properties = Properties::try_from_iter([("retries", "-1")]).unwrap();

    let err = DotnetStep::from_properties(&properties).unwrap_err();
    assert!(matches!(
        err,
        PropertyError::InvalidValue { ref name, ref value, .. }
            if name == "retries" && value == "-1"
    ));
}

#[test]
fn custom_registry() {
    let registry = VariantRegistry::<DotnetStep>::new("step")
        .with_variant_of::<DotnetStep>()
        .unwrap();

    let steps = vec![DotnetStep {
        header: EntityHeader::new("Restore"),
        command: "restore".to_owned(),
        ..DotnetStep::default()
    }];
    let bytes = encode_collection("step", &steps).unwrap();

    let decoded = decode_collection(&bytes, "step", &registry).unwrap();
    assert_eq!(decoded, steps);
    assert_eq!(decoded[0].entity_type(), "dotnet.cli");
    assert_eq!(decoded[0].name(), "Restore");
}
