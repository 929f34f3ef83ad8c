use teamcity_config::properties::{Properties, PropertyMapping};

#[derive(Debug, Default, PartialEq, Properties)]
struct Checkout {
    #[property(name = "enforceCleanCheckout")]
    clean: bool,
}

#[derive(Debug, Default, PartialEq, Properties)]
struct Build {
    #[property(name = "script.content")]
    script: String,
    #[property(flatten)]
    checkout: Checkout,
    retries: u32,
}

#[derive(Debug, Default, PartialEq, Properties)]
struct Named<T: PropertyMapping> {
    #[property(name = "step.name", force)]
    name: String,
    #[property(flatten)]
    inner: T,
}

fn main() {
    let step = Named {
        name: "Build".to_owned(),
        inner: Build {
            script: "make".to_owned(),
            checkout: Checkout { clean: true },
            retries: 0,
        },
    };

    let properties = step.to_properties();
    assert_eq!(
        properties.names().collect::<Vec<_>>(),
        ["step.name", "script.content", "enforceCleanCheckout"]
    );
    assert_eq!(Named::<Build>::from_properties(&properties).unwrap(), step);
    assert!(Named::<Build>::is_known_property("enforceCleanCheckout"));
    assert!(!Named::<Build>::ALL_FIELDS.has_duplicates());
}
