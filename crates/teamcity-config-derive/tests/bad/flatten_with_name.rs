#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Default, Properties)]
struct Checkout {
    #[property(name = "enforceCleanCheckout")]
    clean: bool,
}

#[derive(Properties)]
struct Build {
    #[property(name = "checkout", flatten)]
    checkout: Checkout,
}

fn main() {}
