#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Properties)]
struct Checkout {
    #[property(force)]
    clean: bool,
}

fn main() {}
