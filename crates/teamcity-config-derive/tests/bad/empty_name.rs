#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Properties)]
struct Script {
    #[property(name = "")]
    script: String,
}

fn main() {}
