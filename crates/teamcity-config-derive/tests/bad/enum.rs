#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Properties)]
enum Trigger {
    Vcs,
    Schedule,
}

fn main() {}
