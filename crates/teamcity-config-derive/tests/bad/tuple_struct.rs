#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Properties)]
struct Settings(String, bool);

fn main() {}
