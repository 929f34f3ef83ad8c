#![allow(dead_code)]

use teamcity_config::properties::Properties;

#[derive(Properties)]
struct VcsTrigger {
    #[property(name = "branchFilter")]
    branch_filter: String,
    #[property(name = "branchFilter")]
    branches: String,
}

fn main() {}
