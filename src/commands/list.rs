use std::path::Path;

use anyhow::Result;

use gantry::application::ListSource;
use gantry::domain::services::RemoteInventory;
use gantry::presentation::factory;
use gantry::presentation::output::{listing_json, render_listing};

pub fn run(root: &Path, remote: bool, json: bool) -> Result<i32> {
    let project = factory::load_project(root)?;
    super::print_config_warnings(&project);

    let cloud = factory::connect(&project)?;
    let inventory = RemoteInventory::new(&cloud, &cloud);
    let lister = factory::create_list_use_case(&project, &inventory);

    let (source, label) = if remote {
        (ListSource::Remote, "remote")
    } else {
        (ListSource::Local, "local")
    };
    let listed = lister.execute(source)?;

    if json {
        println!("{}", listing_json(label, &listed));
    } else {
        print!("{}", render_listing(&listed));
    }
    Ok(0)
}
