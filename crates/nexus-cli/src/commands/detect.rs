use std::path::Path;

use miette::Result;

use nexus_core::structure;

pub fn exec(project_dir: &Path) -> Result<()> {
    let layout = structure::detect(project_dir)?;
    println!("{layout}");
    Ok(())
}
