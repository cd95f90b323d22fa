use std::path::PathBuf;

use anyhow::{bail, Result};
use confab_store::Store;

use crate::config;

pub fn run(data_dir: Option<PathBuf>, id: &str) -> Result<i32> {
    let store = Store::open(&config::data_dir(data_dir))?;
    let path = store.report_path(id);
    if !path.is_file() {
        bail!("no report for meeting {id} (expected {})", path.display());
    }
    print!("{}", std::fs::read_to_string(&path)?);
    Ok(0)
}
