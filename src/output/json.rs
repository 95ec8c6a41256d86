use crate::model::SecurityScanResult;
use anyhow::Result;

pub fn print_json(result: &SecurityScanResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{}", json);
    Ok(())
}
