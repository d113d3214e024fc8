use infestation_core::error::InfestationError;
use serde_json::to_string_pretty;
use std::io::Write;
use std::path::Path;

pub fn print<T: serde::Serialize>(value: &T) -> Result<(), InfestationError> {
    let json = to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

pub fn write<T: serde::Serialize>(value: &T, path: &Path) -> Result<(), InfestationError> {
    std::fs::write(path, to_string_pretty(value)?)?;
    Ok(())
}

pub fn to_writer<T: serde::Serialize, W: Write>(value: &T, mut writer: W) -> Result<(), InfestationError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}
