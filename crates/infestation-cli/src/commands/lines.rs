use infestation_core::config::ExtractionConfig;
use infestation_core::error::InfestationError;
use infestation_core::ocr::Document;
use infestation_core::parsing::classify::render_page;
use std::path::Path;
use tracing::debug;

pub fn run(input_file: &Path, stat_only: bool, config: &ExtractionConfig) -> Result<(), InfestationError> {
    let document = Document::load(input_file)?;
    debug!(pages = document.pages.len(), stat_only, "rendering lines");

    for (i, page) in document.pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("--- Page {} ---", page.number);
        for line in render_page(page, config, stat_only) {
            println!("{line}");
        }
    }

    Ok(())
}
