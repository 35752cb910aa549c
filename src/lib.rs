//! grayscrub - a prepress sanitizer for grayscale print artwork
//!
//! grayscrub loads an SVG into a layered scene graph, finds what would go
//! wrong on a grayscale press (filled open paths, stray points, hidden or
//! locked content, off-artboard objects, raster settings) and, in fix mode,
//! repairs it after asking.
//!
//! ```no_run
//! use grayscrub::{AutoPrompt, Mode, Options, sanitize_svg};
//!
//! let svg = std::fs::read_to_string("art.svg")?;
//! let options = Options { mode: Mode::Fix, ..Options::default() };
//! let (fixed, report) = sanitize_svg(&svg, &options, &mut AutoPrompt::accept_all())?;
//! print!("{}", report);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ast;
mod classify;
mod closure;
mod confirm;
mod document;
mod error;
mod export;
mod geometry;
mod import;
mod membership;
mod parse;
mod path;
mod report;
mod sanitize;
mod scene;
mod serialize;
mod settings;
mod transform;

pub use ast::*;
pub use classify::*;
pub use closure::*;
pub use confirm::*;
pub use document::*;
pub use error::*;
pub use export::*;
pub use geometry::*;
pub use import::*;
pub use membership::*;
pub use parse::*;
pub use path::{Subpath, format_coord, parse_subpaths, write_path_data};
pub use report::*;
pub use sanitize::*;
pub use scene::*;
pub use serialize::*;
pub use settings::*;
pub use transform::*;

/// Load a document from SVG text.
pub fn load(svg: &str) -> Result<Document, ScrubError> {
    Ok(import(parse_svg(svg)?))
}

/// Write a document back to SVG text.
pub fn save(doc: &Document, options: &Options) -> String {
    serialize(&export(doc, options.precision), options.pretty)
}

/// Sanitize SVG text. Returns the resulting SVG (unchanged content in report
/// mode) and the report.
pub fn sanitize_svg(
    svg: &str,
    options: &Options,
    prompt: &mut dyn Prompt,
) -> Result<(String, Report), ScrubError> {
    let mut doc = load(svg)?;
    let report = sanitize(&mut doc, options, prompt);
    Ok((save(&doc, options), report))
}
