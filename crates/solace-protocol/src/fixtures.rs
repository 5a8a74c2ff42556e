//! Test-fixture extraction.
//!
//! Cuts small fixture documents out of full staging files so parser changes
//! can be validated against a handful of practices instead of the whole
//! library. Fixtures preserve the source's marker structure, so they parse
//! with the same code paths as the real thing.

use crate::sections;

/// Default number of practices per fixture.
pub const DEFAULT_FIXTURE_COUNT: usize = 5;

/// First `count` chunks of the first file section of a combined research
/// export, with its source header preserved.
#[must_use]
pub fn research_fixture(content: &str, count: usize) -> Option<String> {
    let segment = sections::split_on_file_delimiters(content)
        .into_iter()
        .find(|segment| {
            segment
                .lines()
                .any(|line| sections::header_value(line, "SOURCE FILE").is_some())
        })?;

    let mut out = String::new();
    let mut markers_seen = 0usize;
    for line in segment.lines() {
        let is_marker = ["PRACTICE ", "TOOL ", "AVATAR ", "EMERGENCY TOOL "]
            .iter()
            .any(|prefix| line.starts_with(prefix) && line.contains(':'));
        if is_marker {
            markers_seen += 1;
            if markers_seen > count {
                break;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    Some(out)
}

/// The first pattern block (`## N. ...` through the next `##` heading) of a
/// rewiring matrix file, covering all of its temperament variants.
#[must_use]
pub fn rewiring_fixture(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.lines().collect();
    let line_offsets = sections::build_line_offsets(content);

    let start = lines
        .iter()
        .position(|line| sections::atx_level(line) == Some(2))?;
    let end = lines
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, line)| sections::atx_level(line) == Some(2))
        .map_or(lines.len(), |(i, _)| i);

    let block = sections::slice_lines(content, &line_offsets, start, end);
    Some(format!("# Rewiring Matrix - Test Fixture\n\n{}\n", block.trim()))
}

/// The first `count` practices of a daily practice library, under their
/// original category headers.
#[must_use]
pub fn deductible_fixture(content: &str, count: usize) -> Option<String> {
    let mut out = String::from("## Daily Practice Library - Test Fixture\n\n");
    let mut practices_seen = 0usize;
    let mut wrote_anything = false;

    for line in content.lines() {
        if sections::atx_level(line) == Some(4) && line.contains("**") {
            practices_seen += 1;
            if practices_seen > count {
                break;
            }
        }
        if sections::atx_level(line) == Some(3) || practices_seen > 0 {
            out.push_str(line);
            out.push('\n');
            wrote_anything = true;
        }
    }

    wrote_anything.then_some(out)
}
