//! # Roadmap Listing
//!
//! File: cli/src/commands/roadmaps.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `career-mentor roadmaps`, which shows the built-in knowledge base.
//!
//! ```text
//! Available Roadmaps:
//!
//! Career            | Steps
//! ------------------+------
//! Data Scientist    | 5
//! Web Developer     | 5
//! ...
//! ```
//!
//! With `--career <name>` it prints the exact reply the mentor gives for that career.
//!
use crate::core::error::Result;
use crate::mentor::roadmap::{self, RoadmapEntry, ROADMAPS};
use clap::Parser;
use std::io::{self, Write};
use tracing::info;

/// # Roadmaps Command Arguments (`RoadmapsArgs`)
#[derive(Parser, Debug)]
pub struct RoadmapsArgs {
    /// Show the full roadmap for one career (e.g. "web developer").
    #[arg(long)]
    pub career: Option<String>,
}

/// # Handle Roadmaps Command (`handle_roadmaps`)
///
/// ## Errors
///
/// Fails if `--career` names a career that is not in the knowledge base.
pub async fn handle_roadmaps(args: RoadmapsArgs) -> Result<()> {
    info!("Handling roadmaps command with args: {:?}", args);
    let mut out = io::stdout().lock();
    match args.career {
        Some(career) => write_roadmap(&mut out, &ROADMAPS, &career),
        None => write_table(&mut out, &ROADMAPS),
    }
}

fn write_roadmap<W: Write>(out: &mut W, entries: &[RoadmapEntry], career: &str) -> Result<()> {
    let Some(entry) = roadmap::find_by_key(entries, career) else {
        let known: Vec<String> = entries.iter().map(RoadmapEntry::title).collect();
        anyhow::bail!(
            "No roadmap for '{}'. Known careers: {}",
            career.trim(),
            known.join(", ")
        );
    };
    writeln!(out, "{}", entry.format_reply())?;
    Ok(())
}

fn write_table<W: Write>(out: &mut W, entries: &[RoadmapEntry]) -> Result<()> {
    let titles: Vec<String> = entries.iter().map(RoadmapEntry::title).collect();
    let width = titles
        .iter()
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(0)
        .max("Career".len());

    writeln!(out, "Available Roadmaps:\n")?;
    writeln!(out, "{:<width$} | Steps", "Career")?;
    writeln!(out, "{}-+------", "-".repeat(width))?;
    for (title, entry) in titles.iter().zip(entries) {
        writeln!(out, "{:<width$} | {}", title, entry.step_count())?;
    }
    writeln!(out, "\nFound {} roadmap(s).", entries.len())?;
    writeln!(
        out,
        "Use 'career-mentor roadmaps --career <Name>' to see one in full."
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_careers_in_order() {
        let mut out = Vec::new();
        write_table(&mut out, &ROADMAPS).unwrap();
        let text = String::from_utf8(out).unwrap();

        let data = text.find("Data Scientist").unwrap();
        let seo = text.find("Seo").unwrap();
        assert!(data < seo);
        assert!(text.contains("Graphic Designer | 5"));
        assert!(text.contains("Found 5 roadmap(s)."));
    }

    #[test]
    fn test_single_roadmap() {
        let mut out = Vec::new();
        write_roadmap(&mut out, &ROADMAPS, "Graphic Designer").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "🛠️ Skill roadmap for **Graphic Designer**:\n1. Adobe Tools\n2. Color Theory\n3. Typography\n4. UI/UX\n5. Portfolio\n"
        );
    }

    #[test]
    fn test_unknown_career() {
        let mut out = Vec::new();
        let err = write_roadmap(&mut out, &ROADMAPS, "astronaut").unwrap_err();
        assert!(err.to_string().contains("No roadmap for 'astronaut'"));
        assert!(out.is_empty());
    }
}
