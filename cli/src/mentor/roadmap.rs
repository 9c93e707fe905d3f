//! # Career Roadmap Knowledge Base
//!
//! File: cli/src/mentor/roadmap.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The static table of career roadmaps and the substring lookup over it.
//!
//! Lookup is case-insensitive and purely positional: entries are tried in
//! declaration order and the first whose key occurs anywhere in the message
//! wins. There is no scoring, so "seo and web developer" selects
//! `web developer` because it is declared before `seo`.
//!

/// A career key and its skill roadmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoadmapEntry {
    /// Lowercase canonical career name, matched as a substring.
    pub career_key: &'static str,
    /// Numbered skill list, one step per line.
    pub roadmap_text: &'static str,
}

impl RoadmapEntry {
    /// Career name in title case, e.g. `Web Developer`.
    pub fn title(&self) -> String {
        title_case(self.career_key)
    }

    /// Number of steps in the roadmap.
    pub fn step_count(&self) -> usize {
        self.roadmap_text.lines().count()
    }

    /// The full assistant reply for this career.
    pub fn format_reply(&self) -> String {
        format!(
            "🛠️ Skill roadmap for **{}**:\n{}",
            self.title(),
            self.roadmap_text
        )
    }
}

/// The knowledge base. Order is significant: it is the match priority.
pub static ROADMAPS: [RoadmapEntry; 5] = [
    RoadmapEntry {
        career_key: "data scientist",
        roadmap_text: "1. Python\n2. Statistics\n3. Machine Learning\n4. SQL\n5. Real-world projects",
    },
    RoadmapEntry {
        career_key: "web developer",
        roadmap_text: "1. HTML/CSS\n2. JavaScript\n3. React or Vue\n4. Backend (Node.js/Django)\n5. Deploy projects",
    },
    RoadmapEntry {
        career_key: "ai engineer",
        roadmap_text: "1. Python\n2. Deep Learning\n3. NLP\n4. TensorFlow\n5. Model Deployment",
    },
    RoadmapEntry {
        career_key: "graphic designer",
        roadmap_text: "1. Adobe Tools\n2. Color Theory\n3. Typography\n4. UI/UX\n5. Portfolio",
    },
    RoadmapEntry {
        career_key: "seo",
        roadmap_text: "1. Keyword Research\n2. On-Page SEO\n3. Link Building\n4. Analytics Tools (GA, GSC)\n5. Content Optimization",
    },
];

/// # Match Roadmap (`match_roadmap`)
///
/// Lowercases `text` and returns the first entry of `entries` whose key is a
/// substring of it, or `None`.
pub fn match_roadmap<'a>(entries: &'a [RoadmapEntry], text: &str) -> Option<&'a RoadmapEntry> {
    let normalized = text.to_lowercase();
    entries
        .iter()
        .find(|entry| normalized.contains(entry.career_key))
}

/// Looks up an entry by exact key, ignoring case and surrounding whitespace.
pub fn find_by_key<'a>(entries: &'a [RoadmapEntry], key: &str) -> Option<&'a RoadmapEntry> {
    let key = key.trim().to_lowercase();
    entries.iter().find(|entry| entry.career_key == key)
}

/// Upper-cases every letter that starts a word and lower-cases the rest.
/// A word starts at the beginning of the string or after any non-letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
