//! Artifact kinds and the text rules applied around them.

use std::fmt;

/// Directory used when an idea sanitizes to nothing.
pub const UNTITLED_DIR: &str = "untitled_game";

/// One of the files generated for every idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Story,
    Characters,
    Items,
    Npcs,
}

impl ArtifactKind {
    /// All kinds, in generation order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Story,
        ArtifactKind::Characters,
        ArtifactKind::Items,
        ArtifactKind::Npcs,
    ];

    pub fn stem(&self) -> &'static str {
        match self {
            ArtifactKind::Story => "story",
            ArtifactKind::Characters => "characters",
            ArtifactKind::Items => "items",
            ArtifactKind::Npcs => "npcs",
        }
    }

    /// File name shared by the structure template and the generated output.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.stem())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Derive the output directory name for an idea.
///
/// Lowercases, turns each run of whitespace into one underscore, then drops
/// everything outside `[a-z0-9_]`.
pub fn output_dir_name(idea: &str) -> String {
    let lowered = idea.to_lowercase();

    let mut collapsed = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push('_');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    let name: String = collapsed
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect();

    if name.is_empty() {
        UNTITLED_DIR.to_string()
    } else {
        name
    }
}

/// Remove every ```` ```json ```` and ```` ``` ```` marker and trim.
///
/// Matching is case-sensitive and leftmost-first, preferring the longer
/// marker at each position. The result is not checked for being JSON.
pub fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 3..];
        if let Some(after) = rest.strip_prefix("json") {
            rest = after;
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}
