//! Prompt text sent to the model for each artifact.

use crate::artifact::ArtifactKind;

/// Instruction appended to every prompt. Generated JSON relies on this
/// convention, so the wording is fixed.
pub const ABILITY_STATS_RULE: &str =
    "When an ability has no stats, the value for 'ability_stats' should be [-1].";

/// Separator between earlier ideas in the history sentence.
pub const HISTORY_SEPARATOR: &str = ", ";

/// Build the prompt for one artifact.
///
/// History is included in full; nothing is truncated.
pub fn build(idea: &str, history: &[String], kind: ArtifactKind, structure: &str) -> String {
    let mut sentences = Vec::with_capacity(3);

    if !history.is_empty() {
        sentences.push(format!(
            "This is the history of the game ideas so far: {}.",
            history.join(HISTORY_SEPARATOR)
        ));
    }

    sentences.push(format!(
        "Based on the game idea \"{idea}\", generate a JSON for {} with the following structure: {structure}.",
        kind.file_name()
    ));
    sentences.push(ABILITY_STATS_RULE.to_string());

    sentences.join(" ")
}
