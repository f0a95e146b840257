//! Tests for generating a full set of artifacts for one idea.
//!
//! All tests run against `MockCompletion`; no network access is needed.

use ijismith_core::{
    ArtifactGenerator, ArtifactKind, MockCompletion, Orchestrator, Outcome, Preference,
    PreferenceStore, SharedBuffer,
};
use std::path::Path;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// A data directory holding all four templates and an empty output root.
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::create_dir_all(dir.path().join("out")).unwrap();
        for kind in ArtifactKind::ALL {
            std::fs::write(
                data.join(kind.file_name()),
                format!("{{\"{}\": []}}", kind.stem()),
            )
            .unwrap();
        }
        Self { dir }
    }

    fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    fn output_root(&self) -> std::path::PathBuf {
        self.dir.path().join("out")
    }

    fn preferences(&self) -> PreferenceStore {
        PreferenceStore::new(self.dir.path().join("prefs.json"))
    }

    fn orchestrator(&self, mock: MockCompletion) -> Orchestrator<MockCompletion> {
        let generator = ArtifactGenerator::new(mock, self.preferences()).with_echo(SharedBuffer::new());
        Orchestrator::new(generator, self.data_dir(), self.output_root())
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

// =============================================================================
// FULL RUNS
// =============================================================================

#[tokio::test]
async fn test_all_four_artifacts_written() {
    let ws = Workspace::new();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    let report = orchestrator.generate_all("A Haunted  Lighthouse!", &[]).await;

    let expected_dir = ws.output_root().join("a_haunted_lighthouse");
    assert_eq!(report.output_dir.as_deref(), Some(expected_dir.as_path()));
    assert_eq!(report.written_count(), 4);

    for kind in ArtifactKind::ALL {
        let path = expected_dir.join(kind.file_name());
        assert_eq!(report.outcome(kind), Some(&Outcome::Written(path.clone())));
        assert_eq!(read(&path), format!("{{\"artifact\": \"{}\"}}", kind.stem()));
    }

    // Kinds are requested in a fixed order.
    let kinds: Vec<_> = mock.calls().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, ArtifactKind::ALL.map(Some).to_vec());
}

#[tokio::test]
async fn test_template_text_reaches_prompt() {
    let ws = Workspace::new();
    std::fs::write(
        ws.data_dir().join("items.json"),
        "{\"items\": [{\"ability_stats\": [0]}]}",
    )
    .unwrap();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    orchestrator.generate_all("a castle", &[]).await;

    let items = mock
        .calls()
        .into_iter()
        .find(|c| c.kind() == Some(ArtifactKind::Items))
        .unwrap();
    assert!(items
        .prompt
        .contains("with the following structure: {\"items\": [{\"ability_stats\": [0]}]}."));
}

#[tokio::test]
async fn test_idea_without_usable_characters_uses_untitled_dir() {
    let ws = Workspace::new();
    let mut orchestrator = ws.orchestrator(MockCompletion::new());

    let report = orchestrator.generate_all("¡¿!?", &[]).await;

    assert_eq!(
        report.output_dir,
        Some(ws.output_root().join(ijismith_core::artifact::UNTITLED_DIR))
    );
    assert_eq!(report.written_count(), 4);
}

#[tokio::test]
async fn test_same_idea_overwrites_previous_output() {
    let ws = Workspace::new();

    let mut first = ws.orchestrator(MockCompletion::new().with_response("{\"v\": 1}"));
    first.generate_all("a castle", &[]).await;

    let mut second = ws.orchestrator(MockCompletion::new().with_response("{\"v\": 2}"));
    second.generate_all("A  Castle", &[]).await;

    let story = ws.output_root().join("a_castle").join("story.json");
    assert_eq!(read(&story), "{\"v\": 2}");
}

// =============================================================================
// FAILURE ISOLATION
// =============================================================================

#[tokio::test]
async fn test_one_failing_kind_does_not_stop_others() {
    let ws = Workspace::new();
    let mock = MockCompletion::new().failing_for(ArtifactKind::Characters);
    let mut orchestrator = ws.orchestrator(mock.clone());

    let report = orchestrator.generate_all("a castle", &[]).await;
    let dir = ws.output_root().join("a_castle");

    assert_eq!(report.written_count(), 3);
    assert_eq!(
        report.outcome(ArtifactKind::Characters),
        Some(&Outcome::GenerationFailed)
    );
    assert!(!dir.join("characters.json").exists());
    for kind in [ArtifactKind::Story, ArtifactKind::Items, ArtifactKind::Npcs] {
        assert!(dir.join(kind.file_name()).exists(), "{kind} missing");
    }
    assert_eq!(mock.calls().len(), 4);
}

#[tokio::test]
async fn test_broken_stream_writes_nothing_for_that_kind() {
    let ws = Workspace::new();
    let mock = MockCompletion::new().breaking_stream_for(ArtifactKind::Story);
    let mut orchestrator = ws.orchestrator(mock);

    let report = orchestrator.generate_all("a castle", &[]).await;

    assert_eq!(
        report.outcome(ArtifactKind::Story),
        Some(&Outcome::GenerationFailed)
    );
    assert!(!ws.output_root().join("a_castle").join("story.json").exists());
    assert_eq!(report.written_count(), 3);
}

#[tokio::test]
async fn test_empty_response_is_not_written() {
    let ws = Workspace::new();
    let mut orchestrator = ws.orchestrator(MockCompletion::new().with_response("```json\n\n```"));

    let report = orchestrator.generate_all("a castle", &[]).await;

    assert_eq!(report.written_count(), 0);
    assert!(report
        .outcomes
        .iter()
        .all(|(_, outcome)| *outcome == Outcome::GenerationFailed));
    let dir = ws.output_root().join("a_castle");
    assert!(dir.is_dir());
    assert_eq!(std::fs::read_dir(dir).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unwritable_file_fails_only_that_kind() {
    let ws = Workspace::new();
    let dir = ws.output_root().join("a_castle");
    std::fs::create_dir_all(dir.join("characters.json")).unwrap();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    let report = orchestrator.generate_all("a castle", &[]).await;

    assert!(matches!(
        report.outcome(ArtifactKind::Characters),
        Some(Outcome::WriteFailed(_))
    ));
    assert_eq!(report.written_count(), 3);
    assert_eq!(mock.calls().len(), 4);
    assert!(dir.join("characters.json").is_dir());
    for kind in [ArtifactKind::Story, ArtifactKind::Items, ArtifactKind::Npcs] {
        assert_eq!(
            report.outcome(kind),
            Some(&Outcome::Written(dir.join(kind.file_name())))
        );
    }
}

#[tokio::test]
async fn test_missing_template_skips_only_that_kind() {
    let ws = Workspace::new();
    std::fs::remove_file(ws.data_dir().join("items.json")).unwrap();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    let report = orchestrator.generate_all("a castle", &[]).await;

    assert!(matches!(
        report.outcome(ArtifactKind::Items),
        Some(Outcome::TemplateUnreadable(_))
    ));
    assert_eq!(report.written_count(), 3);
    assert_eq!(mock.calls().len(), 3);
    assert!(mock
        .calls()
        .iter()
        .all(|c| c.kind() != Some(ArtifactKind::Items)));
}

#[tokio::test]
async fn test_uncreatable_output_dir_attempts_nothing() {
    let ws = Workspace::new();
    let blocker = ws.dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mock = MockCompletion::new();
    let generator = ArtifactGenerator::new(mock.clone(), ws.preferences()).with_echo(SharedBuffer::new());
    let mut orchestrator = Orchestrator::new(generator, ws.data_dir(), &blocker);

    let report = orchestrator.generate_all("a castle", &[]).await;

    assert!(report.output_dir.is_none());
    assert!(report.outcomes.is_empty());
    assert!(mock.calls().is_empty());
}

// =============================================================================
// MODEL PREFERENCE
// =============================================================================

#[tokio::test]
async fn test_every_kind_uses_saved_model() {
    let ws = Workspace::new();
    ws.preferences()
        .save(&Preference::new("google/gemini-2.5-flash-lite"))
        .await
        .unwrap();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    orchestrator.generate_all("a castle", &[]).await;

    assert_eq!(mock.calls().len(), 4);
    assert!(mock
        .calls()
        .iter()
        .all(|c| c.model == "google/gemini-2.5-flash-lite"));
}

#[tokio::test]
async fn test_default_model_without_preference_file() {
    let ws = Workspace::new();
    let mock = MockCompletion::new();
    let mut orchestrator = ws.orchestrator(mock.clone());

    orchestrator.generate_all("a castle", &[]).await;

    assert!(mock
        .calls()
        .iter()
        .all(|c| c.model == ijismith_core::DEFAULT_MODEL));
}
