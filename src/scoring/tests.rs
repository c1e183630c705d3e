use super::*;
use crate::inference::InferenceError;
use crate::parsing::ParseError;
use tokio_util::sync::CancellationToken;

#[test]
fn test_is_cancelled() {
    assert!(ScoringError::Cancelled.is_cancelled());
    assert!(ScoringError::from(InferenceError::Cancelled).is_cancelled());
    assert!(!ScoringError::from(ParseError::MissingRankScore).is_cancelled());
    assert!(
        !ScoringError::Unavailable {
            reason: "x".to_string()
        }
        .is_cancelled()
    );
}

#[tokio::test]
async fn test_mock_scores_and_embeddings() {
    let scorer = MockScorer::new()
        .with_score("deep learning", 9.0)
        .with_embedding("query", vec![1.0, 0.0]);
    let cancel = CancellationToken::new();

    assert_eq!(scorer.score("q", "deep learning", &cancel).await.unwrap(), 9.0);
    assert_eq!(
        scorer.embed("query", &cancel).await.unwrap(),
        vec![1.0, 0.0]
    );
    assert_eq!(scorer.score_calls(), 1);
    assert_eq!(scorer.embed_calls(), 1);
}

#[tokio::test]
async fn test_mock_missing_entry_is_unavailable() {
    let scorer = MockScorer::new();
    let cancel = CancellationToken::new();

    let err = scorer.score("q", "unknown", &cancel).await.unwrap_err();
    assert!(matches!(err, ScoringError::Unavailable { .. }));

    let err = scorer.embed("unknown", &cancel).await.unwrap_err();
    assert!(matches!(err, ScoringError::Unavailable { .. }));
}

#[tokio::test]
async fn test_mock_respects_cancellation() {
    let scorer = MockScorer::new().with_score("doc", 1.0);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = scorer.score("q", "doc", &cancel).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(scorer.score_calls(), 0);
}

#[test]
fn test_mock_reconfigure() {
    let config = crate::config::Config::new("/models/m.gguf");

    let scorer = MockScorer::new();
    scorer.reconfigure(&config).unwrap();
    assert_eq!(scorer.reconfigurations(), 1);

    let rejecting = MockScorer::new().rejecting_reconfigure();
    assert!(rejecting.reconfigure(&config).is_err());
    assert_eq!(rejecting.reconfigurations(), 0);
}

#[cfg(unix)]
mod process {
    use super::*;
    use crate::config::Config;
    use crate::test_support::{WELL_BEHAVED_SCRIPT, fake_binary, fake_model};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_llama_scorer_rank_and_embed() {
        let dir = tempfile::tempdir().unwrap();
        let model = fake_model(dir.path());
        let binary = fake_binary(dir.path(), WELL_BEHAVED_SCRIPT);
        let config = Config::new(&model).with_binary_path(&binary);
        let cancel = CancellationToken::new();

        let scorer = LlamaScorer::load(&config, &cancel).await.unwrap();

        assert_eq!(scorer.score("q", "d", &cancel).await.unwrap(), 7.5);
        assert_eq!(scorer.embed("text", &cancel).await.unwrap(), vec![0.6, 0.8]);
        assert_eq!(scorer.paths().model, model);
    }

    #[tokio::test]
    #[serial]
    async fn test_llama_scorer_unparsable_rank_output() {
        let dir = tempfile::tempdir().unwrap();
        let model = fake_model(dir.path());
        let binary = fake_binary(dir.path(), "echo 'no score here' >&2");
        let config = Config::new(&model)
            .with_binary_path(&binary)
            .with_self_check(false);
        let cancel = CancellationToken::new();

        let scorer = LlamaScorer::load(&config, &cancel).await.unwrap();
        let err = scorer.score("q", "d", &cancel).await.unwrap_err();

        assert!(matches!(
            err,
            ScoringError::Parse(ParseError::MissingRankScore)
        ));
    }

    #[tokio::test]
    #[serial]
    async fn test_llama_scorer_process_failure() {
        let dir = tempfile::tempdir().unwrap();
        let model = fake_model(dir.path());
        let binary = fake_binary(dir.path(), "exit 2");
        let config = Config::new(&model)
            .with_binary_path(&binary)
            .with_self_check(false);
        let cancel = CancellationToken::new();

        let scorer = LlamaScorer::load(&config, &cancel).await.unwrap();
        let err = scorer.embed("text", &cancel).await.unwrap_err();

        assert!(matches!(
            err,
            ScoringError::Inference(InferenceError::NonZeroExit { .. })
        ));
    }

    #[test]
    fn test_reconfigure_rebinds_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = fake_model(dir.path());
        let other = dir.path().join("other.gguf");
        std::fs::write(&other, b"GGUF").unwrap();
        let binary = fake_binary(dir.path(), "exit 0");
        let config = Config::new(&model).with_binary_path(&binary);

        let scorer = LlamaScorer::from_paths(crate::lifecycle::resolve(&config).unwrap(), &config);
        scorer
            .reconfigure(&Config::new(&other).with_binary_path(&binary))
            .unwrap();

        assert_eq!(scorer.paths().model, other);
    }

    #[test]
    fn test_reconfigure_failure_keeps_binding() {
        let dir = tempfile::tempdir().unwrap();
        let model = fake_model(dir.path());
        let binary = fake_binary(dir.path(), "exit 0");
        let config = Config::new(&model).with_binary_path(&binary);

        let scorer = LlamaScorer::from_paths(crate::lifecycle::resolve(&config).unwrap(), &config);
        let err = scorer
            .reconfigure(&Config::new(dir.path().join("missing.gguf")).with_binary_path(&binary))
            .unwrap_err();

        assert!(matches!(err, ScoringError::Lifecycle(_)));
        assert_eq!(scorer.paths().model, model);
    }
}
