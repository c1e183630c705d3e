use super::*;

#[test]
fn test_rank_score_from_stderr() {
    let stderr = "\
llama_model_loader: loaded meta data with 30 key-value pairs
main: prompt 0: 'machine learning</s><s>deep learning'
rerank score 0:   -6.851
";

    assert_eq!(parse_rank_score("", stderr).unwrap(), -6.851);
}

#[test]
fn test_rank_score_first_match_wins() {
    let stderr = "rerank score 0: 1.5\nrerank score 1: 2.5\n";

    assert_eq!(parse_rank_score("", stderr).unwrap(), 1.5);
}

#[test]
fn test_rank_score_skips_unparsable_marker_lines() {
    let stderr = "rerank score: pending\nrerank score 0: 3.25\n";

    assert_eq!(parse_rank_score("", stderr).unwrap(), 3.25);
}

#[test]
fn test_rank_score_prefers_stderr_over_stdout() {
    assert_eq!(parse_rank_score("1.0", "rerank score 0: 8.0").unwrap(), 8.0);
}

#[test]
fn test_rank_score_from_stdout() {
    assert_eq!(parse_rank_score("  4.75 \n", "no score here").unwrap(), 4.75);
}

#[test]
fn test_rank_score_missing() {
    let err = parse_rank_score("embedding 0: 0.1 0.2", "loading model").unwrap_err();

    assert!(matches!(err, ParseError::MissingRankScore));
}

#[test]
fn test_rank_score_rejects_non_finite() {
    assert!(parse_rank_score("NaN", "rerank score 0: inf").is_err());
}

#[test]
fn test_rank_score_marker_without_value() {
    assert!(parse_rank_score("", "rerank score").is_err());
}

#[test]
fn test_embedding_parses_first_vector() {
    let stdout = r#"{
  "object": "list",
  "data": [
    {"object": "embedding", "index": 0, "embedding": [0.5, -0.25, 1.0]},
    {"object": "embedding", "index": 1, "embedding": [9.0, 9.0, 9.0]}
  ]
}"#;

    assert_eq!(parse_embedding(stdout).unwrap(), vec![0.5, -0.25, 1.0]);
}

#[test]
fn test_embedding_skips_leading_noise() {
    let stdout = "build: 4567 (abcdef)\n{\"data\":[{\"index\":0,\"embedding\":[0.1,0.2]}]}\n";

    assert_eq!(parse_embedding(stdout).unwrap(), vec![0.1, 0.2]);
}

#[test]
fn test_embedding_empty_data() {
    let err = parse_embedding(r#"{"object":"list","data":[]}"#).unwrap_err();

    assert!(matches!(err, ParseError::EmptyEmbedding));
}

#[test]
fn test_embedding_zero_vector() {
    let err = parse_embedding(r#"{"data":[{"index":0,"embedding":[0.0,0.0,0.0]}]}"#).unwrap_err();

    assert!(matches!(err, ParseError::ZeroEmbedding { dim: 3 }));
}

#[test]
fn test_embedding_invalid_json() {
    let err = parse_embedding("not json at all").unwrap_err();

    assert!(matches!(err, ParseError::InvalidJson(_)));
}

#[test]
fn test_embedding_wrong_shape() {
    assert!(parse_embedding(r#"{"results":[1,2,3]}"#).is_err());
}

#[test]
fn test_error_messages_descriptive() {
    assert!(
        ParseError::ZeroEmbedding { dim: 768 }
            .to_string()
            .contains("768")
    );
    assert!(
        ParseError::MissingRankScore
            .to_string()
            .contains("rank score")
    );
}
