/// Tests for corpus construction and schema export
#[cfg(test)]
mod corpus_tests {
    use celery_script_ast::nodes::ValueType;
    use celery_script_checker::{
        corpus::CorpusBuilder,
        errors::{CheckError, CorpusError, KindCategory},
    };

    use crate::utils::farmbot_corpus;

    #[test]
    fn test_fetch_known_kinds() {
        let corpus = farmbot_corpus();
        let node = corpus.fetch_node("move_absolute").unwrap();
        assert_eq!(node.allowed_args(), ["x", "y", "z", "speed"]);
        assert!(node.allowed_body_types().is_empty());

        let arg = corpus.fetch_arg("speed").unwrap();
        assert_eq!(arg.allowed_values(), ValueType::NUMERIC);
        assert!(arg.additional_validation().is_some());
        assert!(corpus.fetch_arg("x").unwrap().additional_validation().is_none());
    }

    #[test]
    fn test_fetch_unknown_kind() {
        let corpus = farmbot_corpus();
        assert_eq!(
            corpus.fetch_node("coordinate_system").unwrap_err(),
            CheckError::UnknownKind {
                category: KindCategory::Node,
                kind: "coordinate_system".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_node_kind_is_rejected() {
        let err = CorpusBuilder::new()
            .node("wait", &["milliseconds"], &[])
            .node("wait", &[], &[])
            .build()
            .unwrap_err();
        assert_eq!(err, CorpusError::DuplicateNode("wait".to_string()));
    }

    #[test]
    fn test_duplicate_arg_kind_is_rejected() {
        let err = CorpusBuilder::new()
            .arg("x", ValueType::NUMERIC)
            .arg("x", &[ValueType::String])
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "arg kind 'x' is defined more than once");
    }

    #[test]
    fn test_repeated_names_are_collapsed() {
        let corpus = CorpusBuilder::new()
            .node("coordinate", &["x", "y", "x", "z"], &["wait", "wait"])
            .build()
            .unwrap();
        let node = corpus.fetch_node("coordinate").unwrap();
        assert_eq!(node.allowed_args(), ["x", "y", "z"]);
        assert_eq!(node.allowed_body_types(), ["wait"]);
    }

    #[test]
    fn test_kind_listing_is_sorted() {
        let corpus = farmbot_corpus();
        let kinds = corpus.node_kinds();
        let mut sorted = kinds.clone();
        sorted.sort_unstable();
        assert_eq!(kinds, sorted);
        assert!(corpus.arg_kinds().contains(&"channel_name"));
    }

    #[test]
    fn test_schema_export() -> anyhow::Result<()> {
        let corpus = CorpusBuilder::new()
            .node("wait", &["milliseconds"], &[])
            .node("sequence", &[], &["wait"])
            .arg_with("milliseconds", &[ValueType::Integer], |_, _| Ok(()))
            .build()?;

        let json = serde_json::to_value(&corpus)?;
        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [
                    { "name": "sequence", "allowed_args": [], "allowed_body_types": ["wait"] },
                    { "name": "wait", "allowed_args": ["milliseconds"], "allowed_body_types": [] }
                ],
                "args": [
                    {
                        "name": "milliseconds",
                        "allowed_values": ["integer"],
                        "has_additional_validation": true
                    }
                ]
            })
        );
        Ok(())
    }
}
