/// Tests for the checker entry points and their agreement
#[cfg(test)]
mod run_mode_tests {
    use std::thread;

    use celery_script_checker::{
        checker::Checker,
        errors::{CheckError, CheckErrorKind},
    };

    use crate::utils::{farmbot_corpus, init_tracing, move_absolute, sample_sequence};

    #[test]
    fn test_run_returns_same_tree_root() -> anyhow::Result<()> {
        init_tracing();
        let corpus = farmbot_corpus();
        let tree = sample_sequence();
        let checker = Checker::new(&tree, &corpus);
        let root = checker.run()?;
        assert!(std::ptr::eq(root.tree(), &tree));
        assert_eq!(root.id(), tree.root().id());
        Ok(())
    }

    #[test]
    fn test_run_error_downcasts_to_check_error() {
        let corpus = farmbot_corpus();
        let tree = move_absolute(10, 20, 0, "fast");
        let err = Checker::new(&tree, &corpus).run().unwrap_err();
        let check_error = err.downcast_ref::<CheckError>().expect("a CheckError");
        assert_eq!(check_error.kind(), CheckErrorKind::InvalidLeafType);
    }

    #[test]
    fn test_entry_points_agree() {
        let corpus = farmbot_corpus();
        for tree in [move_absolute(1, 2, 3, 4), move_absolute(1, 2, 3, 400)] {
            let checker = Checker::new(&tree, &corpus);
            let result = checker.run_or_result();
            let run = checker.run();
            assert_eq!(result.is_ok(), run.is_ok());
            assert_eq!(result.is_ok(), checker.is_valid());
            assert_eq!(result.err(), checker.error());
            if let Err(err) = run {
                assert_eq!(Some(err.to_string()), checker.error().map(|e| e.to_string()));
            }
        }
    }

    #[test]
    fn test_check_does_not_mutate_tree() {
        let corpus = farmbot_corpus();
        let tree = sample_sequence();
        let before = tree.clone();
        let checker = Checker::new(&tree, &corpus);
        assert!(checker.is_valid());
        assert!(checker.is_valid());
        assert_eq!(tree, before);

        let invalid = move_absolute(0, 0, 0, -1);
        let before = invalid.clone();
        assert!(!Checker::new(&invalid, &corpus).is_valid());
        assert_eq!(invalid, before);
    }

    #[test]
    fn test_first_violation_in_preorder_wins() {
        let corpus = farmbot_corpus();
        // Two violations: the root's speed and a nested coordinate leaf.
        let mut builder = celery_script_ast::builder::TreeBuilder::new("move_to");
        let root = builder.root();
        let location = builder.add_node_arg(root, "location", "coordinate");
        builder.add_leaf_arg(location, "x", "x", "left");
        builder.add_leaf_arg(location, "y", "y", 0);
        builder.add_leaf_arg(location, "z", "z", 0);
        builder.add_leaf_arg(root, "speed", "speed", 1000);
        let tree = builder.build();

        let err = Checker::new(&tree, &corpus).error().expect("two violations");
        assert_eq!(err.kind(), CheckErrorKind::CustomValidation);
    }

    #[test]
    fn test_concurrent_checks_share_corpus() {
        let corpus = farmbot_corpus();
        let valid = sample_sequence();
        let invalid = move_absolute(1, 2, 3, 0);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let tree = if i % 2 == 0 { &valid } else { &invalid };
                    let corpus = &corpus;
                    scope.spawn(move || Checker::new(tree, corpus).is_valid())
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let is_valid = handle.join().expect("checker thread panicked");
                assert_eq!(is_valid, i % 2 == 0);
            }
        });
    }
}
