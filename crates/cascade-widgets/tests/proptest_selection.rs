#![forbid(unsafe_code)]

//! Property tests for the selection path and the columns it reveals.

use cascade_widgets::cascader::{
    CascadeStatus, CascadeTree, Cascader, CascaderState, Identifier, NoDisabled, Normalizer,
    SelectionController, build_columns,
};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;

/// Random nested records, at most four levels deep.
fn raw_tree() -> impl Strategy<Value = Value> {
    let leaf = (0u8..6).prop_map(|v| json!({"value": v, "label": format!("n{v}")}));
    let node = leaf.prop_recursive(3, 40, 4, |inner| {
        ((0u8..6), prop::collection::vec(inner, 0..4)).prop_map(|(v, children)| {
            json!({"value": v, "label": format!("n{v}"), "children": children})
        })
    });
    prop::collection::vec(node, 0..5).prop_map(Value::Array)
}

fn normalize(raw: &Value) -> CascadeTree {
    let n: Normalizer = Normalizer::default();
    n.normalize(raw)
}

/// Every `Path[i]` is a child of `Path[i-1]` and all indices resolve.
fn assert_path_consistent(tree: &CascadeTree, path: &[usize]) {
    let nodes = tree.resolve(path).expect("path resolves");
    for (depth, node) in nodes.iter().enumerate() {
        assert_eq!(node.depth(), depth);
    }
    for pair in nodes.windows(2) {
        assert!(pair[0].children().iter().any(|c| std::ptr::eq(c, pair[1])));
    }
}

proptest! {
    #[test]
    fn path_stays_consistent_under_activations(
        raw in raw_tree(),
        moves in prop::collection::vec((0usize..5, 0usize..5), 0..20),
    ) {
        let tree = normalize(&raw);
        let mut controller = SelectionController::new();
        for (depth, index) in moves {
            let before = controller.path().to_vec();
            match controller.activate(&tree, &NoDisabled, depth, index) {
                Ok(Some(event)) => {
                    prop_assert_eq!(controller.path().len(), depth + 1);
                    prop_assert_eq!(&controller.path()[..depth], &before[..depth]);
                    prop_assert_eq!(event.path.as_slice(), controller.path());
                    prop_assert_eq!(event.path_nodes.len(), depth + 1);
                }
                Ok(None) => prop_assert!(false, "nothing is disabled"),
                Err(_) => prop_assert_eq!(controller.path(), before.as_slice()),
            }
            assert_path_consistent(&tree, controller.path());
        }
    }

    #[test]
    fn column_count_follows_path_shape(
        raw in raw_tree(),
        moves in prop::collection::vec((0usize..5, 0usize..5), 0..12),
    ) {
        let tree = normalize(&raw);
        let mut controller = SelectionController::new();
        for (depth, index) in moves {
            let _ = controller.activate(&tree, &NoDisabled, depth, index);
        }
        let path = controller.path();
        let columns = build_columns(&tree, path);
        let expected = match controller.status(&tree) {
            CascadeStatus::Collapsed => 1,
            CascadeStatus::Partial => path.len() + 1,
            CascadeStatus::Complete => path.len(),
        };
        prop_assert_eq!(columns.len(), expected);
        for (d, column) in columns.iter().enumerate() {
            prop_assert_eq!(column.depth(), d);
            if d > 0 {
                prop_assert!(!column.is_empty());
            }
        }
    }

    #[test]
    fn disabled_items_never_enter_the_path(
        raw in raw_tree(),
        blocked in prop::collection::hash_set(0i64..6, 0..4),
        moves in prop::collection::vec((0usize..5, 0usize..5), 0..20),
    ) {
        let tree = normalize(&raw);
        let disabled: HashSet<Identifier> = blocked.iter().copied().map(Identifier::from).collect();
        let cascader = Cascader::new(&tree).disabled_items(&disabled);
        let mut state = CascaderState::new();
        for (depth, index) in moves {
            state.activate(&cascader, depth, index);
            for node in tree.resolve(state.path()).expect("path resolves") {
                let value = node.value().expect("generated nodes have values");
                prop_assert!(!disabled.contains(value));
            }
        }
    }

    #[test]
    fn normalization_is_deterministic(raw in raw_tree()) {
        let a = normalize(&raw);
        let b = normalize(&raw);
        prop_assert_eq!(a.signature(), b.signature());
        prop_assert_eq!(a, b);
    }
}
