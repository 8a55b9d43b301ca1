use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Case-folded alphanumeric tokens with internal apostrophes, the shape the
/// upstream tokenizer produces. The empty string is deliberately in range.
fn token_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-z0-9']{0,10}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_hash_matches_model(
        tokens in prop::collection::vec(token_strategy(), 0..200),
        double in any::<bool>(),
    ) {
        let strategy = if double {
            CollisionStrategy::Double
        } else {
            CollisionStrategy::Linear
        };
        // 211 is prime and exceeds the distinct-token count, so the table
        // never fills and double hashing probes every slot if it must.
        let mut store = HashStore::new(211, strategy);
        let mut model: HashMap<String, u64> = HashMap::new();

        for token in &tokens {
            let count = model.entry(token.clone()).or_insert(0);
            *count += 1;
            prop_assert_eq!(store.insert(token), *count);
        }

        for (token, count) in &model {
            prop_assert_eq!(store.search(token), *count);
        }
        prop_assert_eq!(store.search("UNSEEN"), 0);
        prop_assert_eq!(store.len(), model.len());
        prop_assert_eq!(
            store.slots().filter(|record| record.key.is_some()).count(),
            model.len()
        );
    }

    #[test]
    fn prop_tree_matches_model(
        tokens in prop::collection::vec(token_strategy(), 1..300),
        balanced in any::<bool>(),
    ) {
        let mode = if balanced { TreeMode::Balanced } else { TreeMode::Plain };
        let mut store = OrderedTreeStore::new(mode);
        let mut model: BTreeMap<String, u64> = BTreeMap::new();

        for token in &tokens {
            store.insert(token);
            *model.entry(token.clone()).or_insert(0) += 1;
        }
        store.finalize_root_color();

        for (token, count) in &model {
            prop_assert!(store.search(token));
            prop_assert_eq!(store.frequency(token), *count);
        }
        prop_assert!(!store.search("UNSEEN"));
        prop_assert_eq!(store.len(), model.len());

        let mut seen = Vec::new();
        store.inorder(|key| seen.push(key.to_owned()));
        let expected: Vec<String> = model.keys().cloned().collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_balanced_depth_bound(
        tokens in prop::collection::vec("[a-z]{1,6}", 1..400),
    ) {
        let mut store = OrderedTreeStore::new(TreeMode::Balanced);
        for token in &tokens {
            store.insert(token);
        }
        store.finalize_root_color();

        let n = store.len() as f64;
        let depth = store.depth().expect("at least one token was inserted");
        prop_assert!(
            (depth as f64) <= 2.0 * (n + 1.0).log2(),
            "depth {} exceeds red-black bound for {} keys", depth, store.len()
        );
    }

    #[test]
    fn prop_preorder_inorder_agree_on_keys(
        tokens in prop::collection::vec(token_strategy(), 1..100),
    ) {
        let mut store = OrderedTreeStore::new(TreeMode::Balanced);
        for token in &tokens {
            store.insert(token);
        }
        store.finalize_root_color();

        let mut pre = Vec::new();
        store.preorder(|key| pre.push(key.to_owned()));
        let mut ino = Vec::new();
        store.inorder(|key| ino.push(key.to_owned()));

        prop_assert_eq!(pre.len(), ino.len());
        pre.sort();
        prop_assert_eq!(pre, ino);
    }
}
