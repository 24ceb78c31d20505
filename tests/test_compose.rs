//! Tests for `extend` / `create` and chain lookup.

extern crate protochain;

use protochain::runner::config::ComposeConfig;
use protochain::runner::ds::error::ComposeError;
use protochain::runner::ds::node::NodeRef;
use protochain::runner::ds::object_property::PropertyKey;
use protochain::runner::ds::operations::compose;
use protochain::runner::ds::realm::Realm;
use protochain::runner::ds::symbol::SymbolData;
use protochain::runner::ds::value::{NumberType, Value};

fn int(i: i64) -> Value {
    Value::Number(NumberType::Integer(i))
}

fn key(s: &str) -> PropertyKey {
    PropertyKey::from(s)
}

// ============================================================================
// extend
// ============================================================================

mod extend_tests {
    use super::*;

    #[test]
    fn test_extend_copies_props_as_own_keys() {
        let realm = Realm::new();
        let base = realm.root();
        let node = base
            .extend(&NodeRef::from_pairs(vec![("a", int(1)), ("b", int(2))]))
            .unwrap();

        assert!(!node.ptr_eq(&base));
        assert_eq!(node.own_keys(), vec![key("a"), key("b")]);
        assert_eq!(node.get("a"), int(1));
        assert_eq!(node.get("b"), int(2));
        assert!(node.fallback().unwrap().ptr_eq(&base));
    }

    #[test]
    fn test_unset_keys_read_through_to_base() {
        let realm = Realm::new();
        let base = realm
            .root()
            .extend(&NodeRef::from_pairs(vec![("color", "red"), ("shape", "square")]))
            .unwrap();
        let node = base
            .extend(&NodeRef::from_pairs(vec![("color", "blue")]))
            .unwrap();

        assert_eq!(node.get("color"), Value::from("blue"));
        assert_eq!(node.get("shape"), Value::from("square"));
        assert_eq!(node.get("missing"), base.get("missing"));
        assert!(!node.has_own(&key("shape")));
    }

    #[test]
    fn test_lookup_is_live_not_copied() {
        let realm = Realm::new();
        let base = realm.create().unwrap();
        let node = base.create().unwrap();
        base.set("late", int(7));
        assert_eq!(node.get("late"), int(7));
    }

    #[test]
    fn test_mutating_derived_never_touches_base() {
        let realm = Realm::new();
        let base = realm
            .root()
            .extend(&NodeRef::from_pairs(vec![("x", int(1))]))
            .unwrap();
        let node = base.create().unwrap();

        node.set("x", int(99));
        node.set("y", int(3));

        assert_eq!(base.get("x"), int(1));
        assert_eq!(base.get("y"), Value::Undefined);
        assert_eq!(node.get("x"), int(99));
        assert!(node.delete_own(&key("x")));
        assert_eq!(node.get("x"), int(1));
    }

    #[test]
    fn test_extend_copies_only_own_enumerable_keys_of_mapping() {
        let realm = Realm::new();
        let mapping_base = NodeRef::from_pairs(vec![("inherited", int(1))]);
        let mapping = compose::extend(
            &mapping_base,
            &Value::Object(NodeRef::from_pairs(vec![("own", int(2))])),
            realm.config(),
        )
        .unwrap();

        let node = realm.root().extend(&mapping).unwrap();
        assert_eq!(node.own_keys(), vec![key("own")]);
        assert_eq!(node.get("inherited"), Value::Undefined);
    }

    #[test]
    fn test_capabilities_are_not_copied_by_extend() {
        let realm = Realm::new();
        let a = realm.create().unwrap();
        // Extending with the root as mapping: its capabilities are hidden.
        let b = a.extend(&realm.root()).unwrap();
        assert!(b.own_keys().is_empty());
    }

    #[test]
    fn test_extend_accepts_symbol_and_int_keys() {
        let realm = Realm::new();
        let tag = SymbolData::new_empty();
        let mapping = NodeRef::plain();
        mapping.set(tag.clone(), "tagged");
        mapping.set(0u32, "first");

        let node = realm.root().extend(&mapping).unwrap();
        assert_eq!(node.get(tag), Value::from("tagged"));
        assert_eq!(node.get(0u32), Value::from("first"));
    }

    #[test]
    fn test_extend_from_source() {
        let realm = Realm::new();
        let node = realm
            .root()
            .extend_from_source("{ width: 4, label: 'w' }")
            .unwrap();
        assert_eq!(node.get("width"), int(4));
        assert_eq!(node.get("label"), Value::from("w"));
        assert!(node.fallback().unwrap().ptr_eq(&realm.root()));
    }

    #[test]
    fn test_extend_from_bad_source_is_invalid_target() {
        let realm = Realm::new();
        let err = realm.root().extend_from_source("width = 4").unwrap_err();
        assert!(matches!(err, ComposeError::InvalidTarget(_)));
    }
}

// ============================================================================
// create / delegation transparency
// ============================================================================

mod create_tests {
    use super::*;

    #[test]
    fn test_create_twice_yields_distinct_transparent_nodes() {
        let realm = Realm::new();
        let base = realm
            .root()
            .extend(&NodeRef::from_pairs(vec![("k", "v")]))
            .unwrap();
        let n1 = base.create().unwrap();
        let n2 = base.create().unwrap();

        assert!(!n1.ptr_eq(&n2));
        assert!(!n1.ptr_eq(&base));
        assert!(n1.own_keys().is_empty());
        assert!(n2.own_keys().is_empty());
        assert_eq!(n1.get("k"), base.get("k"));
        assert_eq!(n2.get("k"), base.get("k"));
    }

    #[test]
    fn test_empty_extend_matches_create() {
        let realm = Realm::new();
        let base = realm.create().unwrap();
        let n = base.extend(&NodeRef::plain()).unwrap();
        assert!(n.own_keys().is_empty());
        assert_eq!(n.depth(), base.depth() + 1);
    }

    #[test]
    fn test_every_node_inherits_capabilities() {
        let realm = Realm::new();
        let mut node = realm.create().unwrap();
        for _ in 0..5 {
            node = node.create().unwrap();
        }
        assert_eq!(node.depth(), 6);
        assert!(node.has_property(&key("extend")));
        assert!(node.has_property(&key("override")));
        assert!(node.has_property(&key("create")));
        assert_eq!(node.chain().count(), 7);
        assert!(node.chain().last().unwrap().ptr_eq(&realm.root()));
    }

    #[test]
    fn test_node_without_capabilities_cannot_extend() {
        let orphan = NodeRef::plain();
        let err = orphan.create().unwrap_err();
        assert_eq!(err, ComposeError::NotAMethod("create".to_string()));
    }
}

// ============================================================================
// props validation and config
// ============================================================================

mod props_tests {
    use super::*;

    #[test]
    fn test_nullish_props_coerced_by_default() {
        let realm = Realm::new();
        let a = realm.root().extend_value(&Value::Undefined).unwrap();
        let b = realm.root().extend_value(&Value::Null).unwrap();
        assert!(a.own_keys().is_empty());
        assert!(b.own_keys().is_empty());
    }

    #[test]
    fn test_nullish_props_rejected_when_configured() {
        let realm = Realm::with_config(ComposeConfig::new().with_coerce_nullish_props(false));
        let err = realm.root().extend_value(&Value::Null).unwrap_err();
        assert!(matches!(err, ComposeError::InvalidTarget(_)));
        // `create` has no props to validate.
        assert!(realm.create().is_ok());
    }

    #[test]
    fn test_non_object_props_are_invalid_target() {
        let realm = Realm::new();
        for props in vec![int(3), Value::from("text"), Value::Boolean(true)] {
            let err = realm.root().extend_value(&props).unwrap_err();
            assert!(matches!(err, ComposeError::InvalidTarget(_)), "{:?}", props);
        }
    }

    #[test]
    fn test_chain_depth_limit() {
        let realm = Realm::with_config(ComposeConfig::new().with_max_chain_depth(3));
        let a = realm.create().unwrap();
        let b = a.create().unwrap();
        assert_eq!(b.chain().count(), 3);

        let err = b.create().unwrap_err();
        assert_eq!(err, ComposeError::ChainTooDeep { limit: 3 });
        let err = b.extend(&NodeRef::from_pairs(vec![("x", int(1))])).unwrap_err();
        assert_eq!(err, ComposeError::ChainTooDeep { limit: 3 });
    }

    #[test]
    fn test_failed_extend_has_no_effect_on_base() {
        let realm = Realm::new();
        let base = realm.create().unwrap();
        let _ = base.extend_value(&int(1));
        assert!(base.own_keys().is_empty());
    }

    #[test]
    fn test_realm_from_parsed_config() {
        let config = ComposeConfig::parse("coerce_nullish_props = false\nmax_chain_depth = 2")
            .unwrap();
        let realm = Realm::with_config(config);
        assert_eq!(realm.config().max_chain_depth, Some(2));

        let child = realm.create().unwrap();
        assert_eq!(
            child.create().unwrap_err(),
            ComposeError::ChainTooDeep { limit: 2 }
        );
        assert!(matches!(
            child.extend_value(&Value::Undefined).unwrap_err(),
            ComposeError::InvalidTarget(_)
        ));
    }
}
