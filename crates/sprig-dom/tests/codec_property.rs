//! Property tests for the entity codec and the attribute round trip.

use proptest::prelude::*;
use sprig_dom::{AttrSet, DomTree, attr, decode, encode, set_attr, wrap};

proptest! {
    #[test]
    fn encode_decode_round_trips(s in ".*") {
        prop_assert_eq!(decode(&encode(&s)), s);
    }

    #[test]
    fn decode_is_idempotent_on_entity_free_text(s in "[a-zA-Z0-9 .,;_-]*") {
        let once = decode(&s);
        prop_assert_eq!(decode(&once), s);
    }

    #[test]
    fn attr_round_trips_for_any_value(v in ".*") {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.append_child(tree.root(), div);
        let sel = wrap(div);

        set_attr(&mut tree, &sel, "title", AttrSet::Value(&v));
        prop_assert_eq!(attr(&tree, &sel, "title"), Some(v));
    }
}
