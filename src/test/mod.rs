use crate::{ByteRope, Rope};


#[test]
fn empty_rope_has_nothing_at_all() {
    let rope = Rope::new();
    assert_eq!(rope.len(), 0);
    assert_eq!(rope.measure(), 0);
    assert_eq!(rope.to_string(), "");
    assert_eq!(rope.at(0), None);
    assert!(rope.is_empty());
    assert!(rope.is_balanced());
}

#[test]
fn append_builds_left_to_right() {
    let mut rope = Rope::new();
    rope.append("Test");
    assert_eq!(rope.to_string(), "Test");
    rope.append("ing");
    assert_eq!(rope.to_string(), "Testing");
}

#[test]
fn prepend_builds_right_to_left() {
    let mut rope = Rope::new();
    rope.prepend("ing");
    assert_eq!(rope.to_string(), "ing");
    rope.prepend("Test");
    assert_eq!(rope.to_string(), "Testing");
}

#[test]
fn append_then_prepend() {
    let mut rope = Rope::new();
    rope.append("World");
    rope.prepend("Hello, ");
    assert_eq!(rope.to_string(), "Hello, World");
}

#[test]
fn empty_append_changes_nothing() {
    let mut rope = Rope::new();
    rope.append("");
    assert_eq!(rope.len(), 0);
    assert_eq!(rope.to_string(), "");

    rope.append("text");
    rope.append("");
    assert_eq!(rope.to_string(), "text");
}

#[test]
fn empty_prepend_changes_nothing() {
    let mut rope = Rope::new();
    rope.prepend("");
    assert_eq!(rope.len(), 0);
    assert_eq!(rope.to_string(), "");
}

#[test]
fn empty_insert_at_a_valid_position_succeeds_quietly() {
    let mut rope = Rope::new();
    assert!(rope.insert(0, ""));
    assert_eq!(rope.len(), 0);
    assert_eq!(rope.to_string(), "");

    rope.append("abcd");
    assert!(rope.insert(2, ""));
    assert!(rope.insert(4, ""));
    assert_eq!(rope.to_string(), "abcd");

    assert!(!rope.insert(5, ""));
}

#[test]
fn insert_walks_to_the_position() {
    let mut rope = Rope::new();
    assert!(rope.insert(0, "Tt"));
    assert_eq!(rope.to_string(), "Tt");
    assert!(rope.insert(1, "e"));
    assert_eq!(rope.to_string(), "Tet");
    assert!(rope.insert(2, "s"));
    assert_eq!(rope.to_string(), "Test");
}

#[test]
fn insert_past_the_end_is_refused() {
    let mut rope = Rope::new();
    assert!(rope.insert(0, "Test"));
    assert!(!rope.insert(10, "Test"));
    assert_eq!(rope.to_string(), "Test");
}

#[test]
fn erase_takes_a_prefix() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert!(rope.erase(0, 2));
    assert_eq!(rope.to_string(), "345");
}

#[test]
fn erase_of_nothing_is_refused() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert!(!rope.erase(2, 0));
    assert_eq!(rope.to_string(), "12345");
}

#[test]
fn erase_clamps_past_the_end() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert!(rope.erase(3, 100));
    assert_eq!(rope.to_string(), "123");

    assert!(rope.erase(30, 2));
    assert_eq!(rope.to_string(), "123");
}

#[test]
fn erase_then_insert_splices() {
    let mut rope = Rope::new();
    rope.append("World");
    rope.prepend("Hello, ");
    assert!(rope.erase(1, 7));
    assert_eq!(rope.to_string(), "Horld");
    assert!(rope.insert(1, "ello, W"));
    assert_eq!(rope.to_string(), "Hello, World");
}

#[test]
fn substring_takes_a_middle_range() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert_eq!(rope.substring(0..2), "12");
    assert_eq!(rope.substring(2..5), "345");
    assert_eq!(rope.substring(2..), "345");
    assert_eq!(rope.substring(..), "12345");
}

#[test]
fn substring_clamps_a_long_count() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert_eq!(rope.substring(0..100), "12345");
}

#[test]
fn substring_clamps_a_far_offset() {
    let mut rope = Rope::new();
    rope.append("12345");
    assert_eq!(rope.substring(30..32), "");
    assert_eq!(rope.substring(30..), "");
}

#[test]
fn at_walks_across_leaves() {
    let mut rope = Rope::new();
    rope.append("12");
    rope.append("34");
    rope.prepend("0");
    assert_eq!(rope.at(0).as_deref(), Some("0"));
    assert_eq!(rope.at(1).as_deref(), Some("1"));
    assert_eq!(rope.at(4).as_deref(), Some("4"));
    assert_eq!(rope.at(5), None);
}

#[test]
fn byte_rope_yields_bytes() {
    let mut rope = ByteRope::default();
    rope.append("12345");
    assert_eq!(rope.at(0), Some(b'1'));
    assert_eq!(rope.at(4), Some(b'5'));
    assert_eq!(rope.at(5), None);
    assert_eq!(rope.len(), 5);
    assert_eq!(rope.measure(), 5);
}

#[test]
fn byte_rope_indexes_in_bytes() {
    let mut rope = ByteRope::default();
    rope.append("15");
    assert!(rope.insert(1, "234"));
    assert_eq!(rope.to_string(), "12345");
    assert!(rope.erase(1, 3));
    assert_eq!(rope.to_string(), "15");
}

#[test]
fn byte_rope_inserts_inside_a_multibyte_char() {
    let mut rope = ByteRope::default();
    rope.append("é");
    assert_eq!(rope.measure(), 2);

    // position 1 is between é's two bytes; the insert must not refuse it
    assert!(rope.insert(1, "x"));
    assert_eq!(rope.len(), 3);
    assert_eq!(rope.to_bytes(), [0xC3, b'x', 0xA9]);
    assert_eq!(rope.at(0), Some(0xC3));
    assert_eq!(rope.at(1), Some(b'x'));
    assert_eq!(rope.at(2), Some(0xA9));
    assert_eq!(rope.to_string(), "\u{FFFD}x\u{FFFD}");
}

#[test]
fn byte_rope_erases_half_a_char_without_failing() {
    let mut rope = ByteRope::default();
    rope.append("héllo");
    assert!(rope.erase(2, 1));
    assert_eq!(rope.to_bytes(), b"h\xC3llo");
    assert_eq!(rope.len(), 5);
    assert_eq!(rope.to_string(), "h\u{FFFD}llo");
}

#[test]
fn byte_rope_substring_reassembles_torn_bytes() {
    let mut rope = ByteRope::default();
    rope.append("h");
    rope.append("éllo");
    assert_eq!(rope.substring(1..3), "é");
    assert_eq!(rope.substring(0..2), "h\u{FFFD}");
    assert_eq!(rope.substring(2..), "\u{FFFD}llo");
}

#[test]
fn clear_resets_to_empty() {
    let mut rope = Rope::new();
    rope.append("some text");
    rope.clear();
    assert_eq!(rope.len(), 0);
    assert_eq!(rope.to_string(), "");

    rope.append("fresh");
    assert_eq!(rope.to_string(), "fresh");
}

#[test]
fn clones_are_isolated_from_edits() {
    let mut first = Rope::new();
    first.append("0123456789");
    let second = first.clone();

    first.erase(2, 5);
    assert_eq!(first.to_string(), "01789");
    assert_eq!(second.to_string(), "0123456789");
}

#[test]
fn clones_are_isolated_in_both_directions() {
    let mut first = Rope::new();
    first.append("abcd");
    let mut second = first.clone();

    second.append("efgh");
    second.insert(0, "__");
    assert_eq!(first.to_string(), "abcd");
    assert_eq!(second.to_string(), "__abcdefgh");
}

#[test]
fn concat_joins_without_copying_either_rope() {
    let mut left = Rope::new();
    left.append("abcd");
    let mut right = Rope::new();
    right.append("efgh");

    let both = left.concat(&right);
    assert_eq!(both.to_string(), "abcdefgh");
    assert_eq!(left.to_string(), "abcd");
    assert_eq!(right.to_string(), "efgh");
}

#[test]
fn concat_with_an_empty_rope_shares_the_other() {
    let mut rope = Rope::new();
    rope.append("abcd");
    assert_eq!((&rope + &Rope::new()).to_string(), "abcd");
    assert_eq!((&Rope::new() + &rope).to_string(), "abcd");
}

#[test]
fn add_operators_concatenate() {
    let mut left = Rope::new();
    left.append("ab");
    let mut right = Rope::new();
    right.append("cd");

    assert_eq!((&left + &right).to_string(), "abcd");
    assert_eq!((left.clone() + right.clone()).to_string(), "abcd");
    assert_eq!((left.clone() + "cd").to_string(), "abcd");

    let mut rope = left;
    rope += right;
    rope += "!";
    assert_eq!(rope.to_string(), "abcd!");
}

#[test]
fn equality_ignores_tree_shape() {
    let mut grown = Rope::new();
    grown.append("ab");
    grown.append("cd");
    grown.prepend("__");

    let whole: Rope = Rope::from("__abcd");
    assert_eq!(grown, whole);
    assert!(grown == "__abcd");
    assert!(grown != "__abce");
}

#[test]
fn ropes_order_like_their_text() {
    let first: Rope = Rope::from("abc");
    let second: Rope = Rope::from("abd");
    assert!(first < second);
    assert!(first <= first.clone());
}

#[test]
fn from_an_empty_string_is_the_empty_rope() {
    let rope: Rope = Rope::from("");
    assert_eq!(rope, Rope::new());
    let rope: Rope = Rope::from(String::new());
    assert!(rope.is_empty());
}

#[test]
fn collects_from_chars() {
    let rope: Rope = "abcd".chars().collect();
    assert_eq!(rope.to_string(), "abcd");
}

#[test]
fn iterators_cross_leaf_seams() {
    let mut rope = Rope::new();
    rope.append("ab");
    rope.append("cd");
    assert_eq!(rope.chars().collect::<String>(), "abcd");
    assert_eq!(rope.bytes().collect::<Vec<u8>>(), b"abcd");
    assert_eq!(rope.strings().count(), 2);
}

#[test]
fn rebalance_after_repeated_appends() {
    let mut rope = Rope::new();
    for _ in 0..1_000 {
        rope.append("aaaaaaaaaa");
    }
    let text = rope.to_string();
    rope.rebalance();
    assert!(rope.is_balanced());
    assert_eq!(rope.to_string(), text);
}

#[test]
fn rebalance_after_repeated_prepends() {
    let mut rope = Rope::new();
    for _ in 0..1_000 {
        rope.prepend("aaaaaaaaaa");
    }
    rope.rebalance();
    assert!(rope.is_balanced());
    assert_eq!(rope.len(), 10_000);
}

#[test]
fn rebalance_is_idempotent() {
    let mut rope = Rope::new();
    for chunk in ["many", " small", " pieces", " of", " text"] {
        rope.prepend(chunk);
    }
    rope.rebalance();
    let once = rope.to_string();
    rope.rebalance();
    assert!(rope.is_balanced());
    assert_eq!(rope.to_string(), once);
}

#[test]
fn rebalance_drops_empty_leaves_left_by_edits() {
    let mut rope = Rope::new();
    rope.append("abcd");
    for _ in 0..64 {
        rope.erase(10, 1);
    }
    rope.rebalance();
    assert_eq!(rope.to_string(), "abcd");
    assert!(rope.is_balanced());
}

#[test]
fn a_deep_rope_survives_being_dropped() {
    let mut rope = Rope::new();
    for _ in 0..50_000 {
        rope.append("a");
    }
    let snapshot = rope.clone();
    drop(rope);
    assert_eq!(snapshot.len(), 50_000);
    drop(snapshot);
}

#[test]
fn clones_can_be_edited_on_another_thread() {
    use std::thread;

    let mut rope = Rope::new();
    for _ in 0..100 {
        rope.append("some shared text ");
    }
    let text = rope.to_string();

    let clone = rope.clone();
    let handle = thread::spawn(move || {
        let mut clone = clone;
        clone.erase(0, 5);
        clone.to_string()
    });

    rope.append("tail");
    let edited = handle.join().unwrap();

    assert_eq!(edited, &text[5..]);
    assert_eq!(rope.to_string(), format!("{}tail", text));
}
