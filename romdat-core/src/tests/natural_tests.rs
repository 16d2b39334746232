use super::*;

fn sorted(keys: &[&str]) -> Vec<String> {
    let mut keys: Vec<String> = keys.iter().map(|s| s.to_string()).collect();
    sort_natural(&mut keys);
    keys
}

#[test]
fn numeric_runs_compare_by_value() {
    assert_eq!(sorted(&["item10", "item2"]), vec!["item2", "item10"]);
}

#[test]
fn text_runs_ignore_case() {
    assert_eq!(sorted(&["B", "a"]), vec!["a", "B"]);
}

#[test]
fn mixed_keys() {
    assert_eq!(
        sorted(&["sf2ce", "sf2", "sf10", "Sf2a", "1943", "1942"]),
        vec!["1942", "1943", "sf2", "Sf2a", "sf2ce", "sf10"]
    );
}

#[test]
fn leading_zeros_tie_break_lexicographically() {
    assert_eq!(natural_cmp("a01", "a1"), "a01".cmp("a1"));
    assert_eq!(sorted(&["a1", "a01"]), vec!["a01", "a1"]);
}

#[test]
fn case_tie_breaks_lexicographically() {
    assert_eq!(natural_cmp("ABC", "abc"), std::cmp::Ordering::Less);
}

#[test]
fn prefix_sorts_first() {
    assert_eq!(sorted(&["pacman2", "pacman"]), vec!["pacman", "pacman2"]);
}

#[test]
fn huge_numbers_do_not_overflow() {
    assert_eq!(
        sorted(&["x99999999999999999999999", "x100000000000000000000000"]),
        vec!["x99999999999999999999999", "x100000000000000000000000"]
    );
}

#[test]
fn sort_is_stable() {
    let mut keys = vec![("a", 1), ("b", 2), ("a", 3)];
    keys.sort_by(|x, y| natural_cmp(x.0, y.0));
    assert_eq!(keys, vec![("a", 1), ("a", 3), ("b", 2)]);
}
