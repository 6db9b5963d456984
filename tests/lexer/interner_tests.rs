//! Per-module string interner: dedup by value, distinct storage per module.

use bumpalo::Bump;
use choir::interner::Interner;

#[test]
fn repeated_interning_of_the_same_text_is_idempotent() {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let first = interner.intern("hello");
    for _ in 0..10 {
        assert_eq!(interner.intern("hello"), first);
    }
}

#[test]
fn two_interners_over_separate_arenas_resolve_independently() {
    let arena_a = Bump::new();
    let arena_b = Bump::new();
    let mut a = Interner::new(&arena_a);
    let mut b = Interner::new(&arena_b);

    let sym_a = a.intern("shared");
    let sym_b = b.intern("shared");

    assert_eq!(a.resolve(sym_a), "shared");
    assert_eq!(b.resolve(sym_b), "shared");
}

#[test]
fn empty_string_interns_like_any_other_value() {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let sym = interner.intern("");
    assert_eq!(interner.resolve(sym), "");
}

#[test]
fn many_distinct_strings_all_resolve_correctly() {
    let arena = Bump::new();
    let mut interner = Interner::new(&arena);
    let symbols: Vec<_> = (0..200).map(|i| interner.intern(&format!("ident_{i}"))).collect();
    for (i, sym) in symbols.iter().enumerate() {
        assert_eq!(interner.resolve(*sym), format!("ident_{i}"));
    }
}
