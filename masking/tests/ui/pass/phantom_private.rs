use std::marker::PhantomData;

use masking::{Maskable, Masker};

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Id<T> {
    #[mask("hash")]
    pub value: String,
    marker: PhantomData<T>,
}

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Cache<V: Clone> {
    pub label: String,
    entries: Vec<V>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NotMaskable;

fn main() {
    let masker = Masker::new();
    let id: Id<NotMaskable> = Id {
        value: String::from("abc"),
        marker: PhantomData,
    };
    assert_eq!(masker.mask(&id).unwrap().value.len(), 40);

    let cache = Cache {
        label: String::from("users"),
        entries: vec![NotMaskable],
    };
    assert!(masker.mask(&cache).unwrap().entries.is_empty());
}
