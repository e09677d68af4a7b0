use masking::{Maskable, Masker};

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Page<T> {
    #[mask("zero")]
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Item {
    #[mask("filled")]
    pub name: String,
}

fn main() {
    let masker = Masker::new();
    let page = Page {
        items: vec![Item {
            name: String::from("Usagi"),
        }],
        total: 1,
    };
    let masked = masker.mask(&page).unwrap();
    assert!(masked.items.is_empty());
    assert_eq!(masked.total, 1);
}
