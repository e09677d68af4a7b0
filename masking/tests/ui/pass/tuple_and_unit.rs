use masking::{Maskable, Masker};

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Token(#[mask("fixed")] pub String, pub u8);

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Marker;

fn main() {
    let masker = Masker::new();
    let masked = masker.mask(&Token(String::from("abc"), 3)).unwrap();
    assert_eq!(masked, Token(String::from("********"), 3));
    assert_eq!(masker.mask(&Marker).unwrap(), Marker);
}
