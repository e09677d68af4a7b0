use masking::{Maskable, Masker};

#[derive(Clone, Debug, PartialEq, Maskable)]
pub struct Record {
    #[mask("filled", r#type = "zero", audit = "hash")]
    pub value: String,
    #[mask(audit = "fixed")]
    pub other: String,
}

fn main() {
    let masker = Masker::builder().annotation_key("type").build();
    let record = Record {
        value: String::from("abc"),
        other: String::from("def"),
    };
    let masked = masker.mask(&record).unwrap();
    assert_eq!(masked.value, "");
    assert_eq!(masked.other, "def");
}
