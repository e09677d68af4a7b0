mod derive_maskable {
    #[test]
    fn generic_struct_compiles() {
        let t = trybuild::TestCases::new();
        t.pass("tests/ui/pass/generic_struct.rs");
    }

    #[test]
    fn tuple_and_unit_structs_compile() {
        let t = trybuild::TestCases::new();
        t.pass("tests/ui/pass/tuple_and_unit.rs");
    }

    #[test]
    fn phantom_and_private_generics_compile() {
        let t = trybuild::TestCases::new();
        t.pass("tests/ui/pass/phantom_private.rs");
    }

    #[test]
    fn keyed_annotations_compile() {
        let t = trybuild::TestCases::new();
        t.pass("tests/ui/pass/keyed_annotations.rs");
    }
}
