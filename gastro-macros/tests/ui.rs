#[test]
fn app_event_expansions_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/*.rs");
}
