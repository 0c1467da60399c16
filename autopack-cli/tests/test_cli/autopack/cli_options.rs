use crate::add_test;
use crate::common::Fixture;

add_test!(help_exits_successfully, async {
    let mut fixture = Fixture::new();
    let output = fixture.run_cargo(&["--help"]).await;
    assert_eq!(output.code(), 0);
    assert!(output.stdout.contains("Usage"));
    assert!(output.stdout.contains("--exclude"));
});

add_test!(version_exits_successfully, async {
    let mut fixture = Fixture::new();
    let output = fixture.run_cargo(&["--version"]).await;
    assert_eq!(output.code(), 0);
    assert!(output.stdout.starts_with("autopack "));
});

add_test!(no_arguments_is_missing_args, async {
    let mut fixture = Fixture::new();
    let output = fixture.run_cargo(&[]).await;
    assert_eq!(output.code(), 1);
    assert_eq!(
        output.stderr.trim_end(),
        "Error: Missing arguments. Source path missing"
    );
});

add_test!(target_is_required, async {
    let mut fixture = Fixture::with_file("notes.txt", b"hello");
    let source = fixture.path("notes.txt");
    let output = fixture.run_cargo(&[&source]).await;
    assert_eq!(output.code(), 1);
    assert!(output.stderr.contains("Target path missing"));
});

add_test!(out_of_range_level_is_rejected, async {
    let mut fixture = Fixture::new();
    let output = fixture.run_cargo(&["--level=12", "a", "b.zip"]).await;
    assert_eq!(output.code(), 1);
});

add_test!(unknown_option_is_rejected, async {
    let mut fixture = Fixture::new();
    let output = fixture.run_cargo(&["--no-such-flag", "a", "b.zip"]).await;
    assert_eq!(output.code(), 1);
});
