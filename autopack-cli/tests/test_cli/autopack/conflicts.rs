use crate::add_test;
use crate::common::{Fixture, SAMPLE_TEXT};

add_test!(cancel_keeps_existing_target, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    fixture.write("out.zip", b"existing");
    let source = fixture.path("notes.txt");
    let target = fixture.path("out.zip");

    let output = fixture.run_with_stdin(&[&source, &target], b"c\n").await;
    assert_eq!(output.code(), 0);
    assert!(output.stdout.contains("Operation canceled"));
    assert_eq!(fixture.read("out.zip"), b"existing");
});

add_test!(invalid_choice_reprompts, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    fixture.write("out.zip", b"existing");
    let source = fixture.path("notes.txt");
    let target = fixture.path("out.zip");

    let output = fixture
        .run_with_stdin(&[&source, &target], b"x\nCANCEL\n")
        .await;
    assert_eq!(output.code(), 0);
    assert!(output.stdout.to_lowercase().contains("invalid choice"));
    assert_eq!(fixture.read("out.zip"), b"existing");
});

add_test!(closed_input_at_prompt, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    fixture.write("out.zip", b"existing");
    let source = fixture.path("notes.txt");
    let target = fixture.path("out.zip");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 99);
    assert!(output.stderr.starts_with("An unexpected error occurred: "));
    assert_eq!(fixture.read("out.zip"), b"existing");
});
