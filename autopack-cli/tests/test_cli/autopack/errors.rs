use crate::add_test;
use crate::common::{Fixture, SAMPLE_TEXT};

add_test!(missing_source, async {
    let mut fixture = Fixture::new();
    let source = fixture.path("missing.txt");
    let target = fixture.path("out.zip");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 2);
    assert!(output.stderr.starts_with("Error: Source path"));
    assert!(!fixture.file_exists("out.zip"));
});

add_test!(source_equals_target, async {
    let mut fixture = Fixture::with_file("bundle.zip", b"PK\x03\x04 body");
    let path = fixture.path("bundle.zip");

    let output = fixture.run_cargo(&[&path, &path]).await;
    assert_eq!(output.code(), 4);
});

add_test!(target_without_format, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    let source = fixture.path("notes.txt");
    let target = fixture.path("backup");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 5);
    assert!(output.stderr.contains("--format"));
});

add_test!(unknown_format_override, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    let source = fixture.path("notes.txt");
    let target = fixture.path("backup.bin");

    let output = fixture
        .run_cargo(&["--format", "arj", &source, &target])
        .await;
    assert_eq!(output.code(), 5);
});

add_test!(extract_onto_existing_file, async {
    let mut fixture = Fixture::with_file("bundle.zip", b"PK\x03\x04 body");
    fixture.write("occupied.txt", b"x");
    let source = fixture.path("bundle.zip");
    let target = fixture.path("occupied.txt");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 3);
});

add_test!(split_part_without_main_file, async {
    let mut fixture = Fixture::with_file("backup.z01", b"\x00\x01\x02\x03 split data");
    let source = fixture.path("backup.z01");
    let target = fixture.path("restored");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 2);
    assert!(output.stderr.contains("backup.zip"));
});

add_test!(rar_cannot_be_created, async {
    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    let source = fixture.path("notes.txt");
    let target = fixture.path("notes.rar");

    let output = fixture.run_cargo(&[&source, &target]).await;
    assert_eq!(output.code(), 5);
});
