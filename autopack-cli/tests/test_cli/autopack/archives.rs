use crate::add_test;
use crate::common::{has_tool, Fixture, SAMPLE_TEXT};

add_test!(tar_gz_round_trip, async {
    if !has_tool("tar") || !has_tool("gzip") {
        return;
    }

    let mut fixture = Fixture::with_file("data/notes.txt", SAMPLE_TEXT.as_bytes());
    fixture.write("data/nested/more.txt", b"more");
    let source = fixture.path("data");
    let archive = fixture.path("data.tar.gz");
    let restored = fixture.path("restored");

    let output = fixture.run_cargo(&[&source, &archive]).await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert!(output.stdout.contains("Operation complete"));
    assert!(fixture.file_exists("data.tar.gz"));

    let output = fixture.run_cargo(&[&archive, &restored]).await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert_eq!(fixture.read("restored/data/notes.txt"), SAMPLE_TEXT.as_bytes());
    assert_eq!(fixture.read("restored/data/nested/more.txt"), b"more");
});

add_test!(contents_mode_archives_directory_contents, async {
    if !has_tool("tar") {
        return;
    }

    let mut fixture = Fixture::with_file("data/notes.txt", SAMPLE_TEXT.as_bytes());
    let source = format!("{}/", fixture.path("data"));
    let archive = fixture.path("flat.tar");
    let restored = fixture.path("restored");

    let output = fixture.run_cargo(&[&source, &archive]).await;
    assert_eq!(output.code(), 0, "{}", output.stderr);

    let output = fixture.run_cargo(&[&archive, &restored]).await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert_eq!(fixture.read("restored/notes.txt"), SAMPLE_TEXT.as_bytes());
});

add_test!(excluded_files_stay_out_of_the_archive, async {
    if !has_tool("tar") {
        return;
    }

    let mut fixture = Fixture::with_file("data/keep.txt", b"keep");
    fixture.write("data/skip.log", b"skip");
    let source = fixture.path("data");
    let archive = fixture.path("filtered.tar");
    let restored = fixture.path("restored");

    let output = fixture
        .run_cargo(&["--exclude", r".*\.log", "--verbose", &source, &archive])
        .await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert!(output.stdout.contains("included 1, excluded 1"));

    let output = fixture.run_cargo(&[&archive, &restored]).await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert!(fixture.file_exists("restored/data/keep.txt"));
    assert!(!fixture.file_exists("restored/data/skip.log"));
});

add_test!(benchmark_and_verify_report, async {
    if !has_tool("tar") {
        return;
    }

    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    let source = fixture.path("notes.txt");
    let archive = fixture.path("notes.tar");

    let output = fixture
        .run_cargo(&["--benchmark", "--verify", &source, &archive])
        .await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert!(output.stdout.contains("Archive verification successful"));
    assert!(output.stdout.contains("Operation completed in "));
});

add_test!(rename_on_conflict_uses_default_name, async {
    if !has_tool("tar") {
        return;
    }

    let mut fixture = Fixture::with_file("notes.txt", SAMPLE_TEXT.as_bytes());
    fixture.write("out.tar", b"existing");
    let source = fixture.path("notes.txt");
    let archive = fixture.path("out.tar");

    let output = fixture
        .run_with_stdin(&[&source, &archive], b"r\n\n")
        .await;
    assert_eq!(output.code(), 0, "{}", output.stderr);
    assert_eq!(fixture.read("out.tar"), b"existing");
    assert!(fixture.file_exists("out_1.tar"));
});
