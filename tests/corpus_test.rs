// Corpus loading integration tests
// Exercise the loader against real files on disk (CSV path; the
// spreadsheet and CSV paths share the same row-mapping logic).

use std::io::Write;
use std::path::Path;

use moa::corpus::{CorpusError, CorpusLoader, BODY_PLACEHOLDER, TITLE_PLACEHOLDER};

fn write_csv(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn loads_one_block_per_row_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "제안.csv",
        "제목,내용\n급식 개선,채식 메뉴 확대\n통학버스 증차,노선이 부족합니다\n도서관 개방,주말에도 열어주세요\n",
    );

    let loader = CorpusLoader::new();
    let context = loader.load(&path).unwrap();

    let blocks: Vec<&str> = context.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0], "[1번 제안] 제목: 급식 개선 / 내용: 채식 메뉴 확대");
    assert!(blocks[1].starts_with("[2번 제안]"));
    assert!(blocks[2].starts_with("[3번 제안]"));
}

#[test]
fn missing_fields_fall_back_to_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "제안.csv", "제목,내용\n,내용만 있음\n제목만 있음,\n");

    let loader = CorpusLoader::new();
    let context = loader.load(&path).unwrap();

    assert!(context.contains(&format!("제목: {} / 내용: 내용만 있음", TITLE_PLACEHOLDER)));
    assert!(context.contains(&format!("제목: 제목만 있음 / 내용: {}", BODY_PLACEHOLDER)));
}

#[test]
fn nonexistent_path_is_an_error_value() {
    let loader = CorpusLoader::new();
    let result = loader.load(Path::new("없는파일.xlsx"));
    assert!(matches!(result, Err(CorpusError::NotFound(_))));
}

#[test]
fn header_only_file_reports_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "빈파일.csv", "제목,내용\n");

    let loader = CorpusLoader::new();
    assert!(matches!(loader.load(&path), Err(CorpusError::Empty(_))));
}

#[test]
fn corrupt_spreadsheet_reports_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "깨진파일.xlsx", "this is not a zip archive");

    let loader = CorpusLoader::new();
    assert!(matches!(loader.load(&path), Err(CorpusError::Parse(_))));
}

#[test]
fn cache_is_keyed_by_path_and_ignores_later_edits() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "제안.csv", "제목,내용\n원래 제목,원래 내용\n");

    let loader = CorpusLoader::new();
    let first = loader.load(&path).unwrap();

    // Rewrite the file; the load-once contract means this is not observed.
    write_csv(dir.path(), "제안.csv", "제목,내용\n바뀐 제목,바뀐 내용\n");
    let second = loader.load(&path).unwrap();

    assert_eq!(&*first, &*second);
    assert!(second.contains("원래 제목"));
}
