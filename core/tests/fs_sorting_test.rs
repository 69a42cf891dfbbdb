use std::path::Path;

use comic_engine::fs::{Token, natural_cmp, natural_cmp_path, tokenize};

#[test]
fn natural_cmp_orders_numeric_sections() {
    let mut names = vec!["page10.png", "page2.png", "page1.png", "page11.png"];
    names.sort_by(|a, b| natural_cmp(a, b));
    assert_eq!(names, vec!["page1.png", "page2.png", "page10.png", "page11.png"]);
}

#[test]
fn natural_cmp_path_ignores_case() {
    let a = Path::new("Chapter 1/001.PNG");
    let b = Path::new("chapter 1/2.png");
    assert!(natural_cmp_path(a, b).is_lt());
    assert!(natural_cmp_path(b, a).is_gt());
}

#[test]
fn tokenize_splits_numbers_and_text() {
    let tokens = tokenize("Vol12-Chap003");
    assert_eq!(
        tokens,
        vec![
            Token::Text("Vol"),
            Token::Number("12", 12),
            Token::Text("-Chap"),
            Token::Number("003", 3),
        ]
    );
}

#[test]
fn tokenize_handles_empty_and_numeric_only_input() {
    assert!(tokenize("").is_empty());
    assert_eq!(tokenize("0042"), vec![Token::Number("0042", 42)]);
}
