use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Page image extensions (lowercase, without the dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Archive extensions readable as ZIP containers.
pub const ZIP_EXTENSIONS: &[&str] = &["cbz", "zip"];

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension().and_then(OsStr::to_str).map(str::to_ascii_lowercase)
}

pub fn is_hidden(path: &Path) -> bool {
    path.file_name().and_then(OsStr::to_str).is_some_and(|name| name.starts_with('.'))
}

pub fn is_supported_image(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_zip_archive(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| ZIP_EXTENSIONS.contains(&ext.as_str()))
}

/// Case-insensitive natural ordering of page paths (`page2` before `page10`).
pub fn natural_cmp_path(a: &Path, b: &Path) -> Ordering {
    let a = a.to_string_lossy().to_lowercase();
    let b = b.to_string_lossy().to_lowercase();
    natural_cmp(&a, &b)
}

/// Compare strings chunk by chunk, treating digit runs as numbers.
///
/// Equal numbers with different zero padding order the shorter run first; digit runs sort
/// before text at the same position.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let lhs = tokenize(a);
    let rhs = tokenize(b);

    let by_token = lhs.iter().zip(rhs.iter()).map(|pair| match pair {
        (Token::Number(a_digits, a_value), Token::Number(b_digits, b_value)) => {
            a_value.cmp(b_value).then_with(|| a_digits.len().cmp(&b_digits.len()))
        }
        (Token::Text(a_text), Token::Text(b_text)) => a_text.cmp(b_text),
        (Token::Number(..), Token::Text(_)) => Ordering::Less,
        (Token::Text(_), Token::Number(..)) => Ordering::Greater,
    });

    by_token
        .fold(Ordering::Equal, Ordering::then)
        .then_with(|| lhs.len().cmp(&rhs.len()))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, PartialEq)]
pub enum Token<'a> {
    Text(&'a str),
    /// Digit run and its numeric value (saturating for absurdly long runs).
    Number(&'a str, u128),
}

/// Split `input` into alternating text and digit runs.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let digits = rest.starts_with(|c: char| c.is_ascii_digit());
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        if digits {
            tokens.push(Token::Number(run, run.parse().unwrap_or(u128::MAX)));
        } else {
            tokens.push(Token::Text(run));
        }
        rest = tail;
    }

    tokens
}

/// Reduce an archive entry name to a safe relative path, rejecting escapes.
pub fn sanitize_zip_path(path: &Path) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) | Component::RootDir => return None,
        }
    }
    (!clean.as_os_str().is_empty()).then_some(clean)
}
