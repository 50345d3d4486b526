use std::collections::HashSet;
use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Joins a relative path to `root`. Absolute paths are kept.
pub fn resolve_path(root: &Path, path: &str) -> String {
    let p = Path::new(path);
    if p.is_absolute() {
        path.to_string()
    } else {
        root.join(p).display().to_string()
    }
}

/// Next to the input: `responses_scores.xlsx`, or the `responses_scores` directory for csv.
pub fn default_output_path(input: &str, format: &str) -> String {
    let p = Path::new(input);
    let stem = p
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("responses");
    let name = match format {
        "xlsx" => format!("{}_scores.xlsx", stem),
        _ => format!("{}_scores", stem),
    };
    match p.parent() {
        Some(parent) => parent.join(name).display().to_string(),
        None => name,
    }
}

/// A file name stem for a company sheet. Path separators and reserved characters are replaced.
pub fn company_file_stem(company: &str) -> String {
    let cleaned: String = company
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Returns `name`, or `name (2)`, `name (3)`... if a name differing only by case
/// was already taken. The result has at most `max_chars` characters.
pub fn unique_name(name: &str, used: &mut HashSet<String>, max_chars: usize) -> String {
    let mut n = 1;
    loop {
        let suffix = if n == 1 {
            String::new()
        } else {
            format!(" ({})", n)
        };
        let keep = max_chars.saturating_sub(suffix.chars().count());
        let candidate: String = name.chars().take(keep).chain(suffix.chars()).collect();
        if used.insert(candidate.to_lowercase()) {
            return candidate;
        }
        n += 1;
    }
}
