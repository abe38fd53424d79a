use crate::pattern;

const FOLDER_REPLACEMENTS: [(&str, &str); 10] = [
    ("č", "c"),
    ("ć", "c"),
    ("ž", "z"),
    ("š", "s"),
    ("đ", "d"),
    ("Č", "c"),
    ("Ć", "c"),
    ("Ž", "z"),
    ("Š", "s"),
    ("Đ", "d"),
];

pub fn sanitize_file_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut name = raw.to_string();
    if !name.to_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }

    let split_at = name.len() - ".pdf".len();
    let (stem, extension) = name.split_at(split_at);

    let safe: String = stem
        .chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_' || *ch == '-' || ch.is_whitespace())
        .collect();

    format!("{}{}", safe.trim().replace(' ', "_"), extension)
}

pub fn file_name_from_pattern(lines: &[String], file_pattern: &str) -> String {
    let raw = pattern::resolve(lines, file_pattern);
    if raw.is_empty() {
        return String::new();
    }
    sanitize_file_name(&raw)
}

pub fn normalize_folder_name(raw: &str) -> String {
    let mut name = raw.to_string();
    for (from, to) in FOLDER_REPLACEMENTS {
        name = name.replace(from, to);
    }

    name.chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_')
        .collect::<String>()
        .to_lowercase()
}
