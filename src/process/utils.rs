use std::collections::{HashMap, HashSet};

/// Trim surrounding whitespace. Readers hand over decoded text, so quotes are content.
pub fn clean_str(raw: &str) -> String {
    raw.trim().to_string()
}

/// Render a numeric cell the way it reads in the sheet: `5.0` → `"5"`, `2.5` → `"2.5"`.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return String::new();
    }
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Make header names unique and non-empty.
///
/// - blank header at position `n` → `Unnamed: n`
/// - repeated header → `NAME.1`, `NAME.2`, ... (skipping suffixes already taken)
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let base: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = clean_str(h.as_ref());
            if h.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                h
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(base.len());

    for name in base {
        if taken.insert(name.clone()) {
            counts.insert(name.clone(), 0);
            out.push(name);
            continue;
        }
        let cnt = counts.entry(name.clone()).or_insert(0);
        let mut candidate;
        loop {
            *cnt += 1;
            candidate = format!("{}.{}", name, cnt);
            if !taken.contains(&candidate) {
                break;
            }
        }
        taken.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
