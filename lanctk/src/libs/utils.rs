//NOTE: This should be parsed by clap automatically, but Option<String> parsing is not supported out of the box as of now
pub fn strip_prefix(prefix: Option<String>) -> Option<String> {
    if let Some(prefix) = prefix {
        match prefix.as_ref() {
            "" => None,
            "\\0" => None,
            v => Some(v.to_string()),
        }
    } else {
        None
    }
}

// Same layout as printf %f
pub fn format_cm(cm: f64) -> String {
    format!("{cm:.6}")
}

// Chromosome names in maps may or may not carry the chr prefix
pub fn same_chromosome(a: &str, b: &str) -> bool {
    a == b || a.strip_prefix("chr").unwrap_or(a) == b.strip_prefix("chr").unwrap_or(b)
}
