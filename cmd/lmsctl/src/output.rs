use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Placeholder for absent values in tables.
pub fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

/// Trim long cells so columns stay aligned.
pub fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

pub fn print_empty(what: &str) {
    println!("(no {} found)", what);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_values() {
        assert_eq!(clip("Dune", 10), "Dune");
        assert_eq!(clip("The Left Hand of Darkness", 10), "The Left …");
    }

    #[test]
    fn dash_for_blank() {
        assert_eq!(or_dash(None), "-");
        assert_eq!(or_dash(Some(" ")), "-");
        assert_eq!(or_dash(Some("2024-01-01")), "2024-01-01");
    }
}
