use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse dotenv-style contents into key/value pairs.
///
/// Blank lines and `#` comments are skipped. Each remaining line is split on
/// the first `=`; lines without one are ignored. Keys and values are
/// whitespace-trimmed and leading/trailing quote characters are stripped
/// from the value, each end independently.
pub fn parse(contents: &str) -> Vec<(String, String)> {
    let mut entries = Vec::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = strip_quotes(value.trim());
        entries.push((key.to_string(), value.to_string()));
    }

    entries
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Apply entries to the process environment, first-writer-wins: a variable
/// that is already set keeps its value.
pub fn apply(entries: &[(String, String)]) {
    for (key, value) in entries {
        if env::var_os(key).is_none() {
            env::set_var(key, value);
            debug!("Set {} from env file", key);
        } else {
            debug!("{} already set, keeping existing value", key);
        }
    }
}

/// Best-effort load of a dotenv file into the process environment.
///
/// A missing file is a silent no-op; any read error is logged and swallowed.
pub fn load(path: &Path) {
    if !path.exists() {
        debug!("No env file at {:?}, skipping", path);
        return;
    }

    match fs::read_to_string(path) {
        Ok(contents) => {
            let entries = parse(&contents);
            debug!("Loaded {} entries from {:?}", entries.len(), path);
            apply(&entries);
        }
        Err(e) => {
            warn!("Failed to read env file {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blanks_and_comments() {
        let entries = parse("\n# comment\n  \nFOO=bar\n");
        assert_eq!(entries, vec![("FOO".to_string(), "bar".to_string())]);
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let entries = parse("URL=https://example.com/?a=b");
        assert_eq!(
            entries,
            vec![("URL".to_string(), "https://example.com/?a=b".to_string())]
        );
    }

    #[test]
    fn test_parse_strips_quotes() {
        let entries = parse("A=\"bar\"\nB='baz'\nC=  \"spaced\"  ");
        assert_eq!(entries[0].1, "bar");
        assert_eq!(entries[1].1, "baz");
        assert_eq!(entries[2].1, "spaced");
    }

    #[test]
    fn test_parse_strips_unbalanced_and_mixed_quotes() {
        let entries = parse("A=\"half\nB=\"bar'\nC=''quoted''");
        assert_eq!(entries[0].1, "half");
        assert_eq!(entries[1].1, "bar");
        assert_eq!(entries[2].1, "quoted");
    }

    #[test]
    fn test_parse_ignores_lines_without_equals() {
        let entries = parse("not an assignment\nFOO=bar");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_apply_does_not_overwrite() {
        env::set_var("KEYGATE_TEST_APPLY_EXISTING", "original");
        apply(&[(
            "KEYGATE_TEST_APPLY_EXISTING".to_string(),
            "replaced".to_string(),
        )]);
        assert_eq!(
            env::var("KEYGATE_TEST_APPLY_EXISTING").unwrap(),
            "original"
        );
        env::remove_var("KEYGATE_TEST_APPLY_EXISTING");
    }

    #[test]
    fn test_apply_sets_missing() {
        env::remove_var("KEYGATE_TEST_APPLY_MISSING");
        apply(&[(
            "KEYGATE_TEST_APPLY_MISSING".to_string(),
            "value".to_string(),
        )]);
        assert_eq!(env::var("KEYGATE_TEST_APPLY_MISSING").unwrap(), "value");
        env::remove_var("KEYGATE_TEST_APPLY_MISSING");
    }

    #[test]
    fn test_load_missing_file_is_noop() {
        load(Path::new("/nonexistent/keygate/.env"));
    }
}
