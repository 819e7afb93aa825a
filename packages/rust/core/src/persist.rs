//! Writing the final playlist list to disk.
//!
//! The output directory must already exist; this module never creates
//! it. The file name is derived from the page title, sanitized to a
//! conservative filename charset and disambiguated with a short random
//! suffix so repeated runs with the same title never collide.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{debug, info};
use url::Url;

use playscout_shared::{PlayscoutError, Result};

/// Base name used when sanitization leaves nothing of the title.
const FALLBACK_BASENAME: &str = "untitled_playlist_data";

/// Characters rejected by the most restrictive common filesystems.
const ILLEGAL_CHARS: &[char] = &['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Maximum length (in characters) of the sanitized base name.
const MAX_BASENAME_CHARS: usize = 200;

/// Length of the random disambiguating suffix.
const SUFFIX_LEN: usize = 3;

/// Suffix alphabet: uppercase letters and digits.
const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Write the result file and return its absolute path.
///
/// `playlist_urls` are deduplicated and sorted here regardless of what
/// the strategies produced, so the persisted file is always canonical.
/// An empty list writes a single diagnostic sentence naming
/// `scanned_url` instead.
pub fn persist(
    output_dir: &Path,
    title: &str,
    playlist_urls: &[String],
    scanned_url: &Url,
    rng: &mut impl Rng,
) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(PlayscoutError::config(format!(
            "output directory does not exist: {}",
            output_dir.display()
        )));
    }

    // Checked just above, so canonicalize only fails on races.
    let output_dir = std::fs::canonicalize(output_dir)
        .map_err(|e| PlayscoutError::io(output_dir, e))?;

    let filename = format!(
        "{}_{}.txt",
        sanitize_basename(title),
        random_suffix(rng)
    );
    let path = output_dir.join(filename);

    let content = if playlist_urls.is_empty() {
        debug!(%scanned_url, "persisting empty-result notice");
        format!("No playlist URLs found on {scanned_url}.\n")
    } else {
        let unique: BTreeSet<&str> = playlist_urls.iter().map(String::as_str).collect();
        let mut joined = unique.into_iter().collect::<Vec<_>>().join("\n");
        joined.push('\n');
        joined
    };

    std::fs::write(&path, content).map_err(|e| PlayscoutError::io(&path, e))?;

    info!(path = %path.display(), urls = playlist_urls.len(), "results saved");
    Ok(path)
}

/// Reduce a page title to a conservative filename base.
pub fn sanitize_basename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .take(MAX_BASENAME_CHARS)
        .collect();

    let trimmed = cleaned.trim_matches([' ', '.']);
    if trimmed.is_empty() {
        FALLBACK_BASENAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Short uppercase-alphanumeric suffix from the injected RNG.
fn random_suffix(rng: &mut impl Rng) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use playscout_shared::playlist::canonical_url;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn scanned() -> Url {
        Url::parse("https://x/ch/releases").unwrap()
    }

    #[test]
    fn sanitize_strips_illegal_chars_and_trailing_dots() {
        assert_eq!(
            sanitize_basename(r#"My Channel: "Releases" <2024>?.."#),
            "My Channel Releases 2024"
        );
    }

    #[test]
    fn sanitize_caps_length_and_falls_back_when_empty() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_basename(&long).chars().count(), 200);
        assert_eq!(sanitize_basename("///???"), FALLBACK_BASENAME);
        assert_eq!(sanitize_basename("  .. "), FALLBACK_BASENAME);
    }

    #[test]
    fn missing_output_dir_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let mut rng = StdRng::seed_from_u64(1);

        let err = persist(&missing, "t", &[], &scanned(), &mut rng).unwrap_err();
        assert!(matches!(err, PlayscoutError::Config { .. }));
    }

    #[test]
    fn urls_are_deduplicated_sorted_with_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let urls = vec![
            canonical_url("PLbbb"),
            canonical_url("PLaaa"),
            canonical_url("PLbbb"),
        ];

        let path = persist(dir.path(), "My Channel", &urls, &scanned(), &mut rng).unwrap();
        assert!(path.is_absolute());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            format!("{}\n{}\n", canonical_url("PLaaa"), canonical_url("PLbbb"))
        );
    }

    #[test]
    fn empty_list_writes_the_notice_sentence() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let path = persist(dir.path(), "My Channel", &[], &scanned(), &mut rng).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "No playlist URLs found on https://x/ch/releases.\n"
        );
    }

    #[test]
    fn repeated_runs_differ_only_in_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let urls = vec![canonical_url("PLaaa")];

        let mut rng_a = StdRng::seed_from_u64(10);
        let mut rng_b = StdRng::seed_from_u64(20);
        let path_a = persist(dir.path(), "Same Title", &urls, &scanned(), &mut rng_a).unwrap();
        let path_b = persist(dir.path(), "Same Title", &urls, &scanned(), &mut rng_b).unwrap();

        assert_ne!(path_a, path_b);
        assert_eq!(
            std::fs::read_to_string(&path_a).unwrap(),
            std::fs::read_to_string(&path_b).unwrap()
        );

        for path in [&path_a, &path_b] {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("Same Title_"));
            assert!(name.ends_with(".txt"));
        }
    }
}
