//! Upload filename policy.
//!
//! Only a small set of raster image extensions is accepted, and
//! client-supplied filenames are flattened to a safe basename before
//! they touch the filesystem.

/// Extensions the upload endpoint accepts, lowercase.
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// The lowercased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Whether `filename` carries one of the [`ALLOWED_EXTENSIONS`].
pub fn is_allowed(filename: &str) -> bool {
    match extension(filename) {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Path components are discarded, anything outside `[A-Za-z0-9._-]`
/// becomes `_`, and leading dots are stripped so the result can never
/// escape the upload directory or hide itself. May return an empty
/// string; callers must treat that as an invalid filename.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = basename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions() {
        assert!(is_allowed("photo.png"));
        assert!(is_allowed("photo.jpg"));
        assert!(is_allowed("photo.jpeg"));
        assert!(is_allowed("photo.gif"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(is_allowed("PHOTO.PNG"));
        assert!(is_allowed("photo.JpEg"));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_allowed("archive.zip"));
        assert!(!is_allowed("script.sh"));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(!is_allowed("photo"));
        assert!(!is_allowed(""));
    }

    #[test]
    fn sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("my-shot_2.jpeg"), "my-shot_2.jpeg");
    }

    #[test]
    fn sanitize_flattens_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/abs/path/photo.png"), "photo.png");
        assert_eq!(sanitize_filename("dir\\photo.png"), "photo.png");
    }

    #[test]
    fn sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my photo!.png"), "my_photo_.png");
        assert_eq!(sanitize_filename("h\u{e9}llo.png"), "h_llo.png");
    }

    #[test]
    fn sanitize_strips_leading_dots() {
        assert_eq!(sanitize_filename(".hidden.png"), "hidden.png");
        assert_eq!(sanitize_filename("..."), "");
    }
}
