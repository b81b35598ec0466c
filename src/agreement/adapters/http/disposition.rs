//! `Content-Disposition` file name extraction.

/// Returns the `filename` parameter of a `Content-Disposition` header.
///
/// Quoted and bare values are accepted. Path separators are stripped so the
/// result is always a plain file name.
pub(super) fn file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|part| part.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("filename"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .and_then(|value| value.rsplit(['/', '\\']).next())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}
