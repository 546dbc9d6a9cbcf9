//! Storage key schema
//!
//! Every persisted entry is scoped by an album (or the no-album working
//! scope) and assembled here. Key parts are joined with an ASCII unit
//! separator that album names and category labels are not allowed to
//! contain, so two different (album, label) pairs can never produce the
//! same key.

/// Separator between key parts. Rejected in album names on creation.
pub const SEP: char = '\u{1f}';

/// Key of the string set holding all album names
pub const ALBUMS: &str = "albums";

/// Key of the currently selected album name
pub const ACTIVE_ALBUM: &str = "active_album";

/// Upper bound on container indices cleaned up when an album is deleted
pub const MAX_CONTAINERS: u32 = 50;

/// Characters that may not appear in album names: the key separator plus
/// path separators, since album names become media folder names.
pub fn is_reserved(c: char) -> bool {
    c == SEP || c == '/' || c == '\\'
}

fn scoped(prefix: &str, album: Option<&str>, rest: &[&str]) -> String {
    // Empty scope marks the no-album working set; album names are
    // validated non-empty so the two cannot collide.
    let mut key = String::from(prefix);
    key.push(SEP);
    key.push_str(album.unwrap_or(""));
    for part in rest {
        key.push(SEP);
        key.push_str(part);
    }
    key
}

/// Capture counter for a category label within an album scope
pub fn counter(album: Option<&str>, label: &str) -> String {
    scoped("photo_count", album, &[label])
}

/// Persisted product type for an album scope
pub fn material_type(album: Option<&str>) -> String {
    scoped("material_type", album, &[])
}

/// Persisted total container count for an album scope
pub fn container_count(album: Option<&str>) -> String {
    scoped("num_containers", album, &[])
}

/// Container-name override for one container index within an album scope
pub fn container_name(album: Option<&str>, index: u32) -> String {
    scoped("container_name", album, &[&index.to_string()])
}
