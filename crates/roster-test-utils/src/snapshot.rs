//! Golden-file comparison for rendered markup
//!
//! Snapshots live next to the test that owns them. Set
//! `ROSTER_UPDATE_SNAPSHOTS=1` to rewrite them from the current output.

use std::path::Path;

/// Environment switch that rewrites snapshots instead of comparing
pub const UPDATE_SNAPSHOTS: &str = "ROSTER_UPDATE_SNAPSHOTS";

/// Compare `actual` against `<dir>/<name>.html`
///
/// # Panics
/// When the snapshot is missing or differs (test helper)
pub fn assert_snapshot(dir: impl AsRef<Path>, name: &str, actual: &str) {
    let path = dir.as_ref().join(format!("{name}.html"));
    if std::env::var_os(UPDATE_SNAPSHOTS).is_some() {
        std::fs::write(&path, actual).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
        return;
    }
    let expected = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read snapshot {}: {e}", path.display()));
    pretty_assertions::assert_eq!(expected, actual, "snapshot {name} differs");
}
