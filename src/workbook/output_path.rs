use std::path::{Path, PathBuf};

const RESTORED_SUFFIX: &str = "_restored";

/// Pick where the repaired copy of `input` is written.
///
/// The copy sits next to the input as `<stem>_restored<ext>`. When that name is
/// taken a counter is appended: `<stem>_restored1<ext>`, `<stem>_restored2<ext>`, ...
pub fn output_path_for(input: &Path) -> PathBuf {
    let directory = input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let extension = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_else(|| ".xlsx".to_string());

    let mut candidate = directory.join(format!("{stem}{RESTORED_SUFFIX}{extension}"));
    let mut counter = 1;
    while candidate.exists() {
        candidate = directory.join(format!("{stem}{RESTORED_SUFFIX}{counter}{extension}"));
        counter += 1;
    }
    candidate
}
