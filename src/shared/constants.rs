/// Header carrying the acting user's id, set by the host platform
pub const USER_ID_HEADER: &str = "x-user-id";

/// Cookie holding the notice shown after a redirect
pub const FLASH_COOKIE: &str = "flash";

// =============================================================================
// ROUTES
// =============================================================================

/// Listing of file records; target of delete/restore redirects
pub const FILE_LISTING_PATH: &str = "/api/file-manager/files";

/// Detail of one file record; target of edit redirects
pub fn file_detail_path(file_id: i64) -> String {
    format!("{}/{}", FILE_LISTING_PATH, file_id)
}

/// Restore action for one file record, used as the undo link after delete
pub fn file_restore_path(file_id: i64) -> String {
    format!("{}/{}/restore", FILE_LISTING_PATH, file_id)
}

// =============================================================================
// TRANSLATION KEYS
// =============================================================================

/// Placeholder label of the file selection control
pub const SELECT_DEFAULT_KEY: &str = "ms.file_manager.select.default";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(file_detail_path(42), "/api/file-manager/files/42");
        assert_eq!(file_restore_path(7), "/api/file-manager/files/7/restore");
    }
}
