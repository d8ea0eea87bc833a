//! File extension to MIME type table.

use linkshare_entity::link::model::file_extension;

/// Type used for unknown or missing extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for a file name, from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let Some(ext) = file_extension(file_name) else {
        return OCTET_STREAM;
    };

    match ext.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "tiff" | "tif" => "image/tiff",

        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "rtf" => "application/rtf",

        // Text
        "txt" => "text/plain",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "md" => "text/markdown",

        // Source code
        "java" => "text/x-java-source",
        "py" => "text/x-python",
        "c" | "h" => "text/x-c",
        "cpp" => "text/x-c++",
        "cs" => "text/x-csharp",
        "php" => "application/x-php",
        "rb" => "application/x-ruby",
        "go" => "application/x-go",
        "swift" => "text/x-swift",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "mov" => "video/quicktime",
        "wmv" => "video/x-ms-wmv",
        "mkv" => "video/x-matroska",
        "flv" => "video/x-flv",

        // Archives
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "7z" => "application/x-7z-compressed",
        "tar" => "application/x-tar",
        "gz" => "application/gzip",

        "apk" => "application/vnd.android.package-archive",

        _ => OCTET_STREAM,
    }
}
