// src/models/extension.rs

// 更多扩展名见: https://www.iana.org/assignments/media-types/media-types.xhtml

const PHOTO: &[(&str, &str)] = &[
    ("image/avif", "avif"),
    ("image/bmp", "bmp"),
    ("image/gif", "gif"),
    ("image/ief", "ief"),
    ("image/jpg", "jpg"),
    ("image/jpeg", "jpeg"),
    ("image/heic", "heic"),
    ("image/heif", "heif"),
    ("image/png", "png"),
    ("image/svg+xml", "svg"),
    ("image/tiff", "tif"),
    ("image/vnd.microsoft.icon", "ico"),
    ("image/x-cmu-raster", "ras"),
    ("image/x-portable-anymap", "pnm"),
    ("image/x-portable-bitmap", "pbm"),
    ("image/x-portable-graymap", "pgm"),
    ("image/x-portable-pixmap", "ppm"),
    ("image/x-rgb", "rgb"),
    ("image/x-xbitmap", "xbm"),
    ("image/x-xpixmap", "xpm"),
    ("image/x-xwindowdump", "xwd"),
];

const VIDEO: &[(&str, &str)] = &[
    ("video/mp4", "mp4"),
    ("video/mpeg", "mpg"),
    ("video/quicktime", "qt"),
    ("video/webm", "webm"),
    ("video/x-msvideo", "avi"),
    ("video/x-sgi-movie", "movie"),
    ("video/x-matroska", "mkv"),
];

// 标准 MIME 表中常见的其余类型，按 guess 的优先扩展名给出
const GUESS: &[(&str, &str)] = &[
    ("audio/mpeg", "mp3"),
    ("audio/mp4", "m4a"),
    ("audio/ogg", "ogg"),
    ("audio/x-wav", "wav"),
    ("audio/flac", "flac"),
    ("audio/aac", "aac"),
    ("image/webp", "webp"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/bmp", "bmp"),
    ("image/svg+xml", "svg"),
    ("image/tiff", "tiff"),
    ("video/mp4", "mp4"),
    ("video/mpeg", "mpeg"),
    ("video/quicktime", "mov"),
    ("video/webm", "webm"),
    ("video/x-msvideo", "avi"),
    ("application/zip", "zip"),
    ("application/x-rar-compressed", "rar"),
    ("application/x-7z-compressed", "7z"),
    ("application/pdf", "pdf"),
    ("application/json", "json"),
    ("text/plain", "txt"),
    ("application/x-tgsticker", "tgs"),
];

fn lookup(table: &'static [(&'static str, &'static str)], mime_type: &str) -> Option<&'static str> {
    table.iter().find(|(mime, _)| *mime == mime_type).map(|(_, ext)| *ext)
}

/// MIME 类型与扩展名的静态对照表。
pub struct Extension;

impl Extension {
    pub fn photo(mime_type: &str) -> Option<&'static str> {
        lookup(PHOTO, mime_type)
    }

    pub fn video(mime_type: &str) -> Option<&'static str> {
        lookup(VIDEO, mime_type)
    }

    /// 从 MIME 类型猜测扩展名(不含点)。
    pub fn guess(mime_type: &str) -> Option<&'static str> {
        let normalized = mime_type.trim().to_ascii_lowercase();
        lookup(GUESS, &normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tables() {
        assert_eq!(Extension::photo("image/vnd.microsoft.icon"), Some("ico"));
        assert_eq!(Extension::video("video/x-matroska"), Some("mkv"));
        assert_eq!(Extension::video("image/png"), None);
        assert_eq!(Extension::guess("Audio/MPEG"), Some("mp3"));
        assert_eq!(Extension::guess("application/x-unknown"), None);
    }
}
