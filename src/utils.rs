// src/utils.rs

use crate::{
    constants,
    error::{AppError, AppResult},
    models::{KeyWord, extension::Extension},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use log::{debug, warn};
use regex::Regex;
use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

static ILLEGAL_TITLE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[/\\:*?"<>|\n]"#).unwrap());

const WEB_LOCATION_FLAG: i32 = 1 << 24;
const FILE_REFERENCE_FLAG: i32 = 1 << 25;

/// 路径拆分后的目录和文件名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPath {
    pub directory: PathBuf,
    pub file_name: String,
}

pub fn split_path(path: &Path) -> SplitPath {
    SplitPath {
        directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        file_name: path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default(),
    }
}

pub fn compare_file_size(a_size: u64, b_size: u64) -> bool {
    a_size == b_size
}

/// 本地已有同名文件且大小与服务器一致。
pub fn is_file_duplicate(file_path: &Path, server_file_size: u64) -> bool {
    file_path.is_file()
        && fs::metadata(file_path).is_ok_and(|m| compare_file_size(m.len(), server_file_size))
}

/// 把标题中不能出现在文件名里的字符替换为 `_`。
pub fn validate_title(title: &str) -> String {
    ILLEGAL_TITLE_CHARS_RE.replace_all(title, "_").into_owned()
}

fn safe_truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut i = max_bytes;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    &s[..i]
}

/// 按 UTF-8 字节数截断文件名，扩展名原样保留。
pub fn truncate_filename(path: &Path, limit: usize) -> PathBuf {
    let parent = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stem_max = limit.saturating_sub(extension.len());
    let truncated = safe_truncate_utf8(&stem, stem_max);
    parent.join(format!("{}{}", truncated, extension))
}

/// 删除文件或目录。不存在时视为删除成功。
pub fn safe_delete(path: &Path) -> bool {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else if path.is_file() {
        fs::remove_file(path)
    } else {
        return true;
    };
    match result {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!("删除\"{}\"失败,{}:\"{}\"", path.display(), KeyWord::Reason, e);
            false
        }
    }
}

/// 移动文件的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// 保存路径不是目录，已改为保存到默认目录。
    MovedToDefault(PathBuf),
    AlreadyExists(String),
    PermissionDenied(String),
    Other(String),
}

fn move_file_into(file_path: &Path, directory: &Path) -> io::Result<()> {
    let file_name = file_path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "路径中没有文件名"))?;
    let target = directory.join(file_name);
    if target.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("目标文件\"{}\"已存在", target.display()),
        ));
    }
    // 跨设备时 rename 会失败，退化为复制后删除
    fs::rename(file_path, &target).or_else(|_| {
        fs::copy(file_path, &target)?;
        fs::remove_file(file_path)
    })
}

fn classify_move_error(save_directory: &Path, e: io::Error) -> MoveResult {
    match e.kind() {
        io::ErrorKind::AlreadyExists => MoveResult::AlreadyExists(format!(
            "\"{}\"已存在,不能重复保存,{}:\"{}\"",
            save_directory.display(),
            KeyWord::Reason,
            e
        )),
        io::ErrorKind::PermissionDenied => MoveResult::PermissionDenied(format!(
            "\"{}\"进程无法访问,可能是任务重复分配问题,{}:\"{}\"",
            save_directory.display(),
            KeyWord::Reason,
            e
        )),
        _ => MoveResult::Other(format!("意外的错误,{}:\"{}\"", KeyWord::Reason, e)),
    }
}

/// 把下载完成的临时文件移入保存目录；保存路径存在但不是目录时改为当前目录下的默认目录。
pub fn move_to_save_directory(temp_file_path: &Path, save_directory: &Path) -> MoveResult {
    if save_directory.exists() && !save_directory.is_dir() {
        let default_dir = env::current_dir()
            .unwrap_or_default()
            .join(constants::DEFAULT_SAVE_DIR);
        let moved = fs::create_dir_all(&default_dir).and_then(|_| move_file_into(temp_file_path, &default_dir));
        return match moved {
            Ok(()) => {
                warn!(
                    "\"{}\"不是一个目录,已将文件下载到默认目录\"{}\"。",
                    save_directory.display(),
                    default_dir.display()
                );
                MoveResult::MovedToDefault(default_dir)
            }
            Err(e) => classify_move_error(&default_dir, e),
        };
    }
    match fs::create_dir_all(save_directory).and_then(|_| move_file_into(temp_file_path, save_directory)) {
        Ok(()) => {
            debug!("已移动\"{}\"到\"{}\"", temp_file_path.display(), save_directory.display());
            MoveResult::Moved
        }
        Err(e) => classify_move_error(save_directory, e),
    }
}

/// Telegram 文件 ID 中编码的文件类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Thumbnail = 0,
    ChatPhoto = 1,
    Photo = 2,
    Voice = 3,
    Video = 4,
    Document = 5,
    Encrypted = 6,
    Temp = 7,
    Sticker = 8,
    Audio = 9,
    Animation = 10,
    EncryptedThumbnail = 11,
    Wallpaper = 12,
    VideoNote = 13,
    SecureRaw = 14,
    Secure = 15,
    Background = 16,
    DocumentAsFile = 17,
}

impl TryFrom<i32> for FileType {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let file_type = match value {
            0 => FileType::Thumbnail,
            1 => FileType::ChatPhoto,
            2 => FileType::Photo,
            3 => FileType::Voice,
            4 => FileType::Video,
            5 => FileType::Document,
            6 => FileType::Encrypted,
            7 => FileType::Temp,
            8 => FileType::Sticker,
            9 => FileType::Audio,
            10 => FileType::Animation,
            11 => FileType::EncryptedThumbnail,
            12 => FileType::Wallpaper,
            13 => FileType::VideoNote,
            14 => FileType::SecureRaw,
            15 => FileType::Secure,
            16 => FileType::Background,
            17 => FileType::DocumentAsFile,
            other => return Err(other),
        };
        Ok(file_type)
    }
}

impl FileType {
    pub fn is_photo(&self) -> bool {
        matches!(
            self,
            FileType::Thumbnail
                | FileType::ChatPhoto
                | FileType::Photo
                | FileType::EncryptedThumbnail
                | FileType::Wallpaper
        )
    }
}

/// 0 后面的字节表示连续 0 的个数。
fn rle_decode(data: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(data.len());
    let mut zero = false;
    for &b in data {
        if b == 0 {
            zero = true;
            continue;
        }
        if zero {
            decoded.extend(std::iter::repeat_n(0u8, b as usize));
            zero = false;
        } else {
            decoded.push(b);
        }
    }
    decoded
}

pub fn get_file_type(file_id: &str) -> AppResult<FileType> {
    let invalid = |reason: String| AppError::InvalidFileId {
        file_id: file_id.to_string(),
        reason,
    };
    let decoded = rle_decode(&URL_SAFE_NO_PAD.decode(file_id.trim_end_matches('='))?);
    let major = *decoded.last().ok_or_else(|| invalid("内容为空。".to_string()))?;
    // 主版本号小于 4 的 ID 没有次版本号
    let body = if major < 4 {
        &decoded[..decoded.len() - 1]
    } else {
        &decoded[..decoded.len().saturating_sub(2)]
    };
    let header: [u8; 4] = body
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| invalid("长度不足。".to_string()))?;
    let raw_type = i32::from_le_bytes(header) & !WEB_LOCATION_FLAG & !FILE_REFERENCE_FLAG;
    FileType::try_from(raw_type).map_err(|t| invalid(format!("未知的文件类型:\"{}\"。", t)))
}

/// 根据文件 ID 中的类型和 MIME 类型推断扩展名。
pub fn get_extension(file_id: &str, mime_type: &str, dot: bool) -> AppResult<String> {
    if file_id.is_empty() {
        return Ok(if dot { ".unknown" } else { "unknown" }.to_string());
    }
    let file_type = get_file_type(file_id)?;
    let guessed = Extension::guess(mime_type);
    let extension = match file_type {
        t if t.is_photo() => Extension::photo(mime_type).unwrap_or("jpg"),
        FileType::Voice => guessed.unwrap_or("ogg"),
        FileType::Video | FileType::Animation | FileType::VideoNote => guessed
            .or_else(|| Extension::video(mime_type))
            .unwrap_or("mp4"),
        FileType::Document if mime_type.contains("video") => guessed
            .or_else(|| Extension::video(mime_type))
            .unwrap_or("mp4"),
        FileType::Document if mime_type.contains("image") => guessed
            .or_else(|| Extension::photo(mime_type))
            .unwrap_or("jpg"),
        FileType::Document => guessed.unwrap_or("zip"),
        FileType::Sticker => guessed.unwrap_or("webp"),
        FileType::Audio => guessed.unwrap_or("mp3"),
        _ => "unknown",
    };
    Ok(if dot {
        format!(".{}", extension)
    } else {
        extension.to_string()
    })
}

/// 文件不存在时查找带临时扩展名的文件，都不存在返回 0。
pub fn get_file_size(file_path: &Path, temp_ext: &str) -> u64 {
    let mut temp_path = file_path.as_os_str().to_owned();
    temp_path.push(temp_ext);
    [file_path.to_path_buf(), PathBuf::from(temp_path)]
        .iter()
        .find_map(|p| fs::metadata(p).ok().filter(|m| m.is_file()).map(|m| m.len()))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rle_encode(data: &[u8]) -> Vec<u8> {
        let mut encoded = Vec::new();
        let mut zeros = 0u8;
        for &b in data {
            if b == 0 {
                zeros += 1;
                continue;
            }
            if zeros > 0 {
                encoded.extend([0, zeros]);
                zeros = 0;
            }
            encoded.push(b);
        }
        if zeros > 0 {
            encoded.extend([0, zeros]);
        }
        encoded
    }

    fn file_id(raw_type: i32, major: u8) -> String {
        let mut bytes = raw_type.to_le_bytes().to_vec();
        bytes.extend(2i32.to_le_bytes());
        bytes.extend([0x11, 0x22, 0x33, 0x44]);
        if major >= 4 {
            bytes.push(30);
        }
        bytes.push(major);
        URL_SAFE_NO_PAD.encode(rle_encode(&bytes))
    }

    #[test]
    fn test_truncate_filename_keeps_extension() {
        let long = format!("/tmp/{}.mp4", "视频".repeat(100));
        let truncated = truncate_filename(Path::new(&long), constants::FILENAME_BYTE_LIMIT);
        let name = truncated.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.len() <= constants::FILENAME_BYTE_LIMIT);
        assert!(name.ends_with(".mp4"));
        assert!(name.starts_with("视频"));
        assert_eq!(truncated.parent(), Some(Path::new("/tmp")));

        let short = Path::new("dir/short.jpg");
        assert_eq!(truncate_filename(short, 230), PathBuf::from("dir/short.jpg"));
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("a/b:c*d?\"e\"<f>|g\nh"), "a_b_c_d__e__f__g_h");
        assert_eq!(validate_title("正常标题"), "正常标题");
    }

    #[test]
    fn test_split_path() {
        let split = split_path(Path::new("/data/video.mp4"));
        assert_eq!(split.directory, PathBuf::from("/data"));
        assert_eq!(split.file_name, "video.mp4");
    }

    #[test]
    fn test_get_extension_from_file_id() {
        let video = file_id(4 | FILE_REFERENCE_FLAG, 4);
        assert_eq!(get_extension(&video, "video/x-unknown", true).unwrap(), ".mp4");
        assert_eq!(get_extension(&video, "video/mp4", false).unwrap(), "mp4");

        let photo = file_id(2 | WEB_LOCATION_FLAG, 2);
        assert_eq!(get_extension(&photo, "", true).unwrap(), ".jpg");

        let voice = file_id(3, 4);
        assert_eq!(get_extension(&voice, "", false).unwrap(), "ogg");

        let document = file_id(5, 4);
        assert_eq!(get_extension(&document, "application/x-unknown", false).unwrap(), "zip");

        let sticker = file_id(8, 4);
        assert_eq!(get_extension(&sticker, "", false).unwrap(), "webp");

        let temp = file_id(7, 4);
        assert_eq!(get_extension(&temp, "", false).unwrap(), "unknown");

        assert_eq!(get_extension("", "video/mp4", true).unwrap(), ".unknown");
        assert_eq!(get_extension("", "video/mp4", false).unwrap(), "unknown");
    }

    #[test]
    fn test_get_file_type_rejects_unknown_type() {
        let bogus = file_id(99, 4);
        assert!(matches!(get_file_type(&bogus), Err(AppError::InvalidFileId { .. })));
        assert!(get_file_type("!!!").is_err());
    }

    #[test]
    fn test_file_size_and_duplicate() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.mp4");
        assert_eq!(get_file_size(&file, constants::TEMP_FILE_SUFFIX), 0);
        fs::write(dir.path().join("a.mp4.temp"), b"1234").unwrap();
        assert_eq!(get_file_size(&file, constants::TEMP_FILE_SUFFIX), 4);
        fs::write(&file, b"123456").unwrap();
        assert_eq!(get_file_size(&file, constants::TEMP_FILE_SUFFIX), 6);
        assert!(is_file_duplicate(&file, 6));
        assert!(!is_file_duplicate(&file, 7));
        assert!(!is_file_duplicate(dir.path(), 0));
    }

    #[test]
    fn test_move_to_save_directory() {
        let dir = tempdir().unwrap();
        let temp = dir.path().join("a.mp4");
        fs::write(&temp, b"data").unwrap();
        let save = dir.path().join("save");
        assert_eq!(move_to_save_directory(&temp, &save), MoveResult::Moved);
        assert!(save.join("a.mp4").is_file());
        assert!(!temp.exists());

        fs::write(&temp, b"data").unwrap();
        assert!(matches!(
            move_to_save_directory(&temp, &save),
            MoveResult::AlreadyExists(_)
        ));
    }

    #[test]
    fn test_safe_delete() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir_all(nested.join("inner")).unwrap();
        fs::write(nested.join("inner").join("f"), b"x").unwrap();
        assert!(safe_delete(&nested));
        assert!(!nested.exists());
        assert!(safe_delete(&dir.path().join("missing")));
    }
}
