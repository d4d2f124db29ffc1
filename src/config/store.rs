// src/config/store.rs

use crate::{
    config::UserConfig,
    constants,
    error::{AppError, AppResult},
};
use anyhow::{Context, anyhow};
use log::{debug, info, warn};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

pub fn get_config_path() -> AppResult<PathBuf> {
    let path = dirs::home_dir()
        .ok_or_else(|| AppError::Other(anyhow!("无法获取用户主目录")))?
        .join(constants::CONFIG_DIR_NAME)
        .join(constants::CONFIG_FILE_NAME);
    Ok(path)
}

/// 备份配置文件，返回备份后的路径。
///
/// 文件名格式为 `{error_}history_{YYYY-MM-DD_HH-MM-SS}_config.{ext}`，
/// 扩展名沿用原文件的扩展名，没有扩展名时为 `yaml`。
/// 同一秒内重复备份时在时间后追加 `_1`、`_2`…，不覆盖已有的备份。
pub fn gen_backup_config(
    old_path: &Path,
    absolute_backup_dir: &Path,
    error_config: bool,
) -> AppResult<PathBuf> {
    fs::create_dir_all(absolute_backup_dir)?;
    let ext = old_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "yaml".to_string());
    let prefix = format!(
        "{}history_{}",
        if error_config { "error_" } else { "" },
        chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
    );
    let mut new_path = absolute_backup_dir.join(format!("{}_config.{}", prefix, ext));
    let mut suffix = 0u32;
    while new_path.exists() {
        suffix += 1;
        new_path = absolute_backup_dir.join(format!("{}_{}_config.{}", prefix, suffix, ext));
    }
    fs::rename(old_path, &new_path)
        .with_context(|| format!("备份配置文件 '{}' 失败", old_path.display()))?;
    Ok(new_path)
}

/// 磁盘上的配置文件，提供"上一次的记录"。
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: Option<PathBuf>) -> AppResult<Self> {
        let path = match path {
            Some(p) => p,
            None => get_config_path()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(constants::BACKUP_DIR_NAME)
    }

    /// 读取配置；文件不存在时返回空配置，文件损坏时将其备份为 error_ 前缀的文件后返回空配置。
    pub fn load(&self) -> AppResult<UserConfig> {
        if !self.path.is_file() {
            info!("配置文件 {:?} 不存在，将使用空配置。", self.path);
            return Ok(UserConfig::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("读取配置文件 '{}' 失败", self.path.display()))?;
        match serde_json::from_str::<UserConfig>(&content) {
            Ok(config) => {
                debug!("已加载配置文件: {}", self.path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("解析配置文件 '{}' 失败: {}", self.path.display(), e);
                let backup = self.backup(true)?;
                if let Some(backup) = backup {
                    warn!("已将无法解析的配置文件备份至: {}", backup.display());
                }
                Ok(UserConfig::default())
            }
        }
    }

    /// 严格读取，解析失败时返回错误而不是备份。
    pub fn load_strict(&self) -> AppResult<UserConfig> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("读取配置文件 '{}' 失败", self.path.display()))?;
        serde_json::from_str(&content).map_err(|source| AppError::ConfigParseFailed {
            path: self.path.display().to_string(),
            source,
        })
    }

    pub fn save(&self, config: &UserConfig) -> AppResult<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let json_content = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(json_content.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)?;
        info!("配置已保存至: {}", self.path.display());
        Ok(())
    }

    /// 备份现有配置文件；文件不存在时返回 `None`。
    pub fn backup(&self, error_config: bool) -> AppResult<Option<PathBuf>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let backup = gen_backup_config(&self.path, &self.backup_dir(), error_config)?;
        info!("配置文件已备份至: {}", backup.display());
        Ok(Some(backup))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use tempfile::tempdir;

    #[test]
    fn test_gen_backup_config_name_format() {
        let dir = tempdir().unwrap();
        let old = dir.path().join("config.yaml");
        fs::write(&old, "api_id: '1'").unwrap();

        let backup = gen_backup_config(&old, &dir.path().join("backup"), false).unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        let re = Regex::new(r"^history_\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}_config\.yaml$").unwrap();
        assert!(re.is_match(&name), "unexpected backup name: {}", name);
        assert!(!old.exists());
        assert!(backup.is_file());

        let broken = dir.path().join("config.json");
        fs::write(&broken, "{").unwrap();
        let backup = gen_backup_config(&broken, &dir.path().join("backup"), true).unwrap();
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("error_history_"));
        assert!(name.ends_with("_config.json"));
    }

    #[test]
    fn test_backups_in_same_second_do_not_overwrite() {
        let dir = tempdir().unwrap();
        let backup_dir = dir.path().join("backup");
        let old = dir.path().join("config.json");

        let mut backups = Vec::new();
        for content in ["{\"api_id\": \"1\"}", "{\"api_id\": \"2\"}", "{\"api_id\": \"3\"}"] {
            fs::write(&old, content).unwrap();
            backups.push(gen_backup_config(&old, &backup_dir, false).unwrap());
        }
        backups.sort();
        backups.dedup();
        assert_eq!(backups.len(), 3);
        assert_eq!(fs::read_dir(&backup_dir).unwrap().count(), 3);
        let mut contents: Vec<String> = backups.iter().map(|p| fs::read_to_string(p).unwrap()).collect();
        contents.sort();
        assert_eq!(contents, ["{\"api_id\": \"1\"}", "{\"api_id\": \"2\"}", "{\"api_id\": \"3\"}"]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ConfigStore::new(Some(dir.path().join("nested").join("config.json"))).unwrap();
        assert_eq!(store.load().unwrap(), UserConfig::default());

        let config = UserConfig {
            api_id: Some("123".into()),
            max_download_task: Some(3),
            ..Default::default()
        };
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
        assert_eq!(store.load_strict().unwrap(), config);
    }

    #[test]
    fn test_broken_config_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let store = ConfigStore::new(Some(path.clone())).unwrap();

        assert!(matches!(store.load_strict(), Err(AppError::ConfigParseFailed { .. })));
        assert_eq!(store.load().unwrap(), UserConfig::default());
        assert!(!path.exists());
        let backups: Vec<_> = fs::read_dir(store.backup_dir()).unwrap().collect();
        assert_eq!(backups.len(), 1);
    }
}
