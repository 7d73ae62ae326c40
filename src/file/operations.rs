//! Fileエンティティ
//!
//! ファイルシステム上のパスを表すエンティティ。識別子アクセサと
//! ライフサイクル操作（ロック、コピー、移動、リネーム、読み書き）を提供し、
//! 実際のコンテンツ変換は拡張子で選択されるI/O戦略へ委譲する。

use crate::error::{FileError, Result};
use crate::file::io::{self, FileContent, FileIO, KNOWN_EXTENSIONS};
use crate::file::path::{expand_path, split_extension};
use std::fs;
use std::path::{Path, PathBuf};

/// ファイルシステム上の1ファイルを表すエンティティ
///
/// 派生フィールド（ディレクトリ、ファイル名、拡張子）はすべてアクセス時に
/// `path`から計算され、保存されない。`path`の変更後も
/// `path == directory + filename`と`filename == name + file_ext`が常に成り立つ。
///
/// ロックはインメモリの単一オブジェクト用ソフトガードであり、
/// ファイルシステムやプロセス間のロックではない。
///
/// # Examples
///
/// ```
/// use datafile::File;
///
/// let file = File::new("./data/san_francisco.csv").unwrap();
/// assert_eq!(file.filename(), "san_francisco.csv");
/// assert_eq!(file.name(), "san_francisco");
/// assert_eq!(file.file_ext(), ".csv");
/// ```
#[derive(Debug, Clone)]
pub struct File {
    /// 現在のファイルパス
    path: PathBuf,
    /// 移動・リネームを抑止するソフトロック
    locked: bool,
}

impl File {
    /// パス文字列からFileを作成
    ///
    /// `~`と環境変数を展開する。空のパスや末尾がセパレータのパスは不正。
    /// ファイルが存在する必要はない。
    pub fn new(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if trimmed.ends_with('/') || trimmed.ends_with('\\') {
            return Err(FileError::InvalidPath {
                path: path.to_string(),
            }
            .into());
        }

        let expanded = expand_path(trimmed)?;
        if expanded.file_name().is_none() {
            return Err(FileError::InvalidPath {
                path: path.to_string(),
            }
            .into());
        }

        Ok(Self {
            path: expanded,
            locked: false,
        })
    }

    /// 現在のパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル名を除いたディレクトリ部分
    pub fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// パスの最終セグメント
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// 拡張子を除いたファイル名
    pub fn name(&self) -> String {
        split_extension(&self.filename(), &KNOWN_EXTENSIONS).0
    }

    /// 拡張子（先頭のドットを含む）
    ///
    /// `.csv.gz`のような登録済み複合拡張子は1つの拡張子として扱う。
    pub fn file_ext(&self) -> String {
        split_extension(&self.filename(), &KNOWN_EXTENSIONS).1
    }

    /// ファイルが存在するか（アクセス時に毎回確認、キャッシュしない）
    pub fn exists(&self) -> bool {
        self.path.exists() && self.path.is_file()
    }

    /// ロックされているか
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// ソフトロックを設定（冪等）
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// ソフトロックを解除（冪等）
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// ファイル内容を指定先へコピー
    ///
    /// ロック状態に関わらず常に許可される。自身のパスは変更しない。
    pub fn copy(&self, destination: impl AsRef<Path>) -> Result<()> {
        if !self.exists() {
            return Err(FileError::NotFound {
                path: self.path.display().to_string(),
            }
            .into());
        }
        fs::copy(&self.path, destination.as_ref())?;
        Ok(())
    }

    /// ファイルを指定先へ物理的に移動し、自身のパスを更新
    ///
    /// ロック中は何もしない（パス不変、エラーなし）。
    pub fn move_to(&mut self, destination: impl AsRef<Path>) -> Result<()> {
        if self.locked {
            log::debug!("move ignored, file is locked: {}", self.path.display());
            return Ok(());
        }
        if !self.exists() {
            return Err(FileError::NotFound {
                path: self.path.display().to_string(),
            }
            .into());
        }

        let destination = destination.as_ref();
        fs::rename(&self.path, destination)?;
        self.path = destination.to_path_buf();
        Ok(())
    }

    /// ファイル名部分のみを差し替えてリネーム（ディレクトリは不変）
    ///
    /// 新しい名前が拡張子を持たない場合は元の拡張子を引き継ぐ。
    /// 別の拡張子を持つ場合はその拡張子が使われる。
    /// ロック中は何もしない（パス不変、エラーなし）。
    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        if self.locked {
            log::debug!("rename ignored, file is locked: {}", self.path.display());
            return Ok(());
        }

        let trimmed = new_name.trim();
        if trimmed.is_empty() || trimmed.contains('/') || trimmed.contains('\\') {
            return Err(FileError::InvalidPath {
                path: new_name.to_string(),
            }
            .into());
        }
        if !self.exists() {
            return Err(FileError::NotFound {
                path: self.path.display().to_string(),
            }
            .into());
        }

        let (_, ext) = split_extension(trimmed, &KNOWN_EXTENSIONS);
        let new_filename = if ext.is_empty() {
            format!("{}{}", trimmed, self.file_ext())
        } else {
            trimmed.to_string()
        };

        let new_path = self.directory().join(new_filename);
        fs::rename(&self.path, &new_path)?;
        self.path = new_path;
        Ok(())
    }

    /// 拡張子に対応する戦略でファイルを読み込み
    pub fn read(&self) -> Result<FileContent> {
        self.strategy()?.read(&self.path, None)
    }

    /// 指定した列だけを読み込み（表形式のみ、配列戦略では無視される）
    pub fn read_columns(&self, columns: &[&str]) -> Result<FileContent> {
        self.strategy()?.read(&self.path, Some(columns))
    }

    /// 拡張子に対応する戦略でコンテンツを書き込み
    pub fn write(&self, content: &FileContent) -> Result<()> {
        self.strategy()?.write(&self.path, content)?;
        Ok(())
    }

    /// 現在の拡張子からI/O戦略を解決
    fn strategy(&self) -> Result<Box<dyn FileIO>> {
        let ext = self.file_ext();
        if ext.is_empty() {
            return Err(FileError::UnsupportedFormat {
                extension: self.filename(),
            }
            .into());
        }
        io::strategy_for(&ext)
    }
}
