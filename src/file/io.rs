//! フォーマット別I/O戦略
//!
//! 拡張子で選択される読み書き戦略の実装。CSV、gzip圧縮CSV、
//! NPYバイナリ配列の3種をサポートする。

use crate::error::{DatafileError, FileError, FormatError, Result};
use crate::table::{Column, Table};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use ndarray::ArrayD;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// 登録済みの正規拡張子（複合拡張子の最長一致のため長い順）
pub const KNOWN_EXTENSIONS: [&str; 3] = ["csv.gz", "csv", "npy"];

/// 戦略が受け渡すコンテンツ
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// 表形式データ
    Table(Table),
    /// 多次元数値配列
    Array(ArrayD<f64>),
}

impl FileContent {
    /// コンテンツ種別名
    pub fn kind(&self) -> &'static str {
        match self {
            FileContent::Table(_) => "table",
            FileContent::Array(_) => "array",
        }
    }

    /// テーブルへの参照を取得
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            FileContent::Table(table) => Some(table),
            FileContent::Array(_) => None,
        }
    }

    /// 配列への参照を取得
    pub fn as_array(&self) -> Option<&ArrayD<f64>> {
        match self {
            FileContent::Array(array) => Some(array),
            FileContent::Table(_) => None,
        }
    }

    /// テーブルへ変換
    pub fn into_table(self) -> Option<Table> {
        match self {
            FileContent::Table(table) => Some(table),
            FileContent::Array(_) => None,
        }
    }

    /// 配列へ変換
    pub fn into_array(self) -> Option<ArrayD<f64>> {
        match self {
            FileContent::Array(array) => Some(array),
            FileContent::Table(_) => None,
        }
    }
}

impl From<Table> for FileContent {
    fn from(table: Table) -> Self {
        FileContent::Table(table)
    }
}

impl From<ArrayD<f64>> for FileContent {
    fn from(array: ArrayD<f64>) -> Self {
        FileContent::Array(array)
    }
}

/// フォーマット別I/O戦略のトレイト
///
/// 実装は状態を持たず、読み書きの2操作と正規拡張子のみを提供する。
pub trait FileIO {
    /// この戦略の正規拡張子（ドットなし）
    fn extension(&self) -> &'static str;

    /// ファイルを読み込んでコンテンツへ変換
    ///
    /// 表形式の戦略は列フィルタを適用する。パスが存在しない場合はエラー。
    fn read(&self, path: &Path, columns: Option<&[&str]>) -> Result<FileContent>;

    /// コンテンツを直列化してファイルへ書き込み
    ///
    /// パスが正規拡張子で終わらない場合は拡張子を追記した上で書き込み、
    /// 実際に書き込んだパスを返す。親ディレクトリは必要に応じて作成する。
    fn write(&self, path: &Path, content: &FileContent) -> Result<PathBuf>;
}

/// プレーンCSV戦略
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvIO;

impl FileIO for CsvIO {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn read(&self, path: &Path, columns: Option<&[&str]>) -> Result<FileContent> {
        ensure_readable(path)?;
        let file = fs::File::open(path)?;
        let table = read_table_from(file, columns)?;
        Ok(FileContent::Table(table))
    }

    fn write(&self, path: &Path, content: &FileContent) -> Result<PathBuf> {
        let table = expect_table(content)?;
        let target = ensure_extension(path, self.extension());
        create_parent_dirs(&target)?;
        let mut file = fs::File::create(&target)?;
        write_table_to(&mut file, table)?;
        Ok(target)
    }
}

/// gzip圧縮CSV戦略
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvGzIO;

impl FileIO for CsvGzIO {
    fn extension(&self) -> &'static str {
        "csv.gz"
    }

    fn read(&self, path: &Path, columns: Option<&[&str]>) -> Result<FileContent> {
        ensure_readable(path)?;
        let file = fs::File::open(path)?;
        let table = read_table_from(GzDecoder::new(file), columns)?;
        Ok(FileContent::Table(table))
    }

    fn write(&self, path: &Path, content: &FileContent) -> Result<PathBuf> {
        let table = expect_table(content)?;
        let target = ensure_extension(path, self.extension());
        create_parent_dirs(&target)?;
        let mut encoder = GzEncoder::new(fs::File::create(&target)?, Compression::default());
        write_table_to(&mut encoder, table)?;
        encoder.finish()?;
        Ok(target)
    }
}

/// NPYバイナリ配列戦略
#[derive(Debug, Default, Clone, Copy)]
pub struct NpyIO;

impl FileIO for NpyIO {
    fn extension(&self) -> &'static str {
        "npy"
    }

    fn read(&self, path: &Path, columns: Option<&[&str]>) -> Result<FileContent> {
        ensure_readable(path)?;
        if columns.is_some() {
            log::warn!("Column filter is ignored for npy files: {}", path.display());
        }
        let array: ArrayD<f64> = ndarray_npy::read_npy(path)?;
        Ok(FileContent::Array(array))
    }

    fn write(&self, path: &Path, content: &FileContent) -> Result<PathBuf> {
        let array = expect_array(content)?;
        let target = ensure_extension(path, self.extension());
        create_parent_dirs(&target)?;
        ndarray_npy::write_npy(&target, array)?;
        Ok(target)
    }
}

/// 拡張子に対応する戦略を解決
///
/// 先頭のドットの有無と大文字小文字は区別しない。
pub fn strategy_for(extension: &str) -> Result<Box<dyn FileIO>> {
    let normalized = extension.trim_start_matches('.').to_ascii_lowercase();
    match normalized.as_str() {
        "csv" => Ok(Box::new(CsvIO)),
        "csv.gz" => Ok(Box::new(CsvGzIO)),
        "npy" => Ok(Box::new(NpyIO)),
        _ => Err(FileError::UnsupportedFormat {
            extension: extension.to_string(),
        }
        .into()),
    }
}

/// パスが正規拡張子で終わることを保証（足りなければ追記）
fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    let suffix = format!(".{}", extension);
    let already = path
        .file_name()
        .map(|name| {
            name.to_string_lossy()
                .to_ascii_lowercase()
                .ends_with(&suffix)
        })
        .unwrap_or(false);

    if already {
        path.to_path_buf()
    } else {
        let mut corrected = path.as_os_str().to_os_string();
        corrected.push(&suffix);
        PathBuf::from(corrected)
    }
}

/// 読み込み前の存在・種別チェック
fn ensure_readable(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }
    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(())
}

/// 親ディレクトリが存在しない場合は作成
fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// コンテンツからテーブルを取り出し（種別不一致はエラー）
fn expect_table(content: &FileContent) -> Result<&Table> {
    content.as_table().ok_or_else(|| {
        DatafileError::Format(FormatError::ContentMismatch {
            expected: "table",
            actual: content.kind(),
        })
    })
}

/// コンテンツから配列を取り出し（種別不一致はエラー）
fn expect_array(content: &FileContent) -> Result<&ArrayD<f64>> {
    content.as_array().ok_or_else(|| {
        DatafileError::Format(FormatError::ContentMismatch {
            expected: "array",
            actual: content.kind(),
        })
    })
}

/// リーダーからテーブルを構築
///
/// 列フィルタが指定された場合、選択された列だけを取り込む。
fn read_table_from<R: Read>(reader: R, columns: Option<&[&str]>) -> Result<Table> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let selected: Vec<(usize, String)> = match columns {
        Some(names) => names
            .iter()
            .map(|name| {
                headers
                    .iter()
                    .position(|header| header == *name)
                    .map(|idx| (idx, name.to_string()))
                    .ok_or_else(|| {
                        DatafileError::Format(FormatError::UnknownColumn {
                            name: name.to_string(),
                        })
                    })
            })
            .collect::<Result<Vec<_>>>()?,
        None => headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (idx, header.to_string()))
            .collect(),
    };

    let mut table = Table::from_columns(
        selected
            .iter()
            .map(|(_, name)| Column::new(name.clone(), Vec::new()))
            .collect(),
    )?;

    for record in csv_reader.records() {
        let record = record?;
        let row = selected
            .iter()
            .map(|(idx, _)| record.get(*idx).unwrap_or("").to_string())
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

/// テーブルをライターへ直列化してフラッシュ
fn write_table_to<W: Write>(writer: &mut W, table: &Table) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if table.n_columns() > 0 {
        csv_writer.write_record(table.column_names())?;
        for row in table.rows() {
            csv_writer.write_record(row)?;
        }
    }
    csv_writer.flush()?;
    Ok(())
}
