//! エラー型定義
//!
//! ファイル操作とフォーマット変換のエラー分類

use thiserror::Error;

/// datafile全体のエラー型
#[derive(Debug, Error)]
pub enum DatafileError {
    /// ファイル・パス関連のエラー
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// フォーマット変換関連のエラー
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// その他のアプリケーションエラー
    #[error("Application error: {0}")]
    Application(String),
}

/// ファイル・パス関連のエラー
#[derive(Debug, Error)]
pub enum FileError {
    /// 不正なパス
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// ファイルが存在しない
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// 拡張子に対応する戦略が未登録
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// 下位のファイルシステム操作の失敗
    #[error("IO error: {message}")]
    Io { message: String },
}

/// フォーマット変換関連のエラー
#[derive(Debug, Error)]
pub enum FormatError {
    /// CSVの解析・直列化エラー
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// NPYファイルの読み込みエラー
    #[error("NPY read error: {0}")]
    NpyRead(#[from] ndarray_npy::ReadNpyError),

    /// NPYファイルの書き込みエラー
    #[error("NPY write error: {0}")]
    NpyWrite(#[from] ndarray_npy::WriteNpyError),

    /// 列フィルタに存在しない列名が指定された
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    /// 戦略とコンテンツ種別の不一致
    #[error("Content mismatch: expected {expected}, got {actual}")]
    ContentMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl From<std::io::Error> for DatafileError {
    fn from(err: std::io::Error) -> Self {
        DatafileError::File(FileError::Io {
            message: err.to_string(),
        })
    }
}

impl From<csv::Error> for DatafileError {
    fn from(err: csv::Error) -> Self {
        DatafileError::Format(FormatError::Csv(err))
    }
}

impl From<ndarray_npy::ReadNpyError> for DatafileError {
    fn from(err: ndarray_npy::ReadNpyError) -> Self {
        DatafileError::Format(FormatError::NpyRead(err))
    }
}

impl From<ndarray_npy::WriteNpyError> for DatafileError {
    fn from(err: ndarray_npy::WriteNpyError) -> Self {
        DatafileError::Format(FormatError::NpyWrite(err))
    }
}

/// datafile用のResult型
pub type Result<T> = std::result::Result<T, DatafileError>;
