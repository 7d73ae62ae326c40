//! datafile - ファイル抽象化ライブラリ
//!
//! ファイルシステム上のパスを表すFileエンティティと、
//! 拡張子で選択されるフォーマット別I/O戦略（CSV / gzip圧縮CSV / NPY配列）の実装

// コアモジュール
pub mod error;
pub mod logging;

// データ層
pub mod table;

// ファイル層
pub mod file;

// 公開API
pub use error::{DatafileError, FileError, FormatError, Result};
pub use file::{CsvGzIO, CsvIO, File, FileContent, FileIO, NpyIO};
pub use table::{Column, Table};
