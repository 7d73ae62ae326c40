//! 列指向テーブル
//!
//! CSV系戦略が返すインメモリ表構造。名前付き・順序付きの列を保持する。
//! スキーマ検証は行わず、セルは文字列のまま扱う。

use crate::error::{DatafileError, FormatError, Result};

/// 名前付きの単一列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// 列名
    pub name: String,
    /// セル値（行順）
    pub values: Vec<String>,
}

impl Column {
    /// 列を作成
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// 列指向のインメモリテーブル
///
/// 不変条件: すべての列は同じ行数を持つ。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// 空のテーブルを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 列のリストからテーブルを作成
    ///
    /// 列の長さが揃っていない場合はエラー。
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.values.len();
            for column in &columns {
                if column.values.len() != expected {
                    return Err(DatafileError::Application(format!(
                        "Ragged columns: column '{}' has {} rows, expected {}",
                        column.name,
                        column.values.len(),
                        expected
                    )));
                }
            }
        }
        Ok(Self { columns })
    }

    /// 列名のリスト（定義順）
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// 名前で列を取得（同名列は先頭を返す）
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 列数
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// 行数
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// (行数, 列数)
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_columns())
    }

    /// 行も列も持たないか
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() || self.n_rows() == 0
    }

    /// 指定した列名への射影（フィルタの順序を保持）
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|name| {
                self.column(name).cloned().ok_or_else(|| {
                    DatafileError::Format(FormatError::UnknownColumn {
                        name: name.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Table { columns })
    }

    /// 1行を末尾に追加
    ///
    /// 列数と行の幅が一致しない場合はエラー。
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DatafileError::Application(
                "Cannot append a row to a table with no columns".to_string(),
            ));
        }
        if row.len() != self.columns.len() {
            return Err(DatafileError::Application(format!(
                "Row width mismatch: got {} fields, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        Ok(())
    }

    /// 行単位のイテレータ（CSV書き出し用）
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.n_rows()).map(move |i| {
            self.columns
                .iter()
                .map(|column| column.values[i].as_str())
                .collect()
        })
    }
}
