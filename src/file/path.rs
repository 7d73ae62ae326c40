//! パス処理ヘルパー
//!
//! チルダ・環境変数の展開と拡張子の分解

use crate::error::{FileError, Result};
use std::path::PathBuf;

/// 入力パス文字列を展開してPathBufへ変換
///
/// 空のパスは不正。`~`と環境変数を展開し、未定義変数の参照は
/// 不正パスとして扱う。
pub fn expand_path(input: &str) -> Result<PathBuf> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FileError::InvalidPath {
            path: input.to_string(),
        }
        .into());
    }

    let expanded = shellexpand::full(trimmed).map_err(|e| FileError::InvalidPath {
        path: format!("{}: {}", trimmed, e),
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// ファイル名を(名前, 拡張子)へ分解
///
/// 拡張子は「登録済み拡張子に一致する最長のドット接尾辞、
/// なければ最後のドット以降」。返される拡張子は先頭のドットを含む。
/// 先頭ドットのみの隠しファイル名は拡張子なしとして扱う。
pub fn split_extension(filename: &str, known: &[&str]) -> (String, String) {
    let lower = filename.to_ascii_lowercase();

    for ext in known {
        let suffix = format!(".{}", ext);
        if lower.len() > suffix.len() && lower.ends_with(&suffix) {
            let cut = filename.len() - suffix.len();
            return (filename[..cut].to_string(), filename[cut..].to_string());
        }
    }

    match filename.rfind('.') {
        Some(idx) if idx > 0 && idx < filename.len() - 1 => {
            (filename[..idx].to_string(), filename[idx..].to_string())
        }
        _ => (filename.to_string(), String::new()),
    }
}
