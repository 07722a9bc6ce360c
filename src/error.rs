use std::{
    error::Error,
    fmt::{self, Display},
};

/// リスト操作のエラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// 操作に対して範囲外のインデックス
    IndexOutOfRange { index: usize, size: usize },
    /// 引数が不正(k = 0 など)
    InvalidArgument(&'static str),
}

impl ListError {
    /// `index < size` でなければエラーを返す
    pub(crate) fn check_index(index: usize, size: usize) -> Result<(), ListError> {
        if index < size {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange { index, size })
        }
    }

    /// 挿入位置の検査。`index <= size` が有効
    pub(crate) fn check_position(index: usize, size: usize) -> Result<(), ListError> {
        if index <= size {
            Ok(())
        } else {
            Err(ListError::IndexOutOfRange { index, size })
        }
    }
}

impl Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfRange { index, size } => {
                write!(f, "IndexError: index {index} out of range for size {size}")
            }
            ListError::InvalidArgument(msg) => write!(f, "InvalidArgument: {msg}"),
        }
    }
}

impl Error for ListError {}
