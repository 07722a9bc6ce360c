use crate::error::ListError;

/// 値の列x(0)..x(n-1)とその列に対する操作からなる
///
/// 範囲外のインデックスはすべて`ListError::IndexOutOfRange`となり、リストは変更されない
pub trait List<T> {
    /// リストの長さnを返す
    fn size(&self) -> usize;

    /// x(i)への参照を返す
    fn get(&self, i: usize) -> Result<&T, ListError>;

    /// x(i)の値をxにし、元の値を返す
    fn set(&mut self, i: usize, x: T) -> Result<T, ListError>;

    /// xをi番目として追加し、x(i)..x(n-1)を後ろにずらす
    fn add(&mut self, i: usize, x: T) -> Result<(), ListError>;

    /// x(i)を削除し、x(i+1)..x(n-1)を前にずらす
    fn remove(&mut self, i: usize) -> Result<T, ListError>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// x(i)を取り出す
    fn pop_at(&mut self, i: usize) -> Result<T, ListError> {
        self.remove(i)
    }

    /// 末尾の値を取り出す
    fn pop(&mut self) -> Result<T, ListError> {
        match self.size() {
            0 => Err(ListError::IndexOutOfRange { index: 0, size: 0 }),
            n => self.remove(n - 1),
        }
    }
}
