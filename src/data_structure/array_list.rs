use std::fmt::{self, Display};

use log::{debug, trace};

use crate::error::ListError;
use crate::interface::list::List;

const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// 要素数/容量がこれを下回るとshrink_to_fitする
const SHRINK_RATIO: f64 = 0.25;

/// 可変長配列によるListの実装
///
/// 容量が足りなくなるとgrowth_factor倍(切り上げ)に拡張するので、
/// m回のappendにかかる時間は償却するとO(m)
/// removeで要素数が容量の1/4を下回ると容量を2^ceil(n/growth_factor)に縮める
pub struct ArrayList<T> {
    a: Box<[T]>, // 容量はa.len()
    n: usize,    // リストの要素数
    growth_factor: f64,
}

impl<T: Default> ArrayList<T> {
    /// 容量1の空のリスト
    pub fn new() -> Self {
        Self {
            a: Self::allocate(1),
            n: 0,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    /// 拡張倍率を指定して空のリストを作る。倍率は1より大きくなければならない
    pub fn with_growth_factor(growth_factor: f64) -> Result<Self, ListError> {
        if !growth_factor.is_finite() || growth_factor <= 1.0 {
            return Err(ListError::InvalidArgument(
                "growth factor must be a finite number greater than 1",
            ));
        }
        Ok(Self {
            a: Self::allocate(1),
            n: 0,
            growth_factor,
        })
    }

    fn allocate(capacity: usize) -> Box<[T]> {
        std::iter::repeat_with(T::default).take(capacity).collect()
    }

    /// 容量capacityの配列に要素を移す
    fn relocate(&mut self, capacity: usize) {
        let mut b = Self::allocate(capacity);
        for (dst, src) in b.iter_mut().zip(self.a[..self.n].iter_mut()) {
            *dst = std::mem::take(src);
        }
        self.a = b;
    }

    // 容量をceil(growth_factor * capacity)にする
    fn resize(&mut self) {
        let capacity = (self.growth_factor * self.a.len() as f64).ceil() as usize;
        debug!("grow capacity {} -> {}", self.a.len(), capacity);
        self.relocate(capacity);
    }

    /// 容量を2^ceil(n/growth_factor)に縮める
    ///
    /// 要素は捨てないので容量はn以上、また現在の容量を超えることもない
    pub fn shrink_to_fit(&mut self) {
        let exponent = (self.n as f64 / self.growth_factor).ceil() as u32;
        let target = 2usize.checked_pow(exponent).unwrap_or(usize::MAX);
        let capacity = target.max(self.n).min(self.a.len());
        if capacity == self.a.len() {
            return;
        }
        debug!("shrink capacity {} -> {} (size {})", self.a.len(), capacity, self.n);
        self.relocate(capacity);
    }

    /// 末尾にxを追加する
    pub fn append(&mut self, x: T) {
        if self.n == self.a.len() {
            self.resize();
        }
        self.a[self.n] = x;
        self.n += 1;
    }

    /// xをi番目に挿入する。`add(i, x)`と同じ
    pub fn insert(&mut self, i: usize, x: T) -> Result<(), ListError> {
        self.add(i, x)
    }
}

impl<T> ArrayList<T> {
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn capacity(&self) -> usize {
        self.a.len()
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    pub fn get_mut(&mut self, i: usize) -> Result<&mut T, ListError> {
        ListError::check_index(i, self.n)?;
        Ok(&mut self.a[i])
    }

    pub fn as_slice(&self) -> &[T] {
        &self.a[..self.n]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T> List<T> for ArrayList<T>
where
    T: Default,
{
    fn size(&self) -> usize {
        self.n
    }

    fn get(&self, i: usize) -> Result<&T, ListError> {
        ListError::check_index(i, self.n)?;
        Ok(&self.a[i])
    }

    fn set(&mut self, i: usize, x: T) -> Result<T, ListError> {
        ListError::check_index(i, self.n)?;
        Ok(std::mem::replace(&mut self.a[i], x))
    }

    fn add(&mut self, i: usize, x: T) -> Result<(), ListError> {
        ListError::check_position(i, self.n)?;
        trace!("insert at index {} (size {})", i, self.n);
        if self.n == self.a.len() {
            self.resize();
        }
        // 末尾に置いてからa[i]..a[n]を右に1つ回す
        self.a[self.n] = x;
        self.a[i..=self.n].rotate_right(1);
        self.n += 1;
        Ok(())
    }

    fn remove(&mut self, i: usize) -> Result<T, ListError> {
        ListError::check_index(i, self.n)?;
        trace!("remove index {} (size {})", i, self.n);
        let x = std::mem::take(&mut self.a[i]);
        // a[i+1]..a[n-1]を左に1つずらす
        self.a[i..self.n].rotate_left(1);
        self.n -= 1;
        if (self.n as f64) / (self.a.len() as f64) < SHRINK_RATIO {
            self.shrink_to_fit();
        }
        Ok(x)
    }
}

impl<T: Default> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// appendを繰り返すので、容量は逐次appendしたときと同じになる
impl<T: Default> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for x in iter {
            list.append(x);
        }
        list
    }
}

impl<T: Default> From<Vec<T>> for ArrayList<T> {
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Display> Display for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (k, x) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayList")
            .field("items", &self.as_slice())
            .field("capacity", &self.a.len())
            .finish()
    }
}
