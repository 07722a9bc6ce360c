use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};

use log::debug;

use crate::error::ListError;

type StrongLink<T> = Rc<RefCell<Node<T>>>;
type WeakLink<T> = Weak<RefCell<Node<T>>>;

struct Node<T> {
    x: T,
    next: Option<StrongLink<T>>,
    prev: Option<WeakLink<T>>,
}

impl<T> Node<T> {
    fn new_link(x: T) -> StrongLink<T> {
        Rc::new(RefCell::new(Self {
            x,
            next: None,
            prev: None,
        }))
    }
}

fn next_of<T>(rc: &StrongLink<T>) -> Option<StrongLink<T>> {
    rc.borrow().next.clone()
}

/// 循環双方向連結リスト
///
/// 末尾のnextはheadを指す。nextは強参照で環を作るので、dropではn個のノードを辿って環を切る
pub struct CircularList<T> {
    head: Option<StrongLink<T>>,
    tail: Option<WeakLink<T>>,
    n: usize,
}

impl<T> CircularList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            n: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// 末尾(headの直前)にxを追加する
    pub fn append(&mut self, x: T) {
        let u = Node::new_link(x);
        let last = self.tail.as_ref().and_then(Weak::upgrade);
        match (self.head.clone(), last) {
            (Some(first), Some(last)) => {
                u.borrow_mut().prev = Some(Rc::downgrade(&last));
                u.borrow_mut().next = Some(Rc::clone(&first));
                first.borrow_mut().prev = Some(Rc::downgrade(&u));
                last.borrow_mut().next = Some(Rc::clone(&u));
            }
            _ => {
                u.borrow_mut().prev = Some(Rc::downgrade(&u));
                u.borrow_mut().next = Some(Rc::clone(&u));
                self.head = Some(Rc::clone(&u));
            }
        }
        self.tail = Some(Rc::downgrade(&u));
        self.n += 1;
    }

    /// headからnextをi回辿ったノード
    fn get_link(&self, i: usize) -> Result<StrongLink<T>, ListError> {
        ListError::check_index(i, self.n)?;
        let mut p = self.head.clone();
        for _ in 0..i {
            p = p.as_ref().and_then(next_of);
        }
        p.ok_or(ListError::IndexOutOfRange {
            index: i,
            size: self.n,
        })
    }

    /// wを環から外し、wの次のノードを返す。最後の1つを外したときはNone
    fn unlink(&mut self, w: &StrongLink<T>) -> Option<StrongLink<T>> {
        let next = w.borrow_mut().next.take();
        let prev = w.borrow_mut().prev.take().and_then(|weak| weak.upgrade());
        self.n -= 1;
        let (prev, next) = match (prev, next) {
            (Some(prev), Some(next)) if self.n > 0 => (prev, next),
            _ => {
                self.head = None;
                self.tail = None;
                return None;
            }
        };

        if self.head.as_ref().is_some_and(|h| Rc::ptr_eq(h, w)) {
            self.head = Some(Rc::clone(&next));
        }
        if self
            .tail
            .as_ref()
            .is_some_and(|t| std::ptr::eq(t.as_ptr(), Rc::as_ptr(w)))
        {
            self.tail = Some(Rc::downgrade(&prev));
        }
        next.borrow_mut().prev = Some(Rc::downgrade(&prev));
        prev.borrow_mut().next = Some(Rc::clone(&next));
        Some(next)
    }
}

impl<T: Clone> CircularList<T> {
    /// headからnextをi回辿った値
    pub fn get(&self, i: usize) -> Result<T, ListError> {
        let node = self.get_link(i)?;
        let x = node.borrow().x.clone();
        Ok(x)
    }

    /// headから1周分の値を複製して返す
    pub fn to_vec(&self) -> Vec<T> {
        let mut v = Vec::with_capacity(self.n);
        let mut p = self.head.clone();
        for _ in 0..self.n {
            let Some(rc) = p else { break };
            v.push(rc.borrow().x.clone());
            p = next_of(&rc);
        }
        v
    }

    /// ヨセフス問題の除去順
    ///
    /// headから始めてnextをk-1回進み、そのノードの値を記録して環から外す。
    /// 次の回は外したノードの次から再びk-1回進む。進む回数は現在の要素数で剰余をとる。
    /// 環が空になるまで繰り返すので、呼び出し後のリストは空になる
    pub fn josephus_sequence(&mut self, k: usize) -> Result<Vec<T>, ListError> {
        if k == 0 {
            return Err(ListError::InvalidArgument("k must be at least 1"));
        }
        let mut sequence = Vec::with_capacity(self.n);
        let mut current = self.head.clone();
        while let Some(mut node) = current {
            for _ in 0..(k - 1) % self.n {
                match next_of(&node) {
                    Some(next) => node = next,
                    None => break,
                }
            }
            let x = node.borrow().x.clone();
            sequence.push(x);
            current = self.unlink(&node);
            debug!("eliminated position {} ({} left)", sequence.len(), self.n);
        }
        Ok(sequence)
    }
}

/// 1..=nの値を持つ環を作り、ヨセフス問題で最後に残る値を返す
pub fn last_man_standing(n: usize, k: usize) -> Result<usize, ListError> {
    if n == 0 {
        return Err(ListError::InvalidArgument("n must be at least 1"));
    }
    let mut list = CircularList::numbered(n);
    let sequence = list.josephus_sequence(k)?;
    sequence
        .last()
        .copied()
        .ok_or(ListError::InvalidArgument("n must be at least 1"))
}

impl CircularList<usize> {
    /// 1..=nを順に並べた環
    pub fn numbered(n: usize) -> Self {
        (1..=n).collect()
    }
}

impl<T> Drop for CircularList<T> {
    fn drop(&mut self) {
        self.tail = None;
        let mut p = self.head.take();
        for _ in 0..self.n {
            let Some(rc) = p else { break };
            p = rc.borrow_mut().next.take();
        }
    }
}

impl<T> Default for CircularList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for CircularList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for x in iter {
            list.append(x);
        }
        list
    }
}

impl<T: Display> Display for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut p = self.head.clone();
        for k in 0..self.n {
            let Some(rc) = p else { break };
            if k > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", rc.borrow().x)?;
            p = next_of(&rc);
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for CircularList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut p = self.head.clone();
        for _ in 0..self.n {
            let Some(rc) = p else { break };
            list.entry(&rc.borrow().x);
            p = next_of(&rc);
        }
        list.finish()
    }
}
