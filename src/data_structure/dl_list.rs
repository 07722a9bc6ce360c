use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::{Rc, Weak};

use log::trace;

use crate::error::ListError;
use crate::interface::clone_list::CloneList;

type StrongLink<T> = Rc<RefCell<Node<T>>>;
type WeakLink<T> = Weak<RefCell<Node<T>>>;

/// nextがノードを所有し、prevは弱参照で辿るだけ
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

fn prev_of<T>(rc: &StrongLink<T>) -> Option<StrongLink<T>> {
    rc.borrow().prev.as_ref().and_then(Weak::upgrade)
}

/// 双方向連結リスト
///
/// headからnextを辿ってノードを所有する。tailとprevは所有しない
/// append(x), push_front(x)はO(1)、get(i), add(i,x), remove(i)はO(1 + min(i, n-i))
pub struct DLList<T> {
    head: Option<StrongLink<T>>,
    tail: Option<WeakLink<T>>,
    n: usize,
}

impl<T> DLList<T> {
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

    /// tailの後ろにxを追加する
    pub fn append(&mut self, x: T) {
        let u = Node::new_link(x);
        match self.tail.as_ref().and_then(Weak::upgrade) {
            Some(last) => {
                u.borrow_mut().prev = Some(Rc::downgrade(&last));
                last.borrow_mut().next = Some(Rc::clone(&u));
            }
            None => self.head = Some(Rc::clone(&u)),
        }
        self.tail = Some(Rc::downgrade(&u));
        self.n += 1;
    }

    /// xを新しいheadにする
    pub fn push_front(&mut self, x: T) {
        let u = Node::new_link(x);
        match self.head.take() {
            Some(first) => {
                first.borrow_mut().prev = Some(Rc::downgrade(&u));
                u.borrow_mut().next = Some(first);
            }
            None => self.tail = Some(Rc::downgrade(&u)),
        }
        self.head = Some(u);
        self.n += 1;
    }

    /// xをi番目に挿入する。`add(i, x)`と同じ
    pub fn insert(&mut self, i: usize, x: T) -> Result<(), ListError> {
        ListError::check_position(i, self.n)?;
        trace!("insert at index {} (size {})", i, self.n);
        if i == 0 {
            self.push_front(x);
        } else if i == self.n {
            self.append(x);
        } else {
            let w = self.get_link(i)?;
            self.add_before(&w, x);
        }
        Ok(())
    }

    /// i番目のノードを返す
    ///
    /// 範囲外なら辿り始める前にエラーを返す。headとtailのうち近い方から辿る
    fn get_link(&self, i: usize) -> Result<StrongLink<T>, ListError> {
        ListError::check_index(i, self.n)?;
        let mut p;
        if i < self.n / 2 {
            p = self.head.clone();
            for _ in 0..i {
                p = p.as_ref().and_then(next_of);
            }
        } else {
            p = self.tail.as_ref().and_then(Weak::upgrade);
            for _ in i + 1..self.n {
                p = p.as_ref().and_then(prev_of);
            }
        }
        p.ok_or(ListError::IndexOutOfRange {
            index: i,
            size: self.n,
        })
    }

    /// wの直前にxを持つノードを繋ぐ。wはheadではない
    fn add_before(&mut self, w: &StrongLink<T>, x: T) {
        let u = Node::new_link(x);
        if let Some(p) = prev_of(w) {
            u.borrow_mut().prev = Some(Rc::downgrade(&p));
            p.borrow_mut().next = Some(Rc::clone(&u));
        }
        u.borrow_mut().next = Some(Rc::clone(w));
        w.borrow_mut().prev = Some(Rc::downgrade(&u));
        self.n += 1;
    }

    /// wを前後から切り離す。head, tailも付け替える
    fn remove_node(&mut self, w: &StrongLink<T>) {
        let prev = w.borrow_mut().prev.take().and_then(|weak| weak.upgrade());
        let next = w.borrow_mut().next.take();
        match &next {
            Some(nx) => nx.borrow_mut().prev = prev.as_ref().map(Rc::downgrade),
            None => self.tail = prev.as_ref().map(Rc::downgrade),
        }
        match prev {
            Some(p) => p.borrow_mut().next = next,
            None => self.head = next,
        }
        self.n -= 1;
    }
}

impl<T: Clone> DLList<T> {
    /// 先頭から順に値を複製して返す
    pub fn to_vec(&self) -> Vec<T> {
        let mut v = Vec::with_capacity(self.n);
        let mut p = self.head.clone();
        while let Some(rc) = p {
            v.push(rc.borrow().x.clone());
            p = next_of(&rc);
        }
        v
    }
}

impl<T: Clone> CloneList<T> for DLList<T> {
    fn size(&self) -> usize {
        self.n
    }

    fn get(&self, i: usize) -> Result<T, ListError> {
        let node = self.get_link(i)?;
        let x = node.borrow().x.clone();
        Ok(x)
    }

    fn set(&mut self, i: usize, x: T) -> Result<T, ListError> {
        let node = self.get_link(i)?;
        let y = std::mem::replace(&mut node.borrow_mut().x, x);
        Ok(y)
    }

    fn add(&mut self, i: usize, x: T) -> Result<(), ListError> {
        self.insert(i, x)
    }

    fn remove(&mut self, i: usize) -> Result<T, ListError> {
        let node = self.get_link(i)?;
        trace!("remove index {} (size {})", i, self.n);
        self.remove_node(&node);
        let x = node.borrow().x.clone();
        Ok(x)
    }
}

// 再帰的なdropで長いリストがスタックを溢れさせないよう、先頭から1つずつ外す
impl<T> Drop for DLList<T> {
    fn drop(&mut self) {
        self.tail = None;
        let mut p = self.head.take();
        while let Some(rc) = p {
            p = rc.borrow_mut().next.take();
        }
    }
}

impl<T> Default for DLList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for DLList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for x in iter {
            list.append(x);
        }
        list
    }
}

impl<T> From<Vec<T>> for DLList<T> {
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<T: Display> Display for DLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        let mut p = self.head.clone();
        let mut first = true;
        while let Some(rc) = p {
            if !first {
                write!(f, ",")?;
            }
            first = false;
            write!(f, "{}", rc.borrow().x)?;
            p = next_of(&rc);
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for DLList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut p = self.head.clone();
        while let Some(rc) = p {
            list.entry(&rc.borrow().x);
            p = next_of(&rc);
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    /// nextを辿った列とprevを逆に辿った列が一致し、長さがnであること
    fn check_links<T: Clone + PartialEq + fmt::Debug>(list: &DLList<T>) {
        assert_eq!(list.head.is_none(), list.n == 0);
        assert_eq!(list.tail.is_none(), list.n == 0);

        let forward = list.to_vec();
        assert_eq!(forward.len(), list.n);

        let mut backward = vec![];
        let mut p = list.tail.as_ref().and_then(Weak::upgrade);
        while let Some(rc) = p {
            backward.push(rc.borrow().x.clone());
            p = prev_of(&rc);
        }
        backward.reverse();
        assert_eq!(forward, backward);

        if let Some(last) = list.tail.as_ref().and_then(Weak::upgrade) {
            assert!(last.borrow().next.is_none());
        }
    }

    #[test]
    fn test_append() {
        let mut list = DLList::new();
        for x in 1..=6 {
            list.append(x);
        }
        assert_eq!(list.to_string(), "[1,2,3,4,5,6]");
        check_links(&list);

        list.insert(4, 9).unwrap();
        assert_eq!(list.to_string(), "[1,2,3,4,9,5,6]");
        list.insert(0, 420).unwrap();
        assert_eq!(list.to_string(), "[420,1,2,3,4,9,5,6]");
        list.remove(2).unwrap();
        assert_eq!(list.to_string(), "[420,1,3,4,9,5,6]");
        assert_eq!(list.pop_at(1), Ok(1));
        assert_eq!(list.pop(), Ok(6));
        assert_eq!(list.to_string(), "[420,3,4,9,5]");
        check_links(&list);
    }

    #[test]
    fn test_from_vec() {
        let mut list = DLList::from(vec![1, 2, 3, 4, 5]);
        check_links(&list);
        list.append(6);
        list.insert(3, 23).unwrap();
        list.insert(0, 69).unwrap();
        assert_eq!(list.pop(), Ok(6));
        assert_eq!(list.pop_at(2), Ok(2));
        assert_eq!(list.remove(3), Ok(23));
        assert_eq!(list.to_string(), "[69,1,3,4,5]");
        assert_eq!(list.size(), 5);
        check_links(&list);
    }

    #[test]
    fn test_push_front() {
        let mut list = DLList::new();
        for x in "abc".chars() {
            list.push_front(x);
        }
        assert_eq!(list.to_vec(), vec!['c', 'b', 'a']);
        check_links(&list);
    }

    #[test]
    fn test_get() {
        let list: DLList<usize> = (0..7).map(|i| i * 10).collect();
        for i in 0..7 {
            assert_eq!(list.get(i), Ok(i * 10));
        }
        assert_eq!(
            list.get(7),
            Err(ListError::IndexOutOfRange { index: 7, size: 7 })
        );

        let empty: DLList<usize> = DLList::new();
        assert!(empty.get(0).is_err());
        assert_eq!(empty.to_string(), "[]");
    }

    #[test]
    fn test_set() {
        let mut list = DLList::from(vec![1, 2, 3]);
        assert_eq!(list.set(2, 30), Ok(3));
        assert_eq!(list.set(0, 10), Ok(1));
        assert!(list.set(3, 0).is_err());
        assert_eq!(list.to_string(), "[10,2,30]");
    }

    #[test]
    fn test_out_of_range_leaves_list_untouched() {
        let mut list = DLList::from(vec![1, 2, 3]);
        assert_eq!(
            list.remove(3),
            Err(ListError::IndexOutOfRange { index: 3, size: 3 })
        );
        assert!(list.insert(4, 0).is_err());
        assert_eq!(list.to_string(), "[1,2,3]");
        check_links(&list);

        let mut empty: DLList<i32> = DLList::new();
        assert!(empty.remove(0).is_err());
        assert!(empty.pop().is_err());
        check_links(&empty);
    }

    #[test]
    fn test_remove_ends() {
        let mut list = DLList::from(vec![1, 2, 3]);
        assert_eq!(list.remove(0), Ok(1));
        check_links(&list);
        assert_eq!(list.remove(1), Ok(3));
        check_links(&list);
        assert_eq!(list.remove(0), Ok(2));
        check_links(&list);
        assert!(list.is_empty());

        list.append(7);
        assert_eq!(list.to_string(), "[7]");
        check_links(&list);
    }

    #[test]
    fn test_insert_remove_inverse() {
        let base = vec![4, 8, 15, 16, 23];
        for i in 0..=base.len() {
            let mut list = DLList::from(base.clone());
            list.insert(i, 42).unwrap();
            check_links(&list);
            assert_eq!(list.get(i), Ok(42));
            assert_eq!(list.remove(i), Ok(42));
            assert_eq!(list.to_vec(), base);
            check_links(&list);
        }

        let mut list = DLList::new();
        list.insert(0, 1).unwrap();
        list.remove(0).unwrap();
        check_links(&list);
    }

    #[test]
    fn test_nodes_are_freed() {
        let marker = Rc::new(());
        let mut list: DLList<Rc<()>> = (0..5).map(|_| Rc::clone(&marker)).collect();
        assert_eq!(Rc::strong_count(&marker), 6);
        list.remove(2).unwrap();
        assert_eq!(Rc::strong_count(&marker), 5);
        drop(list);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn test_drop_long_list() {
        let list: DLList<u32> = (0..200_000).collect();
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn test_debug() {
        let list = DLList::from(vec!["a", "b"]);
        assert_eq!(format!("{:?}", list), r#"["a", "b"]"#);
    }
}
