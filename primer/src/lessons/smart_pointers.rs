//! 힙 소유권과 공유 소유권
//!
//! `Box` 는 힙 값을 소유하고 `Rc` 는 한 스레드에서 공유 소유자를 센다.
//! `RefCell` 은 빌림 검사를 런타임으로 미루고 `Weak` 는 순환을 끊는다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::cell::RefCell;
use std::ops::Deref;
use std::rc::{Rc, Weak};

pub struct SmartPointers;

/// 재귀 타입. `Box` 덕에 크기가 정해진다.
#[derive(Debug)]
pub enum List {
    Cons(i32, Box<List>),
    Nil,
}

impl List {
    pub fn from_slice(values: &[i32]) -> List {
        values
            .iter()
            .rev()
            .fold(List::Nil, |tail, v| List::Cons(*v, Box::new(tail)))
    }

    pub fn sum(&self) -> i32 {
        match self {
            List::Cons(value, rest) => value + rest.sum(),
            List::Nil => 0,
        }
    }
}

pub struct MyBox<T>(T);

impl<T> MyBox<T> {
    pub fn new(value: T) -> Self {
        MyBox(value)
    }
}

impl<T> Deref for MyBox<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

pub fn greet(name: &str) -> String {
    format!("hello, {}", name)
}

/// 자기가 drop 된 것을 공유 기록에 남긴다
pub struct ConnectionGuard {
    pub name: String,
    log: Rc<RefCell<Vec<String>>>,
}

impl ConnectionGuard {
    pub fn new(name: &str, log: Rc<RefCell<Vec<String>>>) -> Self {
        log.borrow_mut().push(format!("open {}", name));
        Self {
            name: name.to_string(),
            log,
        }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.log.borrow_mut().push(format!("close {}", self.name));
    }
}

/// 내부 가변성으로 `&self` 뒤에서 메시지를 모은다
#[derive(Default)]
pub struct Outbox {
    sent: RefCell<Vec<String>>,
}

impl Outbox {
    pub fn send(&self, message: &str) {
        self.sent.borrow_mut().push(message.to_string());
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

/// 방 트리: 자식은 소유하고 부모 링크는 약하다
#[derive(Debug)]
pub struct Room {
    pub name: String,
    pub parent: RefCell<Weak<Room>>,
    pub children: RefCell<Vec<Rc<Room>>>,
}

impl Room {
    pub fn new(name: &str) -> Rc<Room> {
        Rc::new(Room {
            name: name.to_string(),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn add_child(parent: &Rc<Room>, child: Rc<Room>) {
        *child.parent.borrow_mut() = Rc::downgrade(parent);
        parent.children.borrow_mut().push(child);
    }

    pub fn parent_name(&self) -> Option<String> {
        self.parent.borrow().upgrade().map(|p| p.name.clone())
    }
}

impl Lesson for SmartPointers {
    fn number(&self) -> u32 {
        12
    }

    fn slug(&self) -> &'static str {
        "smart_pointers"
    }

    fn title(&self) -> &'static str {
        "Smart pointers"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("std::unique_ptr<T>", "Box<T>"),
            (
                "std::shared_ptr<T> with an atomic count",
                "Rc<T> for one thread, Arc<T> across threads",
            ),
            ("std::weak_ptr<T>", "Weak<T> breaks reference cycles"),
            ("mutable members or const_cast", "RefCell<T> checks borrow rules at runtime"),
            ("destructor", "the Drop trait"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Box<T>");
        let boxed = Box::new(5);
        out.line(format!("Box::new(5) derefs to {}", *boxed));
        let list = List::from_slice(&[1, 2, 3]);
        out.line(format!("{:?} sums to {}", list, list.sum()));

        out.heading("Deref");
        let name = MyBox::new(String::from("ferris"));
        out.line(format!(
            "&MyBox<String> coerces to &str: {}",
            greet(&name)
        ));

        out.heading("Drop");
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _first = ConnectionGuard::new("alice", Rc::clone(&log));
            let second = ConnectionGuard::new("bob", Rc::clone(&log));
            drop(second);
        }
        out.line(format!("drop order: {:?}", log.borrow()));

        out.heading("Rc<T>");
        let shared = Rc::new(String::from("world map"));
        out.line(format!("count after create = {}", Rc::strong_count(&shared)));
        {
            let _a = Rc::clone(&shared);
            let _b = Rc::clone(&shared);
            out.line(format!("count with two clones = {}", Rc::strong_count(&shared)));
        }
        out.line(format!("count after scope = {}", Rc::strong_count(&shared)));

        out.heading("RefCell<T>");
        let outbox = Outbox::default();
        outbox.send("welcome");
        outbox.send("match found");
        out.line(format!("&self send() recorded {} messages", outbox.count()));
        let cell = RefCell::new(1);
        let held = cell.borrow_mut();
        out.line(format!(
            "a second borrow_mut while one is held fails at runtime: try_borrow_mut is_err = {}",
            cell.try_borrow_mut().is_err()
        ));
        drop(held);

        out.heading("Interior mutability with Rc<RefCell<T>>");
        let shared_hp = Rc::new(RefCell::new(100));
        let attacker_view = Rc::clone(&shared_hp);
        *attacker_view.borrow_mut() -= 35;
        out.line(format!("both owners see hp {}", shared_hp.borrow()));

        out.heading("Reference cycles and Weak<T>");
        let lobby = Room::new("lobby");
        let arena = Room::new("arena");
        Room::add_child(&lobby, Rc::clone(&arena));
        out.line(format!(
            "arena's parent = {:?}, lobby strong = {}, weak = {}",
            arena.parent_name(),
            Rc::strong_count(&lobby),
            Rc::weak_count(&lobby)
        ));
        drop(lobby);
        out.line(format!(
            "after dropping lobby the weak link is gone: {:?}",
            arena.parent_name()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sum() {
        assert_eq!(List::from_slice(&[1, 2, 3, 4]).sum(), 10);
        assert_eq!(List::from_slice(&[]).sum(), 0);
    }

    #[test]
    fn test_deref_coercion() {
        let name = MyBox::new(String::from("crab"));
        assert_eq!(greet(&name), "hello, crab");
    }

    #[test]
    fn test_drop_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _a = ConnectionGuard::new("a", Rc::clone(&log));
            let _b = ConnectionGuard::new("b", Rc::clone(&log));
        }
        assert_eq!(
            *log.borrow(),
            vec!["open a", "open b", "close b", "close a"]
        );
    }

    #[test]
    fn test_outbox() {
        let outbox = Outbox::default();
        outbox.send("x");
        assert_eq!(outbox.count(), 1);
    }

    #[test]
    fn test_weak_parent() {
        let parent = Room::new("p");
        let child = Room::new("c");
        Room::add_child(&parent, Rc::clone(&child));
        assert_eq!(child.parent_name(), Some("p".to_string()));
        assert_eq!(Rc::weak_count(&parent), 1);
        drop(parent);
        assert_eq!(child.parent_name(), None);
    }
}
