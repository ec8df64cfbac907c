/*!
 * Shared test fixtures
 */

use release_guard::dispatch_table;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

/// Object with a `cleanup` release operation and a few forwardable ones
pub struct Greeter {
    pub cleaned: Rc<Cell<bool>>,
    pub cleanups: Rc<Cell<usize>>,
    pub name: String,
}

impl Greeter {
    pub fn new() -> Self {
        Self {
            cleaned: Rc::new(Cell::new(false)),
            cleanups: Rc::new(Cell::new(0)),
            name: "greeter".to_string(),
        }
    }

    fn greet(&self) -> String {
        "hi".to_string()
    }

    fn greet_name(&self, name: String) -> String {
        format!("hi {name}")
    }

    fn add(&self, x: i64, y: i64) -> i64 {
        x + y
    }

    fn rename(&mut self, name: String) {
        self.name = name;
    }

    fn widen(&self, span: Span, by: u32) -> Span {
        Span {
            start: span.start,
            len: span.len + by,
        }
    }

    fn parse(&self, text: String) -> Result<u16, std::num::ParseIntError> {
        text.parse()
    }

    fn cleanup(&mut self) {
        self.cleaned.set(true);
        self.cleanups.set(self.cleanups.get() + 1);
    }
}

dispatch_table! {
    Greeter as "Greeter", "Named" {
        fn greet();
        fn greet_name(name: String);
        fn add(x: i64, y: i64);
        fn rename(name: String);
        fn widen(span: Span, by: u32);
        #[fallible] fn parse(text: String);
        fn cleanup();
    }
}
