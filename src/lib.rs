//! Browser-side enhancements for the employee management pages, running
//! against an in-memory document with a deterministic clock.
//!
//! ```
//! use employee_enhancer::{Page, Result};
//!
//! fn main() -> Result<()> {
//!     let mut page = Page::from_html(
//!         r#"<form action="/employees"><input name="name"><button type="submit">Save</button></form>"#,
//!     )?;
//!     page.type_text("input[name='name']", "A")?;
//!     page.click("button")?;
//!     page.assert_text(".invalid-feedback", "Name must be at least 2 characters")?;
//!     assert!(page.take_form_submissions().is_empty());
//!     Ok(())
//! }
//! ```

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::error::Error as StdError;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    HtmlParse(String),
    Runtime(String),
    SelectorNotFound(String),
    UnsupportedSelector(String),
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlParse(msg) => write!(f, "html parse error: {msg}"),
            Self::Runtime(msg) => write!(f, "runtime error: {msg}"),
            Self::SelectorNotFound(selector) => write!(f, "selector not found: {selector}"),
            Self::UnsupportedSelector(selector) => write!(f, "unsupported selector: {selector}"),
            Self::TypeMismatch {
                selector,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for {selector}: expected {expected}, actual {actual}"
            ),
            Self::AssertionFailed {
                selector,
                expected,
                actual,
                dom_snippet,
            } => write!(
                f,
                "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
            ),
        }
    }
}

impl StdError for Error {}

// Deep documents recurse through the tree walkers.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;
const PAGE_STACK_SIZE: usize = 32 * 1024 * 1024;

mod config;
mod dom;
mod enhancer;
mod events;
mod html;
mod numbers;
mod page;
mod runtime_state;
mod scheduler;
mod selector;
mod toolkit;
pub mod utils;

use dom::*;
use enhancer::*;
use html::*;
use numbers::*;
use page::*;
use runtime_state::*;
use scheduler::*;
use utils::*;

pub use config::{EmployeeRules, EnhancerConfig};
pub use page::Page;
pub use runtime_state::{FormSubmission, LocationNavigation, LocationNavigationKind};
pub use scheduler::PendingTimer;
pub use utils::{
    EmployeeField, NotificationKind, ValidationIssue, employee_issues, format_currency,
    validate_employee,
};

fn truncate_chars(value: &str, max_chars: usize) -> String {
    let mut it = value.chars();
    let mut out = String::new();
    for _ in 0..max_chars {
        let Some(ch) = it.next() else {
            return out;
        };
        out.push(ch);
    }
    if it.next().is_some() {
        out.push_str("...");
    }
    out
}
