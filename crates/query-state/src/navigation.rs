//! Navigation collaborator: the single source and sink of the URL.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use query_state_codec::{join_href, split_href, RawParams};
use serde::{Deserialize, Serialize};

/// Reads the current location and accepts new ones.
///
/// The store never caches what it reads here; every operation asks again.
pub trait Navigator {
    fn current_path(&self) -> String;

    fn current_params(&self) -> RawParams;

    /// Navigates, adding a history entry.
    fn push(&self, path: &str, query: &RawParams);

    /// Navigates in place. Navigators without history fall back to `push`.
    fn replace(&self, path: &str, query: &RawParams) {
        self.push(path, query);
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn current_path(&self) -> String {
        (**self).current_path()
    }
    fn current_params(&self) -> RawParams {
        (**self).current_params()
    }
    fn push(&self, path: &str, query: &RawParams) {
        (**self).push(path, query)
    }
    fn replace(&self, path: &str, query: &RawParams) {
        (**self).replace(path, query)
    }
}

impl<N: Navigator + ?Sized> Navigator for Rc<N> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }
    fn current_params(&self) -> RawParams {
        (**self).current_params()
    }
    fn push(&self, path: &str, query: &RawParams) {
        (**self).push(path, query)
    }
    fn replace(&self, path: &str, query: &RawParams) {
        (**self).replace(path, query)
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn current_path(&self) -> String {
        (**self).current_path()
    }
    fn current_params(&self) -> RawParams {
        (**self).current_params()
    }
    fn push(&self, path: &str, query: &RawParams) {
        (**self).push(path, query)
    }
    fn replace(&self, path: &str, query: &RawParams) {
        (**self).replace(path, query)
    }
}

/// Which navigator call a mutation goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    #[default]
    Push,
    Replace,
}

/// One navigation recorded by [`MemoryNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub mode: HistoryMode,
    pub href: String,
}

#[derive(Debug)]
struct Location {
    path: String,
    params: RawParams,
}

/// In-memory navigator for headless use and tests.
#[derive(Debug)]
pub struct MemoryNavigator {
    location: RefCell<Location>,
    transitions: RefCell<Vec<Transition>>,
}

impl MemoryNavigator {
    /// Starts at `href`, e.g. `"/products?page=2"`.
    pub fn new(href: &str) -> Self {
        let (path, params) = split_href(href);
        Self {
            location: RefCell::new(Location {
                path: path.to_string(),
                params,
            }),
            transitions: RefCell::new(Vec::new()),
        }
    }

    pub fn href(&self) -> String {
        let location = self.location.borrow();
        join_href(&location.path, &location.params)
    }

    pub fn transitions(&self) -> Vec<Transition> {
        self.transitions.borrow().clone()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.borrow().len()
    }

    fn navigate(&self, mode: HistoryMode, path: &str, query: &RawParams) {
        let href = join_href(path, query);
        *self.location.borrow_mut() = Location {
            path: path.to_string(),
            params: query.clone(),
        };
        self.transitions.borrow_mut().push(Transition { mode, href });
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.location.borrow().path.clone()
    }

    fn current_params(&self) -> RawParams {
        self.location.borrow().params.clone()
    }

    fn push(&self, path: &str, query: &RawParams) {
        self.navigate(HistoryMode::Push, path, query);
    }

    fn replace(&self, path: &str, query: &RawParams) {
        self.navigate(HistoryMode::Replace, path, query);
    }
}
