//! Scratch variables shared by generated statements.
//!
//! One-off helpers (`font`, `palette`, `brush`, ...) are declared the first
//! time they are needed and reassigned afterwards. Tree items need one
//! variable per live nesting level, so they come from a pool of
//! `treeItemN` slots that are reused once a subtree is fully emitted.

use std::collections::BTreeSet;

/// A reusable local declared at most once per `SetupUI`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HelperTemp {
    Font,
    Palette,
    Brush,
    SizePolicy,
    ListItem,
    TableItem,
    Icon,
}

impl HelperTemp {
    pub fn var_name(self) -> &'static str {
        match self {
            HelperTemp::Font => "font",
            HelperTemp::Palette => "palette",
            HelperTemp::Brush => "brush",
            HelperTemp::SizePolicy => "sizePolicy",
            HelperTemp::ListItem => "listItem",
            HelperTemp::TableItem => "tableItem",
            HelperTemp::Icon => "icon",
        }
    }

    /// Go subpackage declaring the helper's type.
    pub fn package(self) -> &'static str {
        match self {
            HelperTemp::Font | HelperTemp::Palette | HelperTemp::Brush | HelperTemp::Icon => "gui",
            HelperTemp::SizePolicy | HelperTemp::ListItem | HelperTemp::TableItem => "widgets",
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            HelperTemp::Font => "QFont",
            HelperTemp::Palette => "QPalette",
            HelperTemp::Brush => "QBrush",
            HelperTemp::SizePolicy => "QSizePolicy",
            HelperTemp::ListItem => "QListWidgetItem",
            HelperTemp::TableItem => "QTableWidgetItem",
            HelperTemp::Icon => "QIcon",
        }
    }

    pub fn declaration(self) -> String {
        format!(
            "var {} *{}.{}",
            self.var_name(),
            self.package(),
            self.type_name()
        )
    }
}

/// Which helpers have been declared so far.
#[derive(Debug, Default)]
pub struct HelperTemps {
    declared: BTreeSet<HelperTemp>,
    sorting_enabled: bool,
}

impl HelperTemps {
    /// Returns true the first time `temp` is requested.
    pub fn declare(&mut self, temp: HelperTemp) -> bool {
        self.declared.insert(temp)
    }

    /// `sortingEnabled` lives in `RetranslateUi`, not `SetupUI`.
    pub fn declare_sorting_enabled(&mut self) -> bool {
        !std::mem::replace(&mut self.sorting_enabled, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
    Acquire(String),
    Release(String),
}

/// Free list of `treeItemN` variables.
///
/// Misuse (releasing a slot that was never handed out, or releasing it
/// twice) means the emitter paired its calls wrongly and panics.
#[derive(Debug, Default)]
pub struct TreeItemPool {
    in_use: Vec<bool>,
    log: Vec<PoolEvent>,
}

impl TreeItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the lowest free slot, or a new one.
    ///
    /// The flag is true when the slot is new and its variable still has to
    /// be declared.
    pub fn acquire(&mut self) -> (String, bool) {
        let (index, fresh) = match self.in_use.iter().position(|used| !used) {
            Some(index) => {
                self.in_use[index] = true;
                (index, false)
            }
            None => {
                self.in_use.push(true);
                (self.in_use.len() - 1, true)
            }
        };

        let name = slot_name(index);
        self.log.push(PoolEvent::Acquire(name.clone()));
        (name, fresh)
    }

    pub fn release(&mut self, name: &str) {
        let index = name
            .strip_prefix("treeItem")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .filter(|&i| i < self.in_use.len());

        let Some(index) = index else {
            panic!("release of unknown tree item variable {name}");
        };
        if !self.in_use[index] {
            panic!("tree item variable {name} released twice");
        }

        self.in_use[index] = false;
        self.log.push(PoolEvent::Release(name.to_string()));
    }

    /// Number of slots ever declared.
    pub fn len(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }

    pub fn in_use(&self) -> usize {
        self.in_use.iter().filter(|used| **used).count()
    }

    /// Every acquire and release, in call order.
    pub fn log(&self) -> &[PoolEvent] {
        &self.log
    }
}

fn slot_name(index: usize) -> String {
    format!("treeItem{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_helper_declared_once() {
        let mut temps = HelperTemps::default();
        assert!(temps.declare(HelperTemp::Font));
        assert!(!temps.declare(HelperTemp::Font));
        assert!(temps.declare(HelperTemp::Brush));
        assert!(!temps.declare(HelperTemp::Brush));
    }

    #[test]
    fn test_sorting_enabled_declared_once() {
        let mut temps = HelperTemps::default();
        assert!(temps.declare_sorting_enabled());
        assert!(!temps.declare_sorting_enabled());
    }

    #[test]
    fn test_helper_declarations() {
        assert_eq!(HelperTemp::Font.declaration(), "var font *gui.QFont");
        assert_eq!(
            HelperTemp::SizePolicy.declaration(),
            "var sizePolicy *widgets.QSizePolicy"
        );
        assert_eq!(
            HelperTemp::TableItem.declaration(),
            "var tableItem *widgets.QTableWidgetItem"
        );
    }

    #[test]
    fn test_pool_reuses_lowest_free_slot() {
        let mut pool = TreeItemPool::new();
        assert_eq!(pool.acquire(), ("treeItem1".to_string(), true));
        assert_eq!(pool.acquire(), ("treeItem2".to_string(), true));
        pool.release("treeItem1");
        assert_eq!(pool.acquire(), ("treeItem1".to_string(), false));
        assert_eq!(pool.acquire(), ("treeItem3".to_string(), true));
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn test_pool_log() {
        let mut pool = TreeItemPool::new();
        let (a, _) = pool.acquire();
        pool.release(&a);
        assert_eq!(
            pool.log(),
            &[
                PoolEvent::Acquire("treeItem1".into()),
                PoolEvent::Release("treeItem1".into()),
            ]
        );
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn test_double_release_panics() {
        let mut pool = TreeItemPool::new();
        let (a, _) = pool.acquire();
        pool.release(&a);
        pool.release(&a);
    }

    #[test]
    #[should_panic(expected = "unknown tree item")]
    fn test_release_never_acquired_panics() {
        let mut pool = TreeItemPool::new();
        pool.release("treeItem1");
    }

    #[test]
    #[should_panic(expected = "unknown tree item")]
    fn test_release_foreign_name_panics() {
        let mut pool = TreeItemPool::new();
        pool.acquire();
        pool.release("font");
    }
}
