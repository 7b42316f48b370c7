//! Current-operation slot shared by all requests

use crate::ops::Operation;
use parking_lot::RwLock;

/// Holds the operation picked in the sidebar, if any
#[derive(Debug, Default)]
pub struct MenuState {
    current: RwLock<Option<Operation>>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` the active one, replacing any previous choice
    pub fn select(&self, operation: Operation) {
        *self.current.write() = Some(operation);
    }

    /// Return to the menu
    pub fn back(&self) {
        *self.current.write() = None;
    }

    pub fn current(&self) -> Option<Operation> {
        *self.current.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces_and_back_clears() {
        let menu = MenuState::new();
        assert_eq!(menu.current(), None);

        menu.select(Operation::MergePdfs);
        menu.select(Operation::SplitPdf);
        assert_eq!(menu.current(), Some(Operation::SplitPdf));

        menu.back();
        assert_eq!(menu.current(), None);
    }
}
