//! 菜单目录
//!
//! 启动时构建、运行期不可变，所有门店共用同一份菜单。

use shared::models::MenuItem;

use crate::orders::{OrderError, OrderResult};

#[derive(Debug, Clone)]
pub struct MenuCatalog {
    items: Vec<MenuItem>,
}

impl MenuCatalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn list(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> OrderResult<&MenuItem> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| OrderError::MenuItemNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuCatalog {
    /// Kiosk shaved-ice menu
    fn default() -> Self {
        Self::new(vec![
            MenuItem::new(
                "giiku-sai",
                "Festival Strawberry",
                "Strawberry shaved ice inspired by the festival",
            ),
            MenuItem::new(
                "giiku-haku",
                "Expo Melon",
                "Melon shaved ice inspired by the expo",
            ),
            MenuItem::new(
                "giiku-ten",
                "Showcase Blue Hawaii",
                "Blue Hawaii shaved ice inspired by the showcase",
            ),
            MenuItem::new(
                "giiku-camp",
                "Camp Orange",
                "Orange shaved ice inspired by the camp",
            ),
        ])
    }
}
