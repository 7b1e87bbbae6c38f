// Bookmark Hub stores
// Managers own the SQL for bookmarks and the category display order.

pub mod bookmark_manager;
pub mod category_manager;
