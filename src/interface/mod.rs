pub mod clone_list;
pub mod list;
