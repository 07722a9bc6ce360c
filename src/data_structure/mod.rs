pub mod array_list;
pub mod circular_list;
pub mod dl_list;
