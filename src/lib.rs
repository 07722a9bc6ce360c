//! 線形コンテナ3種
//!
//! - [`ArrayList`](data_structure::array_list::ArrayList): 可変長配列によるリスト
//! - [`DLList`](data_structure::dl_list::DLList): 双方向連結リスト
//! - [`CircularList`](data_structure::circular_list::CircularList): 循環双方向連結リスト(ヨセフス問題)
pub mod data_structure;
pub mod error;
pub mod interface;

pub use error::ListError;
