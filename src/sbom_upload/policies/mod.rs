pub mod category_table;

pub use category_table::CategoryTable;
