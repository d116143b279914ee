pub mod storage;
pub mod store;
pub mod types;

pub use storage::{get_history_path, load_history, save_history};
pub use store::{HistoryStore, JsonHistoryStore};
pub use types::{HistoryRecord, RentHistory};
