pub mod collection;
pub mod cursor;
pub mod suggestion;
pub mod trigger;

pub use collection::Collection;
pub use cursor::PageCursor;
pub use suggestion::Suggestion;
pub use trigger::FetchTrigger;
