pub mod storage;
pub mod store;

pub use storage::{
    FileSessionStorage, MemorySessionStorage, PersistedSession, SessionStorage, StorageError,
    SESSION_FILE_PATH,
};
pub use store::{AuthSession, SessionState, SessionStore};
