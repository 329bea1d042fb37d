use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::item::{ItemPatch, ShoppingListItem, ValidationError};

/// How many fresh ids `create` draws before giving up
const MAX_ID_ATTEMPTS: usize = 16;

/// Errors returned by store operations
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("ShoppingListItem not found")]
    NotFound { id: String },

    #[error("item id {id} is already in use")]
    DuplicateId { id: String },

    #[error("no unused item id after {attempts} attempts")]
    IdGeneration { attempts: usize },

    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

impl Error {
    /// Map this error to an HTTP status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::NotFound { .. } => 404,
            Error::DuplicateId { .. } | Error::IdGeneration { .. } | Error::LockPoisoned(_) => 500,
        }
    }
}

/// Source of identifiers for newly created items
///
/// `seq` is the store's insertion sequence number. It never repeats within
/// a store, so a generator that encodes it never hands out an id twice.
pub trait IdGenerator: Send + Sync {
    fn generate(&self, seq: u64) -> String;
}

/// UUID v4 identifiers whose low 62 bits carry the insertion sequence
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

/// RFC 4122 variant bits (`10`) at the top of the low half
const UUID_VARIANT: u64 = 0b10 << 62;
const UUID_SEQ_MASK: u64 = u64::MAX >> 2;

impl IdGenerator for UuidGenerator {
    fn generate(&self, seq: u64) -> String {
        let (random, _) = Uuid::new_v4().as_u64_pair();
        Uuid::from_u64_pair(random, UUID_VARIANT | (seq & UUID_SEQ_MASK)).to_string()
    }
}

struct Entry {
    /// Insertion sequence, used to keep listing order stable
    seq: u64,
    item: ShoppingListItem,
}

#[derive(Default)]
struct State {
    items: HashMap<String, Entry>,
    next_seq: u64,
}

impl State {
    fn insert(&mut self, id: String, item: ShoppingListItem) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.insert(id, Entry { seq, item });
    }
}

/// In-memory shopping list store
///
/// Every operation takes the lock once, so readers never observe a
/// partially applied write.
pub struct ItemStore {
    state: RwLock<State>,
    ids: Box<dyn IdGenerator>,
}

impl ItemStore {
    /// Create a new empty store handing out UUID v4 ids
    pub fn new() -> Self {
        Self::with_id_generator(UuidGenerator)
    }

    /// Create a new empty store with a custom id source
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            state: RwLock::new(State::default()),
            ids: Box::new(ids),
        }
    }

    fn read(&self, op: &'static str) -> Result<RwLockReadGuard<'_, State>, Error> {
        self.state.read().map_err(|_| Error::LockPoisoned(op))
    }

    fn write(&self, op: &'static str) -> Result<RwLockWriteGuard<'_, State>, Error> {
        self.state.write().map_err(|_| Error::LockPoisoned(op))
    }

    /// Insert an item under a caller-chosen id (startup seeding)
    pub fn seed(&self, id: impl Into<String>, item: ShoppingListItem) -> Result<(), Error> {
        let id = id.into();
        let mut state = self.write("seed")?;
        if state.items.contains_key(&id) {
            return Err(Error::DuplicateId { id });
        }
        debug!("Seeding item {}: {:?}", id, item);
        state.insert(id, item);
        Ok(())
    }

    /// Number of items currently stored
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.read("len")?.items.len())
    }

    /// All items in insertion order
    pub fn list_all(&self) -> Result<Vec<(String, ShoppingListItem)>, Error> {
        let state = self.read("list")?;
        let mut entries: Vec<_> = state.items.iter().collect();
        entries.sort_by_key(|(_, entry)| entry.seq);
        Ok(entries
            .into_iter()
            .map(|(id, entry)| (id.clone(), entry.item.clone()))
            .collect())
    }

    /// Remove every item
    pub fn clear_all(&self) -> Result<(), Error> {
        let mut state = self.write("clear")?;
        debug!("Cleared {} items", state.items.len());
        state.items.clear();
        Ok(())
    }

    /// Store a new item under a freshly generated id and return that id.
    ///
    /// The count is stored as given; range checks apply to updates only.
    /// A generated id that clashes with a live item (such as a seeded one)
    /// is drawn again.
    pub fn create(&self, item: ShoppingListItem) -> Result<String, Error> {
        let mut state = self.write("create")?;
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate(state.next_seq);
            if state.items.contains_key(&id) {
                debug!("Generated id {} is taken, retrying", id);
                continue;
            }
            debug!("Creating item {}: {:?}", id, item);
            state.insert(id.clone(), item);
            return Ok(id);
        }
        Err(Error::IdGeneration {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Get the item stored under `id`
    pub fn get(&self, id: &str) -> Result<ShoppingListItem, Error> {
        let state = self.read("get")?;
        state
            .items
            .get(id)
            .map(|entry| entry.item.clone())
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    /// Merge `patch` into the item stored under `id`
    pub fn update(&self, id: &str, patch: &ItemPatch) -> Result<String, Error> {
        patch.validate()?;

        let mut state = self.write("update")?;
        let entry = state
            .items
            .get_mut(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })?;
        entry.item = patch.apply(&entry.item);
        debug!("Updated item {}: {:?}", id, entry.item);
        Ok(id.to_string())
    }

    /// Remove the item stored under `id`, returning whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, Error> {
        let mut state = self.write("delete")?;
        match state.items.remove(id) {
            Some(_) => {
                debug!("Deleted item {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}
