//! Typed key/value store contract.

/// Typed key/value operations used by generated settings classes.
///
/// Writes may be staged; they are only guaranteed to be persisted after [`PrefStore::commit`].
pub trait PrefStore {
    fn get_string(&self, key: &str, default: &str) -> String;
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_float(&self, key: &str, default: f32) -> f32;
    fn get_double(&self, key: &str, default: f64) -> f64;
    fn get_long(&self, key: &str, default: i64) -> i64;

    fn put_string(&mut self, key: &str, value: String);
    fn put_int(&mut self, key: &str, value: i32);
    fn put_bool(&mut self, key: &str, value: bool);
    fn put_float(&mut self, key: &str, value: f32);
    fn put_long(&mut self, key: &str, value: i64);

    /// Remove a key so later reads fall back to their default.
    fn remove(&mut self, key: &str);

    /// Persist every staged write and removal.
    fn commit(&mut self);
}

/// Opaque context that hands out stores scoped by a store-file key.
///
/// Generated classes built without injection take a `&dyn StoreContext` in their constructor.
pub trait StoreContext {
    /// Open (or create) the store named by `file_key`.
    fn open_store(&self, file_key: &str) -> Box<dyn PrefStore>;
}
