/// Settings opened through the process-wide store provider.
#[prefsgen_derive::prefs(use_injected_store = true)]
pub trait SyncedSettings {
    #[default(3)]
    fn retries(&self) -> i32;
    fn ratio(&self) -> f64;
    #[on_reset]
    fn clear(&mut self);
}
