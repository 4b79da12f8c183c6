// @generated by prefsgen. Do not edit.

pub struct SyncedSettingsPrefs {
    store: ::std::boxed::Box<dyn ::prefsgen_runtime::PrefStore>,
}
impl SyncedSettingsPrefs {
    pub const KEY_SYNCED_SETTINGS_PREFS: &'static str = "com.example.SyncedSettings.SYNCED_SETTINGS_PREFS";
    const KEY_RETRIES: &'static str = "com.example.SyncedSettings.RETRIES";
    const KEY_RATIO: &'static str = "com.example.SyncedSettings.RATIO";
    pub fn new() -> ::std::result::Result<Self, ::prefsgen_runtime::InjectError> {
        ::std::result::Result::Ok(Self {
            store: ::prefsgen_runtime::inject(Self::KEY_SYNCED_SETTINGS_PREFS)?,
        })
    }
    pub fn put_value(&mut self, key: &str, value: ::prefsgen_runtime::PrefValue) {
        match value {
            ::prefsgen_runtime::PrefValue::Absent => self.store.remove(key),
            ::prefsgen_runtime::PrefValue::Int(value) => self.store.put_int(key, value),
            ::prefsgen_runtime::PrefValue::Bool(value) => self.store.put_bool(key, value),
            ::prefsgen_runtime::PrefValue::String(value) => self.store.put_string(key, value),
            ::prefsgen_runtime::PrefValue::Long(value) => self.store.put_long(key, value),
            ::prefsgen_runtime::PrefValue::Float(value) => self.store.put_float(key, value),
        }
        self.store.commit();
    }
    pub fn set_retries(&mut self, value: i32) {
        self.put_value(Self::KEY_RETRIES, ::prefsgen_runtime::PrefValue::Int(value));
    }
}
impl SyncedSettings for SyncedSettingsPrefs {
    fn retries(&self) -> i32 {
        self.store.get_int(Self::KEY_RETRIES, 3)
    }
    fn ratio(&self) -> f64 {
        self.store.get_double(Self::KEY_RATIO, -1.0f64)
    }
    fn clear(&mut self) {
        self.store.remove(Self::KEY_RETRIES);
        self.store.remove(Self::KEY_RATIO);
        self.store.commit();
    }
}
