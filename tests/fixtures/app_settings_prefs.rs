// @generated by prefsgen. Do not edit.

pub struct AppSettingsPrefs {
    store: ::std::boxed::Box<dyn ::prefsgen_runtime::PrefStore>,
}
impl AppSettingsPrefs {
    pub const KEY_APP_SETTINGS_PREFS: &'static str = "com.example.AppSettings.APP_SETTINGS_PREFS";
    const KEY_UNIT_ID: &'static str = "com.example.AppSettings.UNIT_ID";
    const KEY_EXTRA_IN: &'static str = "com.example.AppSettings.EXTRA_IN";
    const KEY_DEVICE_TOKEN: &'static str = "com.example.AppSettings.DEVICE_TOKEN";
    const KEY_ENABLED: &'static str = "com.example.AppSettings.ENABLED";
    const KEY_VOLUME: &'static str = "com.example.AppSettings.VOLUME";
    const KEY_LAST_SYNC: &'static str = "com.example.AppSettings.LAST_SYNC";
    pub fn new(context: &dyn ::prefsgen_runtime::StoreContext) -> Self {
        Self {
            store: context.open_store(Self::KEY_APP_SETTINGS_PREFS),
        }
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
    pub fn set_unit_id(&mut self, value: String) {
        self.put_value(Self::KEY_UNIT_ID, ::prefsgen_runtime::PrefValue::String(value));
    }
    pub fn set_device_token(&mut self, value: String) {
        self.put_value(Self::KEY_DEVICE_TOKEN, ::prefsgen_runtime::PrefValue::String(value));
    }
    pub fn set_enabled(&mut self, value: bool) {
        self.put_value(Self::KEY_ENABLED, ::prefsgen_runtime::PrefValue::Bool(value));
    }
    pub fn set_volume(&mut self, value: f32) {
        self.put_value(Self::KEY_VOLUME, ::prefsgen_runtime::PrefValue::Float(value));
    }
    pub fn set_last_sync(&mut self, value: i64) {
        self.put_value(Self::KEY_LAST_SYNC, ::prefsgen_runtime::PrefValue::Long(value));
    }
}
impl AppSettings for AppSettingsPrefs {
    fn unit_id(&self) -> String {
        self.store.get_string(Self::KEY_UNIT_ID, "unit102")
    }
    fn extra_in(&self) -> i32 {
        self.store.get_int(Self::KEY_EXTRA_IN, 20)
    }
    fn set_extra_in(&mut self, value: i32) {
        self.put_value(Self::KEY_EXTRA_IN, ::prefsgen_runtime::PrefValue::Int(value));
    }
    fn device_token(&self) -> String {
        self.store.get_string(Self::KEY_DEVICE_TOKEN, "")
    }
    fn enabled(&self) -> bool {
        self.store.get_bool(Self::KEY_ENABLED, false)
    }
    fn volume(&self) -> f32 {
        self.store.get_float(Self::KEY_VOLUME, 0.5f32)
    }
    fn last_sync(&self) -> i64 {
        self.store.get_long(Self::KEY_LAST_SYNC, -1i64)
    }
    fn reset(&mut self) {
        self.store.remove(Self::KEY_UNIT_ID);
        self.store.remove(Self::KEY_EXTRA_IN);
        self.store.remove(Self::KEY_ENABLED);
        self.store.remove(Self::KEY_VOLUME);
        self.store.remove(Self::KEY_LAST_SYNC);
        self.store.commit();
    }
}
