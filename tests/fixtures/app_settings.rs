/// Settings of the demo app.
#[prefsgen_derive::prefs]
pub trait AppSettings {
    #[default("unit102")]
    fn unit_id(&self) -> String;
    #[pref(default = 20, test = 5)]
    fn extra_in(&self) -> i32;
    fn set_extra_in(&mut self, value: i32);
    #[retain]
    fn device_token(&self) -> String;
    fn enabled(&self) -> bool;
    #[default(0.5)]
    fn volume(&self) -> f32;
    fn last_sync(&self) -> i64;
    #[on_reset]
    fn reset(&mut self);
}
