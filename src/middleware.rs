pub mod i18n;
pub use i18n::Locale;
